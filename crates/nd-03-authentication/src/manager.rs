//! # Authentication Manager Contract
//!
//! A standalone ownable contract wrapping [`AuthenticationRegistry`].
//! Nestable collections query it through `authenticated(address)` to decide
//! whether a child minted by another contract skips the pending queue.

use crate::calls::{AuthenticatedCall, OwnerCall, RegisterCall, RemoveCall, TransferOwnershipCall};
use crate::domain::registry::AuthenticationRegistry;
use shared_types::{
    handle, Address, Bytes, Contract, ContractCall, ContractError, Environment, Event, Message,
    Selector,
};
use tracing::{info, warn};

/// The deployed authentication manager.
#[derive(Clone, Debug)]
pub struct AuthenticationManager {
    address: Address,
    registry: AuthenticationRegistry,
}

impl AuthenticationManager {
    /// Constructs the manager at `address`, owned by `owner`.
    pub fn new(address: Address, env: &mut dyn Environment, owner: Address) -> Self {
        env.emit_event(
            address,
            Event::OwnershipTransferred {
                previous_owner: Address::ZERO,
                new_owner: owner,
            },
        );
        info!(%address, %owner, "Authentication manager constructed");
        Self {
            address,
            registry: AuthenticationRegistry::new(owner),
        }
    }

    /// Address of this contract.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Registry state.
    #[must_use]
    pub fn registry(&self) -> &AuthenticationRegistry {
        &self.registry
    }

    fn register(
        &mut self,
        env: &mut dyn Environment,
        sender: Address,
        call: RegisterCall,
    ) -> Result<(), ContractError> {
        let entry = self
            .registry
            .register(sender, call.contract_address, call.max_active_num)
            .inspect_err(|err| warn!(%sender, %err, "Registration rejected"))?;
        info!(
            contract = %call.contract_address,
            max_active_num = %entry.max_active_num,
            "Contract authenticated"
        );
        env.emit_event(
            self.address,
            Event::ContractAuthenticated {
                contract_address: call.contract_address,
                max_active_num: entry.max_active_num,
            },
        );
        Ok(())
    }

    fn remove(
        &mut self,
        env: &mut dyn Environment,
        sender: Address,
        call: RemoveCall,
    ) -> Result<(), ContractError> {
        self.registry
            .remove(sender, call.contract_address)
            .inspect_err(|err| warn!(%sender, %err, "Removal rejected"))?;
        info!(contract = %call.contract_address, "Authentication removed");
        env.emit_event(
            self.address,
            Event::AuthenticationRemoved {
                contract_address: call.contract_address,
            },
        );
        Ok(())
    }
}

impl Contract for AuthenticationManager {
    fn call(&mut self, env: &mut dyn Environment, msg: &Message) -> Result<Bytes, ContractError> {
        let (selector, args) = Selector::split_calldata(msg.data.as_slice())
            .ok_or_else(|| ContractError::Codec("calldata shorter than a selector".into()))?;
        let sender = msg.sender;

        match selector {
            s if s == RegisterCall::selector() => {
                handle::<RegisterCall, _>(args, |call| self.register(env, sender, call))
            }
            s if s == RemoveCall::selector() => {
                handle::<RemoveCall, _>(args, |call| self.remove(env, sender, call))
            }
            s if s == AuthenticatedCall::selector() => handle::<AuthenticatedCall, _>(args, |call| {
                Ok(self.registry.authenticated(call.contract_address))
            }),
            s if s == OwnerCall::selector() => {
                handle::<OwnerCall, _>(args, |_| Ok(self.registry.owner()))
            }
            s if s == TransferOwnershipCall::selector() => {
                handle::<TransferOwnershipCall, _>(args, |call| {
                    let previous_owner = self.registry.transfer_ownership(sender, call.new_owner)?;
                    env.emit_event(
                        self.address,
                        Event::OwnershipTransferred {
                            previous_owner,
                            new_owner: call.new_owner,
                        },
                    );
                    Ok(())
                })
            }
            other => Err(ContractError::FunctionNotFound(other)),
        }
    }

    fn snapshot(&self) -> Box<dyn Contract> {
        Box::new(self.clone())
    }
}
