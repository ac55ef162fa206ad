//! # Authentication Registry
//!
//! Per-contract state machine: `Unregistered <-> Registered(maxActiveNum)`.
//! Unknown addresses read as unregistered, and `remove` resets an entry to
//! `{authentic: false, maxActiveNum: 0}` whether or not it was registered.

use shared_types::{Address, AuthenticationEntry, ContractError, U256};
use std::collections::HashMap;

/// Revert reason for owner-only operations called by anyone else.
pub const NOT_OWNER: &str = "Ownable: caller is not the owner";

/// Trusted contracts and the owner administering them.
#[derive(Clone, Debug, Default)]
pub struct AuthenticationRegistry {
    owner: Address,
    entries: HashMap<Address, AuthenticationEntry>,
}

impl AuthenticationRegistry {
    /// Empty registry administered by `owner`.
    #[must_use]
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            entries: HashMap::new(),
        }
    }

    /// Current owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Registers `contract_address` as authentic.
    ///
    /// Re-registering overwrites the previous capacity.
    ///
    /// # Errors
    ///
    /// `Unauthorized` unless `caller` is the owner; `InvalidParameter` for a
    /// zero capacity or the zero address.
    pub fn register(
        &mut self,
        caller: Address,
        contract_address: Address,
        max_active_num: U256,
    ) -> Result<AuthenticationEntry, ContractError> {
        self.enforce_owner(caller)?;
        if max_active_num.is_zero() {
            return Err(ContractError::invalid_parameter(
                "max active num should be greater than 0",
            ));
        }
        if contract_address.is_zero() {
            return Err(ContractError::invalid_parameter("invalid contract address"));
        }

        let entry = AuthenticationEntry {
            authentic: true,
            max_active_num,
        };
        self.entries.insert(contract_address, entry);
        Ok(entry)
    }

    /// Clears the entry of `contract_address`.
    ///
    /// # Errors
    ///
    /// `Unauthorized` unless `caller` is the owner.
    pub fn remove(
        &mut self,
        caller: Address,
        contract_address: Address,
    ) -> Result<(), ContractError> {
        self.enforce_owner(caller)?;
        self.entries.remove(&contract_address);
        Ok(())
    }

    /// Entry of `contract_address`; the default entry if never registered.
    #[must_use]
    pub fn authenticated(&self, contract_address: Address) -> AuthenticationEntry {
        self.entries
            .get(&contract_address)
            .copied()
            .unwrap_or_default()
    }

    /// Number of registered contracts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hands ownership to `new_owner` and returns the previous owner.
    ///
    /// # Errors
    ///
    /// `Unauthorized` unless `caller` is the owner; `InvalidParameter` if
    /// `new_owner` is the zero address.
    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<Address, ContractError> {
        self.enforce_owner(caller)?;
        if new_owner.is_zero() {
            return Err(ContractError::invalid_parameter(
                "Ownable: new owner is the zero address",
            ));
        }
        Ok(std::mem::replace(&mut self.owner, new_owner))
    }

    fn enforce_owner(&self, caller: Address) -> Result<(), ContractError> {
        if caller != self.owner {
            return Err(ContractError::unauthorized(NOT_OWNER));
        }
        Ok(())
    }
}
