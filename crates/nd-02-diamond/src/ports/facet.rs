//! Facet port and execution context.

use crate::domain::storage::DiamondStorage;
use crate::library::FacetLibrary;
use shared_types::{
    Address, Bytes, ContractCall, ContractError, Environment, Event, Message, Selector, U256,
};

/// A unit of logic registered against one or more selectors.
///
/// A facet holds no state of its own. It runs against the storage of
/// whichever diamond dispatched to it, so the same facet code can serve
/// many diamonds.
pub trait Facet<S>: Send + Sync {
    /// Human-readable name, used in logs.
    fn name(&self) -> &'static str;

    /// Selectors this facet implements.
    fn selectors(&self) -> Vec<Selector>;

    /// Executes `selector` with the argument bytes that followed it.
    ///
    /// # Errors
    ///
    /// Any error aborts the enclosing transaction.
    fn execute(
        &self,
        ctx: &mut FacetContext<'_, S>,
        selector: Selector,
        args: &[u8],
    ) -> Result<Bytes, ContractError>;
}

/// Execution context handed to a facet.
pub struct FacetContext<'a, S> {
    /// Address of the diamond whose storage is being used.
    pub this: Address,
    /// The call frame being served.
    pub msg: &'a Message,
    /// The diamond's storage.
    pub storage: &'a mut DiamondStorage<S>,
    /// Host services.
    pub env: &'a mut dyn Environment,
    /// Facet code available to this diamond.
    pub library: &'a FacetLibrary<S>,
}

impl<'a, S> FacetContext<'a, S> {
    /// Immediate caller.
    #[must_use]
    pub fn sender(&self) -> Address {
        self.msg.sender
    }

    /// Value attached to the call.
    #[must_use]
    pub fn value(&self) -> U256 {
        self.msg.value
    }

    /// Application storage.
    #[must_use]
    pub fn app(&self) -> &S {
        &self.storage.app
    }

    /// Mutable application storage.
    pub fn app_mut(&mut self) -> &mut S {
        &mut self.storage.app
    }

    /// Emits `event` from the diamond's address.
    pub fn emit(&mut self, event: Event) {
        self.env.emit_event(self.this, event);
    }

    /// Calls another contract with the diamond as sender.
    ///
    /// # Errors
    ///
    /// Propagates the callee's error.
    pub fn call<C: ContractCall>(
        &mut self,
        to: Address,
        call: &C,
    ) -> Result<C::Output, ContractError> {
        self.env.call_typed(self.this, to, call)
    }

    /// Sends value held by the diamond to `to`.
    ///
    /// # Errors
    ///
    /// Fails if the diamond's balance is too low.
    pub fn transfer(&mut self, to: Address, value: U256) -> Result<(), ContractError> {
        self.env.transfer_value(self.this, to, value)
    }

    /// Fails unless the caller is the registry owner.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::Unauthorized`.
    pub fn enforce_owner(&self) -> Result<(), ContractError> {
        if self.msg.sender != self.storage.registry.owner() {
            return Err(ContractError::unauthorized("must be contract owner"));
        }
        Ok(())
    }

    /// Executes `calldata` against the code of `facet` in this diamond's
    /// storage, the way an initializer runs.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::NoCode` if `facet` is not in the library,
    /// `ContractError::FunctionNotFound` if it does not implement the
    /// selector, or the facet's own error.
    pub fn delegate(&mut self, facet: Address, calldata: &[u8]) -> Result<Bytes, ContractError> {
        let code = self.library.get(facet).ok_or(ContractError::NoCode(facet))?;
        let (selector, args) = Selector::split_calldata(calldata)
            .ok_or_else(|| ContractError::Codec("calldata shorter than a selector".into()))?;
        if !code.selectors().contains(&selector) {
            return Err(ContractError::FunctionNotFound(selector));
        }
        let mut inner = FacetContext {
            this: self.this,
            msg: self.msg,
            storage: &mut *self.storage,
            env: &mut *self.env,
            library: self.library,
        };
        code.execute(&mut inner, selector, args)
    }
}
