//! # Contract Ports
//!
//! The seam between contract logic and the host that runs it.
//!
//! - [`Contract`]: implemented by every deployable contract.
//! - [`Environment`]: implemented by the host; the only way a contract can
//!   reach other contracts, move value, or emit logs.
//!
//! A call either returns `Ok` and commits, or returns `Err` and the host
//! discards every effect of the enclosing transaction.

use crate::abi::ContractCall;
use crate::entities::{Address, Bytes, Message, U256};
use crate::errors::ContractError;
use crate::events::{Event, Log};

/// A deployable contract.
pub trait Contract: Send + Sync {
    /// Executes one call frame against this contract's storage.
    ///
    /// # Errors
    ///
    /// Any error aborts the enclosing transaction.
    fn call(&mut self, env: &mut dyn Environment, msg: &Message) -> Result<Bytes, ContractError>;

    /// Returns an independent copy of the contract's state, used by the host
    /// to restore storage when a transaction reverts.
    fn snapshot(&self) -> Box<dyn Contract>;
}

/// Host services available to an executing contract.
pub trait Environment {
    /// Performs a nested synchronous call. `msg.sender` must be the calling
    /// contract's own address.
    ///
    /// # Errors
    ///
    /// Propagates the callee's error, or a host error (missing code,
    /// re-entrancy, depth, balance).
    fn call(&mut self, msg: Message) -> Result<Bytes, ContractError>;

    /// Buffers a log for the current transaction.
    fn emit(&mut self, log: Log);

    /// Balance of `address`.
    fn balance(&self, address: Address) -> U256;

    /// True if `address` holds contract code.
    fn has_code(&self, address: Address) -> bool;

    /// True if `address` has a frame on the current call stack. A nested
    /// call into such an address fails with `Reentrancy`.
    fn is_executing(&self, address: Address) -> bool;
}

impl dyn Environment + '_ {
    /// Emits `event` on behalf of `address`.
    pub fn emit_event(&mut self, address: Address, event: Event) {
        self.emit(Log::new(address, event));
    }

    /// Calls `to` with a typed operation and decodes its output.
    ///
    /// # Errors
    ///
    /// Propagates encoding, call, and decoding failures.
    pub fn call_typed<C: ContractCall>(
        &mut self,
        sender: Address,
        to: Address,
        call: &C,
    ) -> Result<C::Output, ContractError> {
        let output = self.call(Message::new(sender, to, call.encode()?))?;
        C::decode_output(output.as_slice())
    }

    /// Sends plain value from `sender` to `to` with empty calldata.
    ///
    /// # Errors
    ///
    /// Fails if the sender cannot cover `value` or the recipient contract
    /// has no receive path.
    pub fn transfer_value(
        &mut self,
        sender: Address,
        to: Address,
        value: U256,
    ) -> Result<(), ContractError> {
        self.call(Message::new(sender, to, Bytes::new()).with_value(value))
            .map(|_| ())
    }
}
