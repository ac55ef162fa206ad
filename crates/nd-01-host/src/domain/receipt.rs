//! Transaction receipts.

use shared_types::{Address, Bytes, ContractCall, ContractError, Event, Log};

/// Outcome of a committed transaction.
///
/// Reverted transactions produce no receipt: the caller gets the abort
/// reason instead and no log survives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    /// Raw return data of the outermost call.
    pub output: Bytes,
    /// Logs in emission order.
    pub logs: Vec<Log>,
    /// Address of the created contract, for deployments.
    pub contract_address: Option<Address>,
}

impl Receipt {
    /// Decodes the return data as the output of `C`.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::Codec` if the output does not match `C`.
    pub fn decode<C: ContractCall>(&self) -> Result<C::Output, ContractError> {
        C::decode_output(self.output.as_slice())
    }

    /// Iterates over the emitted events.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.logs.iter().map(|log| &log.event)
    }

    /// Events with the given name, in emission order.
    #[must_use]
    pub fn events_named(&self, name: &str) -> Vec<&Event> {
        self.events().filter(|event| event.name() == name).collect()
    }

    /// Logs emitted by `address`.
    #[must_use]
    pub fn logs_from(&self, address: Address) -> Vec<&Log> {
        self.logs.iter().filter(|log| log.address == address).collect()
    }
}
