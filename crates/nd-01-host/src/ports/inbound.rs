//! # Driving Ports (API - Inbound)

use crate::domain::receipt::Receipt;
use async_trait::async_trait;
use shared_types::{Address, Bytes, ContractError, Message, U256};

/// Async transaction interface of the host.
///
/// Submissions are serialized: each runs to completion before the next
/// starts, so every mutation is a function of the committed state plus the
/// call arguments.
#[async_trait]
pub trait HostApi: Send + Sync {
    /// Executes `msg` as a transaction and publishes its logs on commit.
    ///
    /// # Errors
    ///
    /// Returns the abort reason; nothing is committed or published.
    async fn submit(&self, msg: Message) -> Result<Receipt, ContractError>;

    /// Executes `msg` without committing any effect.
    ///
    /// # Errors
    ///
    /// Returns the abort reason of the call.
    async fn query(&self, msg: Message) -> Result<Bytes, ContractError>;

    /// Current balance of `address`.
    async fn balance(&self, address: Address) -> U256;
}
