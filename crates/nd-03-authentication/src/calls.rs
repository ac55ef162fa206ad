//! Typed operations served by the authentication manager.
//!
//! `owner()` and `transferOwnership(address)` reuse the ERC-173 call table
//! of the diamond crate.

use serde::{Deserialize, Serialize};
use shared_types::{Address, AuthenticationEntry, ContractCall, U256};

pub use nd_02_diamond::calls::{OwnerCall, TransferOwnershipCall};

/// `register(contractAddress, maxActiveNum)`: owner-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterCall {
    /// Contract trusted from now on.
    pub contract_address: Address,
    /// Accepted children a parent may hold from it without review.
    pub max_active_num: U256,
}

impl ContractCall for RegisterCall {
    const SIGNATURE: &'static str = "register(address,uint256)";
    type Output = ();
}

/// `remove(contractAddress)`: owner-only, idempotent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveCall {
    /// Contract whose registration is cleared.
    pub contract_address: Address,
}

impl ContractCall for RemoveCall {
    const SIGNATURE: &'static str = "remove(address)";
    type Output = ();
}

/// `authenticated(contractAddress)`: readable by anyone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedCall {
    /// Contract queried.
    pub contract_address: Address,
}

impl ContractCall for AuthenticatedCall {
    const SIGNATURE: &'static str = "authenticated(address)";
    type Output = AuthenticationEntry;
}
