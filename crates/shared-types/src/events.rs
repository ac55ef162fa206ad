//! # Contract Events
//!
//! Notifications emitted by contracts. Logs are buffered per transaction
//! and only become visible once the transaction commits.

use crate::entities::{Address, Bytes, FacetCut, TokenId, U256};
use serde::{Deserialize, Serialize};

/// Every notification a contract in this workspace can emit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    // =========================================================================
    // DIAMOND
    // =========================================================================
    /// A diamond cut was applied.
    DiamondCut {
        /// Every entry of the batch, with its action.
        cuts: Vec<FacetCut>,
        /// Initializer executed after the cut (zero if none).
        init: Address,
        /// Calldata passed to the initializer.
        calldata: Bytes,
    },

    /// Contract ownership moved.
    OwnershipTransferred {
        /// Previous owner.
        previous_owner: Address,
        /// New owner.
        new_owner: Address,
    },

    // =========================================================================
    // TOKEN OWNERSHIP
    // =========================================================================
    /// Flat ownership transfer (mint when `from` is zero, burn when `to` is zero).
    Transfer {
        /// Previous holder.
        from: Address,
        /// New holder.
        to: Address,
        /// Token moved.
        token_id: TokenId,
    },

    /// Nested ownership transfer between (holder, parent token) pairs.
    NestTransfer {
        /// Previous holder address.
        from: Address,
        /// New holder address.
        to: Address,
        /// Previous parent token (zero if root-owned).
        from_token_id: TokenId,
        /// New parent token (zero if root-owned).
        to_token_id: TokenId,
        /// Token moved.
        token_id: TokenId,
    },

    /// Single-token approval changed.
    Approval {
        /// Token owner.
        owner: Address,
        /// Approved account (zero clears).
        approved: Address,
        /// Token affected.
        token_id: TokenId,
    },

    /// Operator approval changed.
    ApprovalForAll {
        /// Token owner.
        owner: Address,
        /// Operator.
        operator: Address,
        /// Granted or revoked.
        approved: bool,
    },

    // =========================================================================
    // NESTING
    // =========================================================================
    /// A child was appended to a parent's pending list.
    ChildProposed {
        /// Parent token.
        token_id: TokenId,
        /// Index in the pending list at insertion time.
        child_index: u64,
        /// Child collection.
        child_address: Address,
        /// Child token.
        child_id: TokenId,
    },

    /// A child entered a parent's accepted list.
    ChildAccepted {
        /// Parent token.
        token_id: TokenId,
        /// Pending index it was accepted from, or its accepted index on the
        /// authenticated fast path.
        child_index: u64,
        /// Child collection.
        child_address: Address,
        /// Child token.
        child_id: TokenId,
    },

    /// A single pending child was rejected.
    ChildRejected {
        /// Parent token.
        token_id: TokenId,
        /// Pending index it was removed from.
        child_index: u64,
        /// Child collection.
        child_address: Address,
        /// Child token.
        child_id: TokenId,
    },

    /// Every pending child of a parent was rejected.
    AllChildrenRejected {
        /// Parent token.
        token_id: TokenId,
    },

    /// A child left its parent's lists by transfer, burn or detachment.
    ChildTransferred {
        /// Parent token.
        token_id: TokenId,
        /// Index it occupied.
        child_index: u64,
        /// Child collection.
        child_address: Address,
        /// Child token.
        child_id: TokenId,
        /// True if it was removed from the pending list.
        from_pending: bool,
    },

    // =========================================================================
    // AUTHENTICATION
    // =========================================================================
    /// A contract was registered as authentic.
    ContractAuthenticated {
        /// Registered contract.
        contract_address: Address,
        /// Fast-path capacity granted.
        max_active_num: U256,
    },

    /// A contract's registration was cleared.
    AuthenticationRemoved {
        /// Cleared contract.
        contract_address: Address,
    },
}

impl Event {
    /// Short, stable name used in logs and topic routing.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::DiamondCut { .. } => "DiamondCut",
            Self::OwnershipTransferred { .. } => "OwnershipTransferred",
            Self::Transfer { .. } => "Transfer",
            Self::NestTransfer { .. } => "NestTransfer",
            Self::Approval { .. } => "Approval",
            Self::ApprovalForAll { .. } => "ApprovalForAll",
            Self::ChildProposed { .. } => "ChildProposed",
            Self::ChildAccepted { .. } => "ChildAccepted",
            Self::ChildRejected { .. } => "ChildRejected",
            Self::AllChildrenRejected { .. } => "AllChildrenRejected",
            Self::ChildTransferred { .. } => "ChildTransferred",
            Self::ContractAuthenticated { .. } => "ContractAuthenticated",
            Self::AuthenticationRemoved { .. } => "AuthenticationRemoved",
        }
    }
}

/// An event tagged with the contract that emitted it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    /// Emitting contract.
    pub address: Address,
    /// Payload.
    pub event: Event,
}

impl Log {
    /// Creates a log entry.
    #[must_use]
    pub const fn new(address: Address, event: Event) -> Self {
        Self { address, event }
    }
}
