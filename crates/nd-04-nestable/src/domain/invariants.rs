//! # Domain Invariants
//!
//! Structural invariants of one collection's part of the ownership graph:
//!
//! - No child appears twice across a token's accepted and pending lists.
//! - Pending queues never exceed the configured cap.
//! - A listed child living in this collection points back at its parent.
//! - Balances add up to the number of live tokens.

use super::collection::CollectionStorage;
use shared_types::{Address, Child, DirectOwner, TokenId, U256};
use std::collections::HashSet;

/// Check every invariant of `storage`, the storage of the collection
/// deployed at `this`.
#[must_use]
pub fn check_collection_invariants(
    storage: &CollectionStorage,
    this: Address,
) -> InvariantCheckResult {
    let mut violations = Vec::new();
    let max_pending = storage.config.limits.max_pending_children;

    for (token_id, record) in storage.tokens() {
        let mut seen = HashSet::new();
        for child in record.active_children.iter().chain(&record.pending_children) {
            if !seen.insert(*child) {
                violations.push(InvariantViolation::DuplicateChild {
                    parent_id: *token_id,
                    child: *child,
                });
            }
            if child.contract_address == this {
                let expected = DirectOwner::Token {
                    contract_address: this,
                    token_id: *token_id,
                };
                if storage.direct_owner(child.token_id).ok() != Some(expected) {
                    violations.push(InvariantViolation::DanglingChild {
                        parent_id: *token_id,
                        child: *child,
                    });
                }
            }
        }
        if record.pending_children.len() as u64 > max_pending {
            violations.push(InvariantViolation::PendingOverCap {
                parent_id: *token_id,
                len: record.pending_children.len() as u64,
            });
        }
    }

    let balance_sum = storage
        .balances()
        .fold(U256::zero(), |acc, (_, balance)| acc + *balance);
    if balance_sum != storage.total_supply() {
        violations.push(InvariantViolation::BalanceMismatch {
            balances: balance_sum,
            supply: storage.total_supply(),
        });
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A child is listed twice under one parent.
    DuplicateChild {
        /// Parent token.
        parent_id: TokenId,
        /// Repeated child.
        child: Child,
    },
    /// A same-collection child does not point back at the parent listing it.
    DanglingChild {
        /// Parent token.
        parent_id: TokenId,
        /// Child whose owner disagrees.
        child: Child,
    },
    /// A pending queue is longer than the cap.
    PendingOverCap {
        /// Parent token.
        parent_id: TokenId,
        /// Queue length.
        len: u64,
    },
    /// Sum of balances differs from the live supply.
    BalanceMismatch {
        /// Sum of balances.
        balances: U256,
        /// Live tokens.
        supply: U256,
    },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateChild { parent_id, child } => write!(
                f,
                "child {}#{} listed twice under token {parent_id}",
                child.contract_address, child.token_id
            ),
            Self::DanglingChild { parent_id, child } => write!(
                f,
                "child {} listed under token {parent_id} points elsewhere",
                child.token_id
            ),
            Self::PendingOverCap { parent_id, len } => {
                write!(f, "token {parent_id} has {len} pending children")
            }
            Self::BalanceMismatch { balances, supply } => {
                write!(f, "balances sum to {balances} for a supply of {supply}")
            }
        }
    }
}
