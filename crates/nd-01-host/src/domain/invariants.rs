//! # Domain Invariants
//!
//! Checks the transaction engine runs on every frame and every commit.
//!
//! - Call depth: a frame may only start below `max_call_depth`.
//! - Log limit: a transaction may not buffer more than
//!   `max_logs_per_transaction` logs.
//! - Value conservation: a committed transaction moves value between
//!   accounts but never creates or destroys it.

use super::config::HostConfig;
use shared_types::U256;

/// A frame at `depth` (0 for the outermost call) may start.
///
/// # Errors
///
/// Returns `InvariantViolation::CallDepthExceeded` at or beyond the cap.
pub fn check_call_depth_invariant(
    depth: usize,
    config: &HostConfig,
) -> Result<(), InvariantViolation> {
    if depth >= usize::from(config.max_call_depth) {
        return Err(InvariantViolation::CallDepthExceeded {
            depth,
            max: config.max_call_depth,
        });
    }
    Ok(())
}

/// `count` buffered logs fit within the per-transaction limit.
///
/// # Errors
///
/// Returns `InvariantViolation::TooManyLogs` beyond the cap.
pub fn check_log_limit_invariant(
    count: usize,
    config: &HostConfig,
) -> Result<(), InvariantViolation> {
    if count > config.max_logs_per_transaction {
        return Err(InvariantViolation::TooManyLogs {
            count,
            max: config.max_logs_per_transaction,
        });
    }
    Ok(())
}

/// Total value before and after a transaction is equal.
///
/// # Errors
///
/// Returns `InvariantViolation::ValueNotConserved` on mismatch.
pub fn check_value_conservation(before: U256, after: U256) -> Result<(), InvariantViolation> {
    if before != after {
        return Err(InvariantViolation::ValueNotConserved { before, after });
    }
    Ok(())
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Call depth exceeded.
    CallDepthExceeded {
        /// Depth of the rejected frame.
        depth: usize,
        /// Configured cap.
        max: u16,
    },
    /// Too many logs in one transaction.
    TooManyLogs {
        /// Logs including the rejected one.
        count: usize,
        /// Configured cap.
        max: usize,
    },
    /// Total value changed across a transaction.
    ValueNotConserved {
        /// Value in the world when the transaction started.
        before: U256,
        /// Value in the world when it ended.
        after: U256,
    },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CallDepthExceeded { depth, max } => {
                write!(f, "call depth exceeded: {depth} >= {max}")
            }
            Self::TooManyLogs { count, max } => {
                write!(f, "too many logs: {count} > {max}")
            }
            Self::ValueNotConserved { before, after } => {
                write!(f, "value not conserved: {before} before, {after} after")
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
