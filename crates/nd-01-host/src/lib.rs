//! # ND-01 Host - Execution Environment
//!
//! **Subsystem ID:** 01
//!
//! ## Purpose
//!
//! Supplies the primitives the diamond and nesting contracts take for
//! granted: accounts with balances, deterministic contract deployment,
//! atomic transactions with full rollback, nested synchronous calls between
//! contracts, and read-only calls.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Call depth limit | `domain/invariants.rs` - `check_call_depth_invariant()` |
//! | Log limit per transaction | `domain/invariants.rs` - `check_log_limit_invariant()` |
//! | Value conservation | `domain/invariants.rs` - `check_value_conservation()` |
//! | No state change on revert | `domain/world.rs` - checkpoint restore |
//! | No re-entrancy | `domain/world.rs` - call stack check |
//!
//! ## Usage Example
//!
//! ```ignore
//! use nd_01_host::prelude::*;
//!
//! let mut world = World::default();
//! let receipt = world.deploy(deployer, |address, env| MyContract::new(address, env))?;
//! let output = world.view(caller, receipt.contract_address.unwrap(), &SomeCall)?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod domain;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::domain::config::{ConfigError, HostConfig};
    pub use crate::domain::invariants::{
        check_call_depth_invariant, check_log_limit_invariant, check_value_conservation,
        InvariantViolation,
    };
    pub use crate::domain::receipt::Receipt;
    pub use crate::domain::world::World;
    pub use crate::ports::inbound::HostApi;
    pub use crate::service::{HostService, ServiceConfig, ServiceStats};
    pub use shared_types::compute_contract_address;
}

pub use prelude::*;
