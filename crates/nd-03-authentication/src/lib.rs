//! # ND-03 Authentication - Trusted Collection Registry
//!
//! **Subsystem ID:** 03
//!
//! ## Purpose
//!
//! Keeps the list of contracts whose nested mints skip manual review, and
//! how many accepted children a single parent may hold from each of them.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Only the owner registers or removes | `domain/registry.rs` - `enforce_owner()` |
//! | Capacity is positive | `domain/registry.rs` - `register()` |
//! | Zero address is never registered | `domain/registry.rs` - `register()` |
//! | Removal resets to `{false, 0}` | `domain/registry.rs` - `remove()` |
//!
//! ## Usage Example
//!
//! ```ignore
//! use nd_03_authentication::prelude::*;
//!
//! let receipt = world.deploy(owner, |address, env| {
//!     Ok(AuthenticationManager::new(address, env, owner))
//! })?;
//! let manager = receipt.contract_address.unwrap();
//! world.send(owner, manager, &RegisterCall { contract_address, max_active_num: 1.into() })?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod calls;
pub mod domain;
pub mod manager;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::calls::{
        AuthenticatedCall, OwnerCall, RegisterCall, RemoveCall, TransferOwnershipCall,
    };
    pub use crate::domain::registry::{AuthenticationRegistry, NOT_OWNER};
    pub use crate::manager::AuthenticationManager;
}

pub use prelude::*;
