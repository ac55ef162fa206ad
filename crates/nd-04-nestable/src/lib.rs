//! # ND-04 Nestable - Token Ownership Graph
//!
//! **Subsystem ID:** 04
//!
//! ## Purpose
//!
//! Turns a diamond into an NFT collection whose tokens can own tokens of
//! any collection. Children arrive through a propose/accept/reject queue;
//! children minted by an authenticated collection skip the queue while the
//! parent has capacity left for that collection.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | A child is listed at most once under a parent | `domain/collection.rs` - `add_child()` |
//! | Stable removal from child lists | `domain/collection.rs` - `take()` |
//! | Pending queue is capped | `domain/collection.rs` - `add_child()` |
//! | No token is its own ancestor | `ops.rs` - `ensure_not_descendant()` |
//! | Owner walks are bounded | `ops.rs` - `root_owner()` |
//! | Burn cascades are bounded | `facets/mint.rs` - `cascade()` |
//! | No collection is re-entered by a walk or cascade | `ops.rs` - `direct_owner_at()`, `facets/mint.rs` - `burn_nested()` |
//! | Price and supply | `facets/mint.rs` - `charge()`, `domain/collection.rs` - `ensure_mintable()` |
//! | Storage consistency after every rewiring | `ops.rs` - `ensure_graph_invariants()` |
//!
//! ## Components
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | Collection Storage | `domain/collection.rs` | Tokens, child lists, balances |
//! | Graph Operations | `ops.rs` | Owner walks, attach and detach |
//! | Mint and Burn | `facets/mint.rs` | Supply, payment, cascades |
//! | Nestable | `facets/nestable.rs` | Accept/reject protocol, queries |
//! | Transfer | `facets/transfer.rs` | Flat and nested transfers, approvals |
//! | Initializer | `facets/init.rs` | Collection parameters |
//!
//! ## Usage Example
//!
//! ```ignore
//! use nd_04_nestable::prelude::*;
//!
//! let library = FacetLibrary::<CollectionStorage>::new(deployer);
//! let standard = StandardFacets::deploy(&library);
//! let facets = CollectionFacets::deploy(&library);
//! let config = CollectionConfig::new(999.into(), price).with_authentication_manager(manager);
//! world.deploy(owner, |address, env| {
//!     facets.construct(&standard, address, env, library, owner, config)
//! })?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod calls;
pub mod domain;
pub mod facets;
pub mod ops;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::calls::*;
    pub use crate::domain::collection::CollectionStorage;
    pub use crate::domain::config::{CollectionConfig, NestingLimits};
    pub use crate::domain::invariants::{
        check_collection_invariants, InvariantCheckResult, InvariantViolation,
    };
    pub use crate::domain::token::{ChildPlacement, TokenRecord};
    pub use crate::facets::{
        CollectionFacets, CollectionInit, MintAndBurnFacet, NestableFacet, TransferFacet,
    };
    pub use nd_02_diamond::{Diamond, DiamondArgs, FacetLibrary, StandardFacets};
}

pub use prelude::*;
