//! # ND-02 Diamond - Upgradeable Multi-Facet Proxy
//!
//! **Subsystem ID:** 02
//!
//! ## Purpose
//!
//! Composes independently deployed facets behind one contract address.
//! Facets share the diamond's storage; the selector table that maps each
//! call to its facet can be changed atomically by the owner.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | One facet per selector | `domain/registry.rs` - `apply_cut()` |
//! | Facet list = facets with selectors | `domain/registry.rs` - `attach()` / `detach()` |
//! | Cut batches are atomic | `domain/registry.rs` - `apply_cuts()` staging |
//! | Registry consistency after every cut | `domain/invariants.rs` - `check_registry_invariants()` |
//! | Only the owner cuts | `facets/cut.rs` - `DiamondCutFacet` |
//!
//! ## Components
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | Facet Registry | `domain/registry.rs` | Selector table |
//! | Cut Executor | `facets/cut.rs` | Only writer of the registry |
//! | Dispatch Proxy | `diamond.rs` | Routes calls, follows a beacon |
//! | Loupe | `facets/loupe.rs` | Introspection and ERC-165 |
//! | Ownership | `facets/ownership.rs` | ERC-173 |
//! | Facet Library | `library.rs` | Facet code by address |
//!
//! A diamond removing the `diamondCut` selector itself is allowed; the
//! registry is then frozen for good.
//!
//! ## Usage Example
//!
//! ```ignore
//! use nd_02_diamond::prelude::*;
//!
//! let library = FacetLibrary::<()>::new(deployer);
//! let standard = StandardFacets::deploy(&library);
//! let cuts = standard.cuts(&library);
//! let args = DiamondArgs::new(owner).with_init(standard.init, StandardFacets::init_calldata()?);
//! world.deploy(owner, |address, env| Diamond::new(address, env, library, (), cuts, args))?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod calls;
pub mod diamond;
pub mod domain;
pub mod facets;
pub mod library;
pub mod ports;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::calls::{
        DiamondCutCall, FacetAddressCall, FacetAddressesCall, FacetFunctionSelectorsCall,
        FacetsCall, InitCall, OwnerCall, ReceiveCall, SupportsInterfaceCall,
        TransferOwnershipCall,
    };
    pub use crate::diamond::{Diamond, DiamondArgs};
    pub use crate::domain::interfaces;
    pub use crate::domain::invariants::{
        check_registry_invariants, InvariantCheckResult, InvariantViolation,
    };
    pub use crate::domain::registry::FacetRegistry;
    pub use crate::domain::storage::DiamondStorage;
    pub use crate::facets::{
        diamond_cut, DiamondCutFacet, DiamondInit, DiamondLoupeFacet, OwnershipFacet,
        StandardFacets,
    };
    pub use crate::library::FacetLibrary;
    pub use crate::ports::{Facet, FacetContext};
}

pub use prelude::*;
