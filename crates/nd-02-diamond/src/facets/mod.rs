//! # Standard Facets
//!
//! The facets every diamond in this workspace is born with, and a helper
//! that deploys them and builds the constructor cut.

pub mod cut;
pub mod init;
pub mod loupe;
pub mod ownership;

pub use cut::{diamond_cut, DiamondCutFacet};
pub use init::DiamondInit;
pub use loupe::DiamondLoupeFacet;
pub use ownership::OwnershipFacet;

use crate::calls::InitCall;
use crate::library::FacetLibrary;
use shared_types::{Address, Bytes, ContractCall, ContractError, FacetCut};

/// Addresses of the standard facets in one library.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StandardFacets {
    /// `DiamondCutFacet`.
    pub cut: Address,
    /// `DiamondLoupeFacet`.
    pub loupe: Address,
    /// `OwnershipFacet`.
    pub ownership: Address,
    /// `DiamondInit`.
    pub init: Address,
}

impl StandardFacets {
    /// Deploys the standard facets into `library`.
    pub fn deploy<S: 'static>(library: &FacetLibrary<S>) -> Self {
        Self {
            cut: library.deploy(DiamondCutFacet),
            loupe: library.deploy(DiamondLoupeFacet),
            ownership: library.deploy(OwnershipFacet),
            init: library.deploy(DiamondInit),
        }
    }

    /// Constructor cut: cut, loupe and ownership facets with all of their
    /// selectors, in that order.
    #[must_use]
    pub fn cuts<S>(&self, library: &FacetLibrary<S>) -> Vec<FacetCut> {
        [self.cut, self.loupe, self.ownership]
            .into_iter()
            .map(|facet| FacetCut::add(facet, library.selectors_of(facet)))
            .collect()
    }

    /// Calldata for the `DiamondInit` initializer.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::Codec` if encoding fails.
    pub fn init_calldata() -> Result<Bytes, ContractError> {
        InitCall.encode()
    }
}
