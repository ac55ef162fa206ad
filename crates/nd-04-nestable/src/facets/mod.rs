//! # Collection Facets
//!
//! The facets that make a diamond a nestable collection, and a helper that
//! deploys them and builds the cut.

pub mod init;
pub mod mint;
pub mod nestable;
pub mod transfer;

pub use init::CollectionInit;
pub use mint::MintAndBurnFacet;
pub use nestable::NestableFacet;
pub use transfer::TransferFacet;

use crate::calls::InitCollectionCall;
use crate::domain::collection::CollectionStorage;
use crate::domain::config::CollectionConfig;
use nd_02_diamond::{Diamond, DiamondArgs, FacetLibrary, StandardFacets};
use shared_types::{Address, Bytes, ContractCall, ContractError, Environment, FacetCut};

/// Addresses of the collection facets in one library.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollectionFacets {
    /// `MintAndBurnFacet`.
    pub mint_and_burn: Address,
    /// `NestableFacet`.
    pub nestable: Address,
    /// `TransferFacet`.
    pub transfer: Address,
    /// `CollectionInit`.
    pub init: Address,
}

impl CollectionFacets {
    /// Deploys the collection facets into `library`.
    pub fn deploy(library: &FacetLibrary<CollectionStorage>) -> Self {
        Self {
            mint_and_burn: library.deploy(MintAndBurnFacet),
            nestable: library.deploy(NestableFacet),
            transfer: library.deploy(TransferFacet),
            init: library.deploy(CollectionInit),
        }
    }

    /// Cut adding the mint, nestable and transfer facets with all of their
    /// selectors.
    #[must_use]
    pub fn cuts(&self, library: &FacetLibrary<CollectionStorage>) -> Vec<FacetCut> {
        [self.mint_and_burn, self.nestable, self.transfer]
            .into_iter()
            .map(|facet| FacetCut::add(facet, library.selectors_of(facet)))
            .collect()
    }

    /// Calldata for the `CollectionInit` initializer.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::Codec` if encoding fails.
    pub fn init_calldata(config: CollectionConfig) -> Result<Bytes, ContractError> {
        InitCollectionCall { config }.encode()
    }

    /// Constructs a collection diamond at `address` owned by `owner`: the
    /// standard facets and the collection facets in one constructor cut,
    /// initialized with `config`.
    ///
    /// # Errors
    ///
    /// Propagates cut validation and initializer failures.
    pub fn construct(
        &self,
        standard: &StandardFacets,
        address: Address,
        env: &mut dyn Environment,
        library: FacetLibrary<CollectionStorage>,
        owner: Address,
        config: CollectionConfig,
    ) -> Result<Diamond<CollectionStorage>, ContractError> {
        let mut cuts = standard.cuts(&library);
        cuts.extend(self.cuts(&library));
        let args = DiamondArgs::new(owner).with_init(self.init, Self::init_calldata(config)?);
        Diamond::new(address, env, library, CollectionStorage::default(), cuts, args)
    }
}
