//! # Facet Library
//!
//! The code store facets are deployed into. Each facet gets a CREATE-style
//! address derived from the library's deployer and a running nonce, and is
//! looked up by that address when a diamond dispatches to it or when a cut
//! checks that a facet has code.
//!
//! Facet code is immutable and shared: cloning a library hands out another
//! handle to the same store, so a diamond and the trackers following it
//! resolve the same facet addresses to the same code.

use crate::ports::Facet;
use parking_lot::RwLock;
use shared_types::{compute_contract_address, Address, Selector};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

struct Store<S> {
    deployer: Address,
    nonce: u64,
    facets: HashMap<Address, Arc<dyn Facet<S>>>,
}

/// Shared handle to a store of facet code.
pub struct FacetLibrary<S> {
    store: Arc<RwLock<Store<S>>>,
}

impl<S> Clone for FacetLibrary<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> FacetLibrary<S> {
    /// Empty library whose facet addresses derive from `deployer`.
    #[must_use]
    pub fn new(deployer: Address) -> Self {
        Self {
            store: Arc::new(RwLock::new(Store {
                deployer,
                nonce: 0,
                facets: HashMap::new(),
            })),
        }
    }

    /// Deploys `facet` and returns its address.
    pub fn deploy<F>(&self, facet: F) -> Address
    where
        F: Facet<S> + 'static,
    {
        let mut store = self.store.write();
        let address = compute_contract_address(store.deployer, store.nonce);
        store.nonce += 1;
        debug!(facet = facet.name(), %address, "Facet deployed");
        store.facets.insert(address, Arc::new(facet));
        address
    }

    /// Facet code at `address`.
    #[must_use]
    pub fn get(&self, address: Address) -> Option<Arc<dyn Facet<S>>> {
        self.store.read().facets.get(&address).cloned()
    }

    /// True if `address` holds facet code.
    #[must_use]
    pub fn contains(&self, address: Address) -> bool {
        self.store.read().facets.contains_key(&address)
    }

    /// Selectors implemented by the facet at `address`, empty if unknown.
    #[must_use]
    pub fn selectors_of(&self, address: Address) -> Vec<Selector> {
        self.get(address)
            .map(|facet| facet.selectors())
            .unwrap_or_default()
    }

    /// Number of deployed facets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.read().facets.len()
    }

    /// True if no facet has been deployed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
