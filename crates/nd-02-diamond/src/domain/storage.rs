//! # Diamond Storage
//!
//! The single state struct every facet of a diamond executes against. The
//! diamond-level part (registry, interface table, beacon) is fixed; the
//! application part `S` is whatever the business facets of a particular
//! diamond share.

use super::registry::FacetRegistry;
use shared_types::{Address, InterfaceId};
use std::collections::HashSet;

/// Shared storage of one diamond.
#[derive(Clone, Debug)]
pub struct DiamondStorage<S> {
    /// Selector table and owner.
    pub registry: FacetRegistry,
    /// Interfaces reported by `supportsInterface`.
    pub supported_interfaces: HashSet<InterfaceId>,
    /// Diamond this one follows for selectors it does not register itself.
    pub beacon: Option<Address>,
    /// Application storage shared by the business facets.
    pub app: S,
}

impl<S> DiamondStorage<S> {
    /// Fresh storage administered by `owner`.
    pub fn new(owner: Address, beacon: Option<Address>, app: S) -> Self {
        Self {
            registry: FacetRegistry::new(owner),
            supported_interfaces: HashSet::new(),
            beacon,
            app,
        }
    }

    /// True if `interface_id` was registered by an initializer.
    #[must_use]
    pub fn supports_interface(&self, interface_id: InterfaceId) -> bool {
        self.supported_interfaces.contains(&interface_id)
    }
}
