//! # Facet Registry
//!
//! The selector table of a diamond. It keeps three views in step:
//!
//! - `selector -> facet`, the dispatch index;
//! - `facet -> selectors`, in registration order;
//! - the ordered list of facet addresses, in registration order.
//!
//! The only writer is [`FacetRegistry::apply_cuts`], which validates and
//! applies a whole batch on a staged copy and commits it only if every
//! entry succeeds.

use shared_types::{Address, CutError, FacetCut, FacetCutAction, FacetInfo, Selector};
use std::collections::HashMap;
use tracing::debug;

/// Selector table plus the administrative owner.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FacetRegistry {
    selector_to_facet: HashMap<Selector, Address>,
    facet_selectors: HashMap<Address, Vec<Selector>>,
    facet_addresses: Vec<Address>,
    owner: Address,
}

impl FacetRegistry {
    /// Empty registry administered by `owner`.
    #[must_use]
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            ..Self::default()
        }
    }

    /// Current owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Replaces the owner, returning the previous one.
    pub fn set_owner(&mut self, new_owner: Address) -> Address {
        std::mem::replace(&mut self.owner, new_owner)
    }

    /// Facet serving `selector`.
    #[must_use]
    pub fn facet_address(&self, selector: Selector) -> Option<Address> {
        self.selector_to_facet.get(&selector).copied()
    }

    /// True if `selector` is registered.
    #[must_use]
    pub fn contains(&self, selector: Selector) -> bool {
        self.selector_to_facet.contains_key(&selector)
    }

    /// Selectors registered to `facet`, empty if unknown.
    #[must_use]
    pub fn facet_function_selectors(&self, facet: Address) -> &[Selector] {
        self.facet_selectors
            .get(&facet)
            .map_or(&[][..], Vec::as_slice)
    }

    /// Facet addresses in registration order.
    #[must_use]
    pub fn facet_addresses(&self) -> &[Address] {
        &self.facet_addresses
    }

    /// Every facet with its selectors, in registration order.
    #[must_use]
    pub fn facets(&self) -> Vec<FacetInfo> {
        self.facet_addresses
            .iter()
            .map(|facet| FacetInfo {
                facet_address: *facet,
                function_selectors: self.facet_function_selectors(*facet).to_vec(),
            })
            .collect()
    }

    /// Number of registered selectors.
    #[must_use]
    pub fn selector_count(&self) -> usize {
        self.selector_to_facet.len()
    }

    /// Iterates over the dispatch index.
    pub fn iter_selectors(&self) -> impl Iterator<Item = (Selector, Address)> + '_ {
        self.selector_to_facet
            .iter()
            .map(|(selector, facet)| (*selector, *facet))
    }

    /// Applies a batch of cuts atomically.
    ///
    /// `has_code` reports whether an address holds facet code.
    ///
    /// # Errors
    ///
    /// Returns the first rejected entry's reason; the registry is unchanged.
    pub fn apply_cuts<F>(&mut self, cuts: &[FacetCut], has_code: F) -> Result<(), CutError>
    where
        F: Fn(Address) -> bool,
    {
        let mut staged = self.clone();
        for (index, cut) in cuts.iter().enumerate() {
            staged.apply_cut(cut, &has_code)?;
            debug!(
                index,
                action = ?cut.action,
                facet = %cut.facet_address,
                selectors = cut.function_selectors.len(),
                "Cut entry staged"
            );
        }
        *self = staged;
        Ok(())
    }

    fn apply_cut<F>(&mut self, cut: &FacetCut, has_code: &F) -> Result<(), CutError>
    where
        F: Fn(Address) -> bool,
    {
        if cut.function_selectors.is_empty() {
            return Err(CutError::NoSelectors);
        }
        let facet = cut.facet_address;

        match cut.action {
            FacetCutAction::Add => {
                require_facet_code(facet, has_code)?;
                for selector in &cut.function_selectors {
                    if self.contains(*selector) {
                        return Err(CutError::SelectorAlreadyExists(*selector));
                    }
                    self.attach(*selector, facet);
                }
            }
            FacetCutAction::Replace => {
                require_facet_code(facet, has_code)?;
                for selector in &cut.function_selectors {
                    let current = self
                        .facet_address(*selector)
                        .ok_or(CutError::SelectorNotFound(*selector))?;
                    if current == facet {
                        return Err(CutError::ReplaceWithSameFacet {
                            selector: *selector,
                            facet,
                        });
                    }
                    self.detach(*selector, current);
                    self.attach(*selector, facet);
                }
            }
            FacetCutAction::Remove => {
                if !facet.is_zero() {
                    return Err(CutError::RemoveFacetAddressMustBeZero(facet));
                }
                for selector in &cut.function_selectors {
                    let current = self
                        .facet_address(*selector)
                        .ok_or(CutError::SelectorNotFound(*selector))?;
                    self.detach(*selector, current);
                }
            }
        }
        Ok(())
    }

    fn attach(&mut self, selector: Selector, facet: Address) {
        self.selector_to_facet.insert(selector, facet);
        let selectors = self.facet_selectors.entry(facet).or_default();
        if selectors.is_empty() {
            self.facet_addresses.push(facet);
        }
        selectors.push(selector);
    }

    fn detach(&mut self, selector: Selector, facet: Address) {
        self.selector_to_facet.remove(&selector);
        let now_empty = match self.facet_selectors.get_mut(&facet) {
            Some(selectors) => {
                selectors.retain(|s| *s != selector);
                selectors.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.facet_selectors.remove(&facet);
            self.facet_addresses.retain(|a| *a != facet);
        }
    }

    pub(crate) fn selector_lists(&self) -> &HashMap<Address, Vec<Selector>> {
        &self.facet_selectors
    }
}

fn require_facet_code<F>(facet: Address, has_code: &F) -> Result<(), CutError>
where
    F: Fn(Address) -> bool,
{
    if facet.is_zero() {
        return Err(CutError::ZeroFacetAddress);
    }
    if !has_code(facet) {
        return Err(CutError::FacetHasNoCode(facet));
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
