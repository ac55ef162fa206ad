//! # Domain Invariants
//!
//! Structural invariants of the facet registry. The cut executor checks
//! them after every committed batch; tests use them after arbitrary cut
//! sequences.
//!
//! - Every selector is registered to exactly one facet.
//! - The facet list holds exactly the facets with at least one selector,
//!   without duplicates.
//! - The per-facet selector lists and the dispatch index describe the same
//!   relation.

use super::registry::FacetRegistry;
use shared_types::{Address, Selector};
use std::collections::HashSet;

/// Check all registry invariants at once.
#[must_use]
pub fn check_registry_invariants(registry: &FacetRegistry) -> InvariantCheckResult {
    let mut violations = Vec::new();

    let mut listed = HashSet::new();
    for facet in registry.facet_addresses() {
        if !listed.insert(*facet) {
            violations.push(InvariantViolation::DuplicateFacetAddress(*facet));
        }
        if registry.facet_function_selectors(*facet).is_empty() {
            violations.push(InvariantViolation::FacetWithoutSelectors(*facet));
        }
    }

    let mut seen = HashSet::new();
    for (facet, selectors) in registry.selector_lists() {
        if !listed.contains(facet) {
            violations.push(InvariantViolation::UnlistedFacet(*facet));
        }
        for selector in selectors {
            if !seen.insert(*selector) {
                violations.push(InvariantViolation::SelectorInMultipleFacets(*selector));
            }
            if registry.facet_address(*selector) != Some(*facet) {
                violations.push(InvariantViolation::IndexMismatch(*selector));
            }
        }
    }

    for (selector, _) in registry.iter_selectors() {
        if !seen.contains(&selector) {
            violations.push(InvariantViolation::IndexMismatch(selector));
        }
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A facet appears twice in the facet list.
    DuplicateFacetAddress(Address),
    /// A listed facet has no selectors.
    FacetWithoutSelectors(Address),
    /// A facet owns selectors but is missing from the facet list.
    UnlistedFacet(Address),
    /// A selector is listed under more than one facet.
    SelectorInMultipleFacets(Selector),
    /// Dispatch index and selector lists disagree about a selector.
    IndexMismatch(Selector),
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateFacetAddress(facet) => write!(f, "facet {facet:?} listed twice"),
            Self::FacetWithoutSelectors(facet) => {
                write!(f, "facet {facet:?} listed without selectors")
            }
            Self::UnlistedFacet(facet) => {
                write!(f, "facet {facet:?} owns selectors but is unlisted")
            }
            Self::SelectorInMultipleFacets(selector) => {
                write!(f, "selector {selector} registered to several facets")
            }
            Self::IndexMismatch(selector) => {
                write!(f, "dispatch index disagrees about selector {selector}")
            }
        }
    }
}
