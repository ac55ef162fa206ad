//! Domain layer: collection storage, configuration and invariants.
//! Pure data and logic; cross-collection effects live in the facets.

pub mod collection;
pub mod config;
pub mod invariants;
pub mod token;
