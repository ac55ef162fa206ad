//! Domain layer: the registry, its invariants, and diamond storage.
//! Pure data and logic; no host access.

pub mod interfaces;
pub mod invariants;
pub mod registry;
pub mod storage;
