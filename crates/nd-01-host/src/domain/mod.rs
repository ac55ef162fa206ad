//! Domain layer: host state and its transaction semantics.

pub mod config;
pub mod invariants;
pub mod receipt;
pub mod world;
