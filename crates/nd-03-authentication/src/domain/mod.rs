//! Domain layer: the authentication registry. No host access.

pub mod registry;
