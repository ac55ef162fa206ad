//! # Ports Layer
//!
//! - [`Facet`]: implemented by every unit of logic a diamond can dispatch to.
//! - [`FacetContext`]: what a facet sees while it executes: the diamond's
//!   storage, the current call frame, and the host environment.

pub mod facet;

pub use facet::*;
