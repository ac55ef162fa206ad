//! # Nest-Diamond Test Suite
//!
//! Unified test crate for flows that span several subsystems.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/          # Cross-subsystem flows
//!     ├── fixtures.rs       # Shared network setup
//!     ├── nesting_scenario.rs
//!     ├── tracker_flows.rs
//!     ├── cascade_flows.rs
//!     └── bus_flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p nd-tests
//!
//! # By category
//! cargo test -p nd-tests integration::cascade_flows::
//!
//! # With logs
//! RUST_LOG=debug cargo test -p nd-tests -- --nocapture
//! ```

pub mod integration;
