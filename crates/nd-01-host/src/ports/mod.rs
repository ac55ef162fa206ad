//! # Ports Layer
//!
//! - **Driving Port (Inbound)**: `HostApi`, the async surface through which
//!   callers submit transactions and read-only queries.
//! - The driven side is the shared-bus `EventPublisher`, used as-is.

pub mod inbound;

pub use inbound::*;
