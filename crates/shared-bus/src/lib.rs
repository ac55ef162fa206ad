//! # Shared Bus - Event Bus for Committed Contract Events
//!
//! Carries the logs of committed transactions from the host service to any
//! number of subscribers.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │ HostService  │                    │  Subscriber  │
//! │  (commit)    │    publish()       │  (indexer,   │
//! │              │ ──────┐            │   wallet)    │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! Reverted transactions publish nothing: the host discards their logs
//! together with their state changes.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{ContractEvent, EventFilter, EventTopic};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, EventSubscriber, Subscription, SubscriptionError};

/// Events buffered per subscriber before the oldest are overwritten.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
