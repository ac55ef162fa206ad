//! # Bus Events
//!
//! Committed contract logs as they flow through the shared bus. A log is
//! published only after the transaction that emitted it has committed, so
//! subscribers never observe effects of a reverted transaction.

use serde::{Deserialize, Serialize};
use shared_types::entities::Address;
use shared_types::events::{Event, Log};
use uuid::Uuid;

/// A committed log tagged with the transaction that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractEvent {
    /// Transaction identifier assigned by the host service.
    pub tx_id: Uuid,
    /// Position of the log within its transaction.
    pub log_index: u32,
    /// The log itself.
    pub log: Log,
}

impl ContractEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self.log.event {
            Event::DiamondCut { .. } => EventTopic::Diamond,
            Event::OwnershipTransferred { .. } => EventTopic::Ownership,
            Event::Transfer { .. }
            | Event::NestTransfer { .. }
            | Event::Approval { .. }
            | Event::ApprovalForAll { .. } => EventTopic::Tokens,
            Event::ChildProposed { .. }
            | Event::ChildAccepted { .. }
            | Event::ChildRejected { .. }
            | Event::AllChildrenRejected { .. }
            | Event::ChildTransferred { .. } => EventTopic::Nesting,
            Event::ContractAuthenticated { .. } | Event::AuthenticationRemoved { .. } => {
                EventTopic::Authentication
            }
        }
    }

    /// Get the emitting contract.
    #[must_use]
    pub fn source_contract(&self) -> Address {
        self.log.address
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Registry upgrades.
    Diamond,
    /// Contract ownership changes.
    Ownership,
    /// Flat and nested token transfers and approvals.
    Tokens,
    /// Child proposals, acceptances, rejections and removals.
    Nesting,
    /// Authentication registry changes.
    Authentication,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Emitting contracts to include. Empty means all contracts.
    pub contracts: Vec<Address>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            contracts: Vec::new(),
        }
    }

    /// Create a filter for events emitted by specific contracts.
    #[must_use]
    pub fn from_contracts(contracts: Vec<Address>) -> Self {
        Self {
            topics: Vec::new(),
            contracts,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &ContractEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let source_match =
            self.contracts.is_empty() || self.contracts.contains(&event.source_contract());

        topic_match && source_match
    }
}
