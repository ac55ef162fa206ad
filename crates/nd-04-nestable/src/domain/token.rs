//! Per-token record of the ownership graph.

use serde::{Deserialize, Serialize};
use shared_types::{Child, DirectOwner};

/// Where `addChild` placed a child.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChildPlacement {
    /// Appended to the accepted list at this index.
    Accepted(u64),
    /// Appended to the pending queue at this index.
    Pending(u64),
}

/// One live token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Immediate owner.
    pub direct_owner: DirectOwner,
    /// Accepted children, in acceptance order.
    pub active_children: Vec<Child>,
    /// Proposed children awaiting review, in proposal order.
    pub pending_children: Vec<Child>,
}

impl TokenRecord {
    /// A childless token owned by `direct_owner`.
    #[must_use]
    pub fn new(direct_owner: DirectOwner) -> Self {
        Self {
            direct_owner,
            active_children: Vec::new(),
            pending_children: Vec::new(),
        }
    }

    /// True if `child` is in either list.
    #[must_use]
    pub fn has_child(&self, child: &Child) -> bool {
        self.active_children.contains(child) || self.pending_children.contains(child)
    }

    /// Accepted children that live in `contract`.
    #[must_use]
    pub fn active_from(&self, contract: shared_types::Address) -> usize {
        self.active_children
            .iter()
            .filter(|child| child.contract_address == contract)
            .count()
    }
}
