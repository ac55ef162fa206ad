//! # Nesting Scenario
//!
//! The accepted fast path and the pending queue driven through the
//! authentication manager, with three collections nesting into one parent.
//!
//! 1. Collection X is registered with a capacity of one.
//! 2. A nested mint from X lands in the parent's accepted list.
//! 3. A second nested mint from X finds the capacity used up and is queued
//!    at pending index 0.
//! 4. A nested mint from the unregistered collection Y is queued at
//!    pending index 1.
//! 5. Rejecting pending index 0 drops X's second token from the queue; Y's
//!    entry moves down to index 0.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use nd_03_authentication::{AuthenticatedCall, RemoveCall};
    use nd_04_nestable::{CollectionConfig, RejectChildCall};
    use shared_types::{AuthenticationEntry, Child, DirectOwner, Event, U256};

    #[test]
    fn test_fast_path_then_pending_queue() {
        let mut net = Network::new();
        let manager = net.manager();
        let x = net.collection(CollectionConfig::default());
        let y = net.collection(CollectionConfig::default());
        let parent =
            net.collection(CollectionConfig::default().with_authentication_manager(manager));
        net.register(manager, x, 1);
        let parent_id = net.mint(parent, alice());
        assert_eq!(parent_id, id(1));

        let receipt = net.nest_mint(x, parent, parent_id, 1).unwrap();
        assert_eq!(
            receipt.events_named("ChildAccepted"),
            vec![&Event::ChildAccepted {
                token_id: parent_id,
                child_index: 0,
                child_address: x,
                child_id: id(1),
            }]
        );
        assert_eq!(net.children(parent, parent_id), vec![Child::new(x, id(1))]);

        let receipt = net.nest_mint(x, parent, parent_id, 1).unwrap();
        assert_eq!(
            receipt.events_named("ChildProposed"),
            vec![&Event::ChildProposed {
                token_id: parent_id,
                child_index: 0,
                child_address: x,
                child_id: id(2),
            }]
        );

        let receipt = net.nest_mint(y, parent, parent_id, 1).unwrap();
        assert_eq!(
            receipt.events_named("ChildProposed"),
            vec![&Event::ChildProposed {
                token_id: parent_id,
                child_index: 1,
                child_address: y,
                child_id: id(1),
            }]
        );
        assert_eq!(
            net.pending(parent, parent_id),
            vec![Child::new(x, id(2)), Child::new(y, id(1))]
        );

        net.world
            .send(
                alice(),
                parent,
                &RejectChildCall {
                    parent_id,
                    child_index: 0,
                },
            )
            .unwrap();
        assert_eq!(net.pending(parent, parent_id), vec![Child::new(y, id(1))]);
        assert_eq!(net.children(parent, parent_id), vec![Child::new(x, id(1))]);
        assert_eq!(
            net.direct_owner_of(x, id(2)),
            DirectOwner::Token {
                contract_address: parent,
                token_id: parent_id,
            }
        );
    }

    #[test]
    fn test_removed_collection_loses_fast_path() {
        let mut net = Network::new();
        let manager = net.manager();
        let x = net.collection(CollectionConfig::default());
        let parent =
            net.collection(CollectionConfig::default().with_authentication_manager(manager));
        net.register(manager, x, 5);
        let parent_id = net.mint(parent, alice());

        net.nest_mint(x, parent, parent_id, 1).unwrap();
        net.world
            .send(owner(), manager, &RemoveCall { contract_address: x })
            .unwrap();
        let entry = net
            .world
            .view(alice(), manager, &AuthenticatedCall { contract_address: x })
            .unwrap();
        assert_eq!(
            entry,
            AuthenticationEntry {
                authentic: false,
                max_active_num: U256::zero(),
            }
        );

        let receipt = net.nest_mint(x, parent, parent_id, 1).unwrap();
        assert_eq!(receipt.events_named("ChildAccepted").len(), 0);
        assert_eq!(receipt.events_named("ChildProposed").len(), 1);
        assert_eq!(net.children(parent, parent_id), vec![Child::new(x, id(1))]);
        assert_eq!(net.pending(parent, parent_id), vec![Child::new(x, id(2))]);
    }

    #[test]
    fn test_capacity_is_counted_per_child_collection() {
        let mut net = Network::new();
        let manager = net.manager();
        let x = net.collection(CollectionConfig::default());
        let y = net.collection(CollectionConfig::default());
        let parent =
            net.collection(CollectionConfig::default().with_authentication_manager(manager));
        net.register(manager, x, 1);
        net.register(manager, y, 1);
        let parent_id = net.mint(parent, alice());

        net.nest_mint(x, parent, parent_id, 1).unwrap();
        net.nest_mint(y, parent, parent_id, 1).unwrap();
        assert_eq!(
            net.children(parent, parent_id),
            vec![Child::new(x, id(1)), Child::new(y, id(1))]
        );
        assert!(net.pending(parent, parent_id).is_empty());
    }
}
