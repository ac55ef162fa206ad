//! # Cascade Flows
//!
//! Burns and nested transfers whose effects span several collections, and
//! the all-or-nothing behavior of transactions that fail half-way.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use nd_04_nestable::{
        BurnCall, CollectionConfig, NestTransferFromCall, TotalSupplyCall, TransferFromCall,
    };
    use shared_types::{Address, Child, ContractError, DirectOwner, U256};

    /// Three collections chained: `a#1 <- b#1 <- c#1`, all accepted, with
    /// alice owning the root.
    fn chain(net: &mut Network) -> (Address, Address, Address) {
        let a = net.collection(CollectionConfig::default());
        let b = net.collection(CollectionConfig::default());
        let c = net.collection(CollectionConfig::default());
        net.mint(a, alice());
        net.nest_mint(b, a, id(1), 1).unwrap();
        net.accept(alice(), a, id(1), 0);
        net.nest_mint(c, b, id(1), 1).unwrap();
        net.accept(alice(), b, id(1), 0);
        (a, b, c)
    }

    fn burn(token_id: u64, max_recursive_burns: u64) -> BurnCall {
        BurnCall {
            token_id: id(token_id),
            max_recursive_burns,
        }
    }

    #[test]
    fn test_root_owner_resolves_across_collections() {
        let mut net = Network::new();
        let (a, b, c) = chain(&mut net);
        assert_eq!(net.owner_of(c, id(1)).unwrap(), alice());
        assert_eq!(
            net.direct_owner_of(c, id(1)),
            DirectOwner::Token {
                contract_address: b,
                token_id: id(1),
            }
        );
        assert_eq!(net.children(a, id(1)), vec![Child::new(b, id(1))]);
    }

    #[test]
    fn test_burn_cascades_through_collections() {
        let mut net = Network::new();
        let (a, b, c) = chain(&mut net);

        let receipt = net.world.send(alice(), a, &burn(1, 10)).unwrap();
        assert_eq!(receipt.decode::<BurnCall>().unwrap(), 2);
        for collection in [a, b, c] {
            assert_eq!(
                net.world.view(alice(), collection, &TotalSupplyCall).unwrap(),
                U256::zero()
            );
        }
    }

    #[test]
    fn test_burn_budget_covers_the_whole_cascade() {
        let mut net = Network::new();
        let (a, b, c) = chain(&mut net);

        let err = net.world.send(alice(), a, &burn(1, 1)).unwrap_err();
        assert_eq!(
            err,
            ContractError::LimitReached {
                what: "recursive burns",
                limit: 0,
            }
        );
        for collection in [a, b, c] {
            assert_eq!(net.owner_of(collection, id(1)).unwrap(), alice());
        }
    }

    /// Two collections interleaved: `a#1 <- b#1 <- a#2`, all accepted, with
    /// alice owning the root. Every walk from `a#2` passes through b and
    /// back into a.
    fn interleaved(net: &mut Network) -> (Address, Address) {
        let a = net.collection(CollectionConfig::default());
        let b = net.collection(CollectionConfig::default());
        net.mint(a, alice());
        net.mint(a, alice());
        net.nest_mint(b, a, id(1), 1).unwrap();
        net.accept(alice(), a, id(1), 0);
        net.world
            .send(
                alice(),
                a,
                &NestTransferFromCall {
                    from: alice(),
                    to: b,
                    token_id: id(2),
                    destination_id: id(1),
                },
            )
            .unwrap();
        net.accept(alice(), b, id(1), 0);
        (a, b)
    }

    #[test]
    fn test_walks_through_the_same_collection_twice() {
        let mut net = Network::new();
        let (a, b) = interleaved(&mut net);
        let c = net.collection(CollectionConfig::default());

        assert_eq!(net.owner_of(a, id(2)).unwrap(), alice());
        assert_eq!(net.children(b, id(1)), vec![Child::new(a, id(2))]);

        net.nest_mint(c, a, id(2), 1).unwrap();
        assert_eq!(net.pending(a, id(2)), vec![Child::new(c, id(1))]);
        net.accept(alice(), a, id(2), 0);
        assert_eq!(net.children(a, id(2)), vec![Child::new(c, id(1))]);
        assert_eq!(net.owner_of(c, id(1)).unwrap(), alice());
    }

    #[test]
    fn test_root_owner_moves_token_out_of_interleaved_chain() {
        let mut net = Network::new();
        let (a, b) = interleaved(&mut net);

        net.world
            .send(
                alice(),
                a,
                &TransferFromCall {
                    from: b,
                    to: bob(),
                    token_id: id(2),
                },
            )
            .unwrap();
        assert!(net.children(b, id(1)).is_empty());
        assert_eq!(net.owner_of(a, id(2)).unwrap(), bob());
    }

    #[test]
    fn test_burn_cascades_back_into_the_burning_collection() {
        let mut net = Network::new();
        let (a, b) = interleaved(&mut net);
        let c = net.collection(CollectionConfig::default());
        net.nest_mint(c, a, id(2), 1).unwrap();
        net.accept(alice(), a, id(2), 0);

        // b#1, then a#2 handed back to a, then c#1.
        let receipt = net.world.send(alice(), a, &burn(1, 10)).unwrap();
        assert_eq!(receipt.decode::<BurnCall>().unwrap(), 3);
        for collection in [a, b, c] {
            assert_eq!(
                net.world.view(alice(), collection, &TotalSupplyCall).unwrap(),
                U256::zero()
            );
        }
        assert_eq!(net.owner_of(a, id(2)), Err(ContractError::TokenNotFound(id(2))));
    }

    #[test]
    fn test_deferred_burns_count_against_the_budget() {
        let mut net = Network::new();
        let (a, b) = interleaved(&mut net);
        let c = net.collection(CollectionConfig::default());
        net.nest_mint(c, a, id(2), 1).unwrap();
        net.accept(alice(), a, id(2), 0);

        let err = net.world.send(alice(), a, &burn(1, 2)).unwrap_err();
        assert_eq!(
            err,
            ContractError::LimitReached {
                what: "recursive burns",
                limit: 2,
            }
        );
        assert_eq!(net.children(b, id(1)), vec![Child::new(a, id(2))]);
        assert_eq!(net.owner_of(c, id(1)).unwrap(), alice());
    }

    #[test]
    fn test_nested_transfer_between_collections() {
        let mut net = Network::new();
        let a = net.collection(CollectionConfig::default());
        let b = net.collection(CollectionConfig::default());
        let c = net.collection(CollectionConfig::default());
        net.mint(a, alice());
        net.mint(b, bob());
        net.nest_mint(c, a, id(1), 1).unwrap();
        net.accept(alice(), a, id(1), 0);

        net.world
            .send(
                alice(),
                c,
                &NestTransferFromCall {
                    from: a,
                    to: b,
                    token_id: id(1),
                    destination_id: id(1),
                },
            )
            .unwrap();

        assert!(net.children(a, id(1)).is_empty());
        assert_eq!(net.pending(b, id(1)), vec![Child::new(c, id(1))]);
        assert_eq!(net.owner_of(c, id(1)).unwrap(), bob());
    }

    #[test]
    fn test_failed_nest_mint_rolls_back_mint_and_payment() {
        let mut net = Network::new();
        let parent = net.collection(CollectionConfig::default());
        let child = net.collection(CollectionConfig::new(U256::from(999), U256::from(10)));
        net.world.fund(alice(), U256::from(10));

        let err = net
            .world
            .send_with_value(
                alice(),
                child,
                U256::from(10),
                &nd_04_nestable::NestMintCall {
                    to: parent,
                    destination_id: id(7),
                    amount: U256::one(),
                },
            )
            .unwrap_err();
        assert_eq!(err, ContractError::TokenNotFound(id(7)));
        assert_eq!(net.world.balance_of(alice()), U256::from(10));
        assert_eq!(net.world.balance_of(child), U256::zero());
        assert_eq!(
            net.world.view(alice(), child, &TotalSupplyCall).unwrap(),
            U256::zero()
        );
    }
}
