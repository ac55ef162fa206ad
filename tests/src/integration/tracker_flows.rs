//! # Tracker Flows
//!
//! A tracker collection carries no facets of its own: every call resolves
//! through the beacon collection's registry and runs against the tracker's
//! own storage. Upgrades of the beacon are visible through the tracker at
//! once.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use nd_02_diamond::{DiamondCutCall, FacetAddressCall, OwnerCall};
    use nd_04_nestable::{CollectionConfig, MaxSupplyCall, MintCall, TotalSupplyCall};
    use shared_types::{ContractCall, ContractError, FacetCut, U256};

    #[test]
    fn test_tracker_runs_beacon_facets_in_own_storage() {
        let mut net = Network::new();
        let beacon = net.collection(CollectionConfig::default());
        let tracker = net.tracker(beacon, CollectionConfig::new(U256::from(5), U256::zero()));

        let token_id = net.mint(tracker, alice());
        assert_eq!(token_id, id(1));
        assert_eq!(net.owner_of(tracker, token_id).unwrap(), alice());
        assert_eq!(
            net.world.view(alice(), tracker, &TotalSupplyCall).unwrap(),
            U256::one()
        );
        assert_eq!(
            net.world.view(alice(), beacon, &TotalSupplyCall).unwrap(),
            U256::zero()
        );
        assert_eq!(
            net.world.view(alice(), tracker, &MaxSupplyCall).unwrap(),
            U256::from(5)
        );
        assert_eq!(net.world.view(alice(), tracker, &OwnerCall).unwrap(), owner());

        let facet = net
            .world
            .view(
                alice(),
                tracker,
                &FacetAddressCall {
                    function_selector: MintCall::selector(),
                },
            )
            .unwrap();
        assert_eq!(facet, net.facets.mint_and_burn);
    }

    #[test]
    fn test_beacon_upgrade_reaches_tracker() {
        let mut net = Network::new();
        let beacon = net.collection(CollectionConfig::default());
        let tracker = net.tracker(beacon, CollectionConfig::default());
        net.mint(tracker, alice());

        net.world
            .send(
                owner(),
                beacon,
                &DiamondCutCall::new(vec![FacetCut::remove(vec![MintCall::selector()])]),
            )
            .unwrap();

        let err = net
            .world
            .send(alice(), tracker, &MintCall { to: alice() })
            .unwrap_err();
        assert_eq!(err, ContractError::FunctionNotFound(MintCall::selector()));
        assert_eq!(
            net.world.view(alice(), tracker, &TotalSupplyCall).unwrap(),
            U256::one()
        );
    }

    #[test]
    fn test_tracker_nests_into_beacon() {
        let mut net = Network::new();
        let beacon = net.collection(CollectionConfig::default());
        let tracker = net.tracker(beacon, CollectionConfig::default());
        let parent_id = net.mint(beacon, alice());

        net.nest_mint(tracker, beacon, parent_id, 1).unwrap();
        net.accept(alice(), beacon, parent_id, 0);
        assert_eq!(
            net.children(beacon, parent_id),
            vec![shared_types::Child::new(tracker, id(1))]
        );
        assert_eq!(net.owner_of(tracker, id(1)).unwrap(), alice());
    }
}
