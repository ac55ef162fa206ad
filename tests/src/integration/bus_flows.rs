//! # Bus Flows
//!
//! Collection activity submitted through the async host service, observed
//! by event-bus subscribers. Only committed transactions reach the bus.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use nd_01_host::{HostApi, HostService, ServiceConfig};
    use nd_02_diamond::{FacetLibrary, StandardFacets};
    use nd_04_nestable::{CollectionConfig, CollectionFacets, MintCall, NestMintCall};
    use shared_bus::{EventFilter, EventTopic, InMemoryEventBus};
    use shared_types::{Address, ContractCall, ContractError, Event, Message, U256};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    struct Harness {
        bus: Arc<InMemoryEventBus>,
        service: HostService<InMemoryEventBus>,
        parent: Address,
        child: Address,
    }

    async fn deploy_collection(
        service: &HostService<InMemoryEventBus>,
        library: &FacetLibrary<nd_04_nestable::CollectionStorage>,
        standard: StandardFacets,
        facets: CollectionFacets,
    ) -> Address {
        let library = library.clone();
        service
            .deploy(owner(), move |address, env| {
                facets.construct(
                    &standard,
                    address,
                    env,
                    library,
                    owner(),
                    CollectionConfig::default(),
                )
            })
            .await
            .unwrap()
            .contract_address
            .unwrap()
    }

    async fn setup() -> Harness {
        init_tracing();
        let bus = Arc::new(InMemoryEventBus::new());
        let service = HostService::new(Arc::clone(&bus), ServiceConfig::default()).unwrap();
        let library = FacetLibrary::new(deployer());
        let standard = StandardFacets::deploy(&library);
        let facets = CollectionFacets::deploy(&library);
        let parent = deploy_collection(&service, &library, standard, facets).await;
        let child = deploy_collection(&service, &library, standard, facets).await;
        Harness {
            bus,
            service,
            parent,
            child,
        }
    }

    fn message<C: ContractCall>(sender: Address, to: Address, call: &C) -> Message {
        Message::new(sender, to, call.encode().unwrap())
    }

    fn nest_mint(h: &Harness, destination_id: u64) -> Message {
        message(
            alice(),
            h.child,
            &NestMintCall {
                to: h.parent,
                destination_id: id(destination_id),
                amount: U256::one(),
            },
        )
    }

    #[tokio::test]
    async fn test_nesting_events_reach_subscribers() {
        let h = setup().await;
        let mut sub = h.bus.subscribe(EventFilter::topics(vec![EventTopic::Nesting]));

        h.service
            .submit(message(alice(), h.parent, &MintCall { to: alice() }))
            .await
            .unwrap();
        h.service.submit(nest_mint(&h, 1)).await.unwrap();

        let event = timeout(Duration::from_secs(1), sub.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event.source_contract(), h.parent);
        assert_eq!(
            event.log.event,
            Event::ChildProposed {
                token_id: id(1),
                child_index: 0,
                child_address: h.child,
                child_id: id(1),
            }
        );
    }

    #[tokio::test]
    async fn test_token_events_filtered_by_contract() {
        let h = setup().await;
        let mut sub = h.bus.subscribe(EventFilter {
            topics: vec![EventTopic::Tokens],
            contracts: vec![h.child],
        });

        h.service
            .submit(message(alice(), h.parent, &MintCall { to: alice() }))
            .await
            .unwrap();
        h.service.submit(nest_mint(&h, 1)).await.unwrap();

        let event = timeout(Duration::from_secs(1), sub.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            event.log.event,
            Event::Transfer {
                from: Address::ZERO,
                to: h.parent,
                token_id: id(1),
            }
        );
    }

    #[tokio::test]
    async fn test_reverted_nest_mint_publishes_nothing() {
        let h = setup().await;
        let mut sub = h.bus.subscribe(EventFilter::all());

        let err = h.service.submit(nest_mint(&h, 9)).await.unwrap_err();
        assert_eq!(err, ContractError::TokenNotFound(id(9)));
        assert!(matches!(sub.try_recv(), Ok(None)));

        let stats = h.service.stats().await;
        assert_eq!(stats.transactions_reverted, 1);
        assert_eq!(stats.contracts_deployed, 2);
    }
}
