//! Diamond flows against a real host: deployment, upgrades, dispatch,
//! ownership, and beacon-following trackers.

use nd_01_host::World;
use nd_02_diamond::prelude::*;
use serde::{Deserialize, Serialize};
use shared_types::{
    Address, Bytes, ContractCall, ContractError, CutError, Event, FacetCut, FacetInfo, Message,
    Selector, U256,
};
use std::str::FromStr;

/// Application storage of the test diamonds: calls served by stub facets.
type App = u64;

/// Facet answering a fixed list of no-argument signatures.
struct StubFacet {
    signatures: Vec<String>,
}

impl StubFacet {
    fn numbered(prefix: &str, count: u8) -> Self {
        Self {
            signatures: (1..=count).map(|i| format!("{prefix}Func{i}()")).collect(),
        }
    }

    fn with(mut self, signature: &str) -> Self {
        self.signatures.push(signature.to_string());
        self
    }
}

impl Facet<App> for StubFacet {
    fn name(&self) -> &'static str {
        "StubFacet"
    }

    fn selectors(&self) -> Vec<Selector> {
        self.signatures
            .iter()
            .map(|s| Selector::from_signature(s))
            .collect()
    }

    fn execute(
        &self,
        ctx: &mut FacetContext<'_, App>,
        selector: Selector,
        _args: &[u8],
    ) -> Result<Bytes, ContractError> {
        if !self.selectors().contains(&selector) {
            return Err(ContractError::FunctionNotFound(selector));
        }
        *ctx.app_mut() += 1;
        Ok(Bytes::new())
    }
}

#[derive(Serialize, Deserialize)]
struct CountCall;

impl ContractCall for CountCall {
    const SIGNATURE: &'static str = "count()";
    type Output = u64;
}

/// Serves `count()`: the number of stub calls this diamond has served.
struct CounterFacet;

impl Facet<App> for CounterFacet {
    fn name(&self) -> &'static str {
        "CounterFacet"
    }

    fn selectors(&self) -> Vec<Selector> {
        vec![CountCall::selector()]
    }

    fn execute(
        &self,
        ctx: &mut FacetContext<'_, App>,
        _selector: Selector,
        args: &[u8],
    ) -> Result<Bytes, ContractError> {
        shared_types::handle::<CountCall, _>(args, |_| Ok(*ctx.app()))
    }
}

/// Initializer that always fails.
struct FailingInit;

impl Facet<App> for FailingInit {
    fn name(&self) -> &'static str {
        "FailingInit"
    }

    fn selectors(&self) -> Vec<Selector> {
        vec![InitCall::selector()]
    }

    fn execute(
        &self,
        _ctx: &mut FacetContext<'_, App>,
        _selector: Selector,
        _args: &[u8],
    ) -> Result<Bytes, ContractError> {
        Err(ContractError::Revert("init reverted".into()))
    }
}

struct Fixture {
    world: World,
    library: FacetLibrary<App>,
    standard: StandardFacets,
    diamond: Address,
}

fn owner() -> Address {
    Address::repeat_byte(0x0A)
}

fn stranger() -> Address {
    Address::repeat_byte(0x0B)
}

fn selector(hex: &str) -> Selector {
    Selector::from_str(hex).unwrap()
}

fn deploy(
    world: &mut World,
    library: &FacetLibrary<App>,
    cuts: Vec<FacetCut>,
    args: DiamondArgs,
) -> Result<Address, ContractError> {
    let library = library.clone();
    let receipt = world.deploy(args.owner, move |address, env| {
        Diamond::new(address, env, library, 0, cuts, args)
    })?;
    Ok(receipt.contract_address.unwrap())
}

fn standard_args(standard: &StandardFacets) -> DiamondArgs {
    DiamondArgs::new(owner()).with_init(standard.init, StandardFacets::init_calldata().unwrap())
}

fn setup() -> Fixture {
    let mut world = World::default();
    let library = FacetLibrary::new(Address::repeat_byte(0xFA));
    let standard = StandardFacets::deploy(&library);
    let diamond = deploy(
        &mut world,
        &library,
        standard.cuts(&library),
        standard_args(&standard),
    )
    .unwrap();
    Fixture {
        world,
        library,
        standard,
        diamond,
    }
}

fn call_raw(world: &mut World, to: Address, signature: &str) -> Result<(), ContractError> {
    let data = Bytes(Selector::from_signature(signature).0.to_vec());
    world.transact(Message::new(owner(), to, data)).map(|_| ())
}

fn cut(f: &mut Fixture, cuts: Vec<FacetCut>) -> Result<(), ContractError> {
    f.world
        .send(owner(), f.diamond, &DiamondCutCall::new(cuts))
        .map(|_| ())
}

fn facets_of(world: &mut World, diamond: Address) -> Vec<FacetInfo> {
    world.view(owner(), diamond, &FacetsCall).unwrap()
}

fn facet_addresses_of(world: &mut World, diamond: Address) -> Vec<Address> {
    world.view(owner(), diamond, &FacetAddressesCall).unwrap()
}

// =============================================================================
// DEPLOYMENT AND LOUPE
// =============================================================================

#[test]
fn test_three_facets_after_deployment() {
    let mut f = setup();
    let addresses = facet_addresses_of(&mut f.world, f.diamond);
    assert_eq!(
        addresses,
        vec![f.standard.cut, f.standard.loupe, f.standard.ownership]
    );

    for facet in addresses {
        let selectors: Vec<Selector> = f
            .world
            .view(owner(), f.diamond, &FacetFunctionSelectorsCall { facet })
            .unwrap();
        assert_eq!(selectors, f.library.selectors_of(facet));
    }
}

#[test]
fn test_well_known_selectors_resolve() {
    let mut f = setup();
    let lookup = |world: &mut World, hex: &str| -> Address {
        world
            .view(
                owner(),
                f.diamond,
                &FacetAddressCall {
                    function_selector: selector(hex),
                },
            )
            .unwrap()
    };
    assert_eq!(lookup(&mut f.world, "0x1f931c1c"), f.standard.cut);
    assert_eq!(lookup(&mut f.world, "0xcdffacc6"), f.standard.loupe);
    assert_eq!(lookup(&mut f.world, "0x01ffc9a7"), f.standard.loupe);
    assert_eq!(lookup(&mut f.world, "0xf2fde38b"), f.standard.ownership);
    assert_eq!(lookup(&mut f.world, "0xdeadbeef"), Address::ZERO);
}

#[test]
fn test_supports_standard_interfaces() {
    let mut f = setup();
    for id in [
        interfaces::erc165(),
        interfaces::diamond_cut(),
        interfaces::diamond_loupe(),
        interfaces::erc173(),
    ] {
        let supported = f
            .world
            .view(owner(), f.diamond, &SupportsInterfaceCall { interface_id: id })
            .unwrap();
        assert!(supported, "{id} should be supported");
    }
    let unknown = SupportsInterfaceCall {
        interface_id: selector("0xffffffff"),
    };
    assert!(!f.world.view(owner(), f.diamond, &unknown).unwrap());
}

#[test]
fn test_constructor_emits_ownership_and_cut() {
    let mut world = World::default();
    let library = FacetLibrary::<App>::new(Address::repeat_byte(0xFA));
    let standard = StandardFacets::deploy(&library);
    let cuts = standard.cuts(&library);
    let args = standard_args(&standard);
    let lib = library.clone();
    let receipt = world
        .deploy(owner(), move |address, env| {
            Diamond::new(address, env, lib, 0, cuts, args)
        })
        .unwrap();

    assert_eq!(receipt.events_named("OwnershipTransferred").len(), 1);
    let cuts = receipt.events_named("DiamondCut");
    assert_eq!(cuts.len(), 1);
    match cuts[0] {
        Event::DiamondCut { cuts, init, .. } => {
            assert_eq!(cuts.len(), 3);
            assert_eq!(*init, standard.init);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

// =============================================================================
// UPGRADES
// =============================================================================

#[test]
fn test_add_and_call_new_functions() {
    let mut f = setup();
    let test1 = f.library.deploy(StubFacet::numbered("test1", 20));
    let counter = f.library.deploy(CounterFacet);
    let test1_selectors = f.library.selectors_of(test1);
    cut(
        &mut f,
        vec![
            FacetCut::add(test1, test1_selectors),
            FacetCut::add(counter, vec![CountCall::selector()]),
        ],
    )
    .unwrap();

    call_raw(&mut f.world, f.diamond, "test1Func10()").unwrap();
    call_raw(&mut f.world, f.diamond, "test1Func20()").unwrap();
    assert_eq!(f.world.view(owner(), f.diamond, &CountCall).unwrap(), 2);

    let selectors: Vec<Selector> = f
        .world
        .view(owner(), f.diamond, &FacetFunctionSelectorsCall { facet: test1 })
        .unwrap();
    assert_eq!(selectors.len(), 20);
}

#[test]
fn test_replace_supports_interface() {
    let mut f = setup();
    let test1 = f
        .library
        .deploy(StubFacet::numbered("test1", 3).with("supportsInterface(bytes4)"));
    let mut selectors = f.library.selectors_of(test1);
    let supports = selectors.pop().unwrap();
    cut(&mut f, vec![FacetCut::add(test1, selectors)]).unwrap();
    cut(&mut f, vec![FacetCut::replace(test1, vec![supports])]).unwrap();

    let registered: Vec<Selector> = f
        .world
        .view(owner(), f.diamond, &FacetFunctionSelectorsCall { facet: test1 })
        .unwrap();
    assert_eq!(registered, f.library.selectors_of(test1));

    let loupe: Vec<Selector> = f
        .world
        .view(
            owner(),
            f.diamond,
            &FacetFunctionSelectorsCall {
                facet: f.standard.loupe,
            },
        )
        .unwrap();
    assert!(!loupe.contains(&supports));
}

#[test]
fn test_remove_everything_but_cut_and_facets() {
    let mut f = setup();
    let test1 = f.library.deploy(StubFacet::numbered("test1", 5));
    let test1_selectors = f.library.selectors_of(test1);
    cut(&mut f, vec![FacetCut::add(test1, test1_selectors)]).unwrap();

    let keep = [DiamondCutCall::selector(), FacetsCall::selector()];
    let doomed: Vec<Selector> = facets_of(&mut f.world, f.diamond)
        .into_iter()
        .flat_map(|info| info.function_selectors)
        .filter(|s| !keep.contains(s))
        .collect();
    cut(&mut f, vec![FacetCut::remove(doomed)]).unwrap();

    let facets = facets_of(&mut f.world, f.diamond);
    assert_eq!(facets.len(), 2);
    assert_eq!(facets[0].facet_address, f.standard.cut);
    assert_eq!(facets[0].function_selectors, vec![selector("0x1f931c1c")]);
    assert_eq!(facets[1].facet_address, f.standard.loupe);
    assert_eq!(facets[1].function_selectors, vec![selector("0x7a0ed627")]);
}

#[test]
fn test_add_then_remove_restores_function_not_found() {
    let mut f = setup();
    let test2 = f.library.deploy(StubFacet::numbered("test2", 2));
    let missing = Selector::from_signature("test2Func1()");

    assert_eq!(
        call_raw(&mut f.world, f.diamond, "test2Func1()"),
        Err(ContractError::FunctionNotFound(missing))
    );
    let test2_selectors = f.library.selectors_of(test2);
    cut(&mut f, vec![FacetCut::add(test2, test2_selectors)]).unwrap();
    call_raw(&mut f.world, f.diamond, "test2Func1()").unwrap();
    let test2_selectors = f.library.selectors_of(test2);
    cut(&mut f, vec![FacetCut::remove(test2_selectors)]).unwrap();
    assert_eq!(
        call_raw(&mut f.world, f.diamond, "test2Func1()"),
        Err(ContractError::FunctionNotFound(missing))
    );
    assert!(!facet_addresses_of(&mut f.world, f.diamond).contains(&test2));
}

#[test]
fn test_invalid_batch_leaves_registry_unchanged() {
    let mut f = setup();
    let before = facets_of(&mut f.world, f.diamond);
    let test1 = f.library.deploy(StubFacet::numbered("test1", 2));

    let test1_selectors = f.library.selectors_of(test1);
    let err = cut(
        &mut f,
        vec![
            FacetCut::add(test1, test1_selectors),
            FacetCut::add(test1, vec![DiamondCutCall::selector()]),
        ],
    )
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::InvalidCut(CutError::SelectorAlreadyExists(DiamondCutCall::selector()))
    );
    assert_eq!(facets_of(&mut f.world, f.diamond), before);
}

#[test]
fn test_undeployed_facet_rejected() {
    let mut f = setup();
    let ghost = Address::repeat_byte(0x99);
    assert_eq!(
        cut(&mut f, vec![FacetCut::add(ghost, vec![selector("0x12345678")])]),
        Err(ContractError::InvalidCut(CutError::FacetHasNoCode(ghost)))
    );
}

#[test]
fn test_only_owner_can_cut() {
    let mut f = setup();
    let test1 = f.library.deploy(StubFacet::numbered("test1", 1));
    let call = DiamondCutCall::new(vec![FacetCut::add(test1, f.library.selectors_of(test1))]);
    let err = f.world.send(stranger(), f.diamond, &call).unwrap_err();
    assert_eq!(err.kind(), shared_types::ErrorKind::Unauthorized);
}

#[test]
fn test_init_validation() {
    let mut f = setup();
    let test1 = f.library.deploy(StubFacet::numbered("test1", 1));
    let entries = vec![FacetCut::add(test1, f.library.selectors_of(test1))];

    let dangling = DiamondCutCall::new(entries.clone()).with_init(Address::ZERO, Bytes(vec![1]));
    assert_eq!(
        f.world.send(owner(), f.diamond, &dangling).unwrap_err(),
        ContractError::InvalidCut(CutError::InitCalldataWithoutTarget)
    );

    let failing = f.library.deploy(FailingInit);
    let reverted = DiamondCutCall::new(entries)
        .with_init(failing, StandardFacets::init_calldata().unwrap());
    assert_eq!(
        f.world.send(owner(), f.diamond, &reverted).unwrap_err(),
        ContractError::InitializationFailed(Box::new(ContractError::Revert(
            "init reverted".into()
        )))
    );
    // The cut entries were rolled back with the initializer.
    assert!(!facet_addresses_of(&mut f.world, f.diamond).contains(&test1));
}

#[test]
fn test_removing_diamond_cut_freezes_registry() {
    let mut f = setup();
    cut(&mut f, vec![FacetCut::remove(vec![DiamondCutCall::selector()])]).unwrap();
    assert_eq!(
        cut(&mut f, vec![FacetCut::remove(vec![OwnerCall::selector()])]),
        Err(ContractError::FunctionNotFound(DiamondCutCall::selector()))
    );
}

// =============================================================================
// OWNERSHIP AND RECEIVE
// =============================================================================

#[test]
fn test_transfer_ownership() {
    let mut f = setup();
    assert_eq!(f.world.view(owner(), f.diamond, &OwnerCall).unwrap(), owner());

    let handover = TransferOwnershipCall {
        new_owner: stranger(),
    };
    assert!(f.world.send(stranger(), f.diamond, &handover).is_err());

    let receipt = f.world.send(owner(), f.diamond, &handover).unwrap();
    assert_eq!(
        receipt.events().next(),
        Some(&Event::OwnershipTransferred {
            previous_owner: owner(),
            new_owner: stranger(),
        })
    );
    assert_eq!(f.world.view(owner(), f.diamond, &OwnerCall).unwrap(), stranger());

    // The previous owner lost the right to cut.
    let test1 = f.library.deploy(StubFacet::numbered("test1", 1));
    let test1_selectors = f.library.selectors_of(test1);
    assert!(cut(&mut f, vec![FacetCut::add(test1, test1_selectors)]).is_err());
}

#[test]
fn test_plain_value_needs_receive_path() {
    let mut f = setup();
    f.world.fund(owner(), U256::from(10));
    let pay = |world: &mut World, diamond: Address| {
        world.transact(Message::new(owner(), diamond, Bytes::new()).with_value(U256::from(4)))
    };

    assert_eq!(
        pay(&mut f.world, f.diamond).unwrap_err(),
        ContractError::FunctionNotFound(ReceiveCall::selector())
    );
    assert_eq!(f.world.balance_of(f.diamond), U256::zero());

    let receiver = f.library.deploy(StubFacet {
        signatures: vec!["receive()".into()],
    });
    cut(&mut f, vec![FacetCut::add(receiver, vec![ReceiveCall::selector()])]).unwrap();
    pay(&mut f.world, f.diamond).unwrap();
    assert_eq!(f.world.balance_of(f.diamond), U256::from(4));
}

// =============================================================================
// TRACKERS
// =============================================================================

#[test]
fn test_tracker_follows_beacon() {
    let mut f = setup();
    let tracker = deploy(
        &mut f.world,
        &f.library,
        Vec::new(),
        DiamondArgs::new(owner()).following(f.diamond),
    )
    .unwrap();

    assert_eq!(
        facet_addresses_of(&mut f.world, tracker),
        facet_addresses_of(&mut f.world, f.diamond)
    );
    let via_tracker: Address = f
        .world
        .view(
            owner(),
            tracker,
            &FacetAddressCall {
                function_selector: selector("0xf2fde38b"),
            },
        )
        .unwrap();
    assert_eq!(via_tracker, f.standard.ownership);

    // Upgrading the beacon is visible through the tracker immediately.
    let test1 = f.library.deploy(StubFacet::numbered("test1", 10));
    let counter = f.library.deploy(CounterFacet);
    let test1_selectors = f.library.selectors_of(test1);
    cut(
        &mut f,
        vec![
            FacetCut::add(test1, test1_selectors),
            FacetCut::add(counter, vec![CountCall::selector()]),
        ],
    )
    .unwrap();
    let selectors: Vec<Selector> = f
        .world
        .view(owner(), tracker, &FacetFunctionSelectorsCall { facet: test1 })
        .unwrap();
    assert_eq!(selectors, f.library.selectors_of(test1));

    // Beacon code runs against the tracker's own storage.
    call_raw(&mut f.world, tracker, "test1Func10()").unwrap();
    assert_eq!(f.world.view(owner(), tracker, &CountCall).unwrap(), 1);
    assert_eq!(f.world.view(owner(), f.diamond, &CountCall).unwrap(), 0);
}

#[test]
fn test_diamond_tracker_lists_own_facets_first() {
    let mut f = setup();
    let own = StandardFacets::deploy(&f.library);
    let tracker = deploy(
        &mut f.world,
        &f.library,
        own.cuts(&f.library),
        DiamondArgs::new(owner())
            .following(f.diamond)
            .with_init(own.init, StandardFacets::init_calldata().unwrap()),
    )
    .unwrap();

    let test1 = f.library.deploy(StubFacet::numbered("test1", 4));
    let test1_selectors = f.library.selectors_of(test1);
    cut(&mut f, vec![FacetCut::add(test1, test1_selectors)]).unwrap();

    let addresses = facet_addresses_of(&mut f.world, tracker);
    assert_eq!(addresses, vec![own.cut, own.loupe, own.ownership, test1]);

    let cut_facet: Address = f
        .world
        .view(
            owner(),
            tracker,
            &FacetAddressCall {
                function_selector: DiamondCutCall::selector(),
            },
        )
        .unwrap();
    assert_ne!(cut_facet, f.standard.cut);
    assert_eq!(cut_facet, own.cut);

    // Overriding a beacon selector locally hides the beacon's entry.
    let local = f.library.deploy(StubFacet::numbered("test1", 1));
    f.world
        .send(
            owner(),
            tracker,
            &DiamondCutCall::new(vec![FacetCut::add(local, f.library.selectors_of(local))]),
        )
        .unwrap();
    let facets = facets_of(&mut f.world, tracker);
    let inherited = facets.iter().find(|info| info.facet_address == test1).unwrap();
    assert_eq!(inherited.function_selectors.len(), 3);
}

#[test]
fn test_tracker_without_match_fails() {
    let mut f = setup();
    let tracker = deploy(
        &mut f.world,
        &f.library,
        Vec::new(),
        DiamondArgs::new(owner()).following(f.diamond),
    )
    .unwrap();
    assert_eq!(
        call_raw(&mut f.world, tracker, "nothing()"),
        Err(ContractError::FunctionNotFound(Selector::from_signature(
            "nothing()"
        )))
    );
}
