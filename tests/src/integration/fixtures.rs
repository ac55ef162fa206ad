//! Shared setup: one host with a facet library, the standard facets and
//! the collection facets deployed into it.

use nd_01_host::{Receipt, World};
use nd_02_diamond::{Diamond, DiamondArgs, FacetLibrary, StandardFacets};
use nd_03_authentication::{AuthenticationManager, RegisterCall};
use nd_04_nestable::{
    AcceptChildCall, ChildrenOfCall, CollectionConfig, CollectionFacets, CollectionStorage,
    DirectOwnerOfCall, MintCall, NestMintCall, OwnerOfCall, PendingChildrenOfCall,
};
use shared_types::{Address, Child, ContractError, DirectOwner, TokenId, U256};
use tracing_subscriber::EnvFilter;

pub fn owner() -> Address {
    Address::repeat_byte(0x01)
}

pub fn alice() -> Address {
    Address::repeat_byte(0x0a)
}

pub fn bob() -> Address {
    Address::repeat_byte(0x0b)
}

pub fn deployer() -> Address {
    Address::repeat_byte(0xde)
}

pub fn id(n: u64) -> TokenId {
    U256::from(n)
}

/// Installs a test log writer honoring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct Network {
    pub world: World,
    pub library: FacetLibrary<CollectionStorage>,
    pub standard: StandardFacets,
    pub facets: CollectionFacets,
}

impl Network {
    pub fn new() -> Self {
        init_tracing();
        let library = FacetLibrary::new(deployer());
        let standard = StandardFacets::deploy(&library);
        let facets = CollectionFacets::deploy(&library);
        Self {
            world: World::default(),
            library,
            standard,
            facets,
        }
    }

    pub fn manager(&mut self) -> Address {
        self.world
            .deploy(owner(), |address, env| {
                Ok(AuthenticationManager::new(address, env, owner()))
            })
            .unwrap()
            .contract_address
            .unwrap()
    }

    pub fn register(&mut self, manager: Address, contract_address: Address, max_active: u64) {
        self.world
            .send(
                owner(),
                manager,
                &RegisterCall {
                    contract_address,
                    max_active_num: U256::from(max_active),
                },
            )
            .unwrap();
    }

    pub fn collection(&mut self, config: CollectionConfig) -> Address {
        let (standard, facets, library) = (self.standard, self.facets, self.library.clone());
        self.world
            .deploy(owner(), |address, env| {
                facets.construct(&standard, address, env, library, owner(), config)
            })
            .unwrap()
            .contract_address
            .unwrap()
    }

    /// A collection with no facets of its own that follows `beacon`.
    pub fn tracker(&mut self, beacon: Address, config: CollectionConfig) -> Address {
        let library = self.library.clone();
        let args = DiamondArgs::new(owner())
            .following(beacon)
            .with_init(self.facets.init, CollectionFacets::init_calldata(config).unwrap());
        self.world
            .deploy(owner(), |address, env| {
                let storage = CollectionStorage::default();
                Diamond::new(address, env, library, storage, Vec::new(), args)
            })
            .unwrap()
            .contract_address
            .unwrap()
    }

    pub fn mint(&mut self, collection: Address, to: Address) -> TokenId {
        self.world
            .send(to, collection, &MintCall { to })
            .unwrap()
            .decode::<MintCall>()
            .unwrap()
    }

    pub fn nest_mint(
        &mut self,
        child_collection: Address,
        parent: Address,
        parent_id: TokenId,
        amount: u64,
    ) -> Result<Receipt, ContractError> {
        self.world.send(
            alice(),
            child_collection,
            &NestMintCall {
                to: parent,
                destination_id: parent_id,
                amount: U256::from(amount),
            },
        )
    }

    pub fn accept(&mut self, sender: Address, parent: Address, parent_id: TokenId, index: u64) {
        self.world
            .send(
                sender,
                parent,
                &AcceptChildCall {
                    parent_id,
                    child_index: index,
                },
            )
            .unwrap();
    }

    pub fn children(&mut self, parent: Address, parent_id: TokenId) -> Vec<Child> {
        self.world
            .view(alice(), parent, &ChildrenOfCall { parent_id })
            .unwrap()
    }

    pub fn pending(&mut self, parent: Address, parent_id: TokenId) -> Vec<Child> {
        self.world
            .view(alice(), parent, &PendingChildrenOfCall { parent_id })
            .unwrap()
    }

    pub fn owner_of(
        &mut self,
        collection: Address,
        token_id: TokenId,
    ) -> Result<Address, ContractError> {
        self.world.view(alice(), collection, &OwnerOfCall { token_id })
    }

    pub fn direct_owner_of(&mut self, collection: Address, token_id: TokenId) -> DirectOwner {
        self.world
            .view(alice(), collection, &DirectOwnerOfCall { token_id })
            .unwrap()
    }
}
