//! # Dispatch Proxy
//!
//! A [`Diamond`] is a deployable contract that owns one [`DiamondStorage`]
//! and no logic of its own. Every call is routed by its leading selector:
//!
//! 1. the diamond's own registry;
//! 2. if the diamond follows a beacon, the beacon's `facetAddress`;
//! 3. otherwise the call fails with `FunctionNotFound`.
//!
//! The resolved facet runs against this diamond's storage, and its return
//! data or error is passed through unchanged. Empty calldata is routed to
//! the `receive()` selector, so plain value is only accepted if some facet
//! registers it.

use crate::calls::{FacetAddressCall, ReceiveCall};
use crate::domain::storage::DiamondStorage;
use crate::facets::diamond_cut;
use crate::library::FacetLibrary;
use crate::ports::FacetContext;
use shared_types::{
    Address, Bytes, Contract, ContractCall, ContractError, Environment, Event, FacetCut, Message,
    Selector,
};
use tracing::{info, trace};

/// Constructor arguments of a diamond.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiamondArgs {
    /// Initial owner.
    pub owner: Address,
    /// Diamond to follow for unregistered selectors.
    pub beacon: Option<Address>,
    /// Initializer run after the constructor cut, or zero.
    pub init: Address,
    /// Calldata for `init`.
    pub init_calldata: Bytes,
}

impl DiamondArgs {
    /// Arguments for a plain diamond owned by `owner`.
    #[must_use]
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            beacon: None,
            init: Address::ZERO,
            init_calldata: Bytes::new(),
        }
    }

    /// Runs `init` with `calldata` after the constructor cut.
    #[must_use]
    pub fn with_init(mut self, init: Address, calldata: Bytes) -> Self {
        self.init = init;
        self.init_calldata = calldata;
        self
    }

    /// Follows `beacon` for selectors this diamond does not register.
    #[must_use]
    pub fn following(mut self, beacon: Address) -> Self {
        self.beacon = Some(beacon);
        self
    }
}

/// The diamond proxy contract.
#[derive(Clone)]
pub struct Diamond<S> {
    address: Address,
    storage: DiamondStorage<S>,
    library: FacetLibrary<S>,
}

impl<S: Clone + Send + Sync + 'static> Diamond<S> {
    /// Constructs a diamond at `address`: sets the owner, applies `cuts`
    /// and runs the initializer from `args`.
    ///
    /// # Errors
    ///
    /// Propagates cut validation and initializer failures.
    pub fn new(
        address: Address,
        env: &mut dyn Environment,
        library: FacetLibrary<S>,
        app: S,
        cuts: Vec<FacetCut>,
        args: DiamondArgs,
    ) -> Result<Self, ContractError> {
        let mut diamond = Self {
            address,
            storage: DiamondStorage::new(args.owner, args.beacon, app),
            library,
        };
        env.emit_event(
            address,
            Event::OwnershipTransferred {
                previous_owner: Address::ZERO,
                new_owner: args.owner,
            },
        );

        let msg = Message::new(args.owner, address, Bytes::new());
        let mut ctx = FacetContext {
            this: address,
            msg: &msg,
            storage: &mut diamond.storage,
            env,
            library: &diamond.library,
        };
        diamond_cut(&mut ctx, cuts, args.init, args.init_calldata)?;

        info!(
            %address,
            owner = %args.owner,
            beacon = ?args.beacon,
            "Diamond constructed"
        );
        Ok(diamond)
    }

    /// Address of this diamond.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Storage of this diamond.
    #[must_use]
    pub fn storage(&self) -> &DiamondStorage<S> {
        &self.storage
    }

    /// Facet code this diamond dispatches into.
    #[must_use]
    pub fn library(&self) -> &FacetLibrary<S> {
        &self.library
    }

    fn resolve(
        &self,
        env: &mut dyn Environment,
        selector: Selector,
    ) -> Result<Address, ContractError> {
        if let Some(facet) = self.storage.registry.facet_address(selector) {
            return Ok(facet);
        }
        if let Some(beacon) = self.storage.beacon {
            let facet = env.call_typed(
                self.address,
                beacon,
                &FacetAddressCall {
                    function_selector: selector,
                },
            )?;
            if !facet.is_zero() {
                return Ok(facet);
            }
        }
        Err(ContractError::FunctionNotFound(selector))
    }
}

impl<S: Clone + Send + Sync + 'static> Contract for Diamond<S> {
    fn call(&mut self, env: &mut dyn Environment, msg: &Message) -> Result<Bytes, ContractError> {
        let (selector, args) = if msg.data.is_empty() {
            (ReceiveCall::selector(), &[][..])
        } else {
            Selector::split_calldata(msg.data.as_slice())
                .ok_or_else(|| ContractError::Codec("calldata shorter than a selector".into()))?
        };

        let facet_address = self.resolve(env, selector)?;
        let facet = self
            .library
            .get(facet_address)
            .ok_or(ContractError::NoCode(facet_address))?;
        trace!(
            diamond = %self.address,
            %selector,
            facet = facet.name(),
            sender = %msg.sender,
            "Dispatching"
        );

        let mut ctx = FacetContext {
            this: self.address,
            msg,
            storage: &mut self.storage,
            env,
            library: &self.library,
        };
        facet.execute(&mut ctx, selector, args)
    }

    fn snapshot(&self) -> Box<dyn Contract> {
        Box::new(self.clone())
    }
}
