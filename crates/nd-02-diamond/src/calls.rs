//! # Diamond Call Table
//!
//! Typed operations served by the standard facets. Each struct carries the
//! canonical signature its selector is derived from, so the selectors match
//! the ones the wider ecosystem uses for the same operations.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Bytes, ContractCall, FacetCut, FacetInfo, InterfaceId, Selector};

// =============================================================================
// DIAMOND CUT
// =============================================================================

/// `diamondCut(cuts, init, calldata)`: owner-only atomic registry update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiamondCutCall {
    /// Entries applied in order.
    pub cuts: Vec<FacetCut>,
    /// Initializer facet, or zero for none.
    pub init: Address,
    /// Calldata executed against `init` in the diamond's storage.
    pub calldata: Bytes,
}

impl DiamondCutCall {
    /// A cut without an initializer.
    #[must_use]
    pub fn new(cuts: Vec<FacetCut>) -> Self {
        Self {
            cuts,
            init: Address::ZERO,
            calldata: Bytes::new(),
        }
    }

    /// Attaches an initializer call.
    #[must_use]
    pub fn with_init(mut self, init: Address, calldata: Bytes) -> Self {
        self.init = init;
        self.calldata = calldata;
        self
    }
}

impl ContractCall for DiamondCutCall {
    const SIGNATURE: &'static str = "diamondCut((address,uint8,bytes4[])[],address,bytes)";
    type Output = ();
}

// =============================================================================
// LOUPE
// =============================================================================

/// `facets()`: every facet with its selectors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetsCall;

impl ContractCall for FacetsCall {
    const SIGNATURE: &'static str = "facets()";
    type Output = Vec<FacetInfo>;
}

/// `facetFunctionSelectors(facet)`: selectors registered to one facet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetFunctionSelectorsCall {
    /// Facet queried.
    pub facet: Address,
}

impl ContractCall for FacetFunctionSelectorsCall {
    const SIGNATURE: &'static str = "facetFunctionSelectors(address)";
    type Output = Vec<Selector>;
}

/// `facetAddresses()`: facet addresses in registration order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetAddressesCall;

impl ContractCall for FacetAddressesCall {
    const SIGNATURE: &'static str = "facetAddresses()";
    type Output = Vec<Address>;
}

/// `facetAddress(selector)`: the facet serving a selector, or zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetAddressCall {
    /// Selector queried.
    pub function_selector: Selector,
}

impl ContractCall for FacetAddressCall {
    const SIGNATURE: &'static str = "facetAddress(bytes4)";
    type Output = Address;
}

/// `supportsInterface(interfaceId)`: ERC-165 query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportsInterfaceCall {
    /// Interface queried.
    pub interface_id: InterfaceId,
}

impl ContractCall for SupportsInterfaceCall {
    const SIGNATURE: &'static str = "supportsInterface(bytes4)";
    type Output = bool;
}

// =============================================================================
// OWNERSHIP
// =============================================================================

/// `owner()`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerCall;

impl ContractCall for OwnerCall {
    const SIGNATURE: &'static str = "owner()";
    type Output = Address;
}

/// `transferOwnership(newOwner)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOwnershipCall {
    /// Account receiving ownership.
    pub new_owner: Address,
}

impl ContractCall for TransferOwnershipCall {
    const SIGNATURE: &'static str = "transferOwnership(address)";
    type Output = ();
}

// =============================================================================
// INITIALIZATION AND RECEIVE
// =============================================================================

/// `init()`: the `DiamondInit` initializer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitCall;

impl ContractCall for InitCall {
    const SIGNATURE: &'static str = "init()";
    type Output = ();
}

/// `receive()`: the path plain value transfers (empty calldata) are routed to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveCall;

impl ContractCall for ReceiveCall {
    const SIGNATURE: &'static str = "receive()";
    type Output = ();
}
