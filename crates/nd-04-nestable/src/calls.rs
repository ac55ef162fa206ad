//! # Collection Call Table
//!
//! Typed operations served by the collection facets, grouped by facet.

use crate::domain::config::CollectionConfig;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Child, ContractCall, DirectOwner, TokenId, U256};

// =============================================================================
// MINT AND BURN
// =============================================================================

/// `mint(to)`: payable, mints one root-owned token and returns its id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintCall {
    /// Recipient account.
    pub to: Address,
}

impl ContractCall for MintCall {
    const SIGNATURE: &'static str = "mint(address)";
    type Output = TokenId;
}

/// `nestMint(to, destinationId, amount)`: payable, mints `amount` tokens
/// as children of `destinationId` in collection `to`. Returns the new ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestMintCall {
    /// Parent collection.
    pub to: Address,
    /// Parent token.
    pub destination_id: TokenId,
    /// Tokens to mint.
    pub amount: U256,
}

impl ContractCall for NestMintCall {
    const SIGNATURE: &'static str = "nestMint(address,uint256,uint256)";
    type Output = Vec<TokenId>;
}

/// `burn(tokenId, maxRecursiveBurns)`: burns a token and its accepted
/// descendants. Returns the number of descendants burned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnCall {
    /// Token to burn.
    pub token_id: TokenId,
    /// Cap on descendant burns.
    pub max_recursive_burns: u64,
}

impl ContractCall for BurnCall {
    const SIGNATURE: &'static str = "burn(uint256,uint256)";
    type Output = u64;
}

/// `burnNested(tokenId, maxRecursiveBurns)`: burns a child on behalf of
/// its parent collection, which must be the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnNestedCall {
    /// Child token to burn.
    pub token_id: TokenId,
    /// Descendant burns left in the caller's budget.
    pub max_recursive_burns: u64,
}

impl ContractCall for BurnNestedCall {
    const SIGNATURE: &'static str = "burnNested(uint256,uint256)";
    type Output = NestedBurn;
}

/// Result of a `burnNested` call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedBurn {
    /// Descendants counted against the budget, including the deferred ones.
    pub burned: u64,
    /// Descendants living in collections that were already executing. The
    /// caller burns them or hands them further up.
    pub deferred: Vec<Child>,
}

/// `totalSupply()`: live tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalSupplyCall;

impl ContractCall for TotalSupplyCall {
    const SIGNATURE: &'static str = "totalSupply()";
    type Output = U256;
}

/// `maxSupply()`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxSupplyCall;

impl ContractCall for MaxSupplyCall {
    const SIGNATURE: &'static str = "maxSupply()";
    type Output = U256;
}

/// `pricePerMint()`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePerMintCall;

impl ContractCall for PricePerMintCall {
    const SIGNATURE: &'static str = "pricePerMint()";
    type Output = U256;
}

/// `withdraw(to, amount)`: owner-only, sends raised funds out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawCall {
    /// Recipient.
    pub to: Address,
    /// Amount sent.
    pub amount: U256,
}

impl ContractCall for WithdrawCall {
    const SIGNATURE: &'static str = "withdraw(address,uint256)";
    type Output = ();
}

// =============================================================================
// NESTABLE
// =============================================================================

/// `addChild(parentId, childId)`: called by the child's collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddChildCall {
    /// Parent token in the called collection.
    pub parent_id: TokenId,
    /// Child token in the calling collection.
    pub child_id: TokenId,
}

impl ContractCall for AddChildCall {
    const SIGNATURE: &'static str = "addChild(uint256,uint256)";
    type Output = ();
}

/// `acceptChild(parentId, childIndex)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptChildCall {
    /// Parent token.
    pub parent_id: TokenId,
    /// Index in the pending list.
    pub child_index: u64,
}

impl ContractCall for AcceptChildCall {
    const SIGNATURE: &'static str = "acceptChild(uint256,uint256)";
    type Output = ();
}

/// `rejectChild(parentId, childIndex)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectChildCall {
    /// Parent token.
    pub parent_id: TokenId,
    /// Index in the pending list.
    pub child_index: u64,
}

impl ContractCall for RejectChildCall {
    const SIGNATURE: &'static str = "rejectChild(uint256,uint256)";
    type Output = ();
}

/// `rejectAllChildren(parentId)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectAllChildrenCall {
    /// Parent token.
    pub parent_id: TokenId,
}

impl ContractCall for RejectAllChildrenCall {
    const SIGNATURE: &'static str = "rejectAllChildren(uint256)";
    type Output = ();
}

/// `transferChild(parentId, to, destinationId, childIndex, isPending)`:
/// moves a child out to an account (`destination_id == 0`) or under
/// `destination_id` of collection `to`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferChildCall {
    /// Current parent token.
    pub parent_id: TokenId,
    /// Recipient account or destination collection.
    pub to: Address,
    /// Destination parent token, zero for an account.
    pub destination_id: TokenId,
    /// Index in the addressed list.
    pub child_index: u64,
    /// True to address the pending list.
    pub is_pending: bool,
}

impl ContractCall for TransferChildCall {
    const SIGNATURE: &'static str = "transferChild(uint256,address,uint256,uint256,bool)";
    type Output = ();
}

/// `detachChild(parentId, childId)`: called by the child's collection
/// after the child was burned or moved away from the parent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetachChildCall {
    /// Parent token in the called collection.
    pub parent_id: TokenId,
    /// Child token in the calling collection.
    pub child_id: TokenId,
}

impl ContractCall for DetachChildCall {
    const SIGNATURE: &'static str = "detachChild(uint256,uint256)";
    type Output = ();
}

/// `childrenOf(parentId)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildrenOfCall {
    /// Parent token.
    pub parent_id: TokenId,
}

impl ContractCall for ChildrenOfCall {
    const SIGNATURE: &'static str = "childrenOf(uint256)";
    type Output = Vec<Child>;
}

/// `pendingChildrenOf(parentId)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingChildrenOfCall {
    /// Parent token.
    pub parent_id: TokenId,
}

impl ContractCall for PendingChildrenOfCall {
    const SIGNATURE: &'static str = "pendingChildrenOf(uint256)";
    type Output = Vec<Child>;
}

/// `childOf(parentId, index)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildOfCall {
    /// Parent token.
    pub parent_id: TokenId,
    /// Index in the accepted list.
    pub index: u64,
}

impl ContractCall for ChildOfCall {
    const SIGNATURE: &'static str = "childOf(uint256,uint256)";
    type Output = Child;
}

/// `pendingChildOf(parentId, index)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingChildOfCall {
    /// Parent token.
    pub parent_id: TokenId,
    /// Index in the pending list.
    pub index: u64,
}

impl ContractCall for PendingChildOfCall {
    const SIGNATURE: &'static str = "pendingChildOf(uint256,uint256)";
    type Output = Child;
}

/// `ownerOf(tokenId)`: the account at the root of the owner chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerOfCall {
    /// Token queried.
    pub token_id: TokenId,
}

impl ContractCall for OwnerOfCall {
    const SIGNATURE: &'static str = "ownerOf(uint256)";
    type Output = Address;
}

/// `directOwnerOf(tokenId)`: the immediate owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectOwnerOfCall {
    /// Token queried.
    pub token_id: TokenId,
}

impl ContractCall for DirectOwnerOfCall {
    const SIGNATURE: &'static str = "directOwnerOf(uint256)";
    type Output = DirectOwner;
}

/// `balanceOf(owner)`: tokens held directly by an account or collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceOfCall {
    /// Holder queried.
    pub owner: Address,
}

impl ContractCall for BalanceOfCall {
    const SIGNATURE: &'static str = "balanceOf(address)";
    type Output = U256;
}

// =============================================================================
// TRANSFER AND APPROVAL
// =============================================================================

/// `transferFrom(from, to, tokenId)`: moves a token to an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferFromCall {
    /// Immediate owner address.
    pub from: Address,
    /// Recipient account.
    pub to: Address,
    /// Token moved.
    pub token_id: TokenId,
}

impl ContractCall for TransferFromCall {
    const SIGNATURE: &'static str = "transferFrom(address,address,uint256)";
    type Output = ();
}

/// `nestTransferFrom(from, to, tokenId, destinationId)`: moves a token
/// under `destinationId` of collection `to`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestTransferFromCall {
    /// Immediate owner address.
    pub from: Address,
    /// Destination collection.
    pub to: Address,
    /// Token moved.
    pub token_id: TokenId,
    /// Destination parent token.
    pub destination_id: TokenId,
}

impl ContractCall for NestTransferFromCall {
    const SIGNATURE: &'static str = "nestTransferFrom(address,address,uint256,uint256)";
    type Output = ();
}

/// `approve(to, tokenId)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproveCall {
    /// Approved account; zero clears.
    pub to: Address,
    /// Token.
    pub token_id: TokenId,
}

impl ContractCall for ApproveCall {
    const SIGNATURE: &'static str = "approve(address,uint256)";
    type Output = ();
}

/// `getApproved(tokenId)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetApprovedCall {
    /// Token.
    pub token_id: TokenId,
}

impl ContractCall for GetApprovedCall {
    const SIGNATURE: &'static str = "getApproved(uint256)";
    type Output = Address;
}

/// `setApprovalForAll(operator, approved)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetApprovalForAllCall {
    /// Operator.
    pub operator: Address,
    /// Grant or revoke.
    pub approved: bool,
}

impl ContractCall for SetApprovalForAllCall {
    const SIGNATURE: &'static str = "setApprovalForAll(address,bool)";
    type Output = ();
}

/// `isApprovedForAll(owner, operator)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsApprovedForAllCall {
    /// Token owner.
    pub owner: Address,
    /// Operator.
    pub operator: Address,
}

impl ContractCall for IsApprovedForAllCall {
    const SIGNATURE: &'static str = "isApprovedForAll(address,address)";
    type Output = bool;
}

// =============================================================================
// INITIALIZATION
// =============================================================================

/// `initCollection(config)`: the collection initializer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitCollectionCall {
    /// Collection parameters.
    pub config: CollectionConfig,
}

impl ContractCall for InitCollectionCall {
    const SIGNATURE: &'static str =
        "initCollection(uint256,uint256,address,uint256,uint256,uint256)";
    type Output = ();
}
