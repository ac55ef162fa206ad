//! # Collection Storage
//!
//! The application storage shared by every facet of a nestable collection:
//! the token records that make up this collection's part of the ownership
//! graph, ERC-721 balances and approvals, and supply counters.
//!
//! All child-list removals are stable: remaining entries keep their
//! relative order and every entry behind the removed one moves down by
//! one index. Indices reported by earlier events are therefore only valid
//! until the next removal from the same list.

use super::config::CollectionConfig;
use super::token::{ChildPlacement, TokenRecord};
use shared_types::{Address, Child, ContractError, DirectOwner, TokenId, U256};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Storage of one nestable collection.
#[derive(Clone, Debug, Default)]
pub struct CollectionStorage {
    /// Parameters set by the initializer.
    pub config: CollectionConfig,
    /// True once the initializer ran.
    pub initialized: bool,
    minted: U256,
    tokens: BTreeMap<TokenId, TokenRecord>,
    balances: HashMap<Address, U256>,
    token_approvals: HashMap<TokenId, Address>,
    operator_approvals: HashSet<(Address, Address)>,
}

impl CollectionStorage {
    // =========================================================================
    // SUPPLY
    // =========================================================================

    /// Live tokens.
    #[must_use]
    pub fn total_supply(&self) -> U256 {
        U256::from(self.tokens.len())
    }

    /// Tokens ever minted; burned ids are never reused.
    #[must_use]
    pub fn minted(&self) -> U256 {
        self.minted
    }

    /// Tokens that can still be minted.
    #[must_use]
    pub fn remaining_supply(&self) -> U256 {
        self.config.max_supply.saturating_sub(self.minted)
    }

    /// Checks that `amount` more tokens fit under the supply cap.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for a zero amount, `MintOverMax` past the cap.
    pub fn ensure_mintable(&self, amount: U256) -> Result<(), ContractError> {
        if amount.is_zero() {
            return Err(ContractError::invalid_parameter("mint amount must be positive"));
        }
        let remaining = self.remaining_supply();
        if amount > remaining {
            return Err(ContractError::MintOverMax {
                requested: amount,
                remaining,
            });
        }
        Ok(())
    }

    /// Creates a childless token owned by `owner` and returns its id.
    /// Ids start at 1.
    ///
    /// # Errors
    ///
    /// `MintOverMax` if the supply cap is reached.
    pub fn mint(&mut self, owner: DirectOwner) -> Result<TokenId, ContractError> {
        self.ensure_mintable(U256::one())?;
        self.minted += U256::one();
        let token_id = self.minted;
        self.tokens.insert(token_id, TokenRecord::new(owner));
        self.credit(owner.holder());
        Ok(token_id)
    }

    /// Deletes `token_id` with its approvals and returns its record.
    ///
    /// # Errors
    ///
    /// `TokenNotFound` if it does not exist.
    pub fn remove_token(&mut self, token_id: TokenId) -> Result<TokenRecord, ContractError> {
        let record = self
            .tokens
            .remove(&token_id)
            .ok_or(ContractError::TokenNotFound(token_id))?;
        self.debit(record.direct_owner.holder());
        self.token_approvals.remove(&token_id);
        Ok(record)
    }

    // =========================================================================
    // OWNERSHIP
    // =========================================================================

    /// Record of `token_id`.
    ///
    /// # Errors
    ///
    /// `TokenNotFound` if it does not exist.
    pub fn token(&self, token_id: TokenId) -> Result<&TokenRecord, ContractError> {
        self.tokens
            .get(&token_id)
            .ok_or(ContractError::TokenNotFound(token_id))
    }

    fn token_mut(&mut self, token_id: TokenId) -> Result<&mut TokenRecord, ContractError> {
        self.tokens
            .get_mut(&token_id)
            .ok_or(ContractError::TokenNotFound(token_id))
    }

    /// True if `token_id` is live.
    #[must_use]
    pub fn exists(&self, token_id: TokenId) -> bool {
        self.tokens.contains_key(&token_id)
    }

    /// Immediate owner of `token_id`.
    ///
    /// # Errors
    ///
    /// `TokenNotFound` if it does not exist.
    pub fn direct_owner(&self, token_id: TokenId) -> Result<DirectOwner, ContractError> {
        Ok(self.token(token_id)?.direct_owner)
    }

    /// Moves `token_id` to `owner`, clearing its approval. Returns the
    /// previous owner.
    ///
    /// # Errors
    ///
    /// `TokenNotFound` if it does not exist.
    pub fn set_direct_owner(
        &mut self,
        token_id: TokenId,
        owner: DirectOwner,
    ) -> Result<DirectOwner, ContractError> {
        let record = self.token_mut(token_id)?;
        let previous = std::mem::replace(&mut record.direct_owner, owner);
        self.debit(previous.holder());
        self.credit(owner.holder());
        self.token_approvals.remove(&token_id);
        Ok(previous)
    }

    /// Tokens held directly by `holder` (an account or a parent collection).
    #[must_use]
    pub fn balance_of(&self, holder: Address) -> U256 {
        self.balances.get(&holder).copied().unwrap_or_default()
    }

    /// Iterates over live tokens in id order.
    pub fn tokens(&self) -> impl Iterator<Item = (&TokenId, &TokenRecord)> {
        self.tokens.iter()
    }

    /// Iterates over non-zero balances.
    pub fn balances(&self) -> impl Iterator<Item = (&Address, &U256)> {
        self.balances.iter()
    }

    fn credit(&mut self, holder: Address) {
        *self.balances.entry(holder).or_default() += U256::one();
    }

    fn debit(&mut self, holder: Address) {
        if let Some(balance) = self.balances.get_mut(&holder) {
            *balance = balance.saturating_sub(U256::one());
            if balance.is_zero() {
                self.balances.remove(&holder);
            }
        }
    }

    // =========================================================================
    // APPROVALS
    // =========================================================================

    /// Approves `to` for `token_id`; zero clears.
    ///
    /// # Errors
    ///
    /// `TokenNotFound` if it does not exist.
    pub fn approve(&mut self, token_id: TokenId, to: Address) -> Result<(), ContractError> {
        self.token(token_id)?;
        if to.is_zero() {
            self.token_approvals.remove(&token_id);
        } else {
            self.token_approvals.insert(token_id, to);
        }
        Ok(())
    }

    /// Account approved for `token_id`, zero if none.
    #[must_use]
    pub fn approved(&self, token_id: TokenId) -> Address {
        self.token_approvals
            .get(&token_id)
            .copied()
            .unwrap_or_default()
    }

    /// Grants or revokes `operator` over every token of `owner`.
    pub fn set_operator(&mut self, owner: Address, operator: Address, approved: bool) {
        if approved {
            self.operator_approvals.insert((owner, operator));
        } else {
            self.operator_approvals.remove(&(owner, operator));
        }
    }

    /// True if `operator` may act for `owner`.
    #[must_use]
    pub fn is_operator(&self, owner: Address, operator: Address) -> bool {
        self.operator_approvals.contains(&(owner, operator))
    }

    // =========================================================================
    // CHILDREN
    // =========================================================================

    /// Accepted children of `token_id`.
    ///
    /// # Errors
    ///
    /// `TokenNotFound` if it does not exist.
    pub fn children_of(&self, token_id: TokenId) -> Result<&[Child], ContractError> {
        Ok(&self.token(token_id)?.active_children)
    }

    /// Pending children of `token_id`.
    ///
    /// # Errors
    ///
    /// `TokenNotFound` if it does not exist.
    pub fn pending_children_of(&self, token_id: TokenId) -> Result<&[Child], ContractError> {
        Ok(&self.token(token_id)?.pending_children)
    }

    /// Accepted child of `token_id` at `index`.
    ///
    /// # Errors
    ///
    /// `TokenNotFound`, or `ChildIndexOutOfRange`.
    pub fn child_of(&self, token_id: TokenId, index: u64) -> Result<Child, ContractError> {
        lookup(self.children_of(token_id)?, index)
    }

    /// Pending child of `token_id` at `index`.
    ///
    /// # Errors
    ///
    /// `TokenNotFound`, or `ChildIndexOutOfRange`.
    pub fn pending_child_of(&self, token_id: TokenId, index: u64) -> Result<Child, ContractError> {
        lookup(self.pending_children_of(token_id)?, index)
    }

    /// Child of `token_id` at `index` of the pending or accepted list.
    ///
    /// # Errors
    ///
    /// `TokenNotFound`, or `ChildIndexOutOfRange`.
    pub fn child_at(
        &self,
        token_id: TokenId,
        index: u64,
        pending: bool,
    ) -> Result<Child, ContractError> {
        if pending {
            self.pending_child_of(token_id, index)
        } else {
            self.child_of(token_id, index)
        }
    }

    /// Attaches `child` to `parent_id`.
    ///
    /// With `fast_path_capacity = Some(max)` the child is accepted directly
    /// while the parent holds fewer than `max` accepted children from the
    /// child's collection; otherwise it is queued as pending.
    ///
    /// # Errors
    ///
    /// `TokenNotFound` for an unknown parent, `InvalidNesting` if the child
    /// is already attached, `LimitReached` if the pending queue is full.
    pub fn add_child(
        &mut self,
        parent_id: TokenId,
        child: Child,
        fast_path_capacity: Option<U256>,
    ) -> Result<ChildPlacement, ContractError> {
        let max_pending = self.config.limits.max_pending_children;
        let record = self.token_mut(parent_id)?;
        if record.has_child(&child) {
            return Err(ContractError::InvalidNesting(format!(
                "token {} of {:?} is already a child of {parent_id}",
                child.token_id, child.contract_address
            )));
        }

        if let Some(capacity) = fast_path_capacity {
            if U256::from(record.active_from(child.contract_address)) < capacity {
                record.active_children.push(child);
                return Ok(ChildPlacement::Accepted(last_index(&record.active_children)));
            }
        }

        if record.pending_children.len() as u64 >= max_pending {
            return Err(ContractError::LimitReached {
                what: "pending children",
                limit: max_pending,
            });
        }
        record.pending_children.push(child);
        Ok(ChildPlacement::Pending(last_index(&record.pending_children)))
    }

    /// Moves the pending child at `index` to the end of the accepted list.
    ///
    /// # Errors
    ///
    /// `TokenNotFound`, or `ChildIndexOutOfRange`.
    pub fn accept_child(&mut self, parent_id: TokenId, index: u64) -> Result<Child, ContractError> {
        let record = self.token_mut(parent_id)?;
        let child = take(&mut record.pending_children, index)?;
        record.active_children.push(child);
        Ok(child)
    }

    /// Drops the pending child at `index`.
    ///
    /// # Errors
    ///
    /// `TokenNotFound`, or `ChildIndexOutOfRange`.
    pub fn reject_child(&mut self, parent_id: TokenId, index: u64) -> Result<Child, ContractError> {
        take(&mut self.token_mut(parent_id)?.pending_children, index)
    }

    /// Drops every pending child and returns them.
    ///
    /// # Errors
    ///
    /// `TokenNotFound`.
    pub fn reject_all_children(&mut self, parent_id: TokenId) -> Result<Vec<Child>, ContractError> {
        Ok(std::mem::take(
            &mut self.token_mut(parent_id)?.pending_children,
        ))
    }

    /// Removes the child at `index` of the accepted or pending list.
    ///
    /// # Errors
    ///
    /// `TokenNotFound`, or `ChildIndexOutOfRange`.
    pub fn take_child(
        &mut self,
        parent_id: TokenId,
        index: u64,
        pending: bool,
    ) -> Result<Child, ContractError> {
        let record = self.token_mut(parent_id)?;
        if pending {
            take(&mut record.pending_children, index)
        } else {
            take(&mut record.active_children, index)
        }
    }

    /// Removes `child` from whichever list of `parent_id` holds it and
    /// returns `(index, from_pending)`. `None` if the parent or the child
    /// is not found.
    pub fn detach_child(&mut self, parent_id: TokenId, child: Child) -> Option<(u64, bool)> {
        let record = self.tokens.get_mut(&parent_id)?;
        if let Some(index) = record.active_children.iter().position(|c| *c == child) {
            record.active_children.remove(index);
            return Some((index as u64, false));
        }
        let index = record.pending_children.iter().position(|c| *c == child)?;
        record.pending_children.remove(index);
        Some((index as u64, true))
    }
}

fn out_of_range(index: u64, list: &[Child]) -> ContractError {
    ContractError::ChildIndexOutOfRange {
        index,
        len: list.len() as u64,
    }
}

fn lookup(list: &[Child], index: u64) -> Result<Child, ContractError> {
    usize::try_from(index)
        .ok()
        .and_then(|i| list.get(i).copied())
        .ok_or_else(|| out_of_range(index, list))
}

fn take(list: &mut Vec<Child>, index: u64) -> Result<Child, ContractError> {
    match usize::try_from(index) {
        Ok(i) if i < list.len() => Ok(list.remove(i)),
        _ => Err(out_of_range(index, list)),
    }
}

fn last_index(list: &[Child]) -> u64 {
    list.len().saturating_sub(1) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::NestingLimits;

    fn holder() -> Address {
        Address::repeat_byte(0xA1)
    }

    fn child(contract: u8, id: u64) -> Child {
        Child::new(Address::repeat_byte(contract), U256::from(id))
    }

    fn storage_with_parent() -> (CollectionStorage, TokenId) {
        let mut storage = CollectionStorage::default();
        let parent = storage.mint(DirectOwner::Account(holder())).unwrap();
        (storage, parent)
    }

    #[test]
    fn test_mint_ids_start_at_one() {
        let mut storage = CollectionStorage::default();
        let first = storage.mint(DirectOwner::Account(holder())).unwrap();
        let second = storage.mint(DirectOwner::Account(holder())).unwrap();
        assert_eq!(first, U256::one());
        assert_eq!(second, U256::from(2));
        assert_eq!(storage.balance_of(holder()), U256::from(2));
        assert_eq!(storage.total_supply(), U256::from(2));
    }

    #[test]
    fn test_supply_cap() {
        let mut storage = CollectionStorage::default();
        storage.config.max_supply = U256::from(2);
        storage.mint(DirectOwner::Account(holder())).unwrap();
        assert_eq!(
            storage.ensure_mintable(U256::from(2)),
            Err(ContractError::MintOverMax {
                requested: U256::from(2),
                remaining: U256::one(),
            })
        );
        assert!(storage.ensure_mintable(U256::zero()).is_err());

        let last = storage.mint(DirectOwner::Account(holder())).unwrap();
        storage.remove_token(last).unwrap();
        // Burning does not free supply.
        assert!(storage.mint(DirectOwner::Account(holder())).is_err());
        assert_eq!(storage.total_supply(), U256::one());
    }

    #[test]
    fn test_fast_path_respects_capacity() {
        let (mut storage, parent) = storage_with_parent();
        let capacity = Some(U256::one());

        assert_eq!(
            storage.add_child(parent, child(1, 1), capacity).unwrap(),
            ChildPlacement::Accepted(0)
        );
        assert_eq!(
            storage.add_child(parent, child(1, 2), capacity).unwrap(),
            ChildPlacement::Pending(0)
        );
        // Capacity is counted per child collection.
        assert_eq!(
            storage.add_child(parent, child(2, 1), capacity).unwrap(),
            ChildPlacement::Accepted(1)
        );
        assert_eq!(
            storage.add_child(parent, child(3, 1), None).unwrap(),
            ChildPlacement::Pending(1)
        );
    }

    #[test]
    fn test_duplicate_child_rejected() {
        let (mut storage, parent) = storage_with_parent();
        storage.add_child(parent, child(1, 1), None).unwrap();
        let err = storage.add_child(parent, child(1, 1), Some(U256::one())).unwrap_err();
        assert!(matches!(err, ContractError::InvalidNesting(_)));
    }

    #[test]
    fn test_pending_cap() {
        let (mut storage, parent) = storage_with_parent();
        storage.config.limits = NestingLimits {
            max_pending_children: 2,
            ..NestingLimits::default()
        };
        storage.add_child(parent, child(1, 1), None).unwrap();
        storage.add_child(parent, child(1, 2), None).unwrap();
        assert_eq!(
            storage.add_child(parent, child(1, 3), None),
            Err(ContractError::LimitReached {
                what: "pending children",
                limit: 2,
            })
        );
        // A full queue does not block the fast path.
        assert!(storage.add_child(parent, child(1, 3), Some(U256::one())).is_ok());
    }

    #[test]
    fn test_stable_removal_shifts_indices() {
        let (mut storage, parent) = storage_with_parent();
        for id in 1..=3 {
            storage.add_child(parent, child(1, id), None).unwrap();
        }

        assert_eq!(storage.reject_child(parent, 0).unwrap(), child(1, 1));
        assert_eq!(
            storage.pending_children_of(parent).unwrap(),
            &[child(1, 2), child(1, 3)]
        );

        assert_eq!(storage.accept_child(parent, 1).unwrap(), child(1, 3));
        assert_eq!(storage.children_of(parent).unwrap(), &[child(1, 3)]);
        assert_eq!(storage.pending_child_of(parent, 0).unwrap(), child(1, 2));
    }

    #[test]
    fn test_index_out_of_range() {
        let (mut storage, parent) = storage_with_parent();
        storage.add_child(parent, child(1, 1), None).unwrap();
        assert_eq!(
            storage.accept_child(parent, 1),
            Err(ContractError::ChildIndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(
            storage.child_of(parent, u64::MAX),
            Err(ContractError::ChildIndexOutOfRange {
                index: u64::MAX,
                len: 0,
            })
        );
        assert_eq!(
            storage.reject_child(U256::from(9), 0),
            Err(ContractError::TokenNotFound(U256::from(9)))
        );
    }

    #[test]
    fn test_detach_searches_both_lists() {
        let (mut storage, parent) = storage_with_parent();
        storage.add_child(parent, child(1, 1), Some(U256::one())).unwrap();
        storage.add_child(parent, child(1, 2), None).unwrap();

        assert_eq!(storage.detach_child(parent, child(1, 2)), Some((0, true)));
        assert_eq!(storage.detach_child(parent, child(1, 1)), Some((0, false)));
        assert_eq!(storage.detach_child(parent, child(1, 1)), None);
        assert_eq!(storage.detach_child(U256::from(5), child(1, 1)), None);
    }

    #[test]
    fn test_reject_all() {
        let (mut storage, parent) = storage_with_parent();
        storage.add_child(parent, child(1, 1), None).unwrap();
        storage.add_child(parent, child(1, 2), None).unwrap();
        assert_eq!(storage.reject_all_children(parent).unwrap().len(), 2);
        assert!(storage.pending_children_of(parent).unwrap().is_empty());
    }

    #[test]
    fn test_owner_change_moves_balance_and_clears_approval() {
        let (mut storage, token) = storage_with_parent();
        let spender = Address::repeat_byte(0xB0);
        storage.approve(token, spender).unwrap();
        assert_eq!(storage.approved(token), spender);

        let parent_contract = Address::repeat_byte(0xC0);
        let previous = storage
            .set_direct_owner(
                token,
                DirectOwner::Token {
                    contract_address: parent_contract,
                    token_id: U256::from(7),
                },
            )
            .unwrap();
        assert_eq!(previous, DirectOwner::Account(holder()));
        assert_eq!(storage.balance_of(holder()), U256::zero());
        assert_eq!(storage.balance_of(parent_contract), U256::one());
        assert_eq!(storage.approved(token), Address::ZERO);
    }
}
