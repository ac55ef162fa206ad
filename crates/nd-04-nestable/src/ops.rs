//! # Graph Operations
//!
//! Operations over the ownership graph shared by the collection facets.
//! The graph spans collections: a step that stays inside this collection
//! reads storage directly, a step into another collection is a nested call.
//!
//! Walks are driven from the collection that starts them: every remote
//! step is a single `directOwnerOf` call, and a step that lands back in
//! this collection reads storage directly, so a chain that passes through
//! the same collection twice is never re-entered. Local state is always
//! brought to its final value before any nested call is made.

use crate::calls::{AddChildCall, DetachChildCall, DirectOwnerOfCall};
use crate::domain::collection::CollectionStorage;
use crate::domain::invariants::{check_collection_invariants, InvariantCheckResult};
use crate::domain::token::ChildPlacement;
use nd_02_diamond::FacetContext;
use nd_03_authentication::AuthenticatedCall;
use shared_types::{Address, Child, ContractError, DirectOwner, Event, TokenId};
use tracing::debug;

/// Facet context of a nestable collection.
pub type CollectionContext<'a> = FacetContext<'a, CollectionStorage>;

fn depth_limit(ctx: &CollectionContext<'_>) -> ContractError {
    ContractError::LimitReached {
        what: "nesting depth",
        limit: ctx.app().config.limits.max_nesting_depth,
    }
}

/// Direct owner of `token`, read locally or from its collection.
///
/// # Errors
///
/// `TokenNotFound`, or the error of a remote `directOwnerOf`.
pub fn direct_owner_at(
    ctx: &mut CollectionContext<'_>,
    token: Child,
) -> Result<DirectOwner, ContractError> {
    if token.contract_address == ctx.this {
        ctx.app().direct_owner(token.token_id)
    } else {
        ctx.call(
            token.contract_address,
            &DirectOwnerOfCall {
                token_id: token.token_id,
            },
        )
    }
}

/// Account at the root of the owner chain of `token_id`.
///
/// # Errors
///
/// `TokenNotFound`, `LimitReached` if the chain is longer than the nesting
/// depth cap, or the error of a remote `directOwnerOf`.
pub fn root_owner(
    ctx: &mut CollectionContext<'_>,
    token_id: TokenId,
) -> Result<Address, ContractError> {
    let mut current = Child::new(ctx.this, token_id);
    for _ in 0..=ctx.app().config.limits.max_nesting_depth {
        match direct_owner_at(ctx, current)? {
            DirectOwner::Account(owner) => return Ok(owner),
            DirectOwner::Token {
                contract_address,
                token_id,
            } => current = Child::new(contract_address, token_id),
        }
    }
    Err(depth_limit(ctx))
}

/// Fails unless the caller is the root owner of `token_id`, approved for
/// it, or an operator of the root owner. Returns the root owner.
///
/// # Errors
///
/// `Unauthorized`, or any error of [`root_owner`].
pub fn authorize_owner_or_approved(
    ctx: &mut CollectionContext<'_>,
    token_id: TokenId,
) -> Result<Address, ContractError> {
    let owner = root_owner(ctx, token_id)?;
    let sender = ctx.sender();
    let storage = ctx.app();
    if sender == owner
        || storage.approved(token_id) == sender
        || storage.is_operator(owner, sender)
    {
        Ok(owner)
    } else {
        Err(ContractError::unauthorized("caller is not token owner nor approved"))
    }
}

/// Fails unless the caller may move or burn `token_id` directly: for a
/// nested token its parent collection or anyone authorized over the root;
/// for a root-owned token its owner, an approved account or an operator.
/// Returns the direct owner.
///
/// # Errors
///
/// `Unauthorized`, or any error of [`root_owner`].
pub fn authorize_direct(
    ctx: &mut CollectionContext<'_>,
    token_id: TokenId,
) -> Result<DirectOwner, ContractError> {
    let direct = ctx.app().direct_owner(token_id)?;
    let sender = ctx.sender();
    match direct {
        DirectOwner::Token {
            contract_address, ..
        } if contract_address == sender => Ok(direct),
        DirectOwner::Token { .. } => authorize_owner_or_approved(ctx, token_id).map(|_| direct),
        DirectOwner::Account(owner) => {
            let storage = ctx.app();
            if sender == owner
                || storage.approved(token_id) == sender
                || storage.is_operator(owner, sender)
            {
                Ok(direct)
            } else {
                Err(ContractError::unauthorized(
                    "caller is not token owner nor approved",
                ))
            }
        }
    }
}

/// Fails if placing `token` under `destination_id` of `to` would make it
/// its own ancestor. Walks the owner chain of the destination upwards.
///
/// # Errors
///
/// `InvalidNesting` on a cycle, `LimitReached` past the nesting depth cap,
/// or the error of a remote `directOwnerOf`.
pub fn ensure_not_descendant(
    ctx: &mut CollectionContext<'_>,
    token: Child,
    to: Address,
    destination_id: TokenId,
) -> Result<(), ContractError> {
    let mut current = Child::new(to, destination_id);
    for _ in 0..ctx.app().config.limits.max_nesting_depth {
        if current == token {
            return Err(ContractError::InvalidNesting(format!(
                "token {} cannot be nested under itself or its descendants",
                token.token_id
            )));
        }
        match direct_owner_at(ctx, current)? {
            DirectOwner::Account(_) => return Ok(()),
            DirectOwner::Token {
                contract_address,
                token_id,
            } => current = Child::new(contract_address, token_id),
        }
    }
    Err(depth_limit(ctx))
}

/// Attaches `child` to `parent_id` of this collection, taking the accepted
/// fast path if the child's collection is authenticated and has capacity
/// left under this parent. Emits `ChildAccepted` or `ChildProposed`.
///
/// # Errors
///
/// Any error of [`CollectionStorage::add_child`] or of the authentication
/// manager.
pub fn add_child_local(
    ctx: &mut CollectionContext<'_>,
    parent_id: TokenId,
    child: Child,
) -> Result<ChildPlacement, ContractError> {
    ctx.app().token(parent_id)?;
    let manager = ctx.app().config.authentication_manager;
    let capacity = if manager.is_zero() {
        None
    } else {
        let entry = ctx.call(
            manager,
            &AuthenticatedCall {
                contract_address: child.contract_address,
            },
        )?;
        entry.authentic.then_some(entry.max_active_num)
    };

    let placement = ctx.app_mut().add_child(parent_id, child, capacity)?;
    let event = match placement {
        ChildPlacement::Accepted(child_index) => Event::ChildAccepted {
            token_id: parent_id,
            child_index,
            child_address: child.contract_address,
            child_id: child.token_id,
        },
        ChildPlacement::Pending(child_index) => Event::ChildProposed {
            token_id: parent_id,
            child_index,
            child_address: child.contract_address,
            child_id: child.token_id,
        },
    };
    debug!(
        collection = %ctx.this,
        %parent_id,
        child = %child.token_id,
        child_collection = %child.contract_address,
        ?placement,
        "Child attached"
    );
    ctx.emit(event);
    Ok(placement)
}

/// Attaches `child_id` of this collection to `parent_id` of `parent`,
/// locally or through the parent's `addChild`.
///
/// # Errors
///
/// Any error of [`add_child_local`] or of the parent collection.
pub fn attach_to_parent(
    ctx: &mut CollectionContext<'_>,
    parent: Address,
    parent_id: TokenId,
    child_id: TokenId,
) -> Result<(), ContractError> {
    if parent == ctx.this {
        add_child_local(ctx, parent_id, Child::new(ctx.this, child_id)).map(|_| ())
    } else {
        ctx.call(parent, &AddChildCall { parent_id, child_id })
    }
}

/// Removes `child` from the lists of `parent_id` in this collection and
/// emits `ChildTransferred`. A child that is not listed, for instance one
/// that was rejected, is ignored.
pub fn detach_local(ctx: &mut CollectionContext<'_>, parent_id: TokenId, child: Child) {
    if let Some((child_index, from_pending)) = ctx.app_mut().detach_child(parent_id, child) {
        ctx.emit(Event::ChildTransferred {
            token_id: parent_id,
            child_index,
            child_address: child.contract_address,
            child_id: child.token_id,
            from_pending,
        });
    }
}

/// Detaches `token_id` of this collection from its former owner `previous`.
/// Nothing to do for root-owned tokens, or when the former parent
/// collection is the caller and has already updated its lists.
///
/// # Errors
///
/// The error of the parent's `detachChild`.
pub fn detach_from_parent(
    ctx: &mut CollectionContext<'_>,
    previous: DirectOwner,
    token_id: TokenId,
) -> Result<(), ContractError> {
    let DirectOwner::Token {
        contract_address,
        token_id: parent_id,
    } = previous
    else {
        return Ok(());
    };
    if contract_address == ctx.this {
        detach_local(ctx, parent_id, Child::new(ctx.this, token_id));
        Ok(())
    } else if contract_address == ctx.sender() {
        Ok(())
    } else {
        ctx.call(
            contract_address,
            &DetachChildCall {
                parent_id,
                child_id: token_id,
            },
        )
    }
}

/// Reverts if this collection's part of the ownership graph is
/// inconsistent. Run at the end of every operation that rewires it.
///
/// # Errors
///
/// `Revert` listing every violation.
pub fn ensure_graph_invariants(ctx: &CollectionContext<'_>) -> Result<(), ContractError> {
    if let InvariantCheckResult::Invalid(violations) =
        check_collection_invariants(ctx.app(), ctx.this)
    {
        let reasons: Vec<String> = violations.iter().map(ToString::to_string).collect();
        return Err(ContractError::Revert(format!(
            "collection invariant violated: {}",
            reasons.join("; ")
        )));
    }
    Ok(())
}

/// Emits the `Transfer` and `NestTransfer` pair for a change of owner.
pub fn emit_transfer(
    ctx: &mut CollectionContext<'_>,
    from: DirectOwner,
    to: DirectOwner,
    token_id: TokenId,
) {
    ctx.emit(Event::Transfer {
        from: from.holder(),
        to: to.holder(),
        token_id,
    });
    ctx.emit(Event::NestTransfer {
        from: from.holder(),
        to: to.holder(),
        from_token_id: from.parent_id(),
        to_token_id: to.parent_id(),
        token_id,
    });
}

/// The placeholder owner used as `from` on mint and `to` on burn.
#[must_use]
pub fn nobody() -> DirectOwner {
    DirectOwner::Account(Address::ZERO)
}

/// Nested owner `(contract, token_id)`.
#[must_use]
pub fn nested(contract_address: Address, token_id: TokenId) -> DirectOwner {
    DirectOwner::Token {
        contract_address,
        token_id,
    }
}
