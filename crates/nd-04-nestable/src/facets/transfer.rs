//! # Transfer and Approval
//!
//! ERC-721 transfers extended with `nestTransferFrom`, plus single-token
//! and operator approvals.
//!
//! A token leaving a parent is detached from the parent's lists before it
//! is attached to its new one, so moving a child between two tokens of the
//! same parent collection never trips the duplicate check.

use crate::calls::{
    ApproveCall, GetApprovedCall, IsApprovedForAllCall, NestTransferFromCall,
    SetApprovalForAllCall, TransferFromCall,
};
use crate::domain::collection::CollectionStorage;
use crate::ops::{
    attach_to_parent, authorize_direct, detach_from_parent, emit_transfer,
    ensure_graph_invariants, ensure_not_descendant, nested, root_owner, CollectionContext,
};
use nd_02_diamond::Facet;
use shared_types::{
    handle, Address, Bytes, Child, ContractCall, ContractError, DirectOwner, Event, Selector,
    TokenId,
};
use tracing::info;

/// Serves `transferFrom`, `nestTransferFrom`, `approve`, `getApproved`,
/// `setApprovalForAll` and `isApprovedForAll`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TransferFacet;

impl Facet<CollectionStorage> for TransferFacet {
    fn name(&self) -> &'static str {
        "TransferFacet"
    }

    fn selectors(&self) -> Vec<Selector> {
        vec![
            TransferFromCall::selector(),
            NestTransferFromCall::selector(),
            ApproveCall::selector(),
            GetApprovedCall::selector(),
            SetApprovalForAllCall::selector(),
            IsApprovedForAllCall::selector(),
        ]
    }

    fn execute(
        &self,
        ctx: &mut CollectionContext<'_>,
        selector: Selector,
        args: &[u8],
    ) -> Result<Bytes, ContractError> {
        match selector {
            s if s == TransferFromCall::selector() => {
                handle::<TransferFromCall, _>(args, |call| transfer_from(ctx, call))
            }
            s if s == NestTransferFromCall::selector() => {
                handle::<NestTransferFromCall, _>(args, |call| nest_transfer_from(ctx, call))
            }
            s if s == ApproveCall::selector() => {
                handle::<ApproveCall, _>(args, |call| approve(ctx, call))
            }
            s if s == GetApprovedCall::selector() => handle::<GetApprovedCall, _>(args, |call| {
                ctx.app().token(call.token_id)?;
                Ok(ctx.app().approved(call.token_id))
            }),
            s if s == SetApprovalForAllCall::selector() => {
                handle::<SetApprovalForAllCall, _>(args, |call| set_approval_for_all(ctx, call))
            }
            s if s == IsApprovedForAllCall::selector() => {
                handle::<IsApprovedForAllCall, _>(args, |call| {
                    Ok(ctx.app().is_operator(call.owner, call.operator))
                })
            }
            other => Err(ContractError::FunctionNotFound(other)),
        }
    }
}

/// Gives `token_id` to `owner` and emits the transfer pair. The previous
/// parent's lists are left to the caller. Returns the previous owner.
pub(crate) fn reassign(
    ctx: &mut CollectionContext<'_>,
    token_id: TokenId,
    owner: DirectOwner,
) -> Result<DirectOwner, ContractError> {
    let previous = ctx.app_mut().set_direct_owner(token_id, owner)?;
    emit_transfer(ctx, previous, owner, token_id);
    Ok(previous)
}

fn ensure_from(direct: DirectOwner, from: Address) -> Result<(), ContractError> {
    if direct.holder() != from {
        return Err(ContractError::invalid_parameter("transfer from incorrect owner"));
    }
    Ok(())
}

fn transfer_from(
    ctx: &mut CollectionContext<'_>,
    call: TransferFromCall,
) -> Result<(), ContractError> {
    if call.to.is_zero() {
        return Err(ContractError::ZeroRecipient);
    }
    let direct = authorize_direct(ctx, call.token_id)?;
    ensure_from(direct, call.from)?;

    let previous = reassign(ctx, call.token_id, DirectOwner::Account(call.to))?;
    detach_from_parent(ctx, previous, call.token_id)?;
    ensure_graph_invariants(ctx)?;
    info!(
        collection = %ctx.this,
        token_id = %call.token_id,
        from = %call.from,
        to = %call.to,
        "Token transferred"
    );
    Ok(())
}

fn nest_transfer_from(
    ctx: &mut CollectionContext<'_>,
    call: NestTransferFromCall,
) -> Result<(), ContractError> {
    if call.to.is_zero() {
        return Err(ContractError::ZeroRecipient);
    }
    if call.to != ctx.this && !ctx.env.has_code(call.to) {
        return Err(ContractError::invalid_parameter("destination is not a contract"));
    }
    let direct = authorize_direct(ctx, call.token_id)?;
    ensure_from(direct, call.from)?;

    let sender = ctx.sender();
    let instructed_by_parent = direct.is_nested() && direct.holder() == sender;
    if !instructed_by_parent {
        let token = Child::new(ctx.this, call.token_id);
        ensure_not_descendant(ctx, token, call.to, call.destination_id)?;
    }

    let previous = reassign(ctx, call.token_id, nested(call.to, call.destination_id))?;
    detach_from_parent(ctx, previous, call.token_id)?;
    // A parent collection moving a child into itself has registered it already.
    if call.to == ctx.this || call.to != sender {
        attach_to_parent(ctx, call.to, call.destination_id, call.token_id)?;
    }
    ensure_graph_invariants(ctx)?;
    info!(
        collection = %ctx.this,
        token_id = %call.token_id,
        to = %call.to,
        destination_id = %call.destination_id,
        "Token nest-transferred"
    );
    Ok(())
}

fn approve(ctx: &mut CollectionContext<'_>, call: ApproveCall) -> Result<(), ContractError> {
    let owner = root_owner(ctx, call.token_id)?;
    let sender = ctx.sender();
    if call.to == owner {
        return Err(ContractError::invalid_parameter("approval to current owner"));
    }
    if sender != owner && !ctx.app().is_operator(owner, sender) {
        return Err(ContractError::unauthorized(
            "approve caller is not token owner nor approved for all",
        ));
    }
    ctx.app_mut().approve(call.token_id, call.to)?;
    ctx.emit(Event::Approval {
        owner,
        approved: call.to,
        token_id: call.token_id,
    });
    Ok(())
}

fn set_approval_for_all(
    ctx: &mut CollectionContext<'_>,
    call: SetApprovalForAllCall,
) -> Result<(), ContractError> {
    let owner = ctx.sender();
    if call.operator == owner {
        return Err(ContractError::invalid_parameter("approve to caller"));
    }
    ctx.app_mut().set_operator(owner, call.operator, call.approved);
    ctx.emit(Event::ApprovalForAll {
        owner,
        operator: call.operator,
        approved: call.approved,
    });
    Ok(())
}
