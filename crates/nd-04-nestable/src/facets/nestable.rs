//! # Nestable
//!
//! The propose/accept/reject protocol and the read side of the ownership
//! graph.
//!
//! A child collection proposes a child with `addChild`; the parent's owner
//! accepts or rejects it by its index in the pending queue. Rejection only
//! drops the queue entry: the child token keeps pointing at the parent and
//! stays under the control of whoever owns the parent's root.

use crate::calls::{
    AcceptChildCall, AddChildCall, BalanceOfCall, ChildOfCall, ChildrenOfCall, DetachChildCall,
    DirectOwnerOfCall, NestTransferFromCall, OwnerOfCall, PendingChildOfCall,
    PendingChildrenOfCall, RejectAllChildrenCall, RejectChildCall, TransferChildCall,
    TransferFromCall,
};
use crate::domain::collection::CollectionStorage;
use crate::facets::transfer::reassign;
use crate::ops::{
    add_child_local, attach_to_parent, authorize_owner_or_approved, detach_local,
    ensure_graph_invariants, ensure_not_descendant, nested, root_owner, CollectionContext,
};
use nd_02_diamond::Facet;
use shared_types::{
    handle, Bytes, Child, ContractCall, ContractError, DirectOwner, Event, Selector,
};
use tracing::{debug, info};

/// Serves the nesting protocol and graph queries.
#[derive(Clone, Copy, Debug, Default)]
pub struct NestableFacet;

impl Facet<CollectionStorage> for NestableFacet {
    fn name(&self) -> &'static str {
        "NestableFacet"
    }

    fn selectors(&self) -> Vec<Selector> {
        vec![
            AddChildCall::selector(),
            AcceptChildCall::selector(),
            RejectChildCall::selector(),
            RejectAllChildrenCall::selector(),
            TransferChildCall::selector(),
            DetachChildCall::selector(),
            ChildrenOfCall::selector(),
            PendingChildrenOfCall::selector(),
            ChildOfCall::selector(),
            PendingChildOfCall::selector(),
            OwnerOfCall::selector(),
            DirectOwnerOfCall::selector(),
            BalanceOfCall::selector(),
        ]
    }

    fn execute(
        &self,
        ctx: &mut CollectionContext<'_>,
        selector: Selector,
        args: &[u8],
    ) -> Result<Bytes, ContractError> {
        match selector {
            s if s == AddChildCall::selector() => {
                handle::<AddChildCall, _>(args, |call| add_child(ctx, call))
            }
            s if s == AcceptChildCall::selector() => {
                handle::<AcceptChildCall, _>(args, |call| accept_child(ctx, call))
            }
            s if s == RejectChildCall::selector() => {
                handle::<RejectChildCall, _>(args, |call| reject_child(ctx, call))
            }
            s if s == RejectAllChildrenCall::selector() => {
                handle::<RejectAllChildrenCall, _>(args, |call| reject_all_children(ctx, call))
            }
            s if s == TransferChildCall::selector() => {
                handle::<TransferChildCall, _>(args, |call| transfer_child(ctx, call))
            }
            s if s == DetachChildCall::selector() => handle::<DetachChildCall, _>(args, |call| {
                let child = Child::new(ctx.sender(), call.child_id);
                detach_local(ctx, call.parent_id, child);
                Ok(())
            }),
            s if s == ChildrenOfCall::selector() => handle::<ChildrenOfCall, _>(args, |call| {
                Ok(ctx.app().children_of(call.parent_id)?.to_vec())
            }),
            s if s == PendingChildrenOfCall::selector() => {
                handle::<PendingChildrenOfCall, _>(args, |call| {
                    Ok(ctx.app().pending_children_of(call.parent_id)?.to_vec())
                })
            }
            s if s == ChildOfCall::selector() => handle::<ChildOfCall, _>(args, |call| {
                ctx.app().child_of(call.parent_id, call.index)
            }),
            s if s == PendingChildOfCall::selector() => {
                handle::<PendingChildOfCall, _>(args, |call| {
                    ctx.app().pending_child_of(call.parent_id, call.index)
                })
            }
            s if s == OwnerOfCall::selector() => {
                handle::<OwnerOfCall, _>(args, |call| root_owner(ctx, call.token_id))
            }
            s if s == DirectOwnerOfCall::selector() => {
                handle::<DirectOwnerOfCall, _>(args, |call| ctx.app().direct_owner(call.token_id))
            }
            s if s == BalanceOfCall::selector() => {
                handle::<BalanceOfCall, _>(args, |call| Ok(ctx.app().balance_of(call.owner)))
            }
            other => Err(ContractError::FunctionNotFound(other)),
        }
    }
}

fn add_child(ctx: &mut CollectionContext<'_>, call: AddChildCall) -> Result<(), ContractError> {
    let child_collection = ctx.sender();
    if !ctx.env.has_code(child_collection) {
        return Err(ContractError::invalid_parameter("caller is not a contract"));
    }
    add_child_local(ctx, call.parent_id, Child::new(child_collection, call.child_id)).map(|_| ())
}

fn accept_child(
    ctx: &mut CollectionContext<'_>,
    call: AcceptChildCall,
) -> Result<(), ContractError> {
    authorize_owner_or_approved(ctx, call.parent_id)?;
    let child = ctx.app_mut().accept_child(call.parent_id, call.child_index)?;
    ensure_graph_invariants(ctx)?;
    debug!(
        collection = %ctx.this,
        parent_id = %call.parent_id,
        child_index = call.child_index,
        "Child accepted"
    );
    ctx.emit(Event::ChildAccepted {
        token_id: call.parent_id,
        child_index: call.child_index,
        child_address: child.contract_address,
        child_id: child.token_id,
    });
    Ok(())
}

fn reject_child(
    ctx: &mut CollectionContext<'_>,
    call: RejectChildCall,
) -> Result<(), ContractError> {
    authorize_owner_or_approved(ctx, call.parent_id)?;
    let child = ctx.app_mut().reject_child(call.parent_id, call.child_index)?;
    ctx.emit(Event::ChildRejected {
        token_id: call.parent_id,
        child_index: call.child_index,
        child_address: child.contract_address,
        child_id: child.token_id,
    });
    Ok(())
}

fn reject_all_children(
    ctx: &mut CollectionContext<'_>,
    call: RejectAllChildrenCall,
) -> Result<(), ContractError> {
    authorize_owner_or_approved(ctx, call.parent_id)?;
    let rejected = ctx.app_mut().reject_all_children(call.parent_id)?;
    debug!(
        collection = %ctx.this,
        parent_id = %call.parent_id,
        rejected = rejected.len(),
        "All pending children rejected"
    );
    ctx.emit(Event::AllChildrenRejected {
        token_id: call.parent_id,
    });
    Ok(())
}

/// Moves a child out of a parent's lists to an account, or under another
/// parent. The parent performs the ancestor check and, when the destination
/// is in this collection, registers the child itself before instructing
/// the child's collection.
fn transfer_child(
    ctx: &mut CollectionContext<'_>,
    call: TransferChildCall,
) -> Result<(), ContractError> {
    authorize_owner_or_approved(ctx, call.parent_id)?;
    if call.to.is_zero() {
        return Err(ContractError::ZeroRecipient);
    }
    let nesting = !call.destination_id.is_zero();
    let child = ctx.app().child_at(call.parent_id, call.child_index, call.is_pending)?;
    if nesting {
        ensure_not_descendant(ctx, child, call.to, call.destination_id)?;
    }

    ctx.app_mut()
        .take_child(call.parent_id, call.child_index, call.is_pending)?;
    ctx.emit(Event::ChildTransferred {
        token_id: call.parent_id,
        child_index: call.child_index,
        child_address: child.contract_address,
        child_id: child.token_id,
        from_pending: call.is_pending,
    });
    info!(
        collection = %ctx.this,
        parent_id = %call.parent_id,
        child = %child.token_id,
        to = %call.to,
        destination_id = %call.destination_id,
        "Child transferred"
    );

    if child.contract_address == ctx.this {
        let new_owner = if nesting {
            nested(call.to, call.destination_id)
        } else {
            DirectOwner::Account(call.to)
        };
        reassign(ctx, child.token_id, new_owner)?;
        if nesting {
            attach_to_parent(ctx, call.to, call.destination_id, child.token_id)?;
        }
        return ensure_graph_invariants(ctx);
    }

    let this = ctx.this;
    if !nesting {
        return ctx.call(
            child.contract_address,
            &TransferFromCall {
                from: this,
                to: call.to,
                token_id: child.token_id,
            },
        );
    }
    if call.to == this {
        add_child_local(ctx, call.destination_id, child)?;
    }
    ctx.call(
        child.contract_address,
        &NestTransferFromCall {
            from: this,
            to: call.to,
            token_id: child.token_id,
            destination_id: call.destination_id,
        },
    )?;
    ensure_graph_invariants(ctx)
}
