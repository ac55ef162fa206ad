//! # Mint and Burn
//!
//! Creates tokens against payment and destroys them with their accepted
//! descendants.
//!
//! Burning is iterative: descendants living in this collection are drained
//! from an explicit work list, descendants in other collections are burned
//! through their collection's `burnNested` with whatever is left of the
//! budget. Every descendant counts against one budget, the smaller of the
//! caller's `max_recursive_burns` and the configured cap.
//!
//! A descendant whose collection is already executing further up the call
//! stack cannot be called into. It is returned to the caller as deferred,
//! and the frame of its own collection burns it. A deferred token that no
//! frame of the cascade can take aborts the burn with `Reentrancy`.
//!
//! Pending children of a burned token are dropped from its queue and keep
//! their tokens. Their direct owner then names a token that no longer
//! exists, so `ownerOf` on them fails with `TokenNotFound` and any move or
//! burn that needs the root walk fails the same way. They stay frozen.
//! Reject or move pending children before burning their parent; rejected
//! children of a burned parent end up the same way.

use crate::calls::{
    BurnCall, BurnNestedCall, MaxSupplyCall, MintCall, NestMintCall, NestedBurn,
    PricePerMintCall, TotalSupplyCall, WithdrawCall,
};
use crate::domain::collection::CollectionStorage;
use crate::ops::{
    attach_to_parent, authorize_direct, detach_from_parent, emit_transfer,
    ensure_graph_invariants, nested, nobody, CollectionContext,
};
use nd_02_diamond::Facet;
use shared_types::{
    handle, Address, Bytes, Child, ContractCall, ContractError, DirectOwner, Selector, TokenId,
    U256,
};
use tracing::{debug, info};

/// Serves `mint`, `nestMint`, `burn`, `burnNested`, `totalSupply`,
/// `maxSupply`, `pricePerMint` and `withdraw`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MintAndBurnFacet;

impl Facet<CollectionStorage> for MintAndBurnFacet {
    fn name(&self) -> &'static str {
        "MintAndBurnFacet"
    }

    fn selectors(&self) -> Vec<Selector> {
        vec![
            MintCall::selector(),
            NestMintCall::selector(),
            BurnCall::selector(),
            BurnNestedCall::selector(),
            TotalSupplyCall::selector(),
            MaxSupplyCall::selector(),
            PricePerMintCall::selector(),
            WithdrawCall::selector(),
        ]
    }

    fn execute(
        &self,
        ctx: &mut CollectionContext<'_>,
        selector: Selector,
        args: &[u8],
    ) -> Result<Bytes, ContractError> {
        match selector {
            s if s == MintCall::selector() => {
                handle::<MintCall, _>(args, |call| mint(ctx, call.to))
            }
            s if s == NestMintCall::selector() => {
                handle::<NestMintCall, _>(args, |call| nest_mint(ctx, call))
            }
            s if s == BurnCall::selector() => handle::<BurnCall, _>(args, |call| burn(ctx, call)),
            s if s == BurnNestedCall::selector() => {
                handle::<BurnNestedCall, _>(args, |call| burn_nested(ctx, call))
            }
            s if s == TotalSupplyCall::selector() => {
                handle::<TotalSupplyCall, _>(args, |_| Ok(ctx.app().total_supply()))
            }
            s if s == MaxSupplyCall::selector() => {
                handle::<MaxSupplyCall, _>(args, |_| Ok(ctx.app().config.max_supply))
            }
            s if s == PricePerMintCall::selector() => {
                handle::<PricePerMintCall, _>(args, |_| Ok(ctx.app().config.price_per_mint))
            }
            s if s == WithdrawCall::selector() => {
                handle::<WithdrawCall, _>(args, |call| withdraw(ctx, call))
            }
            other => Err(ContractError::FunctionNotFound(other)),
        }
    }
}

/// Checks that the attached value pays for `amount` tokens.
fn charge(ctx: &CollectionContext<'_>, amount: U256) -> Result<(), ContractError> {
    let required = ctx.app().config.price_per_mint.saturating_mul(amount);
    let paid = ctx.value();
    if paid < required {
        return Err(ContractError::MintUnderpriced { paid, required });
    }
    Ok(())
}

fn mint(ctx: &mut CollectionContext<'_>, to: Address) -> Result<TokenId, ContractError> {
    if to.is_zero() {
        return Err(ContractError::ZeroRecipient);
    }
    ctx.app().ensure_mintable(U256::one())?;
    charge(ctx, U256::one())?;

    let owner = DirectOwner::Account(to);
    let token_id = ctx.app_mut().mint(owner)?;
    emit_transfer(ctx, nobody(), owner, token_id);
    info!(collection = %ctx.this, %token_id, %to, "Token minted");
    Ok(token_id)
}

fn nest_mint(
    ctx: &mut CollectionContext<'_>,
    call: NestMintCall,
) -> Result<Vec<TokenId>, ContractError> {
    if call.to.is_zero() {
        return Err(ContractError::ZeroRecipient);
    }
    if call.to != ctx.this && !ctx.env.has_code(call.to) {
        return Err(ContractError::invalid_parameter("destination is not a contract"));
    }
    ctx.app().ensure_mintable(call.amount)?;
    charge(ctx, call.amount)?;

    let owner = nested(call.to, call.destination_id);
    let mut token_ids = Vec::new();
    let mut remaining = call.amount;
    while !remaining.is_zero() {
        let token_id = ctx.app_mut().mint(owner)?;
        emit_transfer(ctx, nobody(), owner, token_id);
        token_ids.push(token_id);
        remaining -= U256::one();
    }

    for token_id in &token_ids {
        attach_to_parent(ctx, call.to, call.destination_id, *token_id)?;
    }
    info!(
        collection = %ctx.this,
        parent = %call.to,
        destination_id = %call.destination_id,
        amount = token_ids.len(),
        "Tokens nest-minted"
    );
    Ok(token_ids)
}

fn burn(ctx: &mut CollectionContext<'_>, call: BurnCall) -> Result<u64, ContractError> {
    let direct = authorize_direct(ctx, call.token_id)?;
    let budget = burn_budget(ctx, call.max_recursive_burns);

    detach_from_parent(ctx, direct, call.token_id)?;
    let outcome = cascade(ctx, call.token_id, budget)?;
    if let Some(child) = outcome.deferred.first() {
        return Err(ContractError::Reentrancy(child.contract_address));
    }
    ensure_graph_invariants(ctx)?;

    info!(
        collection = %ctx.this,
        token_id = %call.token_id,
        descendants = outcome.burned,
        "Token burned"
    );
    Ok(outcome.burned)
}

fn burn_nested(
    ctx: &mut CollectionContext<'_>,
    call: BurnNestedCall,
) -> Result<NestedBurn, ContractError> {
    let direct = ctx.app().direct_owner(call.token_id)?;
    if !direct.is_nested() || direct.holder() != ctx.sender() {
        return Err(ContractError::unauthorized("caller is not the parent collection"));
    }
    let budget = burn_budget(ctx, call.max_recursive_burns);
    let outcome = cascade(ctx, call.token_id, budget)?;
    ensure_graph_invariants(ctx)?;
    debug!(
        collection = %ctx.this,
        token_id = %call.token_id,
        descendants = outcome.burned,
        deferred = outcome.deferred.len(),
        "Nested token burned"
    );
    Ok(outcome)
}

fn burn_budget(ctx: &CollectionContext<'_>, requested: u64) -> u64 {
    requested.min(ctx.app().config.limits.max_recursive_burns)
}

/// Burns `token_id` and its accepted descendants. Descendants whose
/// collection is executing further up the stack come back as deferred.
fn cascade(
    ctx: &mut CollectionContext<'_>,
    token_id: TokenId,
    budget: u64,
) -> Result<NestedBurn, ContractError> {
    let mut outcome = NestedBurn::default();
    let mut local = vec![token_id];
    let mut remote: Vec<Child> = Vec::new();
    loop {
        while let Some(token_id) = local.pop() {
            let record = ctx.app_mut().remove_token(token_id)?;
            emit_transfer(ctx, record.direct_owner, nobody(), token_id);
            debug!(
                collection = %ctx.this,
                %token_id,
                dropped_pending = record.pending_children.len(),
                "Token removed"
            );
            for child in record.active_children {
                if outcome.burned >= budget {
                    return Err(ContractError::LimitReached {
                        what: "recursive burns",
                        limit: budget,
                    });
                }
                outcome.burned += 1;
                if child.contract_address == ctx.this {
                    local.push(child.token_id);
                } else {
                    remote.push(child);
                }
            }
        }

        let Some(child) = remote.pop() else {
            return Ok(outcome);
        };
        if ctx.env.is_executing(child.contract_address) {
            outcome.deferred.push(child);
            continue;
        }
        let nested = ctx.call(
            child.contract_address,
            &BurnNestedCall {
                token_id: child.token_id,
                max_recursive_burns: budget.saturating_sub(outcome.burned),
            },
        )?;
        outcome.burned = outcome.burned.saturating_add(nested.burned);
        for deferred in nested.deferred {
            if deferred.contract_address == ctx.this {
                local.push(deferred.token_id);
            } else {
                remote.push(deferred);
            }
        }
    }
}

fn withdraw(ctx: &mut CollectionContext<'_>, call: WithdrawCall) -> Result<(), ContractError> {
    ctx.enforce_owner()?;
    if call.to.is_zero() {
        return Err(ContractError::ZeroRecipient);
    }
    ctx.transfer(call.to, call.amount)?;
    info!(collection = %ctx.this, to = %call.to, amount = %call.amount, "Funds withdrawn");
    Ok(())
}
