//! # Diamond-Cut Executor
//!
//! The only writer of the facet registry. A cut validates its initializer,
//! applies every entry atomically, emits one `DiamondCut` event listing the
//! whole batch, and finally runs the initializer in the diamond's storage.
//! Any failure, including one inside the initializer, aborts the whole call.

use crate::calls::DiamondCutCall;
use crate::domain::invariants::{check_registry_invariants, InvariantCheckResult};
use crate::ports::{Facet, FacetContext};
use shared_types::{
    handle, Address, Bytes, ContractCall, ContractError, CutError, Event, FacetCut, Selector,
};
use tracing::{info, warn};

/// Serves `diamondCut`. Owner-only.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiamondCutFacet;

impl<S> Facet<S> for DiamondCutFacet {
    fn name(&self) -> &'static str {
        "DiamondCutFacet"
    }

    fn selectors(&self) -> Vec<Selector> {
        vec![DiamondCutCall::selector()]
    }

    fn execute(
        &self,
        ctx: &mut FacetContext<'_, S>,
        selector: Selector,
        args: &[u8],
    ) -> Result<Bytes, ContractError> {
        if selector != DiamondCutCall::selector() {
            return Err(ContractError::FunctionNotFound(selector));
        }
        handle::<DiamondCutCall, _>(args, |call| {
            if let Err(err) = ctx.enforce_owner() {
                warn!(sender = %ctx.sender(), "Diamond cut rejected");
                return Err(err);
            }
            diamond_cut(ctx, call.cuts, call.init, call.calldata)
        })
    }
}

/// Applies `cuts` to the context's registry, then runs `init` with
/// `calldata`. Callers are responsible for authorization.
///
/// # Errors
///
/// - `InvalidCut` for a malformed entry or initializer target;
/// - `InitializationFailed` wrapping the initializer's error.
pub fn diamond_cut<S>(
    ctx: &mut FacetContext<'_, S>,
    cuts: Vec<FacetCut>,
    init: Address,
    calldata: Bytes,
) -> Result<(), ContractError> {
    if init.is_zero() {
        if !calldata.is_empty() {
            return Err(CutError::InitCalldataWithoutTarget.into());
        }
    } else if !ctx.library.contains(init) {
        return Err(CutError::FacetHasNoCode(init).into());
    }

    let library = ctx.library;
    ctx.storage
        .registry
        .apply_cuts(&cuts, |facet| library.contains(facet))?;

    if let InvariantCheckResult::Invalid(violations) =
        check_registry_invariants(&ctx.storage.registry)
    {
        let reasons: Vec<String> = violations.iter().map(ToString::to_string).collect();
        return Err(ContractError::Revert(format!(
            "registry invariant violated: {}",
            reasons.join("; ")
        )));
    }

    info!(
        diamond = %ctx.this,
        entries = cuts.len(),
        facets = ctx.storage.registry.facet_addresses().len(),
        selectors = ctx.storage.registry.selector_count(),
        "Diamond cut applied"
    );
    ctx.emit(Event::DiamondCut {
        cuts,
        init,
        calldata: calldata.clone(),
    });

    if !init.is_zero() {
        ctx.delegate(init, calldata.as_slice())
            .map_err(|err| ContractError::InitializationFailed(Box::new(err)))?;
    }
    Ok(())
}
