//! ERC-173 ownership of a diamond.

use crate::calls::{OwnerCall, TransferOwnershipCall};
use crate::ports::{Facet, FacetContext};
use shared_types::{handle, Bytes, ContractCall, ContractError, Event, Selector};
use tracing::info;

/// Serves `owner()` and `transferOwnership(address)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct OwnershipFacet;

impl<S> Facet<S> for OwnershipFacet {
    fn name(&self) -> &'static str {
        "OwnershipFacet"
    }

    fn selectors(&self) -> Vec<Selector> {
        vec![TransferOwnershipCall::selector(), OwnerCall::selector()]
    }

    fn execute(
        &self,
        ctx: &mut FacetContext<'_, S>,
        selector: Selector,
        args: &[u8],
    ) -> Result<Bytes, ContractError> {
        match selector {
            s if s == OwnerCall::selector() => {
                handle::<OwnerCall, _>(args, |_| Ok(ctx.storage.registry.owner()))
            }
            s if s == TransferOwnershipCall::selector() => {
                handle::<TransferOwnershipCall, _>(args, |call| {
                    ctx.enforce_owner()?;
                    let previous_owner = ctx.storage.registry.set_owner(call.new_owner);
                    info!(
                        diamond = %ctx.this,
                        %previous_owner,
                        new_owner = %call.new_owner,
                        "Ownership transferred"
                    );
                    ctx.emit(Event::OwnershipTransferred {
                        previous_owner,
                        new_owner: call.new_owner,
                    });
                    Ok(())
                })
            }
            other => Err(ContractError::FunctionNotFound(other)),
        }
    }
}
