//! One-time initializer run by the constructor cut of a standard diamond.

use crate::calls::InitCall;
use crate::domain::interfaces;
use crate::ports::{Facet, FacetContext};
use shared_types::{handle, Bytes, ContractCall, ContractError, Selector};

/// Registers the ERC-165, diamond cut, diamond loupe and ERC-173
/// interfaces. Intended to be used as the `init` target of a cut, never
/// registered in the selector table.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiamondInit;

impl<S> Facet<S> for DiamondInit {
    fn name(&self) -> &'static str {
        "DiamondInit"
    }

    fn selectors(&self) -> Vec<Selector> {
        vec![InitCall::selector()]
    }

    fn execute(
        &self,
        ctx: &mut FacetContext<'_, S>,
        selector: Selector,
        args: &[u8],
    ) -> Result<Bytes, ContractError> {
        if selector != InitCall::selector() {
            return Err(ContractError::FunctionNotFound(selector));
        }
        handle::<InitCall, _>(args, |_| {
            ctx.storage.supported_interfaces.extend([
                interfaces::erc165(),
                interfaces::diamond_cut(),
                interfaces::diamond_loupe(),
                interfaces::erc173(),
            ]);
            Ok(())
        })
    }
}
