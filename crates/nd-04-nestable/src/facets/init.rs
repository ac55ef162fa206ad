//! One-time collection initializer.
//!
//! Also registers the standard diamond interfaces, so a collection needs
//! a single initializer in its constructor cut.

use crate::calls::InitCollectionCall;
use crate::domain::collection::CollectionStorage;
use crate::ops::CollectionContext;
use nd_02_diamond::{interfaces, Facet};
use shared_types::{handle, Bytes, ContractCall, ContractError, Selector};
use tracing::info;

/// Sets the collection parameters. Used as the `init` target of the
/// constructor cut, never registered in the selector table.
#[derive(Clone, Copy, Debug, Default)]
pub struct CollectionInit;

impl Facet<CollectionStorage> for CollectionInit {
    fn name(&self) -> &'static str {
        "CollectionInit"
    }

    fn selectors(&self) -> Vec<Selector> {
        vec![InitCollectionCall::selector()]
    }

    fn execute(
        &self,
        ctx: &mut CollectionContext<'_>,
        selector: Selector,
        args: &[u8],
    ) -> Result<Bytes, ContractError> {
        if selector != InitCollectionCall::selector() {
            return Err(ContractError::FunctionNotFound(selector));
        }
        handle::<InitCollectionCall, _>(args, |call| {
            if ctx.app().initialized {
                return Err(ContractError::Revert("collection already initialized".into()));
            }
            call.config.validate()?;
            info!(
                collection = %ctx.this,
                max_supply = %call.config.max_supply,
                price_per_mint = %call.config.price_per_mint,
                authentication_manager = %call.config.authentication_manager,
                "Collection initialized"
            );
            ctx.storage.supported_interfaces.extend([
                interfaces::erc165(),
                interfaces::diamond_cut(),
                interfaces::diamond_loupe(),
                interfaces::erc173(),
            ]);
            let storage = ctx.app_mut();
            storage.config = call.config;
            storage.initialized = true;
            Ok(())
        })
    }
}
