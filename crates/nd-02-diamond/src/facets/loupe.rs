//! # Loupe
//!
//! Read-only views of the facet registry, plus ERC-165.
//!
//! A diamond that follows a beacon reports its own registrations first,
//! then whatever the beacon reports for selectors it has not overridden.

use crate::calls::{
    FacetAddressCall, FacetAddressesCall, FacetFunctionSelectorsCall, FacetsCall,
    SupportsInterfaceCall,
};
use crate::ports::{Facet, FacetContext};
use shared_types::{handle, Address, Bytes, ContractCall, ContractError, FacetInfo, Selector};

/// Serves `facets`, `facetFunctionSelectors`, `facetAddresses`,
/// `facetAddress` and `supportsInterface`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiamondLoupeFacet;

impl<S> Facet<S> for DiamondLoupeFacet {
    fn name(&self) -> &'static str {
        "DiamondLoupeFacet"
    }

    fn selectors(&self) -> Vec<Selector> {
        vec![
            FacetsCall::selector(),
            FacetFunctionSelectorsCall::selector(),
            FacetAddressesCall::selector(),
            FacetAddressCall::selector(),
            SupportsInterfaceCall::selector(),
        ]
    }

    fn execute(
        &self,
        ctx: &mut FacetContext<'_, S>,
        selector: Selector,
        args: &[u8],
    ) -> Result<Bytes, ContractError> {
        match selector {
            s if s == FacetsCall::selector() => handle::<FacetsCall, _>(args, |_| facets(ctx)),
            s if s == FacetFunctionSelectorsCall::selector() => {
                handle::<FacetFunctionSelectorsCall, _>(args, |call| {
                    facet_function_selectors(ctx, call.facet)
                })
            }
            s if s == FacetAddressesCall::selector() => {
                handle::<FacetAddressesCall, _>(args, |_| {
                    Ok(facets(ctx)?.into_iter().map(|f| f.facet_address).collect())
                })
            }
            s if s == FacetAddressCall::selector() => handle::<FacetAddressCall, _>(args, |call| {
                facet_address(ctx, call.function_selector)
            }),
            s if s == SupportsInterfaceCall::selector() => {
                handle::<SupportsInterfaceCall, _>(args, |call| {
                    if ctx.storage.supports_interface(call.interface_id) {
                        return Ok(true);
                    }
                    match ctx.storage.beacon {
                        Some(beacon) => ctx.call(beacon, &call),
                        None => Ok(false),
                    }
                })
            }
            other => Err(ContractError::FunctionNotFound(other)),
        }
    }
}

fn facets<S>(ctx: &mut FacetContext<'_, S>) -> Result<Vec<FacetInfo>, ContractError> {
    let mut merged = ctx.storage.registry.facets();
    let Some(beacon) = ctx.storage.beacon else {
        return Ok(merged);
    };

    for remote in ctx.call(beacon, &FacetsCall)? {
        let inherited: Vec<Selector> = remote
            .function_selectors
            .into_iter()
            .filter(|s| !ctx.storage.registry.contains(*s))
            .collect();
        if inherited.is_empty() {
            continue;
        }
        match merged
            .iter_mut()
            .find(|local| local.facet_address == remote.facet_address)
        {
            Some(local) => local.function_selectors.extend(inherited),
            None => merged.push(FacetInfo {
                facet_address: remote.facet_address,
                function_selectors: inherited,
            }),
        }
    }
    Ok(merged)
}

fn facet_function_selectors<S>(
    ctx: &mut FacetContext<'_, S>,
    facet: Address,
) -> Result<Vec<Selector>, ContractError> {
    let mut selectors = ctx.storage.registry.facet_function_selectors(facet).to_vec();
    if let Some(beacon) = ctx.storage.beacon {
        let remote = ctx.call(beacon, &FacetFunctionSelectorsCall { facet })?;
        selectors.extend(
            remote
                .into_iter()
                .filter(|s| !ctx.storage.registry.contains(*s)),
        );
    }
    Ok(selectors)
}

fn facet_address<S>(
    ctx: &mut FacetContext<'_, S>,
    function_selector: Selector,
) -> Result<Address, ContractError> {
    if let Some(facet) = ctx.storage.registry.facet_address(function_selector) {
        return Ok(facet);
    }
    match ctx.storage.beacon {
        Some(beacon) => ctx.call(beacon, &FacetAddressCall { function_selector }),
        None => Ok(Address::ZERO),
    }
}
