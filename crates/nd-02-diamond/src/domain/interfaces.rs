//! ERC-165 interface identifiers of the standard diamond facets.
//!
//! An interface id is the XOR of the selectors of its functions.

use crate::calls::{
    DiamondCutCall, FacetAddressCall, FacetAddressesCall, FacetFunctionSelectorsCall, FacetsCall,
    OwnerCall, SupportsInterfaceCall, TransferOwnershipCall,
};
use shared_types::{ContractCall, InterfaceId, Selector};

/// XOR of `selectors`.
#[must_use]
pub fn interface_id(selectors: &[Selector]) -> InterfaceId {
    let mut id = [0u8; 4];
    for selector in selectors {
        for (byte, other) in id.iter_mut().zip(selector.as_bytes()) {
            *byte ^= other;
        }
    }
    Selector::new(id)
}

/// ERC-165 (`0x01ffc9a7`).
#[must_use]
pub fn erc165() -> InterfaceId {
    interface_id(&[SupportsInterfaceCall::selector()])
}

/// Diamond cut (`0x1f931c1c`).
#[must_use]
pub fn diamond_cut() -> InterfaceId {
    interface_id(&[DiamondCutCall::selector()])
}

/// Diamond loupe (`0x48e2b093`).
#[must_use]
pub fn diamond_loupe() -> InterfaceId {
    interface_id(&[
        FacetsCall::selector(),
        FacetFunctionSelectorsCall::selector(),
        FacetAddressesCall::selector(),
        FacetAddressCall::selector(),
    ])
}

/// ERC-173 ownership (`0x7f5828d0`).
#[must_use]
pub fn erc173() -> InterfaceId {
    interface_id(&[OwnerCall::selector(), TransferOwnershipCall::selector()])
}
