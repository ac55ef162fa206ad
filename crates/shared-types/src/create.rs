//! # Contract Address Derivation
//!
//! Deterministic CREATE-style addresses: `keccak256(rlp([sender, nonce]))[12..]`.
//! The host uses this for deployed contracts and the facet library uses it
//! for facet code, so every address in a world is reproducible from the
//! deployer and its nonce.

use crate::entities::Address;
use sha3::{Digest, Keccak256};

/// RLP prefix of a 20-byte string.
const RLP_ADDRESS_PREFIX: u8 = 0x80 + 20;

/// Derives the address of the contract created by `sender` at `nonce`.
#[must_use]
pub fn compute_contract_address(sender: Address, nonce: u64) -> Address {
    let mut payload = Vec::with_capacity(30);
    payload.push(RLP_ADDRESS_PREFIX);
    payload.extend_from_slice(sender.as_bytes());
    rlp_append_u64(&mut payload, nonce);

    // The payload is at most 30 bytes, so the short list form always applies.
    let mut encoded = Vec::with_capacity(payload.len() + 1);
    #[allow(clippy::cast_possible_truncation)]
    encoded.push(0xc0 + payload.len() as u8);
    encoded.extend_from_slice(&payload);

    let digest = Keccak256::digest(&encoded);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&digest[12..]);
    Address::new(bytes)
}

/// Appends the RLP encoding of an unsigned integer.
fn rlp_append_u64(out: &mut Vec<u8>, value: u64) {
    match value {
        0 => out.push(0x80),
        1..=0x7f => {
            #[allow(clippy::cast_possible_truncation)]
            out.push(value as u8);
        }
        _ => {
            let be = value.to_be_bytes();
            let skip = be.iter().take_while(|b| **b == 0).count();
            let significant = &be[skip..];
            #[allow(clippy::cast_possible_truncation)]
            out.push(0x80 + significant.len() as u8);
            out.extend_from_slice(significant);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
