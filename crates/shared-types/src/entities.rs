//! # Core Domain Entities
//!
//! Value types shared by every contract in the workspace.
//!
//! ## Clusters
//!
//! - **Identity**: `Address`, `Selector`, `Hash`
//! - **Payload**: `Bytes`, `Message`
//! - **Registry**: `FacetCut`, `FacetCutAction`, `FacetInfo`
//! - **Tokens**: `TokenId`, `Child`, `DirectOwner`, `AuthenticationEntry`

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

// Re-export U256 from primitive-types for use across all crates
pub use primitive_types::U256;

/// Token identifier within a single collection. Zero is never minted.
pub type TokenId = U256;

// =============================================================================
// ADDRESS (20 bytes)
// =============================================================================

/// A 20-byte account or contract address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The zero address (0x0000...0000).
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an address from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Convenience constructor filling every byte with `byte`.
    #[must_use]
    pub const fn repeat_byte(byte: u8) -> Self {
        Self([byte; 20])
    }

    /// Creates an address from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        <[u8; 20]>::try_from(slice).ok().map(Self)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}...{}", hex::encode(&self.0[..4]), hex::encode(&self.0[18..]))
    }
}

impl FromStr for Address {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(s.trim_start_matches("0x"), &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

// =============================================================================
// SELECTOR (4 bytes)
// =============================================================================

/// A 4-byte function identifier, the dispatch key of a diamond.
///
/// Derived as the first four bytes of `keccak256(signature)`, so selectors of
/// well-known operations match the wider ecosystem.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Selector(pub [u8; 4]);

impl Selector {
    /// Creates a selector from raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Derives the selector of a canonical signature such as `facets()`.
    #[must_use]
    pub fn from_signature(signature: &str) -> Self {
        let digest = Keccak256::digest(signature.as_bytes());
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&digest[..4]);
        Self(bytes)
    }

    /// Splits calldata into its leading selector and the argument bytes.
    ///
    /// Returns `None` when the calldata is shorter than four bytes.
    #[must_use]
    pub fn split_calldata(calldata: &[u8]) -> Option<(Self, &[u8])> {
        if calldata.len() < 4 {
            return None;
        }
        let (head, args) = calldata.split_at(4);
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(head);
        Some((Self(bytes), args))
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Selector {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 4];
        hex::decode_to_slice(s.trim_start_matches("0x"), &mut bytes)?;
        Ok(Self(bytes))
    }
}

/// ERC-165 interface identifiers share the selector representation.
pub type InterfaceId = Selector;

// =============================================================================
// HASH (32 bytes)
// =============================================================================

/// A 32-byte Keccak-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// Computes keccak256 of `data`.
    #[must_use]
    pub fn keccak256(data: &[u8]) -> Self {
        Self(Keccak256::digest(data).into())
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// =============================================================================
// BYTES (variable length)
// =============================================================================

/// Variable-length byte vector for calldata and return data.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    /// Creates an empty Bytes.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns a reference to the underlying slice.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.len() <= 8 {
            write!(f, "0x{}", hex::encode(&self.0))
        } else {
            write!(f, "0x{}..({} bytes)", hex::encode(&self.0[..4]), self.0.len())
        }
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(vec: Vec<u8>) -> Self {
        Self(vec)
    }
}

impl From<&[u8]> for Bytes {
    fn from(slice: &[u8]) -> Self {
        Self(slice.to_vec())
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// =============================================================================
// MESSAGE
// =============================================================================

/// A single call frame delivered to a contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Immediate caller (account or contract).
    pub sender: Address,
    /// Contract being called.
    pub to: Address,
    /// Value attached to the call.
    pub value: U256,
    /// Calldata: selector followed by encoded arguments.
    pub data: Bytes,
}

impl Message {
    /// Creates a call frame with no value attached.
    #[must_use]
    pub fn new(sender: Address, to: Address, data: Bytes) -> Self {
        Self {
            sender,
            to,
            value: U256::zero(),
            data,
        }
    }

    /// Attaches value to the call.
    #[must_use]
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }
}

// =============================================================================
// FACET CUTS
// =============================================================================

/// Action applied by one entry of a diamond cut.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacetCutAction {
    /// Register selectors that are currently unregistered.
    Add,
    /// Move registered selectors to a different facet.
    Replace,
    /// Unregister selectors. The facet address must be zero.
    Remove,
}

/// One entry of a diamond cut batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCut {
    /// Facet the selectors are assigned to (zero for `Remove`).
    pub facet_address: Address,
    /// What to do with the selectors.
    pub action: FacetCutAction,
    /// Selectors affected by this entry.
    pub function_selectors: Vec<Selector>,
}

impl FacetCut {
    /// Builds an `Add` entry.
    #[must_use]
    pub fn add(facet_address: Address, function_selectors: Vec<Selector>) -> Self {
        Self {
            facet_address,
            action: FacetCutAction::Add,
            function_selectors,
        }
    }

    /// Builds a `Replace` entry.
    #[must_use]
    pub fn replace(facet_address: Address, function_selectors: Vec<Selector>) -> Self {
        Self {
            facet_address,
            action: FacetCutAction::Replace,
            function_selectors,
        }
    }

    /// Builds a `Remove` entry (facet address is always zero).
    #[must_use]
    pub fn remove(function_selectors: Vec<Selector>) -> Self {
        Self {
            facet_address: Address::ZERO,
            action: FacetCutAction::Remove,
            function_selectors,
        }
    }
}

/// A facet and the selectors registered to it, as reported by the loupe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetInfo {
    /// Facet address.
    pub facet_address: Address,
    /// Selectors registered to the facet, in registration order.
    pub function_selectors: Vec<Selector>,
}

// =============================================================================
// NESTING
// =============================================================================

/// A (contract, token) pair referenced from a parent's child lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Child {
    /// Collection the child token lives in.
    pub contract_address: Address,
    /// Token id inside that collection.
    pub token_id: TokenId,
}

impl Child {
    /// Creates a child reference.
    #[must_use]
    pub const fn new(contract_address: Address, token_id: TokenId) -> Self {
        Self {
            contract_address,
            token_id,
        }
    }
}

/// Immediate owner of a token: an account, or a token in some collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DirectOwner {
    /// Root-owned by an account.
    Account(Address),
    /// Nested under `token_id` of the collection at `contract_address`.
    Token {
        /// Parent collection.
        contract_address: Address,
        /// Parent token.
        token_id: TokenId,
    },
}

impl DirectOwner {
    /// Address holding the token: the account, or the parent collection.
    #[must_use]
    pub const fn holder(&self) -> Address {
        match self {
            Self::Account(address) => *address,
            Self::Token {
                contract_address, ..
            } => *contract_address,
        }
    }

    /// Parent token id, or zero for root-owned tokens.
    #[must_use]
    pub fn parent_id(&self) -> TokenId {
        match self {
            Self::Account(_) => TokenId::zero(),
            Self::Token { token_id, .. } => *token_id,
        }
    }

    /// True if the owner is another token.
    #[must_use]
    pub const fn is_nested(&self) -> bool {
        matches!(self, Self::Token { .. })
    }
}

/// Trust record kept by the authentication manager for one contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationEntry {
    /// True while the contract is registered.
    pub authentic: bool,
    /// Accepted children a parent may hold from this contract without review.
    pub max_active_num: U256,
}

// =============================================================================
// TESTS
// =============================================================================
