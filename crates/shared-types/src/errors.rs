//! # Error Types
//!
//! The abort taxonomy shared by every contract. Any `Err` returned from a
//! contract call unwinds the whole transaction; the error value is the
//! reason surfaced to the caller.

use crate::entities::{Address, Selector, TokenId, U256};
use thiserror::Error;

// =============================================================================
// ERROR KIND
// =============================================================================

/// Coarse classification of a [`ContractError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller lacks the required role.
    Unauthorized,
    /// A diamond cut entry is malformed or conflicts with the registry.
    InvalidCutOperation,
    /// No facet is registered for the called selector.
    ModuleNotFound,
    /// Zero address, zero count, empty batch and similar argument errors.
    InvalidParameter,
    /// Payment below price, or mint past maximum supply.
    PriceOrSupplyViolation,
    /// Mint or transfer target is the zero address.
    RecipientInvalid,
    /// Child index outside the addressed list.
    ChildIndexInvalid,
    /// Token id was never minted or has been burned.
    TokenNotFound,
    /// A defensive cap (pending children, recursion, depth) was hit.
    LimitReached,
    /// Nesting would create a cycle or the owner chain is inconsistent.
    InvalidNesting,
    /// Calldata or return data could not be decoded.
    Codec,
    /// Host-level failure: missing code, call depth, balance, re-entrancy.
    Host,
    /// Free-form revert raised by contract logic.
    Reverted,
}

// =============================================================================
// CUT ERRORS
// =============================================================================

/// Reasons a diamond cut entry is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CutError {
    /// Entry lists no selectors.
    #[error("no selectors in facet to cut")]
    NoSelectors,

    /// `Add` or `Replace` targets the zero address.
    #[error("facet address can't be the zero address")]
    ZeroFacetAddress,

    /// `Add` or `Replace` targets an address without deployed facet code.
    #[error("facet {0:?} has no code")]
    FacetHasNoCode(Address),

    /// `Add` targets a selector that is already registered.
    #[error("can't add function {0} that already exists")]
    SelectorAlreadyExists(Selector),

    /// `Replace` targets a selector already registered to the same facet.
    #[error("can't replace function {selector} with the same facet {facet:?}")]
    ReplaceWithSameFacet {
        /// Offending selector.
        selector: Selector,
        /// Facet it is already registered to.
        facet: Address,
    },

    /// `Replace` or `Remove` targets an unregistered selector.
    #[error("function {0} doesn't exist")]
    SelectorNotFound(Selector),

    /// `Remove` entry carries a non-zero facet address.
    #[error("remove facet address must be the zero address, got {0:?}")]
    RemoveFacetAddressMustBeZero(Address),

    /// `init` is zero but calldata was supplied.
    #[error("init address is zero but calldata is not empty")]
    InitCalldataWithoutTarget,
}

// =============================================================================
// CONTRACT ERRORS
// =============================================================================

/// Errors that abort a contract call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// Caller lacks the required role.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// A diamond cut entry was rejected.
    #[error("invalid diamond cut: {0}")]
    InvalidCut(#[from] CutError),

    /// No facet handles the selector.
    #[error("function does not exist: {0}")]
    FunctionNotFound(Selector),

    /// Argument validation failed.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Payment below the configured price.
    #[error("mint underpriced: paid {paid}, required {required}")]
    MintUnderpriced {
        /// Value attached to the call.
        paid: U256,
        /// Price for the requested amount.
        required: U256,
    },

    /// Mint would exceed the configured maximum supply.
    #[error("mint over max supply: requested {requested}, remaining {remaining}")]
    MintOverMax {
        /// Tokens requested.
        requested: U256,
        /// Tokens still mintable.
        remaining: U256,
    },

    /// Mint or transfer target is the zero address.
    #[error("recipient is the zero address")]
    ZeroRecipient,

    /// Child index outside the addressed list.
    #[error("child index {index} out of range for list of length {len}")]
    ChildIndexOutOfRange {
        /// Requested index.
        index: u64,
        /// Current list length.
        len: u64,
    },

    /// Token id does not exist.
    #[error("token {0} does not exist")]
    TokenNotFound(TokenId),

    /// A defensive cap was reached.
    #[error("{what} limit of {limit} reached")]
    LimitReached {
        /// Which limit.
        what: &'static str,
        /// Configured cap.
        limit: u64,
    },

    /// Nesting relation rejected (cycle, self-nesting, wrong parent).
    #[error("invalid nesting: {0}")]
    InvalidNesting(String),

    /// The diamond-cut initializer reverted.
    #[error("initialization failed: {0}")]
    InitializationFailed(Box<ContractError>),

    /// Calldata or return data could not be decoded.
    #[error("codec error: {0}")]
    Codec(String),

    /// Calldata was sent to an address without code.
    #[error("no contract code at {0:?}")]
    NoCode(Address),

    /// A contract was re-entered while it was executing.
    #[error("reentrant call into {0:?}")]
    Reentrancy(Address),

    /// Nested calls exceeded the host's depth cap.
    #[error("call depth {depth} reached the maximum of {max}")]
    CallDepthExceeded {
        /// Depth reached.
        depth: u16,
        /// Configured maximum.
        max: u16,
    },

    /// Sender cannot cover the value attached to a call.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Value requested.
        required: U256,
        /// Balance available.
        available: U256,
    },

    /// Free-form revert.
    #[error("revert: {0}")]
    Revert(String),
}

impl ContractError {
    /// Shorthand for an `Unauthorized` error.
    #[must_use]
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized(reason.into())
    }

    /// Shorthand for an `InvalidParameter` error.
    #[must_use]
    pub fn invalid_parameter(reason: impl Into<String>) -> Self {
        Self::InvalidParameter(reason.into())
    }

    /// Classifies the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::InvalidCut(_) => ErrorKind::InvalidCutOperation,
            Self::FunctionNotFound(_) => ErrorKind::ModuleNotFound,
            Self::InvalidParameter(_) => ErrorKind::InvalidParameter,
            Self::MintUnderpriced { .. } | Self::MintOverMax { .. } => {
                ErrorKind::PriceOrSupplyViolation
            }
            Self::ZeroRecipient => ErrorKind::RecipientInvalid,
            Self::ChildIndexOutOfRange { .. } => ErrorKind::ChildIndexInvalid,
            Self::TokenNotFound(_) => ErrorKind::TokenNotFound,
            Self::LimitReached { .. } => ErrorKind::LimitReached,
            Self::InvalidNesting(_) => ErrorKind::InvalidNesting,
            Self::InitializationFailed(inner) => inner.kind(),
            Self::Codec(_) => ErrorKind::Codec,
            Self::NoCode(_)
            | Self::Reentrancy(_)
            | Self::CallDepthExceeded { .. }
            | Self::InsufficientBalance { .. } => ErrorKind::Host,
            Self::Revert(_) => ErrorKind::Reverted,
        }
    }
}

impl From<bincode::Error> for ContractError {
    fn from(err: bincode::Error) -> Self {
        Self::Codec(err.to_string())
    }
}

// =============================================================================
// TESTS
// =============================================================================
