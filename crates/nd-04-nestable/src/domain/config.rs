//! # Collection Configuration
//!
//! Set once by the collection initializer and kept in collection storage.
//! The nesting limits are the configurable caps that keep every walk over
//! the ownership graph bounded.

use serde::{Deserialize, Serialize};
use shared_types::{Address, ContractError, U256};

/// Default cap on a token's pending-children queue.
pub const DEFAULT_MAX_PENDING_CHILDREN: u64 = 128;

/// Default cap on child burns triggered by one burn call.
pub const DEFAULT_MAX_RECURSIVE_BURNS: u64 = 64;

/// Default cap on the length of an owner chain walk.
pub const DEFAULT_MAX_NESTING_DEPTH: u64 = 100;

/// Caps on nesting structures and the work done over them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NestingLimits {
    /// Maximum pending children per token.
    pub max_pending_children: u64,
    /// Maximum child burns per burn call, whatever the caller asks for.
    pub max_recursive_burns: u64,
    /// Maximum owner-chain hops walked by `ownerOf` and the ancestor check.
    pub max_nesting_depth: u64,
}

impl Default for NestingLimits {
    fn default() -> Self {
        Self {
            max_pending_children: DEFAULT_MAX_PENDING_CHILDREN,
            max_recursive_burns: DEFAULT_MAX_RECURSIVE_BURNS,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

/// Collection parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Tokens that can ever be minted.
    pub max_supply: U256,
    /// Price of one token.
    pub price_per_mint: U256,
    /// Authentication manager consulted for the accepted fast path.
    /// Zero disables the fast path.
    pub authentication_manager: Address,
    /// Nesting caps.
    pub limits: NestingLimits,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            max_supply: U256::from(999),
            price_per_mint: U256::zero(),
            authentication_manager: Address::ZERO,
            limits: NestingLimits::default(),
        }
    }
}

impl CollectionConfig {
    /// Config with the given supply and price and default limits.
    #[must_use]
    pub fn new(max_supply: U256, price_per_mint: U256) -> Self {
        Self {
            max_supply,
            price_per_mint,
            ..Self::default()
        }
    }

    /// Enables the fast path through `manager`.
    #[must_use]
    pub fn with_authentication_manager(mut self, manager: Address) -> Self {
        self.authentication_manager = manager;
        self
    }

    /// Replaces the nesting limits.
    #[must_use]
    pub fn with_limits(mut self, limits: NestingLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Parses a config from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::Codec` on malformed JSON, or the validation
    /// error of [`Self::validate`].
    pub fn from_json(json: &str) -> Result<Self, ContractError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| ContractError::Codec(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::InvalidParameter` for a zero supply or a zero
    /// nesting limit.
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.max_supply.is_zero() {
            return Err(ContractError::invalid_parameter("max supply must be positive"));
        }
        if self.limits.max_pending_children == 0 {
            return Err(ContractError::invalid_parameter(
                "max pending children must be positive",
            ));
        }
        if self.limits.max_nesting_depth == 0 {
            return Err(ContractError::invalid_parameter(
                "max nesting depth must be positive",
            ));
        }
        Ok(())
    }
}
