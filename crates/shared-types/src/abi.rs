//! # Call Codec
//!
//! Calldata is `selector ++ bincode(args)`; return data is `bincode(output)`.
//! Every externally callable operation is a struct implementing
//! [`ContractCall`], which ties its canonical signature (and therefore its
//! selector) to its argument layout and output type.

use crate::entities::{Bytes, Selector};
use crate::errors::ContractError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A typed contract operation.
pub trait ContractCall: Serialize + DeserializeOwned {
    /// Canonical signature, e.g. `facetAddress(bytes4)`.
    const SIGNATURE: &'static str;

    /// Decoded return value.
    type Output: Serialize + DeserializeOwned;

    /// Selector derived from [`Self::SIGNATURE`].
    #[must_use]
    fn selector() -> Selector {
        Selector::from_signature(Self::SIGNATURE)
    }

    /// Encodes the full calldata for this call.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::Codec` if the arguments cannot be serialized.
    fn encode(&self) -> Result<Bytes, ContractError> {
        let mut data = Self::selector().0.to_vec();
        data.extend(bincode::serialize(self)?);
        Ok(Bytes(data))
    }

    /// Decodes the argument bytes that follow the selector.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::Codec` on malformed input.
    fn decode(args: &[u8]) -> Result<Self, ContractError> {
        Ok(bincode::deserialize(args)?)
    }

    /// Encodes a return value.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::Codec` if the output cannot be serialized.
    fn encode_output(output: &Self::Output) -> Result<Bytes, ContractError> {
        Ok(Bytes(bincode::serialize(output)?))
    }

    /// Decodes return data produced by [`Self::encode_output`].
    ///
    /// # Errors
    ///
    /// Returns `ContractError::Codec` on malformed return data.
    fn decode_output(data: &[u8]) -> Result<Self::Output, ContractError> {
        Ok(bincode::deserialize(data)?)
    }
}

/// Decodes the arguments of `C`, runs `handler`, and encodes its output.
///
/// Facets use this to keep each dispatch arm to a single line.
///
/// # Errors
///
/// Propagates decoding failures and any error returned by `handler`.
pub fn handle<C, F>(args: &[u8], handler: F) -> Result<Bytes, ContractError>
where
    C: ContractCall,
    F: FnOnce(C) -> Result<C::Output, ContractError>,
{
    let call = C::decode(args)?;
    let output = handler(call)?;
    C::encode_output(&output)
}

// =============================================================================
// TESTS
// =============================================================================
