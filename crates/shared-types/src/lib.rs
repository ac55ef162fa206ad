//! # Shared Types Crate
//!
//! Types shared by every Nest-Diamond crate.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: cross-crate types (addresses, selectors,
//!   cut entries, child references, events, errors) are defined here.
//! - **One Abort Type**: every contract operation fails with
//!   [`ContractError`]; the host unwinds the whole transaction on `Err`.
//! - **Typed Calls**: operations are structs implementing [`ContractCall`];
//!   their selector is derived from the canonical signature.

pub mod abi;
pub mod contract;
pub mod create;
pub mod entities;
pub mod errors;
pub mod events;

pub use abi::{handle, ContractCall};
pub use contract::{Contract, Environment};
pub use create::compute_contract_address;
pub use entities::*;
pub use errors::*;
pub use events::{Event, Log};
