//! Shared types for the intent settlement system.
//!
//! This crate holds the data model used by every other crate in the
//! workspace: the native (EVM) and chain-agnostic (Universal) intent
//! representations, conversion between native addresses and 32-byte
//! identifiers, and the types exchanged with proof oracles.

pub mod address;
pub mod convert;
pub mod events;
pub mod evm;
pub mod proof;
pub mod universal;

pub use address::*;
pub use convert::ConvertError;
pub use events::*;
pub use proof::*;

pub use evm::Intent as EvmIntent;
pub use universal::Intent as UniversalIntent;
