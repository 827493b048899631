//! Canonical encoding, hashing and format conversion for intents.
//!
//! Intents are identified by a content hash that both chains compute
//! independently. This crate provides that hash for either representation
//! together with lossless conversion between the native and chain-agnostic
//! forms.

pub mod convert;
pub mod encoding;

pub use convert::{to_evm, to_universal, ConvertError};
pub use encoding::{
	encode_reward, encode_route, hash_intent, hash_intent_parts, hash_reward, hash_route,
	CanonicalIntent, CanonicalReward, CanonicalRoute, IntentHashes,
};
