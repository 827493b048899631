//! Serde helpers for configuration deserialization

use alloy::primitives::{Address, B256};
use intent_types::to_wide_id;
use serde::{Deserialize, Deserializer};

/// Deserializes a chain-agnostic identifier from either a 20-byte address
/// (widened) or a full 32-byte hex word.
pub fn deserialize_wide_id<'de, D>(deserializer: D) -> Result<B256, D::Error>
where
	D: Deserializer<'de>,
{
	let s = String::deserialize(deserializer)?;

	if let Ok(address) = s.parse::<Address>() {
		return Ok(to_wide_id(address));
	}
	s.parse::<B256>()
		.map_err(|_| serde::de::Error::custom(format!("Invalid emitter identifier: {}", s)))
}
