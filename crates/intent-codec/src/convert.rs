//! Conversion between the native and chain-agnostic intent representations.
//!
//! The element-wise `From`/`TryFrom` impls live next to the types in
//! `intent-types`; this module exposes them as whole-intent operations.

use intent_types::{evm, universal};

pub use intent_types::ConvertError;

/// Widens a native intent into its chain-agnostic form.
pub fn to_universal(intent: &evm::Intent) -> universal::Intent {
	intent.into()
}

/// Narrows a chain-agnostic intent into its native form.
pub fn to_evm(intent: &universal::Intent) -> Result<evm::Intent, ConvertError> {
	intent.try_into()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{hash_intent, hash_reward, hash_route};
	use alloy::primitives::{Address, Bytes, B256, U256};
	use intent_types::to_wide_id;

	fn sample_evm_intent() -> evm::Intent {
		evm::Intent {
			destination: 8453,
			route: evm::Route {
				salt: B256::from([0xabu8; 32]),
				deadline: 1_800_000_000,
				portal: Address::from([0x10u8; 20]),
				tokens: vec![evm::TokenAmount {
					token: Address::from([0x20u8; 20]),
					amount: U256::from(5_000_000u64),
				}],
				calls: vec![
					evm::Call {
						target: Address::from([0x20u8; 20]),
						data: Bytes::from(vec![0xa9, 0x05, 0x9c, 0xbb]),
						value: U256::ZERO,
					},
					evm::Call {
						target: Address::from([0x30u8; 20]),
						data: Bytes::new(),
						value: U256::from(7),
					},
				],
			},
			reward: evm::Reward {
				deadline: 1_800_003_600,
				creator: Address::from([0x40u8; 20]),
				prover: Address::from([0x50u8; 20]),
				nativeAmount: U256::from(1_000_000_000u64),
				tokens: vec![
					evm::TokenAmount {
						token: Address::from([0x60u8; 20]),
						amount: U256::from(1),
					},
					evm::TokenAmount {
						token: Address::from([0x70u8; 20]),
						amount: U256::from(2),
					},
				],
			},
		}
	}

	#[test]
	fn test_evm_round_trip() {
		let intent = sample_evm_intent();
		assert_eq!(to_evm(&to_universal(&intent)).unwrap(), intent);
	}

	#[test]
	fn test_universal_round_trip() {
		let universal = to_universal(&sample_evm_intent());
		assert_eq!(to_universal(&to_evm(&universal).unwrap()), universal);
	}

	#[test]
	fn test_widening_preserves_order_and_length() {
		let intent = sample_evm_intent();
		let universal = to_universal(&intent);

		assert_eq!(universal.route.calls.len(), intent.route.calls.len());
		assert_eq!(universal.reward.tokens.len(), intent.reward.tokens.len());
		for (wide, native) in universal.reward.tokens.iter().zip(&intent.reward.tokens) {
			assert_eq!(wide.token, to_wide_id(native.token));
			assert_eq!(wide.amount, native.amount);
		}
		assert_eq!(universal.route.calls[0].data, intent.route.calls[0].data);
	}

	#[test]
	fn test_hashes_agree_across_representations() {
		let intent = sample_evm_intent();
		let universal = to_universal(&intent);

		assert_eq!(hash_route(&intent.route), hash_route(&universal.route));
		assert_eq!(hash_reward(&intent.reward), hash_reward(&universal.reward));
		assert_eq!(hash_intent(&intent), hash_intent(&universal));
	}

	#[test]
	fn test_foreign_portal_is_rejected() {
		let mut universal = to_universal(&sample_evm_intent());
		universal.route.portal = B256::from([0xffu8; 32]);

		let err = to_evm(&universal).unwrap_err();
		assert!(matches!(
			err,
			ConvertError::InvalidAddressEncoding { ref field, .. } if field == "route.portal"
		));
	}

	#[test]
	fn test_foreign_call_target_reports_index() {
		let mut universal = to_universal(&sample_evm_intent());
		universal.route.calls[1].target = B256::from([0x01u8; 32]);

		let err = to_evm(&universal).unwrap_err();
		assert!(err.to_string().contains("route.calls[1].target"));
	}

	#[test]
	fn test_foreign_reward_token_is_rejected() {
		let mut universal = to_universal(&sample_evm_intent());
		universal.reward.tokens[0].token = B256::from([0x02u8; 32]);

		assert!(matches!(
			to_evm(&universal),
			Err(ConvertError::InvalidAddressEncoding { .. })
		));
	}

	#[test]
	fn test_wide_destination_overflows() {
		let mut universal = to_universal(&sample_evm_intent());
		universal.destination = U256::from(u64::MAX) + U256::from(1);

		assert_eq!(
			to_evm(&universal),
			Err(ConvertError::NumericOverflow {
				field: "destination".to_string(),
				value: universal.destination,
			})
		);
	}

	#[test]
	fn test_max_native_destination_narrows() {
		let mut universal = to_universal(&sample_evm_intent());
		universal.destination = U256::from(u64::MAX);

		assert_eq!(to_evm(&universal).unwrap().destination, u64::MAX);
	}

	#[test]
	fn test_empty_arrays_convert() {
		let mut intent = sample_evm_intent();
		intent.route.tokens.clear();
		intent.route.calls.clear();
		intent.reward.tokens.clear();

		let universal = to_universal(&intent);
		assert!(universal.route.calls.is_empty());
		assert_eq!(to_evm(&universal).unwrap(), intent);
	}
}
