//! Widening and narrowing between the two intent representations.
//!
//! Widening to the Universal form never fails. Narrowing back requires every
//! identifier to be a native address and the destination to fit `uint64`.
//! Arrays are converted element-wise, so order and length are preserved.

use alloy::primitives::{Address, B256, U256};
use thiserror::Error;

use crate::address::{to_native_address, to_wide_id, AddressError};
use crate::{evm, universal};

/// Errors that can occur when narrowing a Universal intent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConvertError {
	/// An identifier field does not hold a native address.
	#[error("Invalid address encoding in {field}: {source}")]
	InvalidAddressEncoding {
		field: String,
		#[source]
		source: AddressError,
	},
	/// An integer field does not fit the native width.
	#[error("Numeric overflow in {field}: {value} exceeds native width")]
	NumericOverflow { field: String, value: U256 },
}

fn narrow_address(id: B256, field: impl Into<String>) -> Result<Address, ConvertError> {
	to_native_address(id).map_err(|source| ConvertError::InvalidAddressEncoding {
		field: field.into(),
		source,
	})
}

fn narrow_u64(value: U256, field: impl Into<String>) -> Result<u64, ConvertError> {
	u64::try_from(value).map_err(|_| ConvertError::NumericOverflow {
		field: field.into(),
		value,
	})
}

impl From<&evm::TokenAmount> for universal::TokenAmount {
	fn from(token: &evm::TokenAmount) -> Self {
		Self {
			token: to_wide_id(token.token),
			amount: token.amount,
		}
	}
}

impl From<&evm::Call> for universal::Call {
	fn from(call: &evm::Call) -> Self {
		Self {
			target: to_wide_id(call.target),
			data: call.data.clone(),
			value: call.value,
		}
	}
}

impl From<&evm::Route> for universal::Route {
	fn from(route: &evm::Route) -> Self {
		Self {
			salt: route.salt,
			deadline: route.deadline,
			portal: to_wide_id(route.portal),
			tokens: route.tokens.iter().map(Into::into).collect(),
			calls: route.calls.iter().map(Into::into).collect(),
		}
	}
}

impl From<&evm::Reward> for universal::Reward {
	fn from(reward: &evm::Reward) -> Self {
		Self {
			deadline: reward.deadline,
			creator: to_wide_id(reward.creator),
			prover: to_wide_id(reward.prover),
			nativeAmount: reward.nativeAmount,
			tokens: reward.tokens.iter().map(Into::into).collect(),
		}
	}
}

impl From<&evm::Intent> for universal::Intent {
	fn from(intent: &evm::Intent) -> Self {
		Self {
			destination: U256::from(intent.destination),
			route: (&intent.route).into(),
			reward: (&intent.reward).into(),
		}
	}
}

fn narrow_tokens(
	tokens: &[universal::TokenAmount],
	field: &str,
) -> Result<Vec<evm::TokenAmount>, ConvertError> {
	tokens
		.iter()
		.enumerate()
		.map(|(i, token)| {
			Ok(evm::TokenAmount {
				token: narrow_address(token.token, format!("{}[{}].token", field, i))?,
				amount: token.amount,
			})
		})
		.collect()
}

impl TryFrom<&universal::Route> for evm::Route {
	type Error = ConvertError;

	fn try_from(route: &universal::Route) -> Result<Self, Self::Error> {
		let calls = route
			.calls
			.iter()
			.enumerate()
			.map(|(i, call)| {
				Ok(evm::Call {
					target: narrow_address(call.target, format!("route.calls[{}].target", i))?,
					data: call.data.clone(),
					value: call.value,
				})
			})
			.collect::<Result<Vec<_>, ConvertError>>()?;

		Ok(Self {
			salt: route.salt,
			deadline: route.deadline,
			portal: narrow_address(route.portal, "route.portal")?,
			tokens: narrow_tokens(&route.tokens, "route.tokens")?,
			calls,
		})
	}
}

impl TryFrom<&universal::Reward> for evm::Reward {
	type Error = ConvertError;

	fn try_from(reward: &universal::Reward) -> Result<Self, Self::Error> {
		Ok(Self {
			deadline: reward.deadline,
			creator: narrow_address(reward.creator, "reward.creator")?,
			prover: narrow_address(reward.prover, "reward.prover")?,
			nativeAmount: reward.nativeAmount,
			tokens: narrow_tokens(&reward.tokens, "reward.tokens")?,
		})
	}
}

impl TryFrom<&universal::Intent> for evm::Intent {
	type Error = ConvertError;

	fn try_from(intent: &universal::Intent) -> Result<Self, Self::Error> {
		Ok(Self {
			destination: narrow_u64(intent.destination, "destination")?,
			route: (&intent.route).try_into()?,
			reward: (&intent.reward).try_into()?,
		})
	}
}
