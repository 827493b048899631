//! Set-once prover configuration.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use alloy::primitives::{Address, B256};
use serde::{Deserialize, Serialize};

use crate::ProverError;

/// Arguments for the one-time initialization of a prover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitArgs {
	/// Address of the proof oracle contract.
	pub oracle: Address,
	/// Address allowed to call `prove`.
	pub inbox: Address,
	/// Chains proofs are accepted from, parallel to `emitters`.
	pub chain_ids: Vec<u64>,
	/// Wide id of the authorized emitting contract on each chain.
	pub emitters: Vec<B256>,
}

/// Immutable configuration produced by initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProverConfig {
	oracle: Address,
	inbox: Address,
	whitelist: BTreeMap<u64, B256>,
}

impl ProverConfig {
	pub(crate) fn from_args(args: InitArgs) -> Result<Self, ProverError> {
		if args.oracle == Address::ZERO || args.inbox == Address::ZERO {
			return Err(ProverError::ZeroAddress);
		}
		if args.chain_ids.len() != args.emitters.len() {
			return Err(ProverError::SizeMismatch {
				chain_ids: args.chain_ids.len(),
				emitters: args.emitters.len(),
			});
		}

		let mut whitelist = BTreeMap::new();
		for (chain_id, emitter) in args.chain_ids.into_iter().zip(args.emitters) {
			if whitelist.insert(chain_id, emitter).is_some() {
				return Err(ProverError::DuplicateChainId(chain_id));
			}
		}

		Ok(Self {
			oracle: args.oracle,
			inbox: args.inbox,
			whitelist,
		})
	}

	/// Oracle contract that attests proof events.
	pub fn oracle(&self) -> Address {
		self.oracle
	}

	/// Only caller allowed to dispatch proofs through `prove`.
	pub fn inbox(&self) -> Address {
		self.inbox
	}

	/// Authorized emitter for `chain_id`, if the chain is whitelisted.
	pub fn whitelisted_emitter(&self, chain_id: u64) -> Option<&B256> {
		self.whitelist.get(&chain_id)
	}

	pub fn is_whitelisted(&self, chain_id: u64, emitter: &B256) -> bool {
		self.whitelisted_emitter(chain_id) == Some(emitter)
	}

	/// Whitelisted chains in ascending order.
	pub fn chain_ids(&self) -> impl Iterator<Item = u64> + '_ {
		self.whitelist.keys().copied()
	}
}

/// Lifecycle of the prover configuration.
///
/// Initialization happens exactly once; there is no way back to
/// `Uninitialized` and no way to replace the configuration.
#[derive(Debug, Clone, Default)]
pub enum ProverState {
	#[default]
	Uninitialized,
	Initialized(Arc<ProverConfig>),
}

impl ProverState {
	pub(crate) fn initialize(&mut self, args: InitArgs) -> Result<Arc<ProverConfig>, ProverError> {
		if let ProverState::Initialized(_) = self {
			return Err(ProverError::AlreadyInitialized);
		}

		let config = Arc::new(ProverConfig::from_args(args)?);
		*self = ProverState::Initialized(config.clone());
		Ok(config)
	}

	pub fn config(&self) -> Result<&Arc<ProverConfig>, ProverError> {
		match self {
			ProverState::Initialized(config) => Ok(config),
			ProverState::Uninitialized => Err(ProverError::NotInitialized),
		}
	}

	pub fn is_initialized(&self) -> bool {
		matches!(self, ProverState::Initialized(_))
	}
}

/// How failures inside `validate_batch` affect the rest of the batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
	/// Every handle is validated on its own; earlier successes are kept.
	#[default]
	PerHandle,
	/// Any structural failure rejects the whole batch before anything is written.
	Atomic,
}

impl fmt::Display for BatchPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			BatchPolicy::PerHandle => write!(f, "per_handle"),
			BatchPolicy::Atomic => write!(f, "atomic"),
		}
	}
}

impl FromStr for BatchPolicy {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"per_handle" | "per-handle" => Ok(BatchPolicy::PerHandle),
			"atomic" => Ok(BatchPolicy::Atomic),
			other => Err(format!("Unknown batch policy: {}", other)),
		}
	}
}
