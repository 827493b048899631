//! Configuration types for the prover.

use std::path::PathBuf;
use std::sync::Arc;

use alloy::primitives::{Address, B256};
use intent_prover::{BatchPolicy, CrossChainProofValidator, InitArgs, ProofOracle, ProverError};
use intent_signature::{DualSignatureVerifier, SigningDomain};
use intent_storage::{FileStorage, StorageService};
use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::serde_helpers::deserialize_wide_id;

/// Complete prover configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProverSettings {
	/// Proof oracle contract.
	pub oracle: Address,
	/// Only caller allowed to dispatch proofs.
	pub inbox: Address,
	/// Chains proofs are accepted from.
	#[serde(default)]
	pub chains: Vec<ChainSettings>,
	#[serde(default)]
	pub batch_policy: BatchPolicy,
	#[serde(default)]
	pub storage: StorageSettings,
	#[serde(default = "default_log_level")]
	pub log_level: String,
	/// Domain for intent signature verification.
	#[serde(default)]
	pub signing: Option<SigningSettings>,
}

fn default_log_level() -> String {
	"info".to_string()
}

/// Whitelisted emitter for one chain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChainSettings {
	pub chain_id: u64,
	/// Wide id of the emitting contract. A plain address is widened.
	#[serde(deserialize_with = "deserialize_wide_id")]
	pub emitter: B256,
}

/// Backend for proof records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageSettings {
	#[default]
	Memory,
	File { path: PathBuf },
}

impl StorageSettings {
	pub fn build(&self) -> StorageService {
		match self {
			StorageSettings::Memory => StorageService::in_memory(),
			StorageSettings::File { path } => {
				StorageService::new(Box::new(FileStorage::new(path.clone())))
			}
		}
	}
}

/// EIP-712 domain used when verifying intent signatures.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SigningSettings {
	pub name: String,
	pub version: String,
	pub chain_id: u64,
	pub verifying_contract: Address,
}

impl SigningSettings {
	pub fn domain(&self) -> SigningDomain {
		SigningDomain::new(self.chain_id, self.verifying_contract)
	}

	pub fn verifier(&self) -> DualSignatureVerifier {
		DualSignatureVerifier::new(self.domain())
	}
}

impl ProverSettings {
	/// Configured verbosity, for a host binary to hand to its subscriber or
	/// `EnvFilter`. Values the loader rejects fall back to `INFO`.
	pub fn log_level(&self) -> Level {
		self.log_level.parse().unwrap_or(Level::INFO)
	}

	/// Arguments for `CrossChainProofValidator::initialize`.
	pub fn init_args(&self) -> InitArgs {
		InitArgs {
			oracle: self.oracle,
			inbox: self.inbox,
			chain_ids: self.chains.iter().map(|c| c.chain_id).collect(),
			emitters: self.chains.iter().map(|c| c.emitter).collect(),
		}
	}

	/// Builds and initializes a validator backed by the configured storage.
	pub fn build_validator(
		&self,
		oracle: Arc<dyn ProofOracle>,
	) -> Result<CrossChainProofValidator, ProverError> {
		let mut validator = CrossChainProofValidator::new(oracle, self.storage.build())
			.with_batch_policy(self.batch_policy);
		validator.initialize(self.init_args())?;
		Ok(validator)
	}
}
