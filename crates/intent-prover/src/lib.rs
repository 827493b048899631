//! Cross-chain fulfillment proof validation.
//!
//! The validator runs on the chain where intents are created. It resolves
//! proof handles through a [`ProofOracle`], authenticates the emitting
//! contract against a per-chain whitelist, and records every intent whose
//! fulfillment the proof attests. The outbound [`prove`] path runs on the
//! fulfilling chain and packages fulfilled intents into the log format that
//! the validator consumes.
//!
//! [`prove`]: CrossChainProofValidator::prove

use std::sync::Arc;

use alloy::primitives::{Address, Bytes, B256};
use intent_storage::{StorageError, StorageService};
use intent_types::{
	EventBus, FulfillmentLog, ProofEvent, ProofHandle, ProvenRecord, SkippedEntry,
	ValidationOutcome, MAX_PROOF_DATA_SIZE, PROOF_ENTRY_SIZE,
};
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod oracle;
pub mod payload;
pub mod state;
pub mod store;

/// Re-export implementations
pub mod implementations {
	pub mod static_oracle;
}

pub use implementations::static_oracle::StaticOracle;
pub use oracle::{OracleError, ProofOracle};
pub use payload::{check_event, classify_entries, encode_entries, CheckedEvent, ClassifiedEntry};
pub use state::{BatchPolicy, InitArgs, ProverConfig, ProverState};
pub use store::{ProofStore, PROOFS_NAMESPACE};

/// Proof mechanism implemented by this crate.
pub const PROOF_TYPE: &str = "Polymer";

/// Errors that can occur during proof validation and dispatch.
#[derive(Debug, Error)]
pub enum ProverError {
	#[error("Prover is not initialized")]
	NotInitialized,
	#[error("Prover is already initialized")]
	AlreadyInitialized,
	#[error("Oracle and inbox addresses must be non-zero")]
	ZeroAddress,
	#[error("Size mismatch: {chain_ids} chain ids, {emitters} emitters")]
	SizeMismatch { chain_ids: usize, emitters: usize },
	#[error("Chain {0} is listed more than once")]
	DuplicateChainId(u64),
	#[error("Emitter {emitter} is not whitelisted for chain {chain_id}")]
	InvalidEmittingContract { chain_id: u64, emitter: Address },
	#[error("Invalid topics length: {0} bytes")]
	InvalidTopicsLength(usize),
	#[error("Invalid event signature: {0}")]
	InvalidEventSignature(B256),
	#[error("Proof data is empty")]
	EmptyProofData,
	#[error("Proof data is not a whole number of entries")]
	ArrayLengthMismatch,
	#[error("Proof data of {size} bytes exceeds maximum of {max}")]
	MaxDataSizeExceeded { size: usize, max: usize },
	#[error("Caller {0} is not the inbox")]
	OnlyInbox(Address),
	#[error("Oracle error: {0}")]
	Oracle(#[from] OracleError),
	#[error("Storage error: {0}")]
	Storage(#[from] StorageError),
}

/// Result of one handle in a batch.
#[derive(Debug)]
pub struct BatchItem {
	pub handle: ProofHandle,
	pub result: Result<ValidationOutcome, ProverError>,
}

/// A checked event whose entries are classified but not yet applied.
struct PreparedProof {
	checked: CheckedEvent,
	entries: Vec<ClassifiedEntry>,
}

/// Validates fulfillment proofs and records proven intents.
pub struct CrossChainProofValidator {
	state: ProverState,
	oracle: Arc<dyn ProofOracle>,
	store: ProofStore,
	events: EventBus,
	batch_policy: BatchPolicy,
}

impl CrossChainProofValidator {
	/// Creates an uninitialized validator reading events from `oracle` and
	/// keeping proof records in `storage`.
	pub fn new(oracle: Arc<dyn ProofOracle>, storage: StorageService) -> Self {
		Self {
			state: ProverState::Uninitialized,
			oracle,
			store: ProofStore::new(storage),
			events: EventBus::default(),
			batch_policy: BatchPolicy::default(),
		}
	}

	/// Sets how `validate_batch` treats failing handles.
	pub fn with_batch_policy(mut self, batch_policy: BatchPolicy) -> Self {
		self.batch_policy = batch_policy;
		self
	}

	/// Publishes proof events on a shared bus instead of a private one.
	pub fn with_event_bus(mut self, events: EventBus) -> Self {
		self.events = events;
		self
	}

	pub fn batch_policy(&self) -> BatchPolicy {
		self.batch_policy
	}

	pub fn event_bus(&self) -> &EventBus {
		&self.events
	}

	pub fn proof_type(&self) -> &'static str {
		PROOF_TYPE
	}

	/// Installs the whitelist. Succeeds at most once.
	pub fn initialize(&mut self, args: InitArgs) -> Result<(), ProverError> {
		let config = self.state.initialize(args)?;
		info!(
			oracle = %config.oracle(),
			inbox = %config.inbox(),
			chains = config.chain_ids().count(),
			"Prover initialized"
		);
		Ok(())
	}

	pub fn config(&self) -> Result<Arc<ProverConfig>, ProverError> {
		self.state.config().cloned()
	}

	/// Looks up the proof record for an intent.
	pub async fn proven_intent(
		&self,
		intent_hash: &B256,
	) -> Result<Option<ProvenRecord>, ProverError> {
		self.state.config()?;
		Ok(self.store.get(intent_hash).await?)
	}

	/// Validates one proof handle and records the intents it proves.
	///
	/// Structural failures reject the whole proof before anything is stored.
	/// Entries with an unusable claimant are skipped and reported in the
	/// outcome; intents that already have a record are reported as
	/// `AlreadyProven` and keep their original claimant.
	pub async fn validate(
		&mut self,
		handle: &ProofHandle,
	) -> Result<ValidationOutcome, ProverError> {
		let config = self.state.config()?.clone();
		let prepared = self.prepare(&config, handle).await?;
		self.apply(prepared).await
	}

	/// Validates several handles in order according to the batch policy.
	///
	/// With [`BatchPolicy::PerHandle`] the call itself only fails before
	/// initialization; per-handle failures are reported in the items. With
	/// [`BatchPolicy::Atomic`] the first structural failure fails the call and
	/// nothing from the batch is stored.
	pub async fn validate_batch(
		&mut self,
		handles: &[ProofHandle],
	) -> Result<Vec<BatchItem>, ProverError> {
		let config = self.state.config()?.clone();

		match self.batch_policy {
			BatchPolicy::PerHandle => {
				let mut items = Vec::with_capacity(handles.len());
				for handle in handles {
					let result = match self.prepare(&config, handle).await {
						Ok(prepared) => self.apply(prepared).await,
						Err(e) => Err(e),
					};
					items.push(BatchItem {
						handle: handle.clone(),
						result,
					});
				}
				Ok(items)
			}
			BatchPolicy::Atomic => {
				let mut prepared = Vec::with_capacity(handles.len());
				for handle in handles {
					prepared.push(self.prepare(&config, handle).await?);
				}

				let mut items = Vec::with_capacity(handles.len());
				for (handle, proof) in handles.iter().zip(prepared) {
					items.push(BatchItem {
						handle: handle.clone(),
						result: Ok(self.apply(proof).await?),
					});
				}
				Ok(items)
			}
		}
	}

	/// Packages fulfilled intents into a fulfillment log for `source_chain_id`.
	///
	/// `data` may carry additional entries already in wire format; they are
	/// appended after the packed `intent_hashes`/`claimants` pairs. Returns
	/// `None` when there is nothing to prove.
	pub async fn prove(
		&self,
		caller: Address,
		sender: Address,
		source_chain_id: u64,
		intent_hashes: &[B256],
		claimants: &[B256],
		data: &[u8],
	) -> Result<Option<FulfillmentLog>, ProverError> {
		let config = self.state.config()?;
		if caller != config.inbox() {
			warn!(caller = %caller, "Rejected prove from non-inbox caller");
			return Err(ProverError::OnlyInbox(caller));
		}
		if data.len() % PROOF_ENTRY_SIZE != 0 {
			return Err(ProverError::ArrayLengthMismatch);
		}

		let mut payload = encode_entries(intent_hashes, claimants)?;
		payload.extend_from_slice(data);

		if payload.len() > MAX_PROOF_DATA_SIZE {
			return Err(ProverError::MaxDataSizeExceeded {
				size: payload.len(),
				max: MAX_PROOF_DATA_SIZE,
			});
		}
		if payload.is_empty() {
			debug!(source_chain_id, "Nothing to prove");
			return Ok(None);
		}

		let intent_count = payload.len() / PROOF_ENTRY_SIZE;
		info!(source_chain_id, intent_count, sender = %sender, "Dispatching fulfillment proof");
		self.events
			.publish(ProofEvent::Dispatched {
				source_chain_id,
				intent_count,
			})
			.ok();

		Ok(Some(FulfillmentLog {
			source_chain_id,
			sender,
			topics: FulfillmentLog::topics_for(source_chain_id),
			data: Bytes::from(payload),
		}))
	}

	async fn prepare(
		&self,
		config: &ProverConfig,
		handle: &ProofHandle,
	) -> Result<PreparedProof, ProverError> {
		let event = self.oracle.query_event(handle).await.map_err(|e| {
			warn!(handle = %handle, error = %e, "Oracle query failed");
			ProverError::from(e)
		})?;

		let checked = check_event(config, event).map_err(|e| {
			warn!(handle = %handle, error = %e, "Rejected proof");
			e
		})?;
		let entries = classify_entries(&checked.data);

		Ok(PreparedProof { checked, entries })
	}

	async fn apply(&self, prepared: PreparedProof) -> Result<ValidationOutcome, ProverError> {
		let PreparedProof { checked, entries } = prepared;
		let source_chain_id = checked.source_chain_id;
		let mut events = Vec::new();
		let mut skipped: Vec<SkippedEntry> = Vec::new();

		for entry in entries {
			let (intent_hash, claimant) = match entry {
				ClassifiedEntry::Valid {
					intent_hash,
					claimant,
				} => (intent_hash, claimant),
				ClassifiedEntry::Skip(entry) => {
					debug!(
						intent_hash = %entry.intent_hash,
						claimant = %entry.claimant,
						reason = ?entry.reason,
						"Skipping proof entry"
					);
					skipped.push(entry);
					continue;
				}
			};

			let event = if self.store.contains(&intent_hash).await? {
				debug!(intent_hash = %intent_hash, "Intent already proven");
				ProofEvent::AlreadyProven { intent_hash }
			} else {
				self.store
					.insert(&ProvenRecord {
						intent_hash,
						claimant,
						source_chain_id,
					})
					.await?;
				info!(
					intent_hash = %intent_hash,
					claimant = %claimant,
					source_chain_id,
					"Intent proven"
				);
				ProofEvent::Proven {
					intent_hash,
					claimant,
					source_chain_id,
				}
			};

			self.events.publish(event.clone()).ok();
			events.push(event);
		}

		Ok(ValidationOutcome {
			source_chain_id,
			reported_chain_id: checked.reported_chain_id,
			events,
			skipped,
		})
	}
}
