//! Pure checks and decoding for fulfillment proof payloads.
//!
//! Nothing in this module touches storage. An event either passes every
//! structural check or is rejected as a whole, and the entries of an accepted
//! event are classified before any record is written.

use alloy::primitives::{Address, Bytes, B256, U256};
use intent_types::{
	fulfillment_event_signature, is_valid_native_address, to_wide_id, OracleEvent, SkipReason,
	SkippedEntry, PROOF_ENTRY_SIZE, PROOF_TOPICS_SIZE,
};

use crate::state::ProverConfig;
use crate::ProverError;

/// An oracle event that passed every structural check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedEvent {
	/// Chain the event was emitted on.
	pub source_chain_id: u64,
	/// Chain id carried in the second topic.
	pub reported_chain_id: U256,
	/// Payload, a non-empty multiple of the entry size.
	pub data: Bytes,
}

/// Outcome of decoding one payload entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedEntry {
	Valid { intent_hash: B256, claimant: Address },
	Skip(SkippedEntry),
}

/// Runs the structural checks on an oracle event, in order.
pub fn check_event(config: &ProverConfig, event: OracleEvent) -> Result<CheckedEvent, ProverError> {
	if !config.is_whitelisted(event.chain_id, &to_wide_id(event.emitter)) {
		return Err(ProverError::InvalidEmittingContract {
			chain_id: event.chain_id,
			emitter: event.emitter,
		});
	}

	if event.topics.len() != PROOF_TOPICS_SIZE {
		return Err(ProverError::InvalidTopicsLength(event.topics.len()));
	}

	let signature = B256::from_slice(&event.topics[..32]);
	if signature != fulfillment_event_signature() {
		return Err(ProverError::InvalidEventSignature(signature));
	}

	if event.data.is_empty() {
		return Err(ProverError::EmptyProofData);
	}

	if event.data.len() % PROOF_ENTRY_SIZE != 0 {
		return Err(ProverError::ArrayLengthMismatch);
	}

	Ok(CheckedEvent {
		source_chain_id: event.chain_id,
		reported_chain_id: U256::from_be_slice(&event.topics[32..]),
		data: event.data,
	})
}

/// Decodes `intentHash ‖ claimant` records and sorts out unusable claimants.
///
/// Trailing bytes that do not form a whole record are ignored; callers check
/// the length first.
pub fn classify_entries(data: &[u8]) -> Vec<ClassifiedEntry> {
	data.chunks_exact(PROOF_ENTRY_SIZE)
		.map(|entry| {
			let intent_hash = B256::from_slice(&entry[..32]);
			let claimant = B256::from_slice(&entry[32..]);

			if !is_valid_native_address(claimant) {
				return ClassifiedEntry::Skip(SkippedEntry {
					intent_hash,
					claimant,
					reason: SkipReason::ForeignClaimant,
				});
			}
			if claimant == B256::ZERO {
				return ClassifiedEntry::Skip(SkippedEntry {
					intent_hash,
					claimant,
					reason: SkipReason::ZeroClaimant,
				});
			}

			ClassifiedEntry::Valid {
				intent_hash,
				claimant: Address::from_word(claimant),
			}
		})
		.collect()
}

/// Packs parallel hash and claimant arrays into the wire format.
pub fn encode_entries(intent_hashes: &[B256], claimants: &[B256]) -> Result<Vec<u8>, ProverError> {
	if intent_hashes.len() != claimants.len() {
		return Err(ProverError::ArrayLengthMismatch);
	}

	let mut payload = Vec::with_capacity(intent_hashes.len() * PROOF_ENTRY_SIZE);
	for (intent_hash, claimant) in intent_hashes.iter().zip(claimants) {
		payload.extend_from_slice(intent_hash.as_slice());
		payload.extend_from_slice(claimant.as_slice());
	}
	Ok(payload)
}
