//! Proof types exchanged between provers and proof oracles.
//!
//! Fulfillment proofs travel between chains as event logs. The log data is a
//! concatenation of 64-byte records, each holding an intent hash followed by
//! the claimant identifier, and the topics are exactly two words: the event
//! signature and the chain id the intents originated from.

use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::sol;
use alloy::sol_types::SolEvent;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of one `(intentHash, claimant)` record in a proof payload.
pub const PROOF_ENTRY_SIZE: usize = 64;

/// Maximum size of a proof payload accepted by the outbound path.
pub const MAX_PROOF_DATA_SIZE: usize = 32 * 1024;

/// Exact size of the topics blob: event signature word plus chain id word.
pub const PROOF_TOPICS_SIZE: usize = 64;

sol! {
	/// Emitted on the destination chain for intents fulfilled from `source`.
	event IntentFulfilledFromSource(uint64 indexed source, bytes encodedProofs);
}

/// Hash identifying fulfillment logs, the first topic of every proof log.
pub fn fulfillment_event_signature() -> B256 {
	IntentFulfilledFromSource::SIGNATURE_HASH
}

/// Opaque reference that a proof oracle resolves into raw event data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProofHandle(pub Bytes);

impl From<Vec<u8>> for ProofHandle {
	fn from(bytes: Vec<u8>) -> Self {
		Self(Bytes::from(bytes))
	}
}

impl From<&[u8]> for ProofHandle {
	fn from(bytes: &[u8]) -> Self {
		Self(Bytes::copy_from_slice(bytes))
	}
}

impl fmt::Display for ProofHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", hex::encode(&self.0))
	}
}

/// Raw event data returned by a proof oracle.
///
/// Nothing in here is trusted; every field is checked by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleEvent {
	/// Chain on which the event was emitted.
	pub chain_id: u64,
	/// Contract that emitted the event.
	pub emitter: Address,
	/// Concatenated 32-byte topic words.
	pub topics: Bytes,
	/// Unindexed event data.
	pub data: Bytes,
}

/// Record of a proven intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenRecord {
	pub intent_hash: B256,
	/// Address entitled to the reward.
	pub claimant: Address,
	/// Chain the fulfillment proof was reported from.
	pub source_chain_id: u64,
}

/// Events produced by the prover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProofEvent {
	/// A new proof record was created.
	Proven {
		intent_hash: B256,
		claimant: Address,
		source_chain_id: u64,
	},
	/// The intent already had a proof record; nothing changed.
	AlreadyProven { intent_hash: B256 },
	/// A fulfillment log was assembled for relay to `source_chain_id`.
	Dispatched {
		source_chain_id: u64,
		intent_count: usize,
	},
}

/// Why a single proof entry was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
	/// The claimant has non-zero bytes above the native address width.
	ForeignClaimant,
	/// The claimant is the zero address.
	ZeroClaimant,
}

/// Proof entry that was skipped during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEntry {
	pub intent_hash: B256,
	pub claimant: B256,
	pub reason: SkipReason,
}

/// Result of validating a single proof handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
	/// Chain the proof was reported from, as attested by the oracle.
	pub source_chain_id: u64,
	/// Chain id carried in the second topic of the log.
	pub reported_chain_id: U256,
	/// Events in input order.
	pub events: Vec<ProofEvent>,
	/// Entries dropped because of an unusable claimant.
	pub skipped: Vec<SkippedEntry>,
}

impl ValidationOutcome {
	/// Intent hashes newly proven by this validation.
	pub fn proven(&self) -> impl Iterator<Item = &B256> {
		self.events.iter().filter_map(|event| match event {
			ProofEvent::Proven { intent_hash, .. } => Some(intent_hash),
			_ => None,
		})
	}
}

/// Fulfillment log assembled by the outbound prove path.
///
/// This is the exact shape a proof oracle on the remote chain reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FulfillmentLog {
	/// Chain the intents originated from, where the log will be validated.
	pub source_chain_id: u64,
	/// Address that requested the proof.
	pub sender: Address,
	pub topics: Bytes,
	pub data: Bytes,
}

impl FulfillmentLog {
	/// Builds the two-word topics blob for a log reported to `source_chain_id`.
	pub fn topics_for(source_chain_id: u64) -> Bytes {
		let mut topics = Vec::with_capacity(PROOF_TOPICS_SIZE);
		topics.extend_from_slice(fulfillment_event_signature().as_slice());
		topics.extend_from_slice(&U256::from(source_chain_id).to_be_bytes::<32>());
		Bytes::from(topics)
	}

	/// Converts this log into the event an oracle on chain `chain_id` would return.
	pub fn into_oracle_event(self, chain_id: u64, emitter: Address) -> OracleEvent {
		OracleEvent {
			chain_id,
			emitter,
			topics: self.topics,
			data: self.data,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy::primitives::keccak256;

	#[test]
	fn test_event_signature_matches_declaration() {
		assert_eq!(
			fulfillment_event_signature(),
			keccak256("IntentFulfilledFromSource(uint64,bytes)")
		);
	}

	#[test]
	fn test_topics_layout() {
		let topics = FulfillmentLog::topics_for(10);

		assert_eq!(topics.len(), PROOF_TOPICS_SIZE);
		assert_eq!(&topics[..32], fulfillment_event_signature().as_slice());
		assert!(topics[32..63].iter().all(|&b| b == 0));
		assert_eq!(topics[63], 10);
	}

	#[test]
	fn test_proof_handle_display() {
		let handle = ProofHandle::from(vec![0xde, 0xad]);
		assert_eq!(handle.to_string(), "0xdead");
	}

	#[test]
	fn test_proven_record_serialization() {
		let record = ProvenRecord {
			intent_hash: B256::from([0x11u8; 32]),
			claimant: Address::from([0x22u8; 20]),
			source_chain_id: 8453,
		};

		let json = serde_json::to_string(&record).unwrap();
		let decoded: ProvenRecord = serde_json::from_str(&json).unwrap();
		assert_eq!(decoded, record);
	}

	#[test]
	fn test_outcome_proven_filter() {
		let outcome = ValidationOutcome {
			source_chain_id: 1,
			reported_chain_id: U256::from(10),
			events: vec![
				ProofEvent::Proven {
					intent_hash: B256::from([1u8; 32]),
					claimant: Address::from([1u8; 20]),
					source_chain_id: 1,
				},
				ProofEvent::AlreadyProven {
					intent_hash: B256::from([2u8; 32]),
				},
			],
			skipped: vec![],
		};

		let proven: Vec<_> = outcome.proven().collect();
		assert_eq!(proven, vec![&B256::from([1u8; 32])]);
	}
}
