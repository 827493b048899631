//! Persistence of proven intents.

use alloy::primitives::B256;
use intent_storage::{StorageError, StorageService};
use intent_types::ProvenRecord;

/// Storage namespace holding proof records.
pub const PROOFS_NAMESPACE: &str = "proofs";

/// Proof records keyed by intent hash.
///
/// Records are only ever inserted; nothing in the prover updates or removes
/// one once written.
pub struct ProofStore {
	storage: StorageService,
}

impl ProofStore {
	pub fn new(storage: StorageService) -> Self {
		Self { storage }
	}

	fn id(intent_hash: &B256) -> String {
		intent_hash.to_string()
	}

	pub async fn get(&self, intent_hash: &B256) -> Result<Option<ProvenRecord>, StorageError> {
		self.storage.find(PROOFS_NAMESPACE, &Self::id(intent_hash)).await
	}

	pub async fn contains(&self, intent_hash: &B256) -> Result<bool, StorageError> {
		self.storage.exists(PROOFS_NAMESPACE, &Self::id(intent_hash)).await
	}

	pub(crate) async fn insert(&self, record: &ProvenRecord) -> Result<(), StorageError> {
		self.storage
			.store(PROOFS_NAMESPACE, &Self::id(&record.intent_hash), record)
			.await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy::primitives::Address;

	#[tokio::test]
	async fn test_insert_and_get() {
		let store = ProofStore::new(StorageService::in_memory());
		let record = ProvenRecord {
			intent_hash: B256::from([9u8; 32]),
			claimant: Address::from([8u8; 20]),
			source_chain_id: 10,
		};

		assert_eq!(store.get(&record.intent_hash).await.unwrap(), None);
		store.insert(&record).await.unwrap();

		assert!(store.contains(&record.intent_hash).await.unwrap());
		assert_eq!(store.get(&record.intent_hash).await.unwrap(), Some(record));
	}
}
