//! In-memory storage backend.

use crate::{StorageError, StorageInterface};
use async_trait::async_trait;
use dashmap::DashMap;

/// Storage backed by a concurrent hash map. Contents are lost on drop.
#[derive(Default)]
pub struct MemoryStorage {
	entries: DashMap<String, Vec<u8>>,
}

impl MemoryStorage {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of stored keys across all namespaces.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

#[async_trait]
impl StorageInterface for MemoryStorage {
	async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError> {
		self.entries
			.get(key)
			.map(|entry| entry.value().clone())
			.ok_or(StorageError::NotFound)
	}

	async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
		self.entries.insert(key.to_string(), value);
		Ok(())
	}

	async fn delete(&self, key: &str) -> Result<(), StorageError> {
		self.entries.remove(key);
		Ok(())
	}

	async fn exists(&self, key: &str) -> Result<bool, StorageError> {
		Ok(self.entries.contains_key(key))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_set_overwrites() {
		let storage = MemoryStorage::new();
		storage.set_bytes("k", vec![1]).await.unwrap();
		storage.set_bytes("k", vec![2]).await.unwrap();

		assert_eq!(storage.get_bytes("k").await.unwrap(), vec![2]);
		assert_eq!(storage.len(), 1);
	}

	#[tokio::test]
	async fn test_delete_missing_is_ok() {
		let storage = MemoryStorage::new();
		storage.delete("k").await.unwrap();
		assert!(storage.is_empty());
	}
}
