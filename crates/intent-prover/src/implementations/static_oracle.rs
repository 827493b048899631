//! In-memory proof oracle.
//!
//! Serves events that were registered up front, which is how a local relay
//! feeds logs produced by `prove` on one chain into `validate` on another.

use alloy::primitives::Address;
use async_trait::async_trait;
use dashmap::DashMap;
use intent_types::{FulfillmentLog, OracleEvent, ProofHandle};
use tracing::debug;

use crate::{OracleError, ProofOracle};

/// Oracle serving events from an in-memory map keyed by proof handle.
#[derive(Default)]
pub struct StaticOracle {
	events: DashMap<ProofHandle, OracleEvent>,
}

impl StaticOracle {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a raw event under `handle`, replacing any previous one.
	pub fn insert(&self, handle: ProofHandle, event: OracleEvent) {
		self.events.insert(handle, event);
	}

	/// Registers a fulfillment log as emitted by `emitter` on chain `chain_id`.
	pub fn relay(
		&self,
		handle: ProofHandle,
		log: FulfillmentLog,
		chain_id: u64,
		emitter: Address,
	) {
		debug!(
			handle = %handle,
			chain_id,
			source_chain_id = log.source_chain_id,
			"Relaying fulfillment log"
		);
		self.insert(handle, log.into_oracle_event(chain_id, emitter));
	}

	/// Number of registered events.
	pub fn len(&self) -> usize {
		self.events.len()
	}

	pub fn is_empty(&self) -> bool {
		self.events.is_empty()
	}
}

#[async_trait]
impl ProofOracle for StaticOracle {
	async fn query_event(&self, handle: &ProofHandle) -> Result<OracleEvent, OracleError> {
		self.events
			.get(handle)
			.map(|event| event.value().clone())
			.ok_or_else(|| OracleError::NotFound(handle.clone()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy::primitives::Bytes;

	#[tokio::test]
	async fn test_query_registered_event() {
		let oracle = StaticOracle::new();
		let handle = ProofHandle::from(vec![1, 2, 3]);
		let log = FulfillmentLog {
			source_chain_id: 1,
			sender: Address::from([1u8; 20]),
			topics: FulfillmentLog::topics_for(1),
			data: Bytes::from(vec![0u8; 64]),
		};

		oracle.relay(handle.clone(), log.clone(), 10, Address::from([2u8; 20]));
		let event = oracle.query_event(&handle).await.unwrap();

		assert_eq!(event.chain_id, 10);
		assert_eq!(event.emitter, Address::from([2u8; 20]));
		assert_eq!(event.topics, log.topics);
		assert_eq!(event.data, log.data);
		assert_eq!(oracle.len(), 1);
	}

	#[tokio::test]
	async fn test_unknown_handle() {
		let oracle = StaticOracle::new();

		assert!(matches!(
			oracle.query_event(&ProofHandle::from(vec![9])).await,
			Err(OracleError::NotFound(_))
		));
	}
}
