//! Interface to the proof oracle.

use async_trait::async_trait;
use intent_types::{OracleEvent, ProofHandle};
use thiserror::Error;

/// Errors that can occur when querying a proof oracle.
#[derive(Debug, Error)]
pub enum OracleError {
	/// The oracle has no event for the handle.
	#[error("No event found for proof handle {0}")]
	NotFound(ProofHandle),
	/// The oracle rejected the handle as malformed.
	#[error("Invalid proof handle: {0}")]
	InvalidHandle(String),
	/// The oracle could not be reached.
	#[error("Oracle unavailable: {0}")]
	Unavailable(String),
}

/// Source of raw cross-chain event data.
///
/// Implementations resolve an opaque handle into the event it refers to.
/// The returned fields are untrusted; the validator checks all of them.
#[async_trait]
pub trait ProofOracle: Send + Sync {
	async fn query_event(&self, handle: &ProofHandle) -> Result<OracleEvent, OracleError>;
}
