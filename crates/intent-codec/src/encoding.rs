//! Canonical encoding and hashing of routes, rewards and intents.
//!
//! Routes and rewards are serialized with the Solidity ABI (`abi.encode`),
//! which prefixes every dynamic array and byte string with its length, and
//! hashed with keccak256. The intent hash folds in the destination chain so
//! that the same route sent to two chains yields two identifiers.

use alloy::primitives::{keccak256, B256, U256};
use alloy::sol_types::SolValue;
use intent_types::{evm, universal};

/// Route types with a canonical encoding.
pub trait CanonicalRoute: SolValue {}

/// Reward types with a canonical encoding.
pub trait CanonicalReward: SolValue {}

impl CanonicalRoute for evm::Route {}
impl CanonicalRoute for universal::Route {}
impl CanonicalReward for evm::Reward {}
impl CanonicalReward for universal::Reward {}

/// Intent representations that can be hashed canonically.
pub trait CanonicalIntent {
	type Route: CanonicalRoute;
	type Reward: CanonicalReward;

	/// Destination chain id widened to 256 bits.
	fn destination(&self) -> U256;
	fn route(&self) -> &Self::Route;
	fn reward(&self) -> &Self::Reward;

	/// Computes the route, reward and intent hashes in one pass.
	fn hashes(&self) -> IntentHashes {
		let route_hash = hash_route(self.route());
		let reward_hash = hash_reward(self.reward());
		IntentHashes {
			route_hash,
			reward_hash,
			intent_hash: hash_intent_parts(self.destination(), route_hash, reward_hash),
		}
	}
}

impl CanonicalIntent for evm::Intent {
	type Route = evm::Route;
	type Reward = evm::Reward;

	fn destination(&self) -> U256 {
		U256::from(self.destination)
	}

	fn route(&self) -> &evm::Route {
		&self.route
	}

	fn reward(&self) -> &evm::Reward {
		&self.reward
	}
}

impl CanonicalIntent for universal::Intent {
	type Route = universal::Route;
	type Reward = universal::Reward;

	fn destination(&self) -> U256 {
		self.destination
	}

	fn route(&self) -> &universal::Route {
		&self.route
	}

	fn reward(&self) -> &universal::Reward {
		&self.reward
	}
}

/// Component hashes of an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentHashes {
	pub route_hash: B256,
	pub reward_hash: B256,
	pub intent_hash: B256,
}

/// Solidity `abi.encode` of a route, in either representation.
pub fn encode_route<R: CanonicalRoute>(route: &R) -> Vec<u8> {
	route.abi_encode()
}

/// Solidity `abi.encode` of a reward, in either representation.
pub fn encode_reward<R: CanonicalReward>(reward: &R) -> Vec<u8> {
	reward.abi_encode()
}

/// Keccak-256 of [`encode_route`].
pub fn hash_route<R: CanonicalRoute>(route: &R) -> B256 {
	keccak256(encode_route(route))
}

/// Keccak-256 of [`encode_reward`].
pub fn hash_reward<R: CanonicalReward>(reward: &R) -> B256 {
	keccak256(encode_reward(reward))
}

/// Hashes an intent in either representation.
pub fn hash_intent<I: CanonicalIntent>(intent: &I) -> B256 {
	intent.hashes().intent_hash
}

/// Combines precomputed component hashes into the intent hash.
///
/// `keccak256(routeHash ‖ destination ‖ rewardHash)`, with the destination as
/// a single big-endian 32-byte word.
pub fn hash_intent_parts(destination: U256, route_hash: B256, reward_hash: B256) -> B256 {
	let mut preimage = [0u8; 96];
	preimage[..32].copy_from_slice(route_hash.as_slice());
	preimage[32..64].copy_from_slice(&destination.to_be_bytes::<32>());
	preimage[64..].copy_from_slice(reward_hash.as_slice());
	keccak256(preimage)
}
