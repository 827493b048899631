//! Native EVM representation of an intent.
//!
//! Address fields are 20-byte native addresses and the destination chain id
//! fits the native `uint64`. Field order must match the Solidity structs
//! exactly, since it determines both the ABI encoding and the EIP-712 type
//! string.

use alloy::sol;

sol! {
	/// Token and amount pair.
	#[derive(Debug, PartialEq, Eq)]
	struct TokenAmount {
		address token;
		uint256 amount;
	}

	/// Single call executed on the destination chain.
	#[derive(Debug, PartialEq, Eq)]
	struct Call {
		address target;
		bytes data;
		uint256 value;
	}

	/// Destination-side execution plan of an intent.
	#[derive(Debug, PartialEq, Eq)]
	struct Route {
		bytes32 salt;
		uint64 deadline;
		address portal;
		TokenAmount[] tokens;
		Call[] calls;
	}

	/// Origin-side payout promised to whoever proves fulfillment.
	#[derive(Debug, PartialEq, Eq)]
	struct Reward {
		uint64 deadline;
		address creator;
		address prover;
		uint256 nativeAmount;
		TokenAmount[] tokens;
	}

	/// Complete intent targeted at a destination chain.
	#[derive(Debug, PartialEq, Eq)]
	struct Intent {
		uint64 destination;
		Route route;
		Reward reward;
	}
}
