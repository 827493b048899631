//! Chain-agnostic representation of an intent.
//!
//! Every address is a 32-byte identifier so that routes can target chains
//! whose addresses do not fit 20 bytes. The destination chain id is stored as
//! a full `uint256`.

use alloy::sol;

sol! {
	#[derive(Debug, PartialEq, Eq)]
	struct TokenAmount {
		bytes32 token;
		uint256 amount;
	}

	#[derive(Debug, PartialEq, Eq)]
	struct Call {
		bytes32 target;
		bytes data;
		uint256 value;
	}

	#[derive(Debug, PartialEq, Eq)]
	struct Route {
		bytes32 salt;
		uint64 deadline;
		bytes32 portal;
		TokenAmount[] tokens;
		Call[] calls;
	}

	#[derive(Debug, PartialEq, Eq)]
	struct Reward {
		uint64 deadline;
		bytes32 creator;
		bytes32 prover;
		uint256 nativeAmount;
		TokenAmount[] tokens;
	}

	#[derive(Debug, PartialEq, Eq)]
	struct Intent {
		uint256 destination;
		Route route;
		Reward reward;
	}
}
