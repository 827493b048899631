//! Conversion between native addresses and chain-agnostic identifiers.
//!
//! A chain-agnostic identifier is a 32-byte word. Native addresses occupy the
//! low 20 bytes with the high 12 bytes zeroed; any identifier with a non-zero
//! high byte belongs to a foreign chain and has no native form.

use alloy::primitives::{Address, B256};
use thiserror::Error;

/// Number of leading bytes that must be zero for a native address.
const NATIVE_ADDRESS_OFFSET: usize = 12;

/// Errors that can occur when narrowing an identifier to a native address.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
	/// The identifier carries non-zero bytes above the native address width.
	#[error("Invalid address encoding: {0} is not a native address")]
	InvalidAddressEncoding(B256),
}

/// Zero-extends a native address into a chain-agnostic identifier.
pub fn to_wide_id(address: Address) -> B256 {
	address.into_word()
}

/// Truncates an identifier to a native address.
///
/// Fails if any byte above the native address width is set.
pub fn to_native_address(id: B256) -> Result<Address, AddressError> {
	if !is_valid_native_address(id) {
		return Err(AddressError::InvalidAddressEncoding(id));
	}
	Ok(Address::from_word(id))
}

/// Returns true if the identifier represents a native address.
pub fn is_valid_native_address(id: B256) -> bool {
	id[..NATIVE_ADDRESS_OFFSET].iter().all(|&b| b == 0)
}

/// Converts a list of native addresses, preserving order and length.
pub fn to_wide_ids(addresses: &[Address]) -> Vec<B256> {
	addresses.iter().copied().map(to_wide_id).collect()
}

/// Converts a list of identifiers, failing on the first foreign identifier.
pub fn to_native_addresses(ids: &[B256]) -> Result<Vec<Address>, AddressError> {
	ids.iter().copied().map(to_native_address).collect()
}
