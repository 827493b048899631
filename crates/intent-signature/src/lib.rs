//! Signature verification for intents signed in either representation.
//!
//! An intent can be signed over its native (EVM) typed-data digest or over its
//! chain-agnostic (Universal) digest, and wallets differ in which one they
//! present to the user. The verifier accepts a signature if it recovers the
//! expected signer from either digest under the same EIP-712 domain.

use alloy::primitives::{Address, Signature, B256, U256};
use alloy::sol_types::{Eip712Domain, SolStruct};
use intent_codec::hash_intent;
use intent_types::{EvmIntent, UniversalIntent};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while recovering a signer.
#[derive(Debug, Error)]
pub enum SignatureError {
	/// The signature bytes could not be parsed.
	#[error("Malformed signature: {0}")]
	Malformed(String),
	/// The signature did not yield a public key for the digest.
	#[error("Recovery failed: {0}")]
	Recovery(String),
}

/// An intent in one of its two signable forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderData {
	Evm(EvmIntent),
	Universal(UniversalIntent),
}

impl OrderData {
	/// EIP-712 digest of this form under `domain`.
	pub fn signing_hash(&self, domain: &Eip712Domain) -> B256 {
		match self {
			OrderData::Evm(intent) => intent.eip712_signing_hash(domain),
			OrderData::Universal(intent) => intent.eip712_signing_hash(domain),
		}
	}

	/// Canonical intent hash. Identical for both forms of the same intent.
	pub fn intent_hash(&self) -> B256 {
		match self {
			OrderData::Evm(intent) => hash_intent(intent),
			OrderData::Universal(intent) => hash_intent(intent),
		}
	}

	fn kind(&self) -> &'static str {
		match self {
			OrderData::Evm(_) => "evm",
			OrderData::Universal(_) => "universal",
		}
	}
}

impl From<EvmIntent> for OrderData {
	fn from(intent: EvmIntent) -> Self {
		OrderData::Evm(intent)
	}
}

impl From<UniversalIntent> for OrderData {
	fn from(intent: UniversalIntent) -> Self {
		OrderData::Universal(intent)
	}
}

/// Chain and contract part of the EIP-712 domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigningDomain {
	pub chain_id: u64,
	pub verifying_contract: Address,
}

impl SigningDomain {
	pub fn new(chain_id: u64, verifying_contract: Address) -> Self {
		Self {
			chain_id,
			verifying_contract,
		}
	}

	/// Builds the full domain for the given contract name and version.
	pub fn eip712_domain(&self, name: &str, version: &str) -> Eip712Domain {
		Eip712Domain::new(
			Some(name.to_owned().into()),
			Some(version.to_owned().into()),
			Some(U256::from(self.chain_id)),
			Some(self.verifying_contract),
			None,
		)
	}
}

/// Verifies intent signatures against both typed-data digests.
///
/// Verification is a pure predicate: it holds no state besides the domain and
/// never fails loudly. Malformed input is treated as a non-matching signature.
#[derive(Debug, Clone)]
pub struct DualSignatureVerifier {
	domain: SigningDomain,
}

impl DualSignatureVerifier {
	pub fn new(domain: SigningDomain) -> Self {
		Self { domain }
	}

	pub fn domain(&self) -> &SigningDomain {
		&self.domain
	}

	/// Returns true if `signature` was produced by `expected_signer` over the
	/// native or the Universal digest of the intent.
	pub fn verify(
		&self,
		evm: &EvmIntent,
		universal: &UniversalIntent,
		signature: &[u8],
		expected_signer: Address,
		name: &str,
		version: &str,
	) -> bool {
		let forms = [
			OrderData::Evm(evm.clone()),
			OrderData::Universal(universal.clone()),
		];
		self.verify_any(&forms, signature, expected_signer, name, version)
	}

	/// Returns true if `signature` recovers `expected_signer` for any of `forms`.
	pub fn verify_any(
		&self,
		forms: &[OrderData],
		signature: &[u8],
		expected_signer: Address,
		name: &str,
		version: &str,
	) -> bool {
		let signature = match parse_signature(signature) {
			Ok(signature) => signature,
			Err(e) => {
				debug!(error = %e, "Rejecting signature");
				return false;
			}
		};
		let domain = self.domain.eip712_domain(name, version);

		forms.iter().any(|form| {
			match signature.recover_address_from_prehash(&form.signing_hash(&domain)) {
				Ok(recovered) if recovered == expected_signer => {
					debug!(form = form.kind(), signer = %recovered, "Signature verified");
					true
				}
				Ok(recovered) => {
					debug!(form = form.kind(), recovered = %recovered, "Signer mismatch");
					false
				}
				Err(e) => {
					debug!(form = form.kind(), error = %e, "Signer recovery failed");
					false
				}
			}
		})
	}

	/// Recovers the address that signed `form`.
	pub fn recover_signer(
		&self,
		form: &OrderData,
		signature: &[u8],
		name: &str,
		version: &str,
	) -> Result<Address, SignatureError> {
		let signature = parse_signature(signature)?;
		let digest = form.signing_hash(&self.domain.eip712_domain(name, version));
		signature
			.recover_address_from_prehash(&digest)
			.map_err(|e| SignatureError::Recovery(e.to_string()))
	}
}

fn parse_signature(bytes: &[u8]) -> Result<Signature, SignatureError> {
	Signature::from_raw(bytes).map_err(|e| SignatureError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy::primitives::Bytes;
	use alloy::signers::local::PrivateKeySigner;
	use alloy::signers::SignerSync;
	use intent_codec::to_universal;
	use intent_types::evm::{Call, Reward, Route, TokenAmount};

	const NAME: &str = "Portal";
	const VERSION: &str = "2";

	fn sample_intent() -> EvmIntent {
		EvmIntent {
			destination: 10,
			route: Route {
				salt: B256::from([3u8; 32]),
				deadline: 1_900_000_000,
				portal: Address::from([0x11u8; 20]),
				tokens: vec![TokenAmount {
					token: Address::from([0x22u8; 20]),
					amount: U256::from(42),
				}],
				calls: vec![Call {
					target: Address::from([0x22u8; 20]),
					data: Bytes::from(vec![0xde, 0xad, 0xbe, 0xef]),
					value: U256::ZERO,
				}],
			},
			reward: Reward {
				deadline: 1_900_000_000,
				creator: Address::from([0x33u8; 20]),
				prover: Address::from([0x44u8; 20]),
				nativeAmount: U256::from(1),
				tokens: vec![],
			},
		}
	}

	fn verifier() -> DualSignatureVerifier {
		DualSignatureVerifier::new(SigningDomain::new(1, Address::from([0x55u8; 20])))
	}

	fn sign(
		signer: &PrivateKeySigner,
		form: &OrderData,
		verifier: &DualSignatureVerifier,
	) -> Vec<u8> {
		let digest = form.signing_hash(&verifier.domain().eip712_domain(NAME, VERSION));
		signer.sign_hash_sync(&digest).unwrap().as_bytes().to_vec()
	}

	#[test]
	fn test_accepts_native_signature() {
		let signer = PrivateKeySigner::random();
		let verifier = verifier();
		let evm = sample_intent();
		let universal = to_universal(&evm);

		let signature = sign(&signer, &OrderData::Evm(evm.clone()), &verifier);
		assert!(verifier.verify(&evm, &universal, &signature, signer.address(), NAME, VERSION));
	}

	#[test]
	fn test_accepts_universal_signature() {
		let signer = PrivateKeySigner::random();
		let verifier = verifier();
		let evm = sample_intent();
		let universal = to_universal(&evm);

		let signature = sign(&signer, &OrderData::Universal(universal.clone()), &verifier);
		assert!(verifier.verify(&evm, &universal, &signature, signer.address(), NAME, VERSION));
	}

	#[test]
	fn test_rejects_other_signer() {
		let signer = PrivateKeySigner::random();
		let other = PrivateKeySigner::random();
		let verifier = verifier();
		let evm = sample_intent();
		let universal = to_universal(&evm);

		let signature = sign(&other, &OrderData::Evm(evm.clone()), &verifier);
		assert!(!verifier.verify(&evm, &universal, &signature, signer.address(), NAME, VERSION));
	}

	#[test]
	fn test_rejects_malformed_signature() {
		let verifier = verifier();
		let evm = sample_intent();
		let universal = to_universal(&evm);

		assert!(!verifier.verify(&evm, &universal, &[0u8; 64], Address::ZERO, NAME, VERSION));
		assert!(!verifier.verify(&evm, &universal, &[], Address::ZERO, NAME, VERSION));
	}

	#[test]
	fn test_domain_fields_bind_signature() {
		let signer = PrivateKeySigner::random();
		let verifier = verifier();
		let evm = sample_intent();
		let universal = to_universal(&evm);
		let signature = sign(&signer, &OrderData::Evm(evm.clone()), &verifier);

		assert!(!verifier.verify(&evm, &universal, &signature, signer.address(), "Other", VERSION));
		assert!(!verifier.verify(&evm, &universal, &signature, signer.address(), NAME, "3"));

		let polygon = SigningDomain::new(137, verifier.domain().verifying_contract);
		let elsewhere = DualSignatureVerifier::new(polygon);
		assert!(!elsewhere.verify(&evm, &universal, &signature, signer.address(), NAME, VERSION));
	}

	#[test]
	fn test_tampered_intent_is_rejected() {
		let signer = PrivateKeySigner::random();
		let verifier = verifier();
		let evm = sample_intent();
		let signature = sign(&signer, &OrderData::Evm(evm.clone()), &verifier);

		let mut tampered = evm.clone();
		tampered.reward.nativeAmount = U256::from(1_000);
		let universal = to_universal(&tampered);
		let signer = signer.address();
		assert!(!verifier.verify(&tampered, &universal, &signature, signer, NAME, VERSION));
	}

	#[test]
	fn test_forms_have_distinct_digests_but_one_intent_hash() {
		let evm = sample_intent();
		let domain = verifier().domain().eip712_domain(NAME, VERSION);
		let native = OrderData::from(evm.clone());
		let universal = OrderData::from(to_universal(&evm));

		assert_ne!(native.signing_hash(&domain), universal.signing_hash(&domain));
		assert_eq!(native.intent_hash(), universal.intent_hash());
	}

	#[test]
	fn test_recover_signer() {
		let signer = PrivateKeySigner::random();
		let verifier = verifier();
		let form = OrderData::Evm(sample_intent());
		let signature = sign(&signer, &form, &verifier);

		assert_eq!(
			verifier.recover_signer(&form, &signature, NAME, VERSION).unwrap(),
			signer.address()
		);
		assert!(matches!(
			verifier.recover_signer(&form, &[1u8; 10], NAME, VERSION),
			Err(SignatureError::Malformed(_))
		));
	}

	#[test]
	fn test_verify_any_without_forms() {
		let signer = PrivateKeySigner::random();
		let verifier = verifier();
		let signature = sign(&signer, &OrderData::Evm(sample_intent()), &verifier);

		assert!(!verifier.verify_any(&[], &signature, signer.address(), NAME, VERSION));
	}
}
