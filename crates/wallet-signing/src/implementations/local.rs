//! Local private-key typed-data signer.
//!
//! Manages a private key in process and signs EIP-712 payloads with it.
//! Suitable for development and testing environments where key management
//! simplicity is preferred.

use crate::{SigningError, TypedDataSigner};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use wallet_types::{Address, Signature, TypedData};

pub struct LocalSigner {
	/// The underlying alloy signer that handles cryptographic operations.
	signer: PrivateKeySigner,
}

impl LocalSigner {
	/// Creates a new LocalSigner from a hex-encoded private key (with or
	/// without 0x prefix).
	pub fn new(private_key_hex: &str) -> Result<Self, SigningError> {
		let signer = private_key_hex
			.parse::<PrivateKeySigner>()
			.map_err(|e| SigningError::InvalidKey(format!("Invalid private key: {}", e)))?;

		Ok(Self { signer })
	}

	/// Address of the signing key.
	pub fn address(&self) -> Address {
		Address::from(self.signer.address())
	}
}

#[async_trait]
impl TypedDataSigner for LocalSigner {
	async fn sign_typed_data(&self, typed_data: &TypedData) -> Result<String, SigningError> {
		let signature = self
			.signer
			.sign_dynamic_typed_data(typed_data)
			.await
			.map_err(|e| SigningError::SigningFailed(format!("Failed to sign typed data: {}", e)))?;

		Ok(format!("0x{}", hex::encode(&Signature::from(signature).0)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	// Well-known anvil development key
	const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	fn mail_typed_data() -> TypedData {
		serde_json::from_value(serde_json::json!({
			"domain": {
				"name": "Ether Mail",
				"version": "1",
				"chainId": 1,
				"verifyingContract": "0xCcCCccccCCCCcCCCCCCcCcCccCcCCCcCcccccccC"
			},
			"types": {
				"EIP712Domain": [
					{ "name": "name", "type": "string" },
					{ "name": "version", "type": "string" },
					{ "name": "chainId", "type": "uint256" },
					{ "name": "verifyingContract", "type": "address" }
				],
				"Mail": [
					{ "name": "from", "type": "address" },
					{ "name": "to", "type": "address" },
					{ "name": "contents", "type": "string" }
				]
			},
			"primaryType": "Mail",
			"message": {
				"from": "0xCD2a3d9F938E13CD947Ec05AbC7FE734Df8DD826",
				"to": "0xbBbBBBBbbBBBbbbBbbBbbbbBBbBbbbbBbBbbBBbB",
				"contents": "Hello, Bob!"
			}
		}))
		.unwrap()
	}

	#[test]
	fn test_rejects_invalid_key() {
		assert!(matches!(
			LocalSigner::new("0x1234"),
			Err(SigningError::InvalidKey(_))
		));
	}

	#[tokio::test]
	async fn test_signs_typed_data() {
		let signer = LocalSigner::new(DEV_KEY).unwrap();
		let signature = signer.sign_typed_data(&mail_typed_data()).await.unwrap();

		// 65-byte r||s||v signature as 0x-prefixed hex, v in {27, 28}
		assert!(signature.starts_with("0x"));
		assert_eq!(signature.len(), 2 + 65 * 2);
		assert!(signature.ends_with("1b") || signature.ends_with("1c"));

		// Same payload, same signature
		let again = signer.sign_typed_data(&mail_typed_data()).await.unwrap();
		assert_eq!(signature, again);
	}
}
