//! Role-based ECDSA validator module.
//!
//! This crate provides the off-chain representation of the role-based ECDSA
//! validator contract: it encodes the install payload that registers signer
//! addresses with their roles, supplies the placeholder signature used for
//! gas estimation, and probes whether the module is the registered validator
//! for a given account and function selector.
//!
//! The module does not sign anything itself. Signature production and
//! validation live in the on-chain contract and the wallet-signing crate;
//! all signing entry points here fail fast with an explicit error.

use alloy_primitives::{address, Address as AlloyAddress, FixedBytes, U256};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use wallet_types::{
	Address, Signature, SignerEntry, Transaction, TypedData, ValidatorError, ValidatorModule,
};

pub mod encoding;
pub mod execution;

pub use encoding::encode_enable_data;
pub use execution::{ExecutionDetail, ExecutionReader, RpcExecutionReader};

/// Deployed address of the role-based ECDSA validator contract.
pub const VALIDATOR_ADDRESS: AlloyAddress =
	address!("d3BF1de562ABD2F696f7FA7c2C4fe83ed130276E");

/// Kernel versions the validator contract supports.
pub const SUPPORTED_KERNEL_VERSIONS: &str = ">=0.3.0";

/// Placeholder signature returned for gas estimation.
///
/// The blob mirrors the shape of a real two-signer validation payload so gas
/// estimates match actual operations. It never verifies.
const DUMMY_ECDSA_SIGNATURE: &str = concat!(
	"0000000000000000000000000000000000000000000000000000000000000000",
	"0000000000000000000000000000000000000000000000000000000000000060",
	"0000000000000000000000000000000000000000000000000000000000000080",
	"0000000000000000000000000000000000000000000000000000000000000000",
	"0000000000000000000000000000000000000000000000000000000000000002",
	"0000000000000000000000000000000000000000000000000000000000000040",
	"0000000000000000000000000000000000000000000000000000000000000120",
	"0000000000000000000000000000000000000000000000000000000000000000",
	"0000000000000000000000000000000000000000000000000000000000000000",
	"0000000000000000000000000000000000000000000000000000000000000060",
	"0000000000000000000000000000000000000000000000000000000000000041",
	"50da61f147d4cc01e6ab632e0415d71c75d6d1f70064dbf871ae07ca6d92bbf1",
	"1335330b77e3e0909575fb83cc1eead1c88cef14aa8e72243d3a87365a203580",
	"1c00000000000000000000000000000000000000000000000000000000000000",
	"0000000000000000000000000000000000000000000000000000000000000000",
	"0000000000000000000000000000000000000000000000000000000000000000",
	"0000000000000000000000000000000000000000000000000000000000000060",
	"0000000000000000000000000000000000000000000000000000000000000041",
	"f4ad59871cfaa16cfc70a4550b30ea24d987a0dd75a2780ce994a9e8989140ac",
	"166933874d60e86b1e65ca0850c1261bd1ad4403cc00d2ff63bc54df098d971c",
	"1c00000000000000000000000000000000000000000000000000000000000000",
);

/// Role-based ECDSA validator module.
///
/// Secondary kernel validator that authorizes operations according to the
/// role each registered signer holds.
pub struct RoleBasedEcdsaValidator {
	address: AlloyAddress,
	signers: Vec<SignerEntry>,
	reader: Arc<dyn ExecutionReader>,
}

impl RoleBasedEcdsaValidator {
	/// Creates a validator for a specific contract address.
	pub fn new(
		address: AlloyAddress,
		signers: Vec<SignerEntry>,
		reader: Arc<dyn ExecutionReader>,
	) -> Self {
		Self {
			address,
			signers,
			reader,
		}
	}

	/// Creates a validator against the deployed contract, reading execution
	/// state over JSON-RPC.
	pub fn with_rpc(rpc_url: &str, signers: Vec<SignerEntry>) -> Result<Self, ValidatorError> {
		let reader = RpcExecutionReader::from_url(rpc_url)?;
		Ok(Self::new(VALIDATOR_ADDRESS, signers, Arc::new(reader)))
	}

	/// The signer set this validator was configured with.
	pub fn signers(&self) -> &[SignerEntry] {
		&self.signers
	}
}

#[async_trait]
impl ValidatorModule for RoleBasedEcdsaValidator {
	fn address(&self) -> Address {
		Address::from(self.address)
	}

	fn source(&self) -> &'static str {
		"RoleBasedECDSAValidator"
	}

	fn supported_kernel_versions(&self) -> &'static str {
		SUPPORTED_KERNEL_VERSIONS
	}

	async fn enable_data(&self) -> Result<Vec<u8>, ValidatorError> {
		encode_enable_data(&self.signers)
	}

	async fn nonce_key(&self, custom: Option<U256>) -> Result<U256, ValidatorError> {
		Ok(custom.unwrap_or(U256::ZERO))
	}

	async fn dummy_signature(&self) -> Result<Vec<u8>, ValidatorError> {
		hex::decode(DUMMY_ECDSA_SIGNATURE)
			.map_err(|e| ValidatorError::Encoding(format!("Invalid dummy signature: {}", e)))
	}

	async fn is_enabled(&self, account: &Address, selector: [u8; 4]) -> bool {
		let account = match account.to_alloy() {
			Ok(account) => account,
			Err(e) => {
				debug!("Invalid account address, treating validator as disabled: {}", e);
				return false;
			}
		};

		match self
			.reader
			.execution_detail(account, FixedBytes::from(selector))
			.await
		{
			Ok(detail) => detail.validator == self.address,
			// Any read failure means "not enabled", never an error.
			Err(e) => {
				debug!("getExecution read failed, treating validator as disabled: {}", e);
				false
			}
		}
	}

	async fn sign_message(&self, _message: &[u8]) -> Result<Signature, ValidatorError> {
		Err(ValidatorError::NotImplemented("sign_message"))
	}

	async fn sign_transaction(&self, _tx: &Transaction) -> Result<Signature, ValidatorError> {
		Err(ValidatorError::NotImplemented("sign_transaction"))
	}

	async fn sign_typed_data(
		&self,
		_typed_data: &TypedData,
	) -> Result<Signature, ValidatorError> {
		Err(ValidatorError::NotImplemented("sign_typed_data"))
	}

	async fn sign_user_operation(
		&self,
		_user_op_hash: &[u8],
	) -> Result<Signature, ValidatorError> {
		Err(ValidatorError::NotImplemented("sign_user_operation"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::aliases::U48;
	use wallet_types::SignerRole;

	struct FailingReader;

	#[async_trait]
	impl ExecutionReader for FailingReader {
		async fn execution_detail(
			&self,
			_account: AlloyAddress,
			_selector: FixedBytes<4>,
		) -> Result<ExecutionDetail, ValidatorError> {
			Err(ValidatorError::Provider("connection refused".to_string()))
		}
	}

	struct StaticReader {
		validator: AlloyAddress,
	}

	#[async_trait]
	impl ExecutionReader for StaticReader {
		async fn execution_detail(
			&self,
			_account: AlloyAddress,
			_selector: FixedBytes<4>,
		) -> Result<ExecutionDetail, ValidatorError> {
			Ok(ExecutionDetail {
				validUntil: U48::ZERO,
				validAfter: U48::ZERO,
				executor: AlloyAddress::ZERO,
				validator: self.validator,
			})
		}
	}

	fn signers() -> Vec<SignerEntry> {
		vec![SignerEntry::new(
			Address(vec![0x11; 20]),
			SignerRole::SessionKey,
		)]
	}

	fn account() -> Address {
		Address(vec![0xab; 20])
	}

	#[test]
	fn test_validator_address_constant() {
		assert_eq!(
			VALIDATOR_ADDRESS.to_string().to_lowercase(),
			"0xd3bf1de562abd2f696f7fa7c2c4fe83ed130276e"
		);
	}

	#[tokio::test]
	async fn test_is_enabled_false_on_read_failure() {
		let validator =
			RoleBasedEcdsaValidator::new(VALIDATOR_ADDRESS, signers(), Arc::new(FailingReader));
		assert!(!validator.is_enabled(&account(), [0u8; 4]).await);
	}

	#[tokio::test]
	async fn test_is_enabled_matches_registered_validator() {
		let matching = StaticReader {
			validator: VALIDATOR_ADDRESS,
		};
		let validator =
			RoleBasedEcdsaValidator::new(VALIDATOR_ADDRESS, signers(), Arc::new(matching));
		assert!(validator.is_enabled(&account(), [0u8; 4]).await);

		let other = StaticReader {
			validator: AlloyAddress::repeat_byte(0x42),
		};
		let validator =
			RoleBasedEcdsaValidator::new(VALIDATOR_ADDRESS, signers(), Arc::new(other));
		assert!(!validator.is_enabled(&account(), [0u8; 4]).await);
	}

	#[tokio::test]
	async fn test_is_enabled_false_on_malformed_account() {
		let matching = StaticReader {
			validator: VALIDATOR_ADDRESS,
		};
		let validator =
			RoleBasedEcdsaValidator::new(VALIDATOR_ADDRESS, signers(), Arc::new(matching));
		assert!(!validator.is_enabled(&Address(vec![0u8; 3]), [0u8; 4]).await);
	}

	#[tokio::test]
	async fn test_signing_methods_fail_fast() {
		let validator =
			RoleBasedEcdsaValidator::new(VALIDATOR_ADDRESS, signers(), Arc::new(FailingReader));

		assert!(matches!(
			validator.sign_message(b"hello").await,
			Err(ValidatorError::NotImplemented("sign_message"))
		));
		let tx = Transaction {
			to: Some(account()),
			data: vec![],
			value: U256::ZERO,
			chain_id: 1,
			nonce: None,
			gas_limit: None,
			gas_price: None,
		};
		assert!(matches!(
			validator.sign_transaction(&tx).await,
			Err(ValidatorError::NotImplemented("sign_transaction"))
		));
		let typed_data: TypedData = serde_json::from_value(serde_json::json!({
			"domain": { "name": "Test", "version": "1", "chainId": 1 },
			"types": {
				"EIP712Domain": [
					{ "name": "name", "type": "string" },
					{ "name": "version", "type": "string" },
					{ "name": "chainId", "type": "uint256" }
				],
				"Ping": [{ "name": "value", "type": "uint256" }]
			},
			"primaryType": "Ping",
			"message": { "value": "1" }
		}))
		.unwrap();
		assert!(matches!(
			validator.sign_typed_data(&typed_data).await,
			Err(ValidatorError::NotImplemented("sign_typed_data"))
		));
		assert!(matches!(
			validator.sign_user_operation(&[0u8; 32]).await,
			Err(ValidatorError::NotImplemented("sign_user_operation"))
		));
	}

	#[tokio::test]
	async fn test_dummy_signature_is_stable() {
		let validator =
			RoleBasedEcdsaValidator::new(VALIDATOR_ADDRESS, signers(), Arc::new(FailingReader));
		let blob = validator.dummy_signature().await.unwrap();
		// 21 ABI words mirroring a two-signer validation payload
		assert_eq!(blob.len(), 672);
		assert_eq!(blob[63], 0x60);
	}

	#[tokio::test]
	async fn test_nonce_key_defaults_to_zero() {
		let validator =
			RoleBasedEcdsaValidator::new(VALIDATOR_ADDRESS, signers(), Arc::new(FailingReader));
		assert_eq!(validator.nonce_key(None).await.unwrap(), U256::ZERO);
		assert_eq!(
			validator.nonce_key(Some(U256::from(7))).await.unwrap(),
			U256::from(7)
		);
	}
}
