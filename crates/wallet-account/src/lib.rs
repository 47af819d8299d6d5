//! Smart-account construction.
//!
//! Builds multi-signer kernel accounts with role-based permissions. The heavy
//! lifting (deployment, signature validation, nonce handling) belongs to the
//! on-chain factory and validator contracts; this crate assembles the signer
//! set, produces the initializer payload, and delegates address derivation to
//! the factory.

use alloy_primitives::{address, Address as AlloyAddress, FixedBytes};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_transport_http::Http;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use wallet_types::{Address, SignerEntry, SignerRole, ValidatorError, ValidatorModule};
use wallet_validator::{RoleBasedEcdsaValidator, RpcExecutionReader, VALIDATOR_ADDRESS};

pub mod factory;

pub use factory::{account_init_data, counterfactual_address, validation_id};

/// ERC-4337 entry point v0.7.
pub const ENTRYPOINT_ADDRESS_V07: AlloyAddress =
	address!("0000000071727De22E5E9d8BAf0edAc6f37da032");

/// Kernel implementation version targeted by this toolkit.
pub const KERNEL_VERSION: &str = "0.3.1";

/// Kernel v3.1 account factory.
pub const KERNEL_FACTORY_ADDRESS: AlloyAddress =
	address!("aac5D4240AF87249B3f71BC8E4A2cae074A3E419");

/// Co-signer address for the development environment.
pub const COSIGNER_ADDRESS: AlloyAddress = address!("78264308AD049116F52162822801B5EBFd8F5ceA");

/// Default account salt (account index 0).
pub const DEFAULT_ACCOUNT_SALT: FixedBytes<32> = FixedBytes::ZERO;

#[derive(Debug, Error)]
pub enum AccountError {
	#[error("Validator error: {0}")]
	Validator(#[from] ValidatorError),
	#[error("Factory error: {0}")]
	Factory(String),
	#[error("Invalid address: {0}")]
	InvalidAddress(String),
	#[error("Provider error: {0}")]
	Provider(String),
}

/// A constructed (possibly not yet deployed) smart account.
pub struct SmartAccount {
	/// Deterministic account address reported by the factory.
	pub address: Address,
	/// The role validator installed as the account's root validation module.
	pub validator: Arc<RoleBasedEcdsaValidator>,
}

/// Service for constructing role-based multi-signer smart accounts.
pub struct SmartAccountService {
	provider: Arc<dyn Provider<Http<reqwest::Client>> + Send + Sync>,
	factory: AlloyAddress,
	validator_address: AlloyAddress,
	cosigner: AlloyAddress,
}

impl SmartAccountService {
	pub fn new(
		provider: Arc<dyn Provider<Http<reqwest::Client>> + Send + Sync>,
		factory: AlloyAddress,
		validator_address: AlloyAddress,
		cosigner: AlloyAddress,
	) -> Self {
		Self {
			provider,
			factory,
			validator_address,
			cosigner,
		}
	}

	/// Creates a service against the deployed contracts for the chain behind
	/// `rpc_url`.
	pub fn from_rpc(rpc_url: &str) -> Result<Self, AccountError> {
		Self::from_addresses(
			rpc_url,
			&Address::from(KERNEL_FACTORY_ADDRESS),
			&Address::from(VALIDATOR_ADDRESS),
			&Address::from(COSIGNER_ADDRESS),
		)
	}

	/// Creates a service for a specific set of contract addresses, typically
	/// taken from configuration.
	pub fn from_addresses(
		rpc_url: &str,
		factory: &Address,
		validator: &Address,
		cosigner: &Address,
	) -> Result<Self, AccountError> {
		let url = rpc_url
			.parse()
			.map_err(|e| AccountError::Provider(format!("Invalid RPC URL: {}", e)))?;
		let provider = ProviderBuilder::new().on_http(url);
		Ok(Self::new(
			Arc::new(provider),
			to_contract_address(factory)?,
			to_contract_address(validator)?,
			to_contract_address(cosigner)?,
		))
	}

	/// The account factory this service derives addresses through.
	pub fn factory(&self) -> AlloyAddress {
		self.factory
	}

	/// The validator module installed on constructed accounts.
	pub fn validator_address(&self) -> AlloyAddress {
		self.validator_address
	}

	/// The co-signer registered on constructed accounts.
	pub fn cosigner(&self) -> AlloyAddress {
		self.cosigner
	}

	/// Initializes a smart account controlled by an admin key, a session key,
	/// and the service co-signer, returning its deterministic address.
	pub async fn initialize_account(
		&self,
		admin_key: &Address,
		session_key: &Address,
	) -> Result<Address, AccountError> {
		let signers = default_signer_set(
			session_key.clone(),
			admin_key.clone(),
			Address::from(self.cosigner),
		);

		let account = self.create_smart_account(signers).await?;
		info!(address = %account.address, "Initialized smart account");
		Ok(account.address)
	}

	/// Constructs a smart account for an arbitrary signer set.
	pub async fn create_smart_account(
		&self,
		signers: Vec<SignerEntry>,
	) -> Result<SmartAccount, AccountError> {
		let reader = RpcExecutionReader::new(self.provider.clone());
		let validator =
			RoleBasedEcdsaValidator::new(self.validator_address, signers, Arc::new(reader));

		let enable_data = validator.enable_data().await?;
		let init_data = account_init_data(self.validator_address, &enable_data);
		let address = counterfactual_address(
			&self.provider,
			self.factory,
			init_data,
			DEFAULT_ACCOUNT_SALT,
		)
		.await?;

		Ok(SmartAccount {
			address: Address::from(address),
			validator: Arc::new(validator),
		})
	}
}

fn to_contract_address(address: &Address) -> Result<AlloyAddress, AccountError> {
	address
		.to_alloy()
		.map_err(|e| AccountError::InvalidAddress(e.to_string()))
}

/// The fixed signer set installed on a freshly initialized account.
pub fn default_signer_set(
	session_key: Address,
	admin_key: Address,
	cosigner: Address,
) -> Vec<SignerEntry> {
	vec![
		SignerEntry::new(session_key, SignerRole::SessionKey),
		SignerEntry::new(admin_key, SignerRole::UserAdmin),
		SignerEntry::new(cosigner, SignerRole::CoSigner),
	]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_signer_set_order_and_roles() {
		let session = Address(vec![0x11; 20]);
		let admin = Address(vec![0x22; 20]);
		let cosigner = Address::from(COSIGNER_ADDRESS);

		let signers = default_signer_set(session.clone(), admin.clone(), cosigner.clone());

		assert_eq!(signers.len(), 3);
		assert_eq!(signers[0], SignerEntry::new(session, SignerRole::SessionKey));
		assert_eq!(signers[1], SignerEntry::new(admin, SignerRole::UserAdmin));
		assert_eq!(signers[2], SignerEntry::new(cosigner, SignerRole::CoSigner));
	}

	#[test]
	fn test_from_addresses_respects_configuration() {
		let factory = Address(vec![0x01; 20]);
		let validator = Address(vec![0x02; 20]);
		let cosigner = Address(vec![0x03; 20]);

		let service = SmartAccountService::from_addresses(
			"http://localhost:8545",
			&factory,
			&validator,
			&cosigner,
		)
		.unwrap();

		assert_eq!(Address::from(service.factory()), factory);
		assert_eq!(Address::from(service.validator_address()), validator);
		assert_eq!(Address::from(service.cosigner()), cosigner);
	}

	#[test]
	fn test_from_addresses_rejects_malformed_address() {
		let short = Address(vec![0x01; 19]);
		let ok = Address(vec![0x02; 20]);

		assert!(matches!(
			SmartAccountService::from_addresses("http://localhost:8545", &short, &ok, &ok),
			Err(AccountError::InvalidAddress(_))
		));
	}

	#[test]
	fn test_from_rpc_uses_deployed_defaults() {
		let service = SmartAccountService::from_rpc("http://localhost:8545").unwrap();
		assert_eq!(service.factory(), KERNEL_FACTORY_ADDRESS);
		assert_eq!(service.validator_address(), VALIDATOR_ADDRESS);
		assert_eq!(service.cosigner(), COSIGNER_ADDRESS);
	}

	#[test]
	fn test_constants() {
		assert_eq!(KERNEL_VERSION, "0.3.1");
		assert_eq!(
			ENTRYPOINT_ADDRESS_V07.to_string().to_lowercase(),
			"0x0000000071727de22e5e9d8baf0edac6f37da032"
		);
		assert_eq!(
			COSIGNER_ADDRESS.to_string().to_lowercase(),
			"0x78264308ad049116f52162822801b5ebfd8f5cea"
		);
		assert_eq!(DEFAULT_ACCOUNT_SALT, FixedBytes::<32>::ZERO);
	}
}
