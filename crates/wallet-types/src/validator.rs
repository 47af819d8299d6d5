//! The validator module interface.
//!
//! A validator module is an on-chain plugin that authorizes smart-account
//! operations based on signer role and signature. Off-chain, a module is
//! represented by an implementation of [`ValidatorModule`]: it knows its
//! contract address, produces the install payload and gas-estimation
//! placeholders, and can probe whether it is enabled for an account.

use crate::account::{Address, Signature, Transaction};
use alloy_primitives::U256;
use async_trait::async_trait;
use thiserror::Error;

pub use alloy_dyn_abi::TypedData;

/// Errors produced by validator module implementations.
#[derive(Debug, Error)]
pub enum ValidatorError {
	#[error("{0} is not implemented")]
	NotImplemented(&'static str),
	#[error("Encoding failed: {0}")]
	Encoding(String),
	#[error("Provider error: {0}")]
	Provider(String),
	#[error("Invalid address: {0}")]
	InvalidAddress(String),
}

/// Off-chain representation of an on-chain validator module.
#[async_trait]
pub trait ValidatorModule: Send + Sync {
	/// Address of the validator contract.
	fn address(&self) -> Address;

	/// Human-readable module identifier.
	fn source(&self) -> &'static str;

	/// Semver range of kernel versions this module supports.
	fn supported_kernel_versions(&self) -> &'static str;

	/// ABI-encoded payload installed on the account when the module is enabled.
	async fn enable_data(&self) -> Result<Vec<u8>, ValidatorError>;

	/// Nonce key used when building operations through this module.
	async fn nonce_key(&self, custom: Option<U256>) -> Result<U256, ValidatorError>;

	/// Fixed-length placeholder signature used for gas estimation.
	async fn dummy_signature(&self) -> Result<Vec<u8>, ValidatorError>;

	/// Whether this module is the registered validator for `selector` on the
	/// given account. Read failures are treated as "not enabled".
	async fn is_enabled(&self, account: &Address, selector: [u8; 4]) -> bool;

	async fn sign_message(&self, message: &[u8]) -> Result<Signature, ValidatorError>;

	async fn sign_transaction(&self, tx: &Transaction) -> Result<Signature, ValidatorError>;

	async fn sign_typed_data(&self, typed_data: &TypedData) -> Result<Signature, ValidatorError>;

	async fn sign_user_operation(&self, user_op_hash: &[u8])
		-> Result<Signature, ValidatorError>;
}
