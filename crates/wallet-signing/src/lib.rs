//! Typed-data signing for the wallet toolkit.
//!
//! This crate provides the [`TypedDataSigner`] interface and three backends:
//! a wallet-provider signer that forwards EIP-712 requests over JSON-RPC, a
//! local private-key signer, and a callback adapter for SDKs that report
//! results through success/error callbacks. The callback-to-future bridge
//! lives in [`bridge`].

use async_trait::async_trait;
use thiserror::Error;
use wallet_types::TypedData;

pub mod bridge;
pub mod implementations;

pub use bridge::{BridgeError, CallbackBridge, ErrorHandle, SuccessHandle};
pub use implementations::callback::CallbackSigner;
pub use implementations::local::LocalSigner;
pub use implementations::provider::WalletProviderSigner;

#[derive(Debug, Error)]
pub enum SigningError {
	#[error("Signing failed: {0}")]
	SigningFailed(String),
	#[error("Invalid key: {0}")]
	InvalidKey(String),
	#[error("Provider error: {0}")]
	Provider(String),
	#[error("Signing request rejected: {0}")]
	Rejected(String),
	#[error("Signing callbacks dropped before completion")]
	Disconnected,
}

impl From<BridgeError<SigningError>> for SigningError {
	fn from(error: BridgeError<SigningError>) -> Self {
		match error {
			BridgeError::Rejected(inner) => inner,
			BridgeError::Disconnected => SigningError::Disconnected,
		}
	}
}

/// Signs EIP-712 typed data, returning a 0x-prefixed hex signature.
#[async_trait]
pub trait TypedDataSigner: Send + Sync {
	async fn sign_typed_data(&self, typed_data: &TypedData) -> Result<String, SigningError>;
}

/// Facade over a configured typed-data signing backend.
pub struct SigningService {
	signer: Box<dyn TypedDataSigner>,
}

impl SigningService {
	pub fn new(signer: Box<dyn TypedDataSigner>) -> Self {
		Self { signer }
	}

	pub async fn sign(&self, typed_data: &TypedData) -> Result<String, SigningError> {
		self.signer.sign_typed_data(typed_data).await
	}
}
