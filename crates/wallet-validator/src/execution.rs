//! On-chain execution-detail reads.
//!
//! The kernel account exposes `getExecution(bytes4)` which reports, per
//! function selector, which validator module is registered. The
//! [`ExecutionReader`] trait is the seam between the validator logic and the
//! transport so the fail-safe behavior can be tested without a network.

use alloy_primitives::{Address as AlloyAddress, FixedBytes, TxKind};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_rpc_types::{TransactionInput, TransactionRequest};
use alloy_sol_types::{sol, SolCall};
use alloy_transport_http::Http;
use async_trait::async_trait;
use std::sync::Arc;
use wallet_types::ValidatorError;

sol! {
	/// Execution record the kernel stores per function selector.
	struct ExecutionDetail {
		uint48 validUntil;
		uint48 validAfter;
		address executor;
		address validator;
	}

	function getExecution(bytes4 selector) external view returns (ExecutionDetail detail);
}

/// Reads execution details from a kernel account.
#[async_trait]
pub trait ExecutionReader: Send + Sync {
	async fn execution_detail(
		&self,
		account: AlloyAddress,
		selector: FixedBytes<4>,
	) -> Result<ExecutionDetail, ValidatorError>;
}

/// JSON-RPC backed execution reader.
pub struct RpcExecutionReader {
	provider: Arc<dyn Provider<Http<reqwest::Client>> + Send + Sync>,
}

impl RpcExecutionReader {
	pub fn new(provider: Arc<dyn Provider<Http<reqwest::Client>> + Send + Sync>) -> Self {
		Self { provider }
	}

	/// Creates a reader with a plain HTTP provider for the given endpoint.
	pub fn from_url(rpc_url: &str) -> Result<Self, ValidatorError> {
		let url = rpc_url
			.parse()
			.map_err(|e| ValidatorError::Provider(format!("Invalid RPC URL: {}", e)))?;
		let provider = ProviderBuilder::new().on_http(url);
		Ok(Self {
			provider: Arc::new(provider),
		})
	}
}

#[async_trait]
impl ExecutionReader for RpcExecutionReader {
	async fn execution_detail(
		&self,
		account: AlloyAddress,
		selector: FixedBytes<4>,
	) -> Result<ExecutionDetail, ValidatorError> {
		let call = getExecutionCall { selector };
		let request = TransactionRequest {
			to: Some(TxKind::Call(account)),
			input: TransactionInput::new(call.abi_encode().into()),
			..Default::default()
		};

		let raw = self
			.provider
			.call(&request)
			.await
			.map_err(|e| ValidatorError::Provider(format!("getExecution call failed: {}", e)))?;

		let decoded = getExecutionCall::abi_decode_returns(&raw, true)
			.map_err(|e| ValidatorError::Encoding(format!("getExecution decode failed: {}", e)))?;

		Ok(decoded.detail)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_get_execution_selector_encoding() {
		let call = getExecutionCall {
			selector: FixedBytes::from([0xde, 0xad, 0xbe, 0xef]),
		};
		let encoded = call.abi_encode();

		// 4-byte function selector + one right-padded bytes4 argument word
		assert_eq!(encoded.len(), 4 + 32);
		assert_eq!(&encoded[4..8], &[0xde, 0xad, 0xbe, 0xef]);
		assert!(encoded[8..36].iter().all(|b| *b == 0));
	}
}
