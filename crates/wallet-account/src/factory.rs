//! Kernel factory delegation.
//!
//! Account deployment and address derivation are owned by the on-chain kernel
//! factory. This module only encodes the initializer payload and asks the
//! factory for the deterministic address via `eth_call`.

use crate::AccountError;
use alloy_primitives::{Address as AlloyAddress, Bytes, FixedBytes, TxKind};
use alloy_provider::Provider;
use alloy_rpc_types::{TransactionInput, TransactionRequest};
use alloy_sol_types::{sol, SolCall};
use alloy_transport_http::Http;
use std::sync::Arc;

sol! {
	/// Kernel v3 account initializer, the payload handed to the factory.
	function initialize(
		bytes21 _rootValidator,
		address hook,
		bytes calldata validatorData,
		bytes calldata hookData
	) external;

	/// Deterministic-deployment entry points on the kernel factory.
	function createAccount(bytes calldata data, bytes32 salt) external payable returns (address);
	function getAddress(bytes calldata data, bytes32 salt) external view returns (address);
}

/// Kernel validation-id type byte for validator modules.
const VALIDATION_TYPE_VALIDATOR: u8 = 0x01;

/// Builds the 21-byte kernel validation id for a validator module.
pub fn validation_id(validator: AlloyAddress) -> FixedBytes<21> {
	let mut id = [0u8; 21];
	id[0] = VALIDATION_TYPE_VALIDATOR;
	id[1..].copy_from_slice(validator.as_slice());
	FixedBytes::from(id)
}

/// Encodes the kernel `initialize` payload installing the validator as the
/// root validation module, with no hook.
pub fn account_init_data(validator: AlloyAddress, enable_data: &[u8]) -> Vec<u8> {
	initializeCall {
		_rootValidator: validation_id(validator),
		hook: AlloyAddress::ZERO,
		validatorData: Bytes::copy_from_slice(enable_data),
		hookData: Bytes::new(),
	}
	.abi_encode()
}

/// Asks the factory for the deterministic account address for the given
/// initializer payload and salt.
pub async fn counterfactual_address(
	provider: &Arc<dyn Provider<Http<reqwest::Client>> + Send + Sync>,
	factory: AlloyAddress,
	init_data: Vec<u8>,
	salt: FixedBytes<32>,
) -> Result<AlloyAddress, AccountError> {
	let call = getAddressCall {
		data: init_data.into(),
		salt,
	};
	let request = TransactionRequest {
		to: Some(TxKind::Call(factory)),
		input: TransactionInput::new(call.abi_encode().into()),
		..Default::default()
	};

	let raw = provider
		.call(&request)
		.await
		.map_err(|e| AccountError::Factory(format!("getAddress call failed: {}", e)))?;

	let decoded = getAddressCall::abi_decode_returns(&raw, true)
		.map_err(|e| AccountError::Factory(format!("getAddress decode failed: {}", e)))?;

	Ok(decoded._0)
}
