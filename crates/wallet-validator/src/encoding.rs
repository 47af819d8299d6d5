//! ABI encoding of the validator install payload.

use alloy_primitives::Address as AlloyAddress;
use alloy_sol_types::{sol_data, SolType};
use wallet_types::{SignerEntry, ValidatorError};

/// Solidity shape of the install payload: `(address[], uint8[])`.
type EnableData = (
	sol_data::Array<sol_data::Address>,
	sol_data::Array<sol_data::Uint<8>>,
);

/// ABI-encodes the install payload consumed by the on-chain validator.
///
/// The payload is two parallel sequences, one address and one role tag per
/// signer, in the order the signers were given.
pub fn encode_enable_data(signers: &[SignerEntry]) -> Result<Vec<u8>, ValidatorError> {
	let mut addresses: Vec<AlloyAddress> = Vec::with_capacity(signers.len());
	let mut roles: Vec<u8> = Vec::with_capacity(signers.len());

	for signer in signers {
		let address = signer
			.address
			.to_alloy()
			.map_err(|e| ValidatorError::InvalidAddress(e.to_string()))?;
		addresses.push(address);
		roles.push(signer.role.as_u8());
	}

	Ok(EnableData::abi_encode_params(&(addresses, roles)))
}
