//! Account-related types for the wallet toolkit.
//!
//! This module defines types for blockchain addresses, signatures, and transactions
//! that are shared by the validator, account, and signing crates.

use alloy_primitives::{Address as AlloyAddress, PrimitiveSignature, U256};
use std::fmt;
use thiserror::Error;

/// Errors produced when converting between byte representations.
#[derive(Debug, Error)]
pub enum TypeError {
	#[error("Invalid address length: expected 20 bytes, got {0}")]
	InvalidLength(usize),
	#[error("Invalid hex string: {0}")]
	InvalidHex(String),
}

/// Blockchain address representation.
///
/// Stores addresses as raw bytes to keep the public surface independent of
/// any particular Ethereum library.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Address(pub Vec<u8>);

impl Address {
	/// Parses an address from a hex string (with or without 0x prefix).
	pub fn from_hex(value: &str) -> Result<Self, TypeError> {
		let stripped = value.strip_prefix("0x").unwrap_or(value);
		let bytes = hex::decode(stripped).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
		if bytes.len() != 20 {
			return Err(TypeError::InvalidLength(bytes.len()));
		}
		Ok(Address(bytes))
	}

	/// Converts to an alloy address, rejecting byte strings that are not
	/// exactly 20 bytes.
	pub fn to_alloy(&self) -> Result<AlloyAddress, TypeError> {
		if self.0.len() != 20 {
			return Err(TypeError::InvalidLength(self.0.len()));
		}
		Ok(AlloyAddress::from_slice(&self.0))
	}
}

impl From<AlloyAddress> for Address {
	fn from(address: AlloyAddress) -> Self {
		Address(address.as_slice().to_vec())
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", hex::encode(&self.0))
	}
}

/// Cryptographic signature representation.
///
/// Stores signatures as raw bytes in the standard Ethereum format (r, s, v).
#[derive(Debug, Clone)]
pub struct Signature(pub Vec<u8>);

impl From<PrimitiveSignature> for Signature {
	fn from(sig: PrimitiveSignature) -> Self {
		let mut bytes = Vec::with_capacity(65);
		bytes.extend_from_slice(&sig.r().to_be_bytes::<32>());
		bytes.extend_from_slice(&sig.s().to_be_bytes::<32>());
		// Non-EIP-155 encoding: v = 27 + y_parity
		let v = if sig.v() { 28 } else { 27 };
		bytes.push(v);
		Signature(bytes)
	}
}

/// Blockchain transaction representation.
///
/// A minimal EVM transaction shape, used as the parameter of signing
/// interfaces. Construction and submission belong to external tooling.
#[derive(Debug, Clone)]
pub struct Transaction {
	/// Recipient address (None for contract creation).
	pub to: Option<Address>,
	/// Transaction data/calldata.
	pub data: Vec<u8>,
	/// Value to transfer in native currency.
	pub value: U256,
	/// Chain ID for replay protection.
	pub chain_id: u64,
	/// Transaction nonce (optional, can be filled by provider).
	pub nonce: Option<u64>,
	/// Gas limit for transaction execution.
	pub gas_limit: Option<u64>,
	/// Legacy gas price (for non-EIP-1559 transactions).
	pub gas_price: Option<u128>,
}
