//! Signer roles for the role-based validator module.

use crate::account::Address;
use serde::{Deserialize, Serialize};

/// Role assigned to a signer key registered with the validator.
///
/// The integer tags are consumed by the on-chain validator contract and must
/// not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum SignerRole {
	/// No role assigned.
	Na = 0,
	/// Co-signing service key.
	CoSigner = 1,
	/// Restricted-privilege key for delegated actions.
	SessionKey = 2,
	/// Full-privilege user key.
	UserAdmin = 3,
}

impl SignerRole {
	/// The integer tag consumed by the on-chain validator.
	pub fn as_u8(self) -> u8 {
		self as u8
	}
}

impl TryFrom<u8> for SignerRole {
	type Error = u8;

	fn try_from(value: u8) -> Result<Self, Self::Error> {
		match value {
			0 => Ok(SignerRole::Na),
			1 => Ok(SignerRole::CoSigner),
			2 => Ok(SignerRole::SessionKey),
			3 => Ok(SignerRole::UserAdmin),
			other => Err(other),
		}
	}
}

/// A signer address paired with exactly one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerEntry {
	pub address: Address,
	pub role: SignerRole,
}

impl SignerEntry {
	pub fn new(address: Address, role: SignerRole) -> Self {
		Self { address, role }
	}
}
