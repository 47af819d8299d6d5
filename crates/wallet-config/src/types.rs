//! Configuration types for the wallet toolkit.

use serde::{Deserialize, Serialize};

/// Complete wallet configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WalletConfig {
	/// Chain the smart account lives on
	pub chain: ChainSettings,
	/// Smart-account contract addresses
	#[serde(default)]
	pub account: AccountSettings,
	/// Typed-data signing settings
	#[serde(default)]
	pub signing: SigningSettings,
	/// Log level
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

/// Chain descriptor
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChainSettings {
	/// Chain name for logging
	pub name: String,
	/// RPC endpoint URL
	pub rpc_url: String,
	/// Chain ID
	pub chain_id: u64,
}

/// Smart-account contract addresses
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountSettings {
	/// Kernel account factory
	#[serde(default = "default_factory")]
	pub factory: String,
	/// Role-based ECDSA validator module
	#[serde(default = "default_validator")]
	pub validator: String,
	/// Co-signing service key
	#[serde(default = "default_cosigner")]
	pub cosigner: String,
	/// Kernel implementation version
	#[serde(default = "default_kernel_version")]
	pub kernel_version: String,
}

/// Typed-data signing settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SigningSettings {
	/// Wallet-provider endpoint for eth_signTypedData_v4 (optional)
	pub wallet_url: Option<String>,
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_factory() -> String {
	"0xaac5D4240AF87249B3f71BC8E4A2cae074A3E419".to_string()
}

fn default_validator() -> String {
	"0xd3BF1de562ABD2F696f7FA7c2C4fe83ed130276E".to_string()
}

fn default_cosigner() -> String {
	"0x78264308AD049116F52162822801B5EBFd8F5ceA".to_string()
}

fn default_kernel_version() -> String {
	"0.3.1".to_string()
}

impl Default for AccountSettings {
	fn default() -> Self {
		Self {
			factory: default_factory(),
			validator: default_validator(),
			cosigner: default_cosigner(),
			kernel_version: default_kernel_version(),
		}
	}
}
