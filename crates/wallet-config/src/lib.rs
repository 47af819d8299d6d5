//! Configuration loading for the wallet toolkit.
//!
//! TOML files with `${VAR}` environment substitution and a small set of
//! `WALLET_`-prefixed environment overrides.

use std::env;
use std::path::Path;
use thiserror::Error;
use wallet_types::Address;

pub mod types;

pub use types::{AccountSettings, ChainSettings, SigningSettings, WalletConfig};

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("File not found: {0}")]
	FileNotFound(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Environment variable not found: {0}")]
	EnvVarNotFound(String),

	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
}

/// Configuration loader with environment variable substitution
#[derive(Default)]
pub struct ConfigLoader {
	file_path: Option<String>,
	env_prefix: String,
}

impl ConfigLoader {
	pub fn new() -> Self {
		Self {
			file_path: None,
			env_prefix: "WALLET_".to_string(),
		}
	}

	pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
		self.file_path = Some(path.as_ref().to_string_lossy().to_string());
		self
	}

	pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.env_prefix = prefix.into();
		self
	}

	pub async fn load(&self) -> Result<WalletConfig, ConfigError> {
		let mut config = if let Some(file_path) = &self.file_path {
			self.load_from_file(file_path).await?
		} else {
			return Err(ConfigError::FileNotFound(
				"No configuration file specified".to_string(),
			));
		};

		self.apply_env_overrides(&mut config)?;
		self.validate_config(&config)?;

		Ok(config)
	}

	async fn load_from_file(&self, file_path: &str) -> Result<WalletConfig, ConfigError> {
		let content = tokio::fs::read_to_string(file_path).await?;

		let substituted_content = self.substitute_env_vars(&content)?;

		let config: WalletConfig = toml::from_str(&substituted_content)
			.map_err(|e| ConfigError::ParseError(e.to_string()))?;

		Ok(config)
	}

	fn substitute_env_vars(&self, content: &str) -> Result<String, ConfigError> {
		let mut result = content.to_string();

		// Find and replace ${VAR_NAME} patterns
		let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();

		for cap in re.captures_iter(content) {
			let full_match = &cap[0];
			let var_name = &cap[1];

			let env_value = env::var(var_name)
				.map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()))?;

			result = result.replace(full_match, &env_value);
		}

		Ok(result)
	}

	fn apply_env_overrides(&self, config: &mut WalletConfig) -> Result<(), ConfigError> {
		if let Ok(log_level) = env::var(format!("{}LOG_LEVEL", self.env_prefix)) {
			config.log_level = log_level;
		}

		if let Ok(rpc_url) = env::var(format!("{}RPC_URL", self.env_prefix)) {
			config.chain.rpc_url = rpc_url;
		}

		Ok(())
	}

	fn validate_config(&self, config: &WalletConfig) -> Result<(), ConfigError> {
		if !config.chain.rpc_url.starts_with("http://")
			&& !config.chain.rpc_url.starts_with("https://")
		{
			return Err(ConfigError::ValidationError(
				"RPC URL must start with http:// or https://".to_string(),
			));
		}

		if config.chain.chain_id == 0 {
			return Err(ConfigError::ValidationError(
				"Chain ID must be non-zero".to_string(),
			));
		}

		for (field, value) in [
			("account.factory", &config.account.factory),
			("account.validator", &config.account.validator),
			("account.cosigner", &config.account.cosigner),
		] {
			Address::from_hex(value).map_err(|e| {
				ConfigError::ValidationError(format!("Invalid address for {}: {}", field, e))
			})?;
		}

		if let Some(wallet_url) = &config.signing.wallet_url {
			if !wallet_url.starts_with("http://") && !wallet_url.starts_with("https://") {
				return Err(ConfigError::ValidationError(
					"Wallet URL must start with http:// or https://".to_string(),
				));
			}
		}

		Ok(())
	}
}
