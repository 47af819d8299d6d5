use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wallet_account::SmartAccountService;
use wallet_config::{ConfigLoader, WalletConfig};
use wallet_signing::{LocalSigner, SigningService, TypedDataSigner, WalletProviderSigner};
use wallet_types::{Address, TypedData};

#[derive(Parser)]
#[command(name = "kernel-wallet")]
#[command(about = "Kernel smart-account toolkit", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[arg(short, long, value_name = "FILE", default_value = "config/local.toml")]
	config: PathBuf,

	#[arg(long, env = "WALLET_LOG_LEVEL", default_value = "info")]
	log_level: String,
}

#[derive(Subcommand)]
enum Commands {
	/// Resolve the deterministic smart-account address for a key pair
	Address {
		/// Admin key address (user-admin role)
		#[arg(long)]
		admin_key: String,
		/// Session key address (session-key role)
		#[arg(long)]
		session_key: String,
	},
	/// Sign an EIP-712 typed-data document
	Sign {
		/// Path to the typed-data JSON document
		typed_data: PathBuf,
		/// Sign with a local private key instead of the wallet provider
		#[arg(long, env = "WALLET_PRIVATE_KEY")]
		private_key: Option<String>,
		/// Account address to sign as (wallet-provider mode)
		#[arg(long)]
		account: Option<String>,
	},
	/// Validate the configuration file
	Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	setup_tracing(&cli.log_level)?;

	let config = ConfigLoader::new()
		.with_file(&cli.config)
		.load()
		.await
		.context("Failed to load configuration")?;

	match cli.command {
		Commands::Address {
			admin_key,
			session_key,
		} => resolve_address(&config, &admin_key, &session_key).await,
		Commands::Sign {
			typed_data,
			private_key,
			account,
		} => sign_typed_data(&config, &typed_data, private_key, account).await,
		Commands::Validate => validate_config(&config),
	}
}

async fn resolve_address(config: &WalletConfig, admin_key: &str, session_key: &str) -> Result<()> {
	info!(
		chain = %config.chain.name,
		kernel_version = %config.account.kernel_version,
		"Resolving smart account address"
	);

	let admin = Address::from_hex(admin_key).context("Invalid admin key address")?;
	let session = Address::from_hex(session_key).context("Invalid session key address")?;

	let factory =
		Address::from_hex(&config.account.factory).context("Invalid factory address")?;
	let validator =
		Address::from_hex(&config.account.validator).context("Invalid validator address")?;
	let cosigner =
		Address::from_hex(&config.account.cosigner).context("Invalid co-signer address")?;

	let service = SmartAccountService::from_addresses(
		&config.chain.rpc_url,
		&factory,
		&validator,
		&cosigner,
	)
	.context("Failed to connect")?;
	let address = service
		.initialize_account(&admin, &session)
		.await
		.context("Failed to resolve account address")?;

	println!("{}", address);
	Ok(())
}

async fn sign_typed_data(
	config: &WalletConfig,
	typed_data_path: &PathBuf,
	private_key: Option<String>,
	account: Option<String>,
) -> Result<()> {
	let json = tokio::fs::read_to_string(typed_data_path)
		.await
		.context("Failed to read typed-data document")?;
	let typed_data: TypedData =
		serde_json::from_str(&json).context("Failed to parse typed-data document")?;

	let signer: Box<dyn TypedDataSigner> = if let Some(private_key) = private_key {
		let local = LocalSigner::new(&private_key).context("Invalid private key")?;
		info!(address = %local.address(), "Signing with local key");
		Box::new(local)
	} else {
		let wallet_url = config
			.signing
			.wallet_url
			.as_deref()
			.ok_or_else(|| anyhow!("No wallet provider configured (signing.wallet_url)"))?;
		let account = account
			.ok_or_else(|| anyhow!("--account is required for wallet-provider signing"))?;
		let account = Address::from_hex(&account).context("Invalid account address")?;
		info!(%account, "Signing through wallet provider");
		Box::new(
			WalletProviderSigner::connect(wallet_url, &account)
				.context("Failed to connect to wallet provider")?,
		)
	};

	let signature = SigningService::new(signer)
		.sign(&typed_data)
		.await
		.context("Signing failed")?;

	println!("{}", signature);
	Ok(())
}

fn validate_config(config: &WalletConfig) -> Result<()> {
	info!("Configuration is valid");
	info!("Chain: {} (id {})", config.chain.name, config.chain.chain_id);
	info!("Factory: {}", config.account.factory);
	info!("Validator: {}", config.account.validator);
	info!("Co-signer: {}", config.account.cosigner);
	if let Some(wallet_url) = &config.signing.wallet_url {
		info!("Wallet provider: {}", wallet_url);
	}
	Ok(())
}

fn setup_tracing(log_level: &str) -> Result<()> {
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

	tracing_subscriber::registry()
		.with(env_filter)
		.with(tracing_subscriber::fmt::layer())
		.init();

	Ok(())
}
