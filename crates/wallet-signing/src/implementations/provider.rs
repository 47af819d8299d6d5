//! Wallet-provider typed-data signer.
//!
//! Opens a JSON-RPC transport to an injected wallet provider and forwards
//! `eth_signTypedData_v4` requests to it. The provider owns the key; its
//! rejections propagate unmodified to the caller.

use crate::{SigningError, TypedDataSigner};
use alloy_primitives::Address as AlloyAddress;
use alloy_provider::{Provider, ProviderBuilder};
use alloy_transport_http::Http;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use wallet_types::{Address, TypedData};

pub struct WalletProviderSigner {
	provider: Arc<dyn Provider<Http<reqwest::Client>> + Send + Sync>,
	account: AlloyAddress,
}

impl WalletProviderSigner {
	pub fn new(
		provider: Arc<dyn Provider<Http<reqwest::Client>> + Send + Sync>,
		account: AlloyAddress,
	) -> Self {
		Self { provider, account }
	}

	/// Connects to a wallet provider endpoint for the given account.
	pub fn connect(wallet_url: &str, account: &Address) -> Result<Self, SigningError> {
		let url = wallet_url
			.parse()
			.map_err(|e| SigningError::Provider(format!("Invalid wallet URL: {}", e)))?;
		let account = account
			.to_alloy()
			.map_err(|e| SigningError::Provider(e.to_string()))?;
		let provider = ProviderBuilder::new().on_http(url);
		Ok(Self::new(Arc::new(provider), account))
	}
}

#[async_trait]
impl TypedDataSigner for WalletProviderSigner {
	async fn sign_typed_data(&self, typed_data: &TypedData) -> Result<String, SigningError> {
		debug!(account = %self.account, "Forwarding typed-data signing request to wallet provider");

		let signature: String = self
			.provider
			.client()
			.request(
				"eth_signTypedData_v4",
				(self.account, typed_data.clone()),
			)
			.await
			.map_err(|e| SigningError::Provider(format!("Wallet provider rejected: {}", e)))?;

		Ok(signature)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tokio::io::{AsyncReadExt, AsyncWriteExt};
	use tokio::net::TcpListener;

	/// Serves exactly one JSON-RPC response, substituting the request id into
	/// the `{id}` placeholder of `body`.
	async fn serve_json_rpc_once(body: &'static str) -> String {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let url = format!("http://{}", listener.local_addr().unwrap());

		tokio::spawn(async move {
			let (mut stream, _) = listener.accept().await.unwrap();
			let mut request = [0u8; 4096];
			let n = stream.read(&mut request).await.unwrap();
			let request = String::from_utf8_lossy(&request[..n]);
			let id = request
				.split("\"id\":")
				.nth(1)
				.and_then(|rest| rest.split(&[',', '}'][..]).next())
				.unwrap_or("0")
				.trim()
				.to_string();

			let body = body.replace("{id}", &id);
			let response = format!(
				"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
				body.len(),
				body
			);
			stream.write_all(response.as_bytes()).await.unwrap();
		});

		url
	}

	fn ping_typed_data() -> TypedData {
		serde_json::from_value(serde_json::json!({
			"domain": { "name": "Test", "version": "1", "chainId": 1 },
			"types": {
				"EIP712Domain": [
					{ "name": "name", "type": "string" },
					{ "name": "version", "type": "string" },
					{ "name": "chainId", "type": "uint256" }
				],
				"Ping": [{ "name": "value", "type": "uint256" }]
			},
			"primaryType": "Ping",
			"message": { "value": "1" }
		}))
		.unwrap()
	}

	fn account() -> Address {
		Address(vec![0x11; 20])
	}

	#[tokio::test]
	async fn test_returns_provider_signature() {
		let url =
			serve_json_rpc_once(r#"{"jsonrpc":"2.0","id":{id},"result":"0x1234"}"#).await;
		let signer = WalletProviderSigner::connect(&url, &account()).unwrap();

		let signature = signer.sign_typed_data(&ping_typed_data()).await.unwrap();
		assert_eq!(signature, "0x1234");
	}

	#[tokio::test]
	async fn test_rejection_propagates_as_provider_error() {
		let url = serve_json_rpc_once(
			r#"{"jsonrpc":"2.0","id":{id},"error":{"code":4001,"message":"User rejected the request"}}"#,
		)
		.await;
		let signer = WalletProviderSigner::connect(&url, &account()).unwrap();

		match signer.sign_typed_data(&ping_typed_data()).await {
			Err(SigningError::Provider(message)) => assert!(message.contains("User rejected")),
			other => panic!("unexpected result: {:?}", other),
		}
	}

	#[test]
	fn test_connect_rejects_bad_inputs() {
		assert!(matches!(
			WalletProviderSigner::connect("not a url", &account()),
			Err(SigningError::Provider(_))
		));
		assert!(matches!(
			WalletProviderSigner::connect("http://localhost:8545", &Address(vec![0u8; 3])),
			Err(SigningError::Provider(_))
		));
	}
}
