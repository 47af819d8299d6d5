//! Callback-based typed-data signer.
//!
//! Adapts a signing function that reports its result through success/error
//! callbacks into the [`TypedDataSigner`] interface, using
//! [`CallbackBridge`] so each request gets its own callback pair.

use crate::bridge::{CallbackBridge, ErrorHandle, SuccessHandle};
use crate::{SigningError, TypedDataSigner};
use async_trait::async_trait;
use wallet_types::TypedData;

/// Callback-style signing function: kicks off signing of the payload and
/// eventually fires exactly one of the two handles.
pub type StartSigning = dyn Fn(TypedData, SuccessHandle<String, SigningError>, ErrorHandle<String, SigningError>)
	+ Send
	+ Sync;

pub struct CallbackSigner {
	start: Box<StartSigning>,
	bridge: CallbackBridge<String, SigningError>,
}

impl CallbackSigner {
	pub fn new<F>(start: F) -> Self
	where
		F: Fn(TypedData, SuccessHandle<String, SigningError>, ErrorHandle<String, SigningError>)
			+ Send
			+ Sync
			+ 'static,
	{
		Self {
			start: Box::new(start),
			bridge: CallbackBridge::new(),
		}
	}
}

#[async_trait]
impl TypedDataSigner for CallbackSigner {
	async fn sign_typed_data(&self, typed_data: &TypedData) -> Result<String, SigningError> {
		let payload = typed_data.clone();
		self.bridge
			.run(|on_success, on_error| (self.start)(payload, on_success, on_error))
			.await
			.map_err(SigningError::from)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::sync::Arc;

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

	#[tokio::test]
	async fn test_success_callback_resolves() {
		let signer = CallbackSigner::new(|_payload, on_success, _on_error| {
			tokio::spawn(async move {
				on_success.fire("0xabcdef".to_string());
			});
		});

		let signature = signer.sign_typed_data(&ping_typed_data()).await.unwrap();
		assert_eq!(signature, "0xabcdef");
	}

	#[tokio::test]
	async fn test_error_callback_rejects() {
		let signer = CallbackSigner::new(|_payload, _on_success, on_error| {
			on_error.fire(SigningError::Rejected("user declined".to_string()));
		});

		let result = signer.sign_typed_data(&ping_typed_data()).await;
		assert!(matches!(result, Err(SigningError::Rejected(_))));
	}

	#[tokio::test]
	async fn test_sequential_requests_get_fresh_callbacks() {
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = calls.clone();
		let signer = CallbackSigner::new(move |_payload, on_success, _on_error| {
			let n = counter.fetch_add(1, Ordering::SeqCst);
			on_success.fire(format!("0x{:02x}", n));
		});

		assert_eq!(
			signer.sign_typed_data(&ping_typed_data()).await.unwrap(),
			"0x00"
		);
		assert_eq!(
			signer.sign_typed_data(&ping_typed_data()).await.unwrap(),
			"0x01"
		);
	}

	#[tokio::test]
	async fn test_dropped_callbacks_report_disconnect() {
		let signer = CallbackSigner::new(|_payload, on_success, on_error| {
			drop(on_success);
			drop(on_error);
		});

		let result = signer.sign_typed_data(&ping_typed_data()).await;
		assert!(matches!(result, Err(SigningError::Disconnected)));
	}
}
