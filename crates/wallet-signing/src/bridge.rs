//! Callback-to-future bridge.
//!
//! Wallet SDKs frequently expose signing through a (success, error) callback
//! pair. [`CallbackBridge`] adapts one such pair into a single awaited
//! outcome. Every [`CallbackBridge::run`] invocation creates a fresh pair of
//! handles bound to that invocation only: a handle left over from an earlier
//! invocation can never resolve or reject a later one, and at most one of the
//! pair fires per invocation.

use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::oneshot;

/// Errors surfaced by [`CallbackBridge::run`].
#[derive(Debug, Error)]
pub enum BridgeError<E> {
	/// The error callback fired.
	#[error("callback rejected: {0}")]
	Rejected(E),
	/// Both handles were dropped without firing.
	#[error("callback handles dropped without firing")]
	Disconnected,
}

type FireSlot<T, E> = Arc<Mutex<Option<oneshot::Sender<Result<T, E>>>>>;

fn take_sender<T, E>(slot: &FireSlot<T, E>) -> Option<oneshot::Sender<Result<T, E>>> {
	match slot.lock() {
		Ok(mut guard) => guard.take(),
		Err(poisoned) => poisoned.into_inner().take(),
	}
}

/// Success callback handle for one bridge invocation.
pub struct SuccessHandle<T, E> {
	slot: FireSlot<T, E>,
}

impl<T, E> Clone for SuccessHandle<T, E> {
	fn clone(&self) -> Self {
		Self {
			slot: self.slot.clone(),
		}
	}
}

impl<T, E> SuccessHandle<T, E> {
	/// Resolves the invocation. Ignored if the invocation already completed.
	pub fn fire(&self, value: T) {
		if let Some(sender) = take_sender(&self.slot) {
			let _ = sender.send(Ok(value));
		}
	}
}

/// Error callback handle for one bridge invocation.
pub struct ErrorHandle<T, E> {
	slot: FireSlot<T, E>,
}

impl<T, E> Clone for ErrorHandle<T, E> {
	fn clone(&self) -> Self {
		Self {
			slot: self.slot.clone(),
		}
	}
}

impl<T, E> ErrorHandle<T, E> {
	/// Rejects the invocation. Ignored if the invocation already completed.
	pub fn fire(&self, error: E) {
		if let Some(sender) = take_sender(&self.slot) {
			let _ = sender.send(Err(error));
		}
	}
}

/// Adapter from a callback-style (success, error) pair to an awaited outcome.
pub struct CallbackBridge<T, E> {
	_marker: std::marker::PhantomData<fn() -> (T, E)>,
}

impl<T, E> Default for CallbackBridge<T, E> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T, E> CallbackBridge<T, E> {
	pub fn new() -> Self {
		Self {
			_marker: std::marker::PhantomData,
		}
	}

	/// Starts a callback-based operation and awaits its outcome.
	///
	/// `start` receives the success and error handles for this invocation and
	/// is expected to kick off the underlying operation. The returned future
	/// completes when either handle fires, or errors if both are dropped.
	pub async fn run<F>(&self, start: F) -> Result<T, BridgeError<E>>
	where
		F: FnOnce(SuccessHandle<T, E>, ErrorHandle<T, E>),
	{
		let (sender, receiver) = oneshot::channel();
		let slot: FireSlot<T, E> = Arc::new(Mutex::new(Some(sender)));

		start(
			SuccessHandle { slot: slot.clone() },
			ErrorHandle { slot },
		);

		match receiver.await {
			Ok(Ok(value)) => Ok(value),
			Ok(Err(error)) => Err(BridgeError::Rejected(error)),
			Err(_) => Err(BridgeError::Disconnected),
		}
	}
}
