//! Typed-data signer implementations.
//!
//! Available backends:
//! - `provider`: forwards requests to an injected wallet over JSON-RPC
//! - `local`: signs with an in-process private key
//! - `callback`: adapts a callback-based signing function

pub mod callback;
pub mod local;
pub mod provider;
