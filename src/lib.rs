//! Bitkub Client: signed REST access to the Bitkub exchange.
//!
//! This root crate re-exports the workspace library for integration tests
//! and benchmarks. Use `bitkub-core` directly in applications:
//!
//! - `bitkub_core::BitkubClient`: one method per endpoint
//! - `bitkub_core::signing`: HMAC signing and body encoding
//! - `bitkub_core::config`: environment and file configuration

pub use bitkub_core as core;
pub use bitkub_core::{BitkubClient, BitkubConfig, Error, Result};
