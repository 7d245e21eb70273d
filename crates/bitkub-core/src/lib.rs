//! Bitkub Core Library
//!
//! Request signing, payload canonicalization and the endpoint client for the
//! Bitkub exchange REST API.

pub mod api;
pub mod config;
pub mod error;
pub mod signing;
pub mod types;

pub use api::BitkubClient;
pub use config::BitkubConfig;
pub use error::{Error, Result};
