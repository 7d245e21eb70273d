//! Request signing for authenticated Bitkub endpoints.
//!
//! Every private call is authenticated with an HMAC-SHA256 digest over the
//! payload string:
//!
//! ```text
//! timestamp ── method ── path ── body | canonical query
//!     │                                   │
//!     └──────── concatenated ─────────────┘
//!                     │
//!              HMAC-SHA256(secret)
//!                     │
//!                     ▼
//!   X-BTK-TIMESTAMP / X-BTK-SIGN / X-BTK-APIKEY
//! ```
//!
//! The JSON body of POST requests is rendered once by [`json::to_payload_json`]
//! and that exact string is both signed and transmitted.

pub mod credentials;
pub mod json;
pub mod signer;

pub use credentials::ApiCredentials;
pub use json::to_payload_json;
pub use signer::{
    payload_string, RequestSignature, RequestSigner, HEADER_APIKEY, HEADER_SIGN,
    HEADER_TIMESTAMP,
};
