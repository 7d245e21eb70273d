//! API credential handling.

/// API credentials for authenticated Bitkub requests.
///
/// The key is sent with every private request; the secret is only ever used
/// as the HMAC key and never leaves the process.
#[derive(Clone)]
pub struct ApiCredentials {
    api_key: String,
    api_secret: String,
}

impl ApiCredentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// The API key sent in the `X-BTK-APIKEY` header.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The raw secret, for HMAC keying only. Never log the return value.
    pub fn expose_secret(&self) -> &str {
        &self.api_secret
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}
