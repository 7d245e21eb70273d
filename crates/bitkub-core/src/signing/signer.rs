//! HMAC-SHA256 request signing.

use super::credentials::ApiCredentials;
use crate::{Error, Result};
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const HEADER_TIMESTAMP: &str = "X-BTK-TIMESTAMP";
pub const HEADER_SIGN: &str = "X-BTK-SIGN";
pub const HEADER_APIKEY: &str = "X-BTK-APIKEY";

/// Build the string that gets signed: timestamp, method, path and content
/// joined with no separator.
///
/// `content` is the JSON body for POST requests and the canonical query
/// string (with its leading `?`) for GET requests. Either may be empty.
pub fn payload_string(timestamp: &str, method: &str, path: &str, content: &str) -> String {
    let mut payload =
        String::with_capacity(timestamp.len() + method.len() + path.len() + content.len());
    payload.push_str(timestamp);
    payload.push_str(&method.to_ascii_uppercase());
    payload.push_str(path);
    payload.push_str(content);
    payload
}

/// Result of signing one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSignature {
    /// Epoch milliseconds as sent in `X-BTK-TIMESTAMP`.
    pub timestamp: String,
    /// The exact string that was signed.
    pub payload: String,
    /// Lowercase hex HMAC-SHA256 of `payload`.
    pub signature: String,
}

/// Signs payload strings with the account's API secret.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: ApiCredentials,
}

impl RequestSigner {
    pub fn new(credentials: ApiCredentials) -> Self {
        Self { credentials }
    }

    pub fn credentials(&self) -> &ApiCredentials {
        &self.credentials
    }

    /// HMAC-SHA256 of `payload` keyed by the API secret, as lowercase hex.
    #[allow(clippy::result_large_err)]
    pub fn gen_sign(&self, payload: &str) -> Result<String> {
        let secret = self.credentials.expose_secret().as_bytes();
        let mut mac =
            <HmacSha256 as KeyInit>::new_from_slice(secret).map_err(|e| Error::Signing {
                message: format!("Failed to create HMAC: {}", e),
            })?;

        mac.update(payload.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Sign a request made at `timestamp_ms`.
    ///
    /// The returned timestamp string is the one that went into the payload and
    /// must be sent unchanged in the timestamp header.
    #[allow(clippy::result_large_err)]
    pub fn sign_request(
        &self,
        timestamp_ms: i64,
        method: &str,
        path: &str,
        content: &str,
    ) -> Result<RequestSignature> {
        let timestamp = timestamp_ms.to_string();
        let payload = payload_string(&timestamp, method, path, content);
        let signature = self.gen_sign(&payload)?;

        Ok(RequestSignature {
            timestamp,
            payload,
            signature,
        })
    }

    /// Headers required on every authenticated request.
    pub fn auth_headers(&self, signed: &RequestSignature) -> Vec<(String, String)> {
        vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("Content-Type".to_string(), "application/json".to_string()),
            (HEADER_TIMESTAMP.to_string(), signed.timestamp.clone()),
            (HEADER_SIGN.to_string(), signed.signature.clone()),
            (
                HEADER_APIKEY.to_string(),
                self.credentials.api_key().to_string(),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer(secret: &str) -> RequestSigner {
        RequestSigner::new(ApiCredentials::new("k", secret))
    }

    #[test]
    fn test_sign_rfc4231_vector() {
        let signature = signer("Jefe")
            .gen_sign("what do ya want for nothing?")
            .unwrap();
        assert_eq!(
            signature,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_sign_known_vector() {
        let signer = signer("NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j");
        let query = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";
        assert_eq!(
            signer.gen_sign(query).unwrap(),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn test_sign_is_deterministic_and_byte_sensitive() {
        let signer = signer("s");
        let first = signer.gen_sign("1700000000000POST/api/v3/market/balances").unwrap();
        let second = signer.gen_sign("1700000000000POST/api/v3/market/balances").unwrap();
        let changed = signer.gen_sign("1700000000001POST/api/v3/market/balances").unwrap();

        assert_eq!(first, second);
        assert_ne!(first, changed);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_sign_empty_payload() {
        assert_eq!(
            signer("s").gen_sign("").unwrap(),
            "64eca07cce67929c357d63d0a4aec207e774800403298914fc04e88ce02ac49f"
        );
    }

    #[test]
    fn test_payload_string_order() {
        assert_eq!(
            payload_string("1700000000000", "get", "/api/v3/market/my-open-orders", "?sym=btc_thb"),
            "1700000000000GET/api/v3/market/my-open-orders?sym=btc_thb"
        );
        assert_eq!(payload_string("1", "POST", "/p", ""), "1POST/p");
    }

    #[test]
    fn test_sign_request_matches_headers() {
        let signer = signer("s");
        let signed = signer
            .sign_request(1_700_000_000_000, "POST", "/api/v3/market/balances", "")
            .unwrap();

        assert_eq!(signed.timestamp, "1700000000000");
        assert_eq!(signed.payload, "1700000000000POST/api/v3/market/balances");
        assert_eq!(
            signed.signature,
            "32ac0dbe603f8712b4eb38bb845dd20892781366f1c1acedb2ec9f539d0d65f6"
        );

        let headers = signer.auth_headers(&signed);
        let names: Vec<&str> = headers.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            names,
            vec!["Accept", "Content-Type", HEADER_TIMESTAMP, HEADER_SIGN, HEADER_APIKEY]
        );
        assert!(headers.iter().all(|(_, v)| !v.is_empty()));
        assert!(headers.contains(&(HEADER_TIMESTAMP.to_string(), signed.timestamp.clone())));
        assert!(headers.contains(&(HEADER_APIKEY.to_string(), "k".to_string())));
    }
}
