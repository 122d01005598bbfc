use super::cache::{SignatureCache, DEFAULT_SIGNATURE_TTL};
use crate::hooks::HttpHook;
use crate::transport::{ApiResponse, OutboundRequest};
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use rsa::pkcs1v15::{Signature, SigningKey};
use rsa::pkcs8::DecodePrivateKey;
use rsa::signature::{SignatureEncoding, Signer};
use rsa::RsaPrivateKey;
use serde::Serialize;
use sha2::Sha256;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Version tag the remote service expects next to every signature.
pub const SECRET_KEY_VERSION: &str = "1";

#[derive(Serialize)]
struct SignContent<'a> {
    #[serde(rename = "appId")]
    app_id: &'a str,
    timestamp: u64,
}

// Keys serialize in sorted order.
#[derive(Serialize)]
struct AuthorizationToken<'a> {
    #[serde(rename = "appId")]
    app_id: &'a str,
    original: &'a str,
    #[serde(rename = "secretKeyVersion")]
    secret_key_version: &'a str,
    sign: &'a str,
}

/// Application identity plus the RSA key that proves it.
///
/// The key is parsed once at construction and never changes. The only
/// mutable state is the token cache.
pub struct Credentials {
    app_id: String,
    signing_key: SigningKey<Sha256>,
    cache: SignatureCache,
}

impl Credentials {
    /// Parse a base64-encoded PKCS#8 RSA private key.
    ///
    /// Whitespace inside the base64 text (line wraps) is ignored.
    pub fn new(app_id: impl Into<String>, private_key: &str) -> Result<Self> {
        let app_id = app_id.into();
        if app_id.trim().is_empty() {
            return Err(Error::setup(
                "app id must not be empty",
                ErrorContext::new()
                    .with_field("app_id")
                    .with_origin("credentials"),
            ));
        }

        let compact: String = private_key.split_whitespace().collect();
        let der = STANDARD.decode(compact.as_bytes()).map_err(|e| {
            Error::setup(
                format!("private key is not valid base64: {}", e),
                ErrorContext::new()
                    .with_field("private_key")
                    .with_origin("credentials"),
            )
        })?;

        let private_key = RsaPrivateKey::from_pkcs8_der(&der).map_err(|e| {
            Error::setup(
                format!("private key is not a PKCS#8 RSA key: {}", e),
                ErrorContext::new()
                    .with_field("private_key")
                    .with_origin("credentials"),
            )
        })?;

        Ok(Self {
            app_id,
            signing_key: SigningKey::<Sha256>::new(private_key),
            cache: SignatureCache::new(DEFAULT_SIGNATURE_TTL),
        })
    }

    /// Build from `WUJIE_APP_ID` and `WUJIE_PRIVATE_KEY`.
    pub fn from_env() -> Result<Self> {
        let app_id = required_env("WUJIE_APP_ID")?;
        let private_key = required_env("WUJIE_PRIVATE_KEY")?;
        Self::new(app_id, &private_key)
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn cache(&self) -> &SignatureCache {
        &self.cache
    }

    /// Compute a fresh token for `now`, bypassing the cache.
    pub fn sign(&self, now: SystemTime) -> Result<String> {
        let timestamp = now
            .duration_since(UNIX_EPOCH)
            .map_err(|e| Error::signing(format!("clock is before the unix epoch: {}", e)))?
            .as_secs();

        let original = serde_json::to_string(&SignContent {
            app_id: &self.app_id,
            timestamp,
        })
        .map_err(|e| Error::signing(format!("failed to encode sign content: {}", e)))?;

        let signature: Signature = self
            .signing_key
            .try_sign(original.as_bytes())
            .map_err(|e| Error::signing(format!("rsa pkcs1v15 sign failed: {}", e)))?;
        let sign = STANDARD.encode(signature.to_vec());

        serde_json::to_string(&AuthorizationToken {
            app_id: &self.app_id,
            original: &original,
            secret_key_version: SECRET_KEY_VERSION,
            sign: &sign,
        })
        .map_err(|e| Error::signing(format!("failed to encode authorization: {}", e)))
    }

    /// Cached token, re-signed once the cached one has expired at `now`.
    pub fn authorization_at(&self, now: SystemTime) -> Result<String> {
        self.cache.get_or_try_insert_with(now, || {
            debug!(app_id = %self.app_id, "signature cache miss, signing new token");
            self.sign(now)
        })
    }

    pub fn authorization(&self) -> Result<String> {
        self.authorization_at(SystemTime::now())
    }

    /// Set the `Authorization` header on `request`.
    pub fn sign_request(&self, request: &mut OutboundRequest) -> Result<()> {
        let token = self.authorization()?;
        let value = HeaderValue::from_str(&token)
            .map_err(|e| Error::signing(format!("token is not a valid header value: {}", e)))?;
        request.set_header(AUTHORIZATION, value);
        Ok(())
    }
}

fn required_env(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            Error::setup(
                format!("{} is not set", key),
                ErrorContext::new()
                    .with_field(key)
                    .with_origin("credentials"),
            )
        })
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("signing_key", &"<redacted>")
            .field("cache", &self.cache)
            .finish()
    }
}

#[async_trait]
impl HttpHook for Credentials {
    fn name(&self) -> &str {
        "credentials"
    }

    async fn before_request(&self, request: &mut OutboundRequest) -> Result<()> {
        self.sign_request(request)
    }

    async fn after_request(&self, _response: Option<&ApiResponse>, _error: Option<&Error>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use rsa::pkcs1v15::VerifyingKey;
    use rsa::pkcs8::EncodePrivateKey;
    use rsa::signature::Verifier;
    use std::sync::OnceLock;
    use std::time::Duration;

    fn test_key() -> &'static RsaPrivateKey {
        static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
        KEY.get_or_init(|| {
            let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
            RsaPrivateKey::new(&mut rng, 1024).unwrap()
        })
    }

    fn test_key_b64() -> String {
        let der = test_key().to_pkcs8_der().unwrap();
        STANDARD.encode(der.as_bytes())
    }

    fn at(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn token_has_expected_shape_and_verifies() {
        let creds = Credentials::new("app-1", &test_key_b64()).unwrap();
        let token = creds.sign(at(1_700_000_000)).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&token).unwrap();
        assert_eq!(parsed["appId"], "app-1");
        assert_eq!(parsed["secretKeyVersion"], "1");
        let original = parsed["original"].as_str().unwrap();
        assert_eq!(original, r#"{"appId":"app-1","timestamp":1700000000}"#);

        let sig_bytes = STANDARD.decode(parsed["sign"].as_str().unwrap()).unwrap();
        let signature = Signature::try_from(sig_bytes.as_slice()).unwrap();
        let verifying_key = VerifyingKey::<Sha256>::new(test_key().to_public_key());
        verifying_key
            .verify(original.as_bytes(), &signature)
            .unwrap();
    }

    #[test]
    fn authorization_is_stable_within_ttl() {
        let creds = Credentials::new("app-1", &test_key_b64()).unwrap();
        let first = creds.authorization_at(at(1_000)).unwrap();
        let second = creds.authorization_at(at(1_000 + 239)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn authorization_changes_after_ttl() {
        let creds = Credentials::new("app-1", &test_key_b64()).unwrap();
        let first = creds.authorization_at(at(1_000)).unwrap();
        let later = creds.authorization_at(at(1_000 + 240)).unwrap();
        assert_ne!(first, later);
        assert!(later.contains("\\\"timestamp\\\":1240"));
    }

    #[test]
    fn bad_base64_is_a_setup_error() {
        let err = Credentials::new("app-1", "not base64 !!!").unwrap_err();
        assert_eq!(err.stage(), crate::ErrorStage::Setup);
        assert!(err.to_string().contains("base64"));
    }

    #[test]
    fn non_pkcs8_bytes_are_a_setup_error() {
        let err = Credentials::new("app-1", &STANDARD.encode(b"definitely not der")).unwrap_err();
        assert_eq!(err.stage(), crate::ErrorStage::Setup);
        assert!(err.to_string().contains("PKCS#8"));
    }

    #[test]
    fn empty_app_id_is_rejected() {
        assert!(Credentials::new("  ", &test_key_b64()).is_err());
    }

    #[test]
    fn debug_output_hides_the_key() {
        let creds = Credentials::new("app-1", &test_key_b64()).unwrap();
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("app-1"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn sign_request_sets_authorization_header() {
        let creds = Credentials::new("app-1", &test_key_b64()).unwrap();
        let url = url::Url::parse("https://gate.example.com/wj-open/v1/ai/info").unwrap();
        let mut req = OutboundRequest::new(reqwest::Method::GET, url);
        creds.sign_request(&mut req).unwrap();
        let header = req.headers.get(AUTHORIZATION).unwrap().to_str().unwrap();
        assert_eq!(header, creds.authorization().unwrap());
    }
}
