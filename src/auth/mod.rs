//! Request authentication: RSA-signed, time-stamped authorization tokens.
//!
//! Every outbound call carries an `Authorization` header holding a JSON token:
//!
//! ```text
//! {"appId":"..","original":"{\"appId\":\"..\",\"timestamp\":1700000000}","secretKeyVersion":"1","sign":"<base64>"}
//! ```
//!
//! `sign` is an RSA PKCS#1 v1.5 / SHA-256 signature over the exact `original`
//! bytes. Tokens are cached for [`DEFAULT_SIGNATURE_TTL`] so steady traffic
//! does not pay for an RSA operation per request.

mod cache;
mod credentials;

pub use cache::{SignatureCache, DEFAULT_SIGNATURE_TTL};
pub use credentials::{Credentials, SECRET_KEY_VERSION};
