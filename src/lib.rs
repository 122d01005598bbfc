//! # wujie-sdk
//!
//! Signed, retrying client for the Wujie open platform
//! (`https://gate.wujiebantu.com/wj-open/v1`).
//!
//! ## Overview
//!
//! Every call goes through the same pipeline:
//!
//! 1. the request is built with an encoded query and an optional JSON body;
//! 2. pre-request hooks run in order, starting with request signing
//!    ([`auth::Credentials`]), which sets the `Authorization` header from a
//!    token cached for four minutes;
//! 3. the request is sent up to `max_retries` times, replaying the identical
//!    body bytes each time, until a 2xx response arrives;
//! 4. post-request hooks observe the final response and/or error;
//! 5. the caller decodes the envelope and [`response`] maps a non-success
//!    business code to a descriptive [`Error::Business`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wujie_sdk::api::{Caller, CreateImageRequest};
//! use wujie_sdk::{ApiClient, CallContext, Credentials};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> wujie_sdk::Result<()> {
//!     let client = ApiClient::builder()
//!         .credentials(Credentials::new("your-app-id", "MIIEvQIBADANBgkqhkiG9w0...")?)
//!         .max_retries(3)
//!         .build()?;
//!     let caller = Caller::new(client);
//!
//!     let ctx = CallContext::new().with_timeout(Duration::from_secs(30));
//!     let created = caller
//!         .create_image(&CreateImageRequest::new(3, "a lighthouse at dusk"), &ctx)
//!         .await?;
//!     println!("queued: {:?}", created.keys);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`auth`] | Credentials, token signing and the signature cache |
//! | [`hooks`] | Before/after request interceptors |
//! | [`client`] | Client, builder, call context and the retry loop |
//! | [`transport`] | Transport seam and the `reqwest` implementation |
//! | [`response`] | Envelope decoding and classification |
//! | [`result_code`] | Business result code table |
//! | [`router`] | Remote routes |
//! | [`logging`] | Log verbosity and subscriber setup |
//! | `api` | Typed route wrappers (feature `api`) |

pub mod auth;
pub mod client;
pub mod hooks;
pub mod logging;
pub mod response;
pub mod result_code;
pub mod router;
pub mod transport;

#[cfg(feature = "api")]
pub mod api;

// Re-export main types for convenience
pub use auth::{Credentials, SignatureCache};
pub use client::{ApiClient, CallContext, ClientBuilder};
pub use hooks::{HookChain, HttpHook};
pub use logging::LogLevel;
pub use response::Envelope;
pub use result_code::{CodeCategory, ResultCode};
pub use router::{Router, DOMAIN};
pub use transport::{ApiResponse, OutboundRequest, Transport, TransportError};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext, ErrorStage};
