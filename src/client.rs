//! Signed client for the Wujie open platform.
//!
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod core;
mod execution;
pub mod types;

pub use builder::{ClientBuilder, DEFAULT_MAX_RETRIES};
pub use core::ApiClient;
pub use execution::REQUEST_ID_HEADER;
pub use types::CallContext;
