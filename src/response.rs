//! Envelope decoding and business-code classification.
//!
//! Every route answers with
//! `{"code": "...", "message": "...", "success": bool, "data": ...}`.
//! A `code` of `"200"` is success; anything else becomes
//! [`Error::Business`] carrying the fixed description from [`ResultCode`].

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;

use crate::result_code::ResultCode;
use crate::transport::ApiResponse;
use crate::{Error, ErrorContext, Result};

/// Decoded response envelope.
///
/// With the default `T` the payload stays raw JSON, so the code can be
/// classified whatever shape `data` has.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T = serde_json::Value> {
    #[serde(default, deserialize_with = "code_as_string")]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
}

// The gateway mostly sends the code as a string, occasionally as a number.
fn code_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
        Null,
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
        Raw::Null => String::new(),
    })
}

impl<T> Envelope<T> {
    pub fn result_code(&self) -> ResultCode {
        ResultCode::from_code(&self.code)
    }

    /// Classify the business code.
    ///
    /// Success yields the payload (which may legitimately be absent). Any
    /// other code becomes [`Error::Business`] with `trace_id` and `context`
    /// attached.
    pub fn into_result(self, trace_id: Option<String>, context: ErrorContext) -> Result<Option<T>> {
        let code = self.result_code();
        if code.is_success() {
            return Ok(self.data);
        }
        Err(Error::Business {
            code,
            remote_message: self.message,
            trace_id,
            context,
        })
    }
}

/// Decode `response` as an envelope; decoding failures carry the trace id.
pub fn decode_envelope<T: DeserializeOwned>(response: &ApiResponse) -> Result<Envelope<T>> {
    response.json::<Envelope<T>>().map_err(|e| Error::Decode {
        message: format!("invalid response envelope: {}", e),
        trace_id: response.trace_id(),
    })
}

/// Decode and classify in one step, returning the payload of a successful call.
///
/// `data` is only decoded into `T` once the code says success. A failure
/// envelope always yields its business error, even when `data` is junk.
pub fn decode_data<T: DeserializeOwned>(response: &ApiResponse, context: ErrorContext) -> Result<Option<T>> {
    let raw = decode_envelope::<serde_json::Value>(response)?
        .into_result(response.trace_id(), context)?;
    raw.map(serde_json::from_value::<T>)
        .transpose()
        .map_err(|e| Error::Decode {
            message: format!("invalid response data: {}", e),
            trace_id: response.trace_id(),
        })
}
