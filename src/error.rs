use crate::result_code::ResultCode;
use crate::transport::TransportError;
use thiserror::Error;

/// Where a setup or business error came from.
///
/// Rendered after the message as `(field: .., request: .., origin: ..)`,
/// skipping whatever is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Offending setting or argument, e.g. `private_key` or `base_url`.
    pub field: Option<String>,
    /// Rendering of the request that was rejected.
    pub request: Option<String>,
    /// Component or route that raised the error.
    pub origin: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_request(mut self, request: impl Into<String>) -> Self {
        self.request = Some(request.into());
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    fn is_empty(&self) -> bool {
        self.field.is_none() && self.request.is_none() && self.origin.is_none()
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        let labelled = [
            ("field", &self.field),
            ("request", &self.request),
            ("origin", &self.origin),
        ];
        f.write_str(" (")?;
        let mut first = true;
        for (label, value) in labelled {
            if let Some(value) = value {
                if !first {
                    f.write_str(", ")?;
                }
                write!(f, "{}: {}", label, value)?;
                first = false;
            }
        }
        f.write_str(")")
    }
}

/// Pipeline stage an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorStage {
    Setup,
    Signing,
    Hook,
    Transport,
    Status,
    Business,
    Decode,
}

impl ErrorStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Signing => "signing",
            Self::Hook => "hook",
            Self::Transport => "transport",
            Self::Status => "status",
            Self::Business => "business",
            Self::Decode => "decode",
        }
    }
}

impl std::fmt::Display for ErrorStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for the signed request pipeline.
///
/// Transport and status errors come out of the retry loop after the last
/// attempt; business errors come out of envelope classification and are never
/// retried by the client.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{context}")]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Signing error: {message}")]
    Signing { message: String },

    #[error("Hook `{hook}` rejected request: {source}")]
    Hook {
        hook: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Transport error after {attempts} attempt(s): {source}")]
    Transport {
        attempts: u32,
        #[source]
        source: TransportError,
    },

    #[error("HTTP status error: {status} {status_text}, trace_id: {}", display_trace(.trace_id))]
    Status {
        status: u16,
        status_text: String,
        trace_id: Option<String>,
    },

    #[error("Business error [code {}]: {}, trace_id: {}{}", .code.code(), .code.description(), display_trace(.trace_id), .context)]
    Business {
        code: ResultCode,
        /// Message the remote service put in the envelope, kept verbatim.
        remote_message: String,
        trace_id: Option<String>,
        context: ErrorContext,
    },

    #[error("Decode error: {message}, trace_id: {}", display_trace(.trace_id))]
    Decode {
        message: String,
        trace_id: Option<String>,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn display_trace(trace_id: &Option<String>) -> &str {
    trace_id.as_deref().unwrap_or("-")
}

impl Error {
    /// Configuration or argument error raised before anything is sent.
    pub fn setup(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn signing(msg: impl Into<String>) -> Self {
        Error::Signing {
            message: msg.into(),
        }
    }

    /// Stage the error was raised in. A hook that fails to sign reports
    /// [`ErrorStage::Signing`]; any other hook failure reports [`ErrorStage::Hook`].
    pub fn stage(&self) -> ErrorStage {
        match self {
            Error::Configuration { .. } => ErrorStage::Setup,
            Error::Signing { .. } => ErrorStage::Signing,
            Error::Hook { source, .. } if source.stage() == ErrorStage::Signing => {
                ErrorStage::Signing
            }
            Error::Hook { .. } => ErrorStage::Hook,
            Error::Transport { .. } => ErrorStage::Transport,
            Error::Status { .. } => ErrorStage::Status,
            Error::Business { .. } => ErrorStage::Business,
            Error::Decode { .. } | Error::Serialization(_) => ErrorStage::Decode,
        }
    }

    /// Correlation id echoed by the remote service, when a response was received.
    pub fn trace_id(&self) -> Option<&str> {
        match self {
            Error::Status { trace_id, .. }
            | Error::Business { trace_id, .. }
            | Error::Decode { trace_id, .. } => trace_id.as_deref(),
            Error::Hook { source, .. } => source.trace_id(),
            _ => None,
        }
    }

    /// Business result code, for errors raised by envelope classification.
    pub fn result_code(&self) -> Option<&ResultCode> {
        match self {
            Error::Business { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Context of setup and business errors.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } | Error::Business { context, .. } => Some(context),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_mentions_code_text_and_trace() {
        let err = Error::Status {
            status: 503,
            status_text: "Service Unavailable".to_string(),
            trace_id: Some("trace-42".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("Service Unavailable"));
        assert!(msg.contains("trace-42"));
        assert_eq!(err.stage(), ErrorStage::Status);
        assert_eq!(err.trace_id(), Some("trace-42"));
    }

    #[test]
    fn configuration_error_renders_context() {
        let err = Error::setup(
            "private key is not valid base64",
            ErrorContext::new()
                .with_field("private_key")
                .with_origin("credentials"),
        );
        assert_eq!(
            err.to_string(),
            "Configuration error: private key is not valid base64 (field: private_key, origin: credentials)"
        );
        assert_eq!(err.stage(), ErrorStage::Setup);
        assert!(err.trace_id().is_none());
    }

    #[test]
    fn hook_error_forwards_inner_trace_id() {
        let err = Error::Hook {
            hook: "audit".to_string(),
            source: Box::new(Error::Decode {
                message: "bad".to_string(),
                trace_id: Some("t-1".to_string()),
            }),
        };
        assert_eq!(err.trace_id(), Some("t-1"));
        assert_eq!(err.stage(), ErrorStage::Hook);
    }

    #[test]
    fn signing_failure_inside_hook_reports_signing_stage() {
        let err = Error::Hook {
            hook: "credentials".to_string(),
            source: Box::new(Error::signing("rsa pkcs1v15 sign failed")),
        };
        assert_eq!(err.stage(), ErrorStage::Signing);
        assert!(err.to_string().contains("credentials"));
    }
}
