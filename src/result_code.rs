//! Business result codes carried inside the response envelope.
//!
//! The remote API answers most calls with HTTP 200 and reports the real outcome
//! in the envelope's `code` field. `"200"` is the only success value; every
//! other code is a failure with its own handling advice.
//!
//! ## Categories
//!
//! | Category         | Codes                                   | Caller advice                     |
//! |------------------|-----------------------------------------|-----------------------------------|
//! | validation       | 20010001, 20010015, 20110000            | fix the request                   |
//! | content_policy   | 20110001, 20110002, 20110003            | never retry blindly               |
//! | contention       | 20010018                                | re-submit the whole operation     |
//! | balance          | 20110010                                | top up first                      |
//! | not_cancellable  | 20110011                                | job already left the queue        |
//! | stale_state      | 20110017                                | refresh job/image state           |
//! | face_detection   | 20110018 ..= 20110021                   | use another reference image       |
//!
//! ## Example
//!
//! ```rust
//! use wujie_sdk::result_code::ResultCode;
//!
//! let code = ResultCode::from_code("20010018");
//! assert!(code.should_resubmit());
//! assert_eq!(code.category().as_str(), "contention");
//! ```

use std::borrow::Cow;
use std::fmt;

/// Result code reported by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResultCode {
    /// 200: success sentinel
    Ok,
    /// 0: error produced by an upstream that is not the Wujie API itself
    Upstream,
    /// 20010001
    InvalidParameter,
    /// 20010015
    UnsupportedResolution,
    /// 20010018: generation lost a lock race; the whole operation must be re-submitted
    LockContention,
    /// 20110000
    PromptTranslationFailed,
    /// 20110001
    PromptContainsSensitiveWords,
    /// 20110002
    InitImageLinkInvalid,
    /// 20110003
    InitImageContainsSensitiveInfo,
    /// 20110010
    InsufficientPointsBalance,
    /// 20110011
    JobNotInQueue,
    /// 20110017
    ResourceStateChanged,
    /// 20110018
    ImageRecognitionFailed,
    /// 20110019
    NoFaceOrFaceTooSmall,
    /// 20110020
    MultipleFacesDetected,
    /// 20110021
    SideFaceDetected,
    /// Any code missing from the table, kept verbatim.
    Unknown(String),
}

/// Coarse grouping used to decide what a caller should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeCategory {
    Success,
    Upstream,
    Validation,
    ContentPolicy,
    Contention,
    Balance,
    NotCancellable,
    StaleState,
    FaceDetection,
    Unknown,
}

impl CodeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Upstream => "upstream",
            Self::Validation => "validation",
            Self::ContentPolicy => "content_policy",
            Self::Contention => "contention",
            Self::Balance => "balance",
            Self::NotCancellable => "not_cancellable",
            Self::StaleState => "stale_state",
            Self::FaceDetection => "face_detection",
            Self::Unknown => "unknown",
        }
    }
}

impl ResultCode {
    /// Maps the raw envelope code to a variant. Never fails.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "200" => Self::Ok,
            "0" => Self::Upstream,
            "20010001" => Self::InvalidParameter,
            "20010015" => Self::UnsupportedResolution,
            "20010018" => Self::LockContention,
            "20110000" => Self::PromptTranslationFailed,
            "20110001" => Self::PromptContainsSensitiveWords,
            "20110002" => Self::InitImageLinkInvalid,
            "20110003" => Self::InitImageContainsSensitiveInfo,
            "20110010" => Self::InsufficientPointsBalance,
            "20110011" => Self::JobNotInQueue,
            "20110017" => Self::ResourceStateChanged,
            "20110018" => Self::ImageRecognitionFailed,
            "20110019" => Self::NoFaceOrFaceTooSmall,
            "20110020" => Self::MultipleFacesDetected,
            "20110021" => Self::SideFaceDetected,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Returns the wire code string (e.g., `"20110010"`).
    pub fn code(&self) -> &str {
        match self {
            Self::Ok => "200",
            Self::Upstream => "0",
            Self::InvalidParameter => "20010001",
            Self::UnsupportedResolution => "20010015",
            Self::LockContention => "20010018",
            Self::PromptTranslationFailed => "20110000",
            Self::PromptContainsSensitiveWords => "20110001",
            Self::InitImageLinkInvalid => "20110002",
            Self::InitImageContainsSensitiveInfo => "20110003",
            Self::InsufficientPointsBalance => "20110010",
            Self::JobNotInQueue => "20110011",
            Self::ResourceStateChanged => "20110017",
            Self::ImageRecognitionFailed => "20110018",
            Self::NoFaceOrFaceTooSmall => "20110019",
            Self::MultipleFacesDetected => "20110020",
            Self::SideFaceDetected => "20110021",
            Self::Unknown(code) => code,
        }
    }

    /// Fixed human-readable description.
    pub fn description(&self) -> Cow<'static, str> {
        let text = match self {
            Self::Ok => "success",
            Self::Upstream => "error returned by a non-Wujie upstream",
            Self::InvalidParameter => "invalid parameter",
            Self::UnsupportedResolution => "size or resolution is not supported",
            Self::LockContention => {
                "generation failed due to lock contention, re-submit the whole operation"
            }
            Self::PromptTranslationFailed => "prompt translation failed",
            Self::PromptContainsSensitiveWords => "prompt contains sensitive words",
            Self::InitImageLinkInvalid => "reference image link is invalid or unsupported",
            Self::InitImageContainsSensitiveInfo => "reference image contains sensitive content",
            Self::InsufficientPointsBalance => "insufficient point balance",
            Self::JobNotInQueue => "job is not queued and cannot be cancelled",
            Self::ResourceStateChanged => {
                "image or job status changed, refresh its state before acting on it"
            }
            Self::ImageRecognitionFailed => "image recognition failed",
            Self::NoFaceOrFaceTooSmall => "no face detected or face is too small",
            Self::MultipleFacesDetected => "multiple faces detected",
            Self::SideFaceDetected => "profile face detected",
            Self::Unknown(code) => return Cow::Owned(format!("unknown error, code={}", code)),
        };
        Cow::Borrowed(text)
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Ok)
    }

    pub fn category(&self) -> CodeCategory {
        match self {
            Self::Ok => CodeCategory::Success,
            Self::Upstream => CodeCategory::Upstream,
            Self::InvalidParameter | Self::UnsupportedResolution | Self::PromptTranslationFailed => {
                CodeCategory::Validation
            }
            Self::PromptContainsSensitiveWords
            | Self::InitImageLinkInvalid
            | Self::InitImageContainsSensitiveInfo => CodeCategory::ContentPolicy,
            Self::LockContention => CodeCategory::Contention,
            Self::InsufficientPointsBalance => CodeCategory::Balance,
            Self::JobNotInQueue => CodeCategory::NotCancellable,
            Self::ResourceStateChanged => CodeCategory::StaleState,
            Self::ImageRecognitionFailed
            | Self::NoFaceOrFaceTooSmall
            | Self::MultipleFacesDetected
            | Self::SideFaceDetected => CodeCategory::FaceDetection,
            Self::Unknown(_) => CodeCategory::Unknown,
        }
    }

    /// Whether the caller may re-submit the whole higher-level operation.
    ///
    /// Only lock contention qualifies. The client itself never retries on a
    /// business code.
    #[inline]
    pub fn should_resubmit(&self) -> bool {
        matches!(self, Self::LockContention)
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
