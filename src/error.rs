use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single error entry as returned by the UltraDNS API.
///
/// Failure bodies carry either one of these objects or a JSON array of them;
/// the service is not consistent about which. Token-endpoint failures use the
/// OAuth-style `error`/`error_description` fields, everything else uses
/// `errorCode`/`errorMessage`, and some payloads carry all four.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorInfo {
    #[serde(rename = "errorCode")]
    pub error_code: i64,
    #[serde(rename = "errorMessage")]
    pub error_message: String,
    #[serde(rename = "error")]
    pub error: String,
    #[serde(rename = "error_description")]
    pub error_description: String,
}

/// Unified error type for all client operations.
///
/// # Retry semantics
///
/// Nothing is retried by the transport itself. The paginated listing helper
/// retries server-class failures (`Api` with a 5xx status, and
/// `PollExhausted`) a bounded number of times; everything else propagates
/// immediately.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A network-level failure (connection refused, DNS failure, ...).
    #[error("network error: {detail}")]
    Network { detail: String },

    /// The HTTP request timed out.
    #[error("request timeout: {detail}")]
    Timeout { detail: String },

    /// A request payload could not be serialized to JSON.
    #[error("failed to encode request payload: {detail}")]
    Encode { detail: String },

    /// A response body did not match the expected shape.
    ///
    /// The raw body is kept for diagnosis.
    #[error("failed to decode response body: {detail}")]
    Decode { detail: String, body: String },

    /// The API answered with a non-2xx status and a decodable error body.
    ///
    /// `errors` keeps every entry the service returned; [`Display`] and
    /// [`primary`](Self::primary) expose only the first one.
    #[error("{method} {url}: {status} {} {}", primary_code(.errors), primary_message(.errors))]
    Api {
        status: u16,
        method: String,
        url: String,
        errors: Vec<ErrorInfo>,
    },

    /// Authorization succeeded at the HTTP level but yielded no usable token.
    #[error("authorization failed: {detail}")]
    Auth { detail: String },

    /// A deferred task reported status `ERROR`.
    #[error("task {task_id} failed: {message}")]
    Task { task_id: String, message: String },

    /// A deferred task was still not terminal when the poll bound was hit.
    ///
    /// Callers treat this like a retryable server failure: the paginated
    /// lister will retry an operation that ends in poll exhaustion.
    #[error("task {task_id} not terminal after {attempts} status polls")]
    PollExhausted { task_id: String, attempts: u32 },

    /// An rrset pool profile declared an `@context` schema this client does
    /// not know.
    #[error("unknown pool profile type: {context}")]
    UnknownProfileType { context: String },

    /// A probe declared a `type` this client does not know.
    #[error("unknown probe type: {probe_type}")]
    UnknownProbeType { probe_type: String },
}

fn primary_code(errors: &[ErrorInfo]) -> i64 {
    errors.first().map_or(0, |e| e.error_code)
}

fn primary_message(errors: &[ErrorInfo]) -> &str {
    errors.first().map_or("", |e| e.error_message.as_str())
}

impl ClientError {
    /// The HTTP status of an [`Api`](Self::Api) failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The first error entry of an [`Api`](Self::Api) failure.
    ///
    /// Known limitation: when the service returns a list, only the first
    /// entry surfaces here; the rest stay in the variant's `errors` field.
    pub fn primary(&self) -> Option<&ErrorInfo> {
        match self {
            Self::Api { errors, .. } => errors.first(),
            _ => None,
        }
    }

    /// Whether this failure is server-class and worth a bounded retry.
    pub(crate) fn is_server_error(&self) -> bool {
        match self {
            Self::Api { status, .. } => *status >= 500,
            Self::PollExhausted { .. } => true,
            _ => false,
        }
    }

    /// Decode a non-2xx response body into a structured error.
    ///
    /// The body is tried as a single [`ErrorInfo`] first (the common case),
    /// then as a list. Some payloads are ambiguous between the two, so the
    /// order matters. If neither shape fits, the parse error and the raw
    /// body surface as [`Decode`](Self::Decode).
    pub(crate) fn api(status: u16, method: &str, url: &str, body: &[u8]) -> Self {
        let errors = match serde_json::from_slice::<ErrorInfo>(body) {
            Ok(one) => vec![one],
            Err(single_err) => match serde_json::from_slice::<Vec<ErrorInfo>>(body) {
                Ok(list) => list,
                Err(_) => {
                    return Self::Decode {
                        detail: single_err.to_string(),
                        body: String::from_utf8_lossy(body).into_owned(),
                    };
                }
            },
        };
        Self::Api {
            status,
            method: method.to_string(),
            url: url.to_string(),
            errors,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                detail: err.to_string(),
            }
        } else {
            Self::Network {
                detail: err.to_string(),
            }
        }
    }
}

/// Convenience type alias for `Result<T, ClientError>`.
pub type Result<T, E = ClientError> = std::result::Result<T, E>;
