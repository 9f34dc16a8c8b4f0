//! Store error taxonomy and HTTP status classification.

use thiserror::Error;

/// Failure of a gateway call. `NotFound` must be distinguished by callers:
/// a detail fetch for a missing id navigates back to its list screen, every
/// other kind is logged and surfaced as a generic failure state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("store failure: {message}")]
    Remote {
        /// Store-assigned error code, when the response body carried one.
        code: Option<String>,
        message: String,
    },
    #[error("transport: {0}")]
    Transport(#[from] curl::Error),
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid store URL: {0}")]
    BadUrl(#[from] url::ParseError),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }
}

/// Error body shape the hosted store returns on failures.
#[derive(Debug, serde::Deserialize)]
struct RemoteErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Store error code for "zero rows where one was expected".
const CODE_NO_ROWS: &str = "PGRST116";

/// Classify a non-2xx response into the error taxonomy.
pub fn classify_failure(status: u32, body: &[u8]) -> StoreError {
    let parsed: Option<RemoteErrorBody> = serde_json::from_slice(body).ok();
    let code = parsed.as_ref().and_then(|b| b.code.clone());
    let message = parsed
        .and_then(|b| b.message)
        .unwrap_or_else(|| format!("HTTP {}", status));

    if status == 404 || status == 406 || code.as_deref() == Some(CODE_NO_ROWS) {
        return StoreError::NotFound;
    }
    if status == 401 || status == 403 {
        return StoreError::Unauthorized(message);
    }
    StoreError::Remote { code, message }
}
