use thiserror::Error;

/// Failure states of a monitor API call, kept distinguishable so the UI can
/// decide between "retry later" and "fix your request".
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Http {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("decode error: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// Transient failures worth retrying: connection problems and 5xx.
    /// 4xx and malformed bodies will not improve on a retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network(_) => true,
            ApiError::Http { status, .. } => status.is_server_error(),
            ApiError::Decode(_) => false,
        }
    }
}
