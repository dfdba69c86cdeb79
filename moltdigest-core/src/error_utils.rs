use crate::error::*;
use std::time::Duration;
use tracing::{error, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    fn is_retryable(&self) -> bool;
    fn retry_after(&self) -> Option<Duration>;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        if let CoreError::MoltbookApi(e) = self {
            error!("Moltbook API error details: {:?}", e);
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("CoreError (warning): {}", self);
        self
    }

    fn is_retryable(&self) -> bool {
        match self {
            CoreError::MoltbookApi(e) => e.is_retryable(),
            CoreError::Network(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            CoreError::MoltbookApi(MoltbookApiError::RateLimitExceeded { retry_after }) => {
                Some(Duration::from_secs(*retry_after))
            }
            _ => None,
        }
    }
}

impl MoltbookApiError {
    /// Transient failures worth another attempt. Auth and response-shape
    /// errors are permanent.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MoltbookApiError::RateLimitExceeded { .. }
                | MoltbookApiError::RequestTimeout
                | MoltbookApiError::ServerError { .. }
        )
    }
}
