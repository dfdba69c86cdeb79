#[cfg(test)]
mod tests {
    use crate::retry::{RetryConfig, RetryExecutor};
    use moltdigest_core::{CoreError, MoltbookApiError};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_config() -> RetryConfig {
        RetryConfig {
            max_attempts: 3,
            base_delay_ms: 1,
            max_delay_ms: 5,
            backoff_multiplier: 2.0,
            jitter_factor: 0.0,
        }
    }

    #[tokio::test]
    async fn test_executor_retries_transient_failures() {
        let executor = RetryExecutor::new(fast_config());
        let calls = AtomicU32::new(0);

        let result = executor
            .execute("flaky operation", || async {
                let attempt = calls.fetch_add(1, Ordering::SeqCst);
                if attempt < 2 {
                    Err(CoreError::MoltbookApi(MoltbookApiError::ServerError {
                        status_code: 503,
                    }))
                } else {
                    Ok(42u32)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_executor_propagates_after_exhausting_attempts() {
        let executor = RetryExecutor::new(fast_config());
        let calls = AtomicU32::new(0);

        let result: Result<(), CoreError> = executor
            .execute("always failing", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(CoreError::MoltbookApi(MoltbookApiError::RequestTimeout))
            })
            .await;

        assert!(matches!(
            result,
            Err(CoreError::MoltbookApi(MoltbookApiError::RequestTimeout))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_executor_does_not_retry_permanent_failures() {
        let executor = RetryExecutor::new(fast_config());
        let calls = AtomicU32::new(0);

        let result: Result<(), CoreError> = executor
            .execute("auth failure", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(CoreError::MoltbookApi(MoltbookApiError::InvalidToken))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_executor_returns_first_success_without_retrying() {
        let executor = RetryExecutor::new(fast_config());
        let calls = AtomicU32::new(0);

        let result = executor
            .execute("healthy operation", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok("page")
            })
            .await;

        assert_eq!(result.unwrap(), "page");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
