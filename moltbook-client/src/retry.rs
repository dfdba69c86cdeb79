use moltdigest_core::{CoreError, ErrorExt};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info};

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first
    pub max_attempts: u32,
    /// Base delay for exponential backoff (in milliseconds)
    pub base_delay_ms: u64,
    /// Maximum delay between retries (in milliseconds)
    pub max_delay_ms: u64,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
    /// Maximum jitter factor (0.0 to 1.0)
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
            max_delay_ms: 30000,
            backoff_multiplier: 2.0,
            jitter_factor: 0.1,
        }
    }
}

impl RetryConfig {
    /// Retry config tuned for the Moltbook API
    pub fn moltbook() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 2000, // Start with 2 seconds, the API can be slow
            max_delay_ms: 60000, // Max 1 minute delay
            backoff_multiplier: 2.0,
            jitter_factor: 0.2, // 20% jitter to prevent thundering herd
        }
    }
}

/// Retry strategy based on error type
#[derive(Debug, Clone, PartialEq)]
pub enum RetryStrategy {
    /// Retry with exponential backoff
    Retry,
    /// Retry after a server-specified delay (rate limits)
    RetryWithDelay(Duration),
    /// Don't retry (permanent failures)
    NoRetry,
}

pub fn get_retry_strategy(error: &CoreError) -> RetryStrategy {
    if let Some(delay) = error.retry_after() {
        return RetryStrategy::RetryWithDelay(delay);
    }
    if error.is_retryable() {
        RetryStrategy::Retry
    } else {
        RetryStrategy::NoRetry
    }
}

/// Calculate delay with exponential backoff and jitter
pub fn calculate_delay(attempt: u32, config: &RetryConfig) -> Duration {
    let exponential_delay = if attempt == 0 {
        Duration::from_millis(config.base_delay_ms)
    } else {
        let multiplier = config.backoff_multiplier.powi(attempt as i32);
        let delay_ms = (config.base_delay_ms as f64 * multiplier) as u64;
        Duration::from_millis(delay_ms.min(config.max_delay_ms))
    };

    // Add jitter to prevent thundering herd
    let jitter_range = (exponential_delay.as_millis() as f64 * config.jitter_factor) as u64;
    let jitter = fastrand::u64(0..=jitter_range);

    (exponential_delay + Duration::from_millis(jitter)).min(Duration::from_millis(config.max_delay_ms))
}

/// Retry executor that wraps operations with retry logic
#[derive(Debug, Clone)]
pub struct RetryExecutor {
    config: RetryConfig,
}

impl RetryExecutor {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Execute an operation, retrying transient failures with backoff.
    /// Permanent failures propagate immediately; the final error propagates
    /// once attempts are exhausted.
    pub async fn execute<F, Fut, T>(&self, operation_name: &str, operation: F) -> Result<T, CoreError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let mut last_error: Option<CoreError> = None;

        for attempt in 0..self.config.max_attempts {
            if attempt > 0 {
                debug!("Retry attempt {} for {}", attempt, operation_name);
            }

            match operation().await {
                Ok(result) => {
                    if attempt > 0 {
                        info!(
                            "Operation {} succeeded after {} retries",
                            operation_name, attempt
                        );
                    }
                    return Ok(result);
                }
                Err(err) => {
                    let attempts_left = attempt + 1 < self.config.max_attempts;
                    match get_retry_strategy(&err) {
                        RetryStrategy::Retry if attempts_left => {
                            let delay = calculate_delay(attempt, &self.config);
                            info!("Retrying {} in {:?} due to: {}", operation_name, delay, err);
                            last_error = Some(err);
                            sleep(delay).await;
                        }
                        RetryStrategy::RetryWithDelay(delay) if attempts_left => {
                            info!(
                                "Retrying {} after specified delay of {:?} due to: {}",
                                operation_name, delay, err
                            );
                            last_error = Some(err);
                            sleep(delay).await;
                        }
                        RetryStrategy::NoRetry => {
                            debug!("Not retrying {} due to error type: {}", operation_name, err);
                            return Err(err);
                        }
                        _ => {
                            last_error = Some(err);
                            break;
                        }
                    }
                }
            }
        }

        let err = last_error.unwrap_or_else(|| CoreError::Internal {
            message: format!("{operation_name} failed with no recorded error"),
        });
        error!(
            "Operation {} failed after {} attempts: {}",
            operation_name, self.config.max_attempts, err
        );
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moltdigest_core::MoltbookApiError;

    #[test]
    fn test_strategy_for_rate_limit_uses_server_delay() {
        let error = CoreError::MoltbookApi(MoltbookApiError::RateLimitExceeded { retry_after: 7 });
        assert_eq!(
            get_retry_strategy(&error),
            RetryStrategy::RetryWithDelay(Duration::from_secs(7))
        );
    }

    #[test]
    fn test_strategy_for_server_error_retries() {
        let error = CoreError::MoltbookApi(MoltbookApiError::ServerError { status_code: 502 });
        assert_eq!(get_retry_strategy(&error), RetryStrategy::Retry);
    }

    #[test]
    fn test_strategy_for_permanent_errors() {
        let token = CoreError::MoltbookApi(MoltbookApiError::InvalidToken);
        assert_eq!(get_retry_strategy(&token), RetryStrategy::NoRetry);

        let parse = CoreError::MoltbookApi(MoltbookApiError::InvalidResponse {
            details: "bad body".to_string(),
        });
        assert_eq!(get_retry_strategy(&parse), RetryStrategy::NoRetry);
    }

    #[test]
    fn test_calculate_delay_grows_and_caps() {
        let config = RetryConfig {
            max_attempts: 5,
            base_delay_ms: 100,
            max_delay_ms: 350,
            backoff_multiplier: 2.0,
            jitter_factor: 0.0,
        };

        assert_eq!(calculate_delay(0, &config), Duration::from_millis(100));
        assert_eq!(calculate_delay(1, &config), Duration::from_millis(200));
        // 100 * 2^2 = 400 caps at 350.
        assert_eq!(calculate_delay(2, &config), Duration::from_millis(350));
        assert_eq!(calculate_delay(4, &config), Duration::from_millis(350));
    }

    #[test]
    fn test_calculate_delay_jitter_stays_within_bound() {
        let config = RetryConfig {
            max_attempts: 3,
            base_delay_ms: 100,
            max_delay_ms: 10000,
            backoff_multiplier: 2.0,
            jitter_factor: 0.5,
        };

        for _ in 0..50 {
            let delay = calculate_delay(0, &config);
            assert!(delay >= Duration::from_millis(100));
            assert!(delay <= Duration::from_millis(150));
        }
    }
}
