use std::time::Duration;

use tracing::warn;

use crate::error::ApiError;

/// Configuration for retry behaviour on polled GET requests.
pub struct RetryConfig {
    pub max_retries: usize,
    pub delays: Vec<u64>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delays: vec![1, 2, 4],
        }
    }
}

/// Retry an HTTP GET with exponential backoff.
///
/// Retries on network errors and 5xx responses.
/// Returns immediately on success or 4xx.
pub async fn retry_get(
    client: &reqwest::Client,
    url: &str,
    config: &RetryConfig,
) -> Result<reqwest::Response, ApiError> {
    let max_attempts = config.max_retries + 1;

    for attempt in 0..max_attempts {
        // Only sleep when another attempt will actually follow.
        let will_retry = attempt + 1 < max_attempts && attempt < config.delays.len();
        match client.get(url).send().await {
            Ok(resp) if resp.status().is_server_error() => {
                if will_retry {
                    let status = resp.status();
                    warn!(
                        "GET attempt {}/{} failed (HTTP {}), retrying in {}s",
                        attempt + 1,
                        max_attempts,
                        status,
                        config.delays[attempt],
                    );
                    tokio::time::sleep(Duration::from_secs(config.delays[attempt])).await;
                } else {
                    return Ok(resp);
                }
            }
            Ok(resp) => return Ok(resp),
            Err(e) => {
                if will_retry {
                    warn!(
                        "GET attempt {}/{} failed ({}), retrying in {}s",
                        attempt + 1,
                        max_attempts,
                        e,
                        config.delays[attempt],
                    );
                    tokio::time::sleep(Duration::from_secs(config.delays[attempt])).await;
                } else {
                    return Err(ApiError::Network(e));
                }
            }
        }
    }

    unreachable!()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allows_three_retries_with_growing_delays() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.delays, vec![1, 2, 4]);
    }
}
