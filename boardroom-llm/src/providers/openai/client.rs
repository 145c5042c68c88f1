//! OpenAI HTTP client with request pacing

use super::types::ApiError;
use super::{DEFAULT_BASE_URL, PROVIDER_ID};
use crate::providers::{invalid_response, rate_limited, request_failed, transport};
use boardroom_core::BoardroomResult;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// OpenAI API client.
///
/// Holds no credential: the key of the calling agent's model configuration
/// is attached to each request. Requests are spaced at least
/// `60s / requests_per_minute` apart.
pub struct OpenAIClient {
    client: Client,
    base_url: String,
    min_request_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl OpenAIClient {
    /// Create a new OpenAI client.
    ///
    /// # Arguments
    /// * `base_url` - API root, e.g. `https://api.openai.com/v1`
    /// * `requests_per_minute` - Maximum requests per minute (clamped to at least 1)
    pub fn new(base_url: impl Into<String>, requests_per_minute: u32) -> Self {
        let rpm = requests_per_minute.max(1);
        let min_interval_ms = (60_000 / rpm as u64).max(10);

        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            min_request_interval: Duration::from_millis(min_interval_ms),
            last_request: Mutex::new(None),
        }
    }

    /// Client for the public OpenAI endpoint at 60 requests per minute.
    pub fn with_default_base_url() -> Self {
        Self::new(DEFAULT_BASE_URL, 60)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a JSON body to `endpoint` and decode the JSON answer.
    pub async fn request<Req: Serialize + ?Sized, Res: DeserializeOwned>(
        &self,
        api_key: &str,
        endpoint: &str,
        body: &Req,
    ) -> BoardroomResult<Res> {
        self.pace().await;

        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| transport(PROVIDER_ID, format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let retry_after_ms = parse_retry_after_ms(response.headers()).unwrap_or(0);

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| invalid_response(PROVIDER_ID, format!("Failed to parse response: {}", e)));
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let error_msg = match serde_json::from_str::<ApiError>(&error_text) {
            Ok(api_error) => api_error.error.message,
            Err(_) => error_text,
        };

        Err(match status {
            StatusCode::TOO_MANY_REQUESTS => rate_limited(PROVIDER_ID, retry_after_ms),
            _ => request_failed(PROVIDER_ID, status.as_u16() as i32, error_msg),
        })
    }

    /// Wait until the minimum interval since the previous request has passed.
    async fn pace(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_request_interval {
                tokio::time::sleep(self.min_request_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

fn parse_retry_after_ms(headers: &reqwest::header::HeaderMap) -> Option<i64> {
    headers
        .get("retry-after")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<f64>().ok())
        .map(|seconds| (seconds * 1000.0) as i64)
}

impl std::fmt::Debug for OpenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIClient")
            .field("base_url", &self.base_url)
            .field("min_request_interval", &self.min_request_interval)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue};

    #[test]
    fn test_parse_retry_after_seconds() {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("1.5"));
        assert_eq!(parse_retry_after_ms(&headers), Some(1500));
    }

    #[test]
    fn test_parse_retry_after_missing_or_garbage() {
        let mut headers = HeaderMap::new();
        assert_eq!(parse_retry_after_ms(&headers), None);
        headers.insert("retry-after", HeaderValue::from_static("soon"));
        assert_eq!(parse_retry_after_ms(&headers), None);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = OpenAIClient::new("http://localhost:9999/v1/", 60);
        assert_eq!(client.base_url(), "http://localhost:9999/v1");
    }

    #[test]
    fn test_interval_from_requests_per_minute() {
        assert_eq!(
            OpenAIClient::new("http://x", 60).min_request_interval,
            Duration::from_millis(1000)
        );
        assert_eq!(
            OpenAIClient::new("http://x", 0).min_request_interval,
            Duration::from_millis(60_000)
        );
        assert_eq!(
            OpenAIClient::new("http://x", 100_000).min_request_interval,
            Duration::from_millis(10)
        );
    }
}
