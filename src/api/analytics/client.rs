use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client as HttpClient;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use super::models::{ClickBucket, ErrorResponse};
use crate::config::AppConfig;
use crate::utils::{truncate_body, ChartError};

/// Client for the URL shortener's admin analytics endpoint
pub struct AnalyticsClient {
    http_client: HttpClient,
    api_token: String,
    api_url: String,
}

impl AnalyticsClient {
    /// Create a client from the loaded config
    pub fn new(config: &AppConfig) -> Result<Self, ChartError> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        // The backend usually runs next to this tool; never route loopback through a proxy
        if is_loopback_url(&config.api_url) {
            builder = builder.no_proxy();
        }
        let http_client = builder
            .build()
            .map_err(|e| ChartError::Unclassified(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_token: config.api_token.clone(),
            api_url: config.api_url.clone(),
        })
    }

    /// Create default headers with authorization
    fn create_headers(&self) -> Result<HeaderMap, ChartError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let auth_value = HeaderValue::from_str(&format!("Bearer {}", self.api_token))
            .map_err(|e| ChartError::Config(format!("Token is not a valid header value: {}", e)))?;
        headers.insert(AUTHORIZATION, auth_value);

        Ok(headers)
    }

    /// GET the clicks-over-time buckets
    ///
    /// One attempt only. Status and body are checked before decoding so that
    /// a 401 with a JSON error body is reported as an API error, not as data.
    pub async fn get_clicks_over_time(&self) -> Result<Vec<ClickBucket>, ChartError> {
        let headers = self.create_headers()?;

        info!("Fetching click analytics from {}", self.api_url);
        let response = self
            .http_client
            .get(&self.api_url)
            .headers(headers)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;
        debug!("Analytics API responded {} ({} bytes)", status, body.len());

        // Only a plain 200 carries the click buckets
        if status != StatusCode::OK {
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error)
                .unwrap_or_else(|| truncate_body(&body, 200));
            warn!("Analytics API error {}: {}", status.as_u16(), detail);
            return Err(ChartError::Api {
                status: status.as_u16(),
                body,
            });
        }

        decode_buckets(&body)
    }
}

fn is_loopback_url(url: &str) -> bool {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .map(|host| matches!(host.as_str(), "localhost" | "127.0.0.1" | "[::1]" | "::1"))
        .unwrap_or(false)
}

fn map_transport_error(e: reqwest::Error) -> ChartError {
    if e.is_builder() {
        ChartError::Unclassified(format!("Invalid request: {}", e))
    } else {
        ChartError::Connectivity(e.to_string())
    }
}

/// Decode a response body into buckets, rejecting empty payloads
pub fn decode_buckets(body: &str) -> Result<Vec<ClickBucket>, ChartError> {
    if body.trim().is_empty() {
        return Err(ChartError::EmptyData);
    }

    let buckets: Vec<ClickBucket> =
        serde_json::from_str(body).map_err(|e| ChartError::MalformedResponse {
            reason: e.to_string(),
            body: body.to_string(),
        })?;

    if buckets.is_empty() {
        return Err(ChartError::EmptyData);
    }

    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::analytics::test_server::{closed_port_url, serve_once};
    use std::path::PathBuf;

    fn config_for(url: String) -> AppConfig {
        AppConfig {
            api_url: url,
            api_token: "admin-jwt".to_string(),
            output_path: PathBuf::from("unused.png"),
            show_chart: false,
            http_timeout: Some(std::time::Duration::from_secs(5)),
        }
    }

    #[test]
    fn test_decode_buckets() {
        let buckets = decode_buckets(r#"[{"_id":"2024-01-01","clicks":5},{"_id":"2024-01-02","clicks":9}]"#)
            .expect("valid body");
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].id, "2024-01-01");
        assert_eq!(buckets[1].clicks, 9);
    }

    #[test]
    fn test_decode_empty() {
        assert!(matches!(decode_buckets(""), Err(ChartError::EmptyData)));
        assert!(matches!(decode_buckets("  \n"), Err(ChartError::EmptyData)));
        assert!(matches!(decode_buckets("[]"), Err(ChartError::EmptyData)));
    }

    #[test]
    fn test_decode_malformed_keeps_body() {
        match decode_buckets("<html>oops</html>") {
            Err(ChartError::MalformedResponse { body, .. }) => assert_eq!(body, "<html>oops</html>"),
            other => panic!("expected malformed response, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_negative_clicks() {
        assert!(matches!(
            decode_buckets(r#"[{"_id":"2024-01-01","clicks":-3}]"#),
            Err(ChartError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_is_loopback_url() {
        assert!(is_loopback_url("http://localhost:8000/api/admin/clicks-over-time"));
        assert!(is_loopback_url("http://127.0.0.1:3000/x"));
        assert!(!is_loopback_url("https://linkly.example.com/api/admin/clicks-over-time"));
        assert!(!is_loopback_url("not a url"));
    }

    #[tokio::test]
    async fn test_sends_bearer_token() {
        let (url, request) = serve_once(200, r#"[{"_id":"2024-01-01","clicks":5}]"#).await;
        let client = AnalyticsClient::new(&config_for(url)).expect("client");

        let buckets = client.get_clicks_over_time().await.expect("fetch should succeed");
        assert_eq!(buckets.len(), 1);

        let raw_request = request.await.expect("server task").to_lowercase();
        assert!(raw_request.starts_with("get "));
        assert!(raw_request.contains("authorization: bearer admin-jwt"));
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let (url, _request) = serve_once(403, r#"{"error":"Access denied"}"#).await;
        let client = AnalyticsClient::new(&config_for(url)).expect("client");

        match client.get_clicks_over_time().await {
            Err(ChartError::Api { status, body }) => {
                assert_eq!(status, 403);
                assert!(body.contains("Access denied"));
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let url = closed_port_url().await;
        let client = AnalyticsClient::new(&config_for(url)).expect("client");

        assert!(matches!(
            client.get_clicks_over_time().await,
            Err(ChartError::Connectivity(_))
        ));
    }
}
