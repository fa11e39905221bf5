//! HTTP transport for the ml-notes API.
//!
//! Every outcome — connect failure, timeout, non-2xx status, unparsable
//! body — is normalized into an [`ApiResult`]; callers never see a raised
//! error and can branch on `success` uniformly. Retry policy, if any,
//! belongs to the caller.

use mlnotes_types::ApiResult;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            timeout,
        }
    }

    /// Join `path` onto the base URL with exactly one separating slash,
    /// whatever slashes either side carries.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> ApiResult<Value> {
        let req = self
            .client
            .get(self.endpoint(path))
            .query(query)
            .timeout(self.timeout);
        self.execute(path, req).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Value> {
        self.post_with_timeout(path, body, self.timeout).await
    }

    /// POST with a caller-chosen timeout. Bulk AI operations (auto-tag
    /// batches) take time proportional to the batch size and use a longer
    /// budget than ordinary calls.
    pub async fn post_with_timeout<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        timeout: Duration,
    ) -> ApiResult<Value> {
        let req = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .timeout(timeout);
        self.execute(path, req).await
    }

    async fn execute(&self, path: &str, req: reqwest::RequestBuilder) -> ApiResult<Value> {
        log::debug!("[ml-notes] request: {}", path);

        let resp = match req.send().await {
            Ok(r) => r,
            Err(e) => return ApiResult::err(format!("Request to {} failed: {}", path, e)),
        };

        let status = resp.status();
        let body = match resp.text().await {
            Ok(b) => b,
            Err(e) => {
                return ApiResult::err(format!("Failed to read response from {}: {}", path, e))
            }
        };

        // The service wraps domain errors in its own {success,error}
        // envelope under a non-2xx status. Pass those through unchanged so
        // the remote message reaches the caller.
        if let Ok(parsed) = serde_json::from_str::<ApiResult<Value>>(&body) {
            if status.is_success() || !parsed.success {
                return parsed;
            }
        }

        if !status.is_success() {
            return ApiResult::err(format!("HTTP {} from {}: {}", status, path, body));
        }

        ApiResult::err(format!("Unparsable response from {}: {}", path, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Duration::from_secs(30))
    }

    #[test]
    fn endpoint_joins_with_single_slash() {
        let expected = "http://localhost:8080/api/v1/notes";
        assert_eq!(client("http://localhost:8080/api/v1").endpoint("notes"), expected);
        assert_eq!(client("http://localhost:8080/api/v1/").endpoint("notes"), expected);
        assert_eq!(client("http://localhost:8080/api/v1").endpoint("/notes"), expected);
        assert_eq!(client("http://localhost:8080/api/v1/").endpoint("/notes"), expected);
    }

    #[tokio::test]
    async fn connection_failure_returns_failed_result() {
        // Port 1 is never bound; the connect is refused locally, so no
        // external network is involved.
        let client = ApiClient::new("http://127.0.0.1:1", Duration::from_secs(2));
        let res = client.get("/health", &[]).await;
        assert!(!res.success);
        assert!(res.data.is_none());
        assert!(res.error.as_deref().is_some_and(|e| !e.is_empty()));
    }

    #[test]
    fn remote_error_envelope_survives_parsing() {
        let parsed: ApiResult<Value> =
            serde_json::from_str(r#"{"success": false, "error": "note not found"}"#).unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.error_message(), "note not found");
    }
}
