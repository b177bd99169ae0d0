//! Admin server client implementation.
//!
//! This module provides the HTTP client used to fetch table documents and
//! submit admin forms. It handles request/response processing, error
//! mapping, and retry logic for idempotent requests.

use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode};
use tracing::{debug, info, instrument, warn};

use super::error::{ApiError, Result};
use super::types::{FormPayload, SubmitResponse};
use crate::config::ServerConfig;
use crate::table::TableDocument;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum number of attempts for GET requests.
const MAX_RETRIES: u32 = 3;

/// Base delay between retries in milliseconds.
const RETRY_DELAY_MS: u64 = 500;

/// The admin server client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct AdminClient {
    /// The HTTP client.
    client: Client,
    /// The server base URL, without a trailing slash.
    base_url: String,
}

impl AdminClient {
    /// Create a new client for the configured server.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(server: &ServerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(ApiError::Network)?;

        let base_url = normalize_base_url(&server.base_url);
        info!(base_url = %base_url, "Admin client created");

        Ok(Self { client, base_url })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the absolute URL for a server path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch a table document from the server.
    ///
    /// Retries transient failures with exponential backoff.
    #[instrument(skip(self))]
    pub async fn fetch_table(&self, path: &str) -> Result<TableDocument> {
        let url = self.url(path);
        let mut attempts = 0;

        loop {
            attempts += 1;
            debug!("Request attempt {}/{}", attempts, MAX_RETRIES);

            match self.execute_get::<TableDocument>(&url).await {
                Ok(mut document) => {
                    document.fill_missing_ids();
                    debug!(rows = document.rows.len(), "Fetched table");
                    return Ok(document);
                }
                Err(e) if e.is_transient() && attempts < MAX_RETRIES => {
                    let delay = calculate_retry_delay(attempts);
                    warn!(
                        "Request failed (attempt {}), retrying in {}ms: {}",
                        attempts, delay, e
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Submit a form to an endpoint and read the `{success}` reply.
    ///
    /// Submissions are never retried. A successful status whose body is not
    /// JSON is an [`ApiError::InvalidResponse`]; a reply without `success`
    /// counts as rejected.
    #[instrument(skip(self, form), fields(fields = form.fields().len()))]
    pub async fn submit(&self, endpoint: &str, form: &FormPayload) -> Result<SubmitResponse> {
        let body = self.post_form(endpoint, form).await?;
        let reply = parse_submit_body(endpoint, &body)?;
        info!(success = reply.success, "Form submitted");
        Ok(reply)
    }

    /// Post a form where a successful status is the whole answer.
    ///
    /// The body is ignored, so a redirect to an HTML page is accepted.
    #[instrument(skip(self, form), fields(fields = form.fields().len()))]
    pub async fn post(&self, endpoint: &str, form: &FormPayload) -> Result<SubmitResponse> {
        self.post_form(endpoint, form).await?;
        info!("Form posted");
        Ok(SubmitResponse::ok())
    }

    /// Send an url-encoded POST and return the body of a 2xx response.
    async fn post_form(&self, endpoint: &str, form: &FormPayload) -> Result<String> {
        let url = self.url(endpoint);
        debug!(url = %url, "Submitting form");

        let response = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .form(form.fields())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            debug!("Error response body: {}", body);
            return Err(error_from_response(status, endpoint, &body));
        }
        Ok(body)
    }

    /// Execute a single GET request and parse the JSON body.
    async fn execute_get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        handle_response(response).await
    }
}

/// Handle the HTTP response, checking for errors and parsing JSON.
async fn handle_response<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let url = response.url().path().to_string();

    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
    } else {
        let body = response.text().await.unwrap_or_default();
        debug!("Error response body: {}", body);
        Err(error_from_response(status, &url, &body))
    }
}

/// Create an error from a failed response, preferring the server's message.
fn error_from_response(status: StatusCode, context: &str, body: &str) -> ApiError {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = json.get("message").and_then(|m| m.as_str()) {
            return ApiError::from_status(status, message);
        }
    }
    ApiError::from_status(status, context)
}

/// Interpret the body of a successful submission.
fn parse_submit_body(endpoint: &str, body: &str) -> Result<SubmitResponse> {
    serde_json::from_str::<SubmitResponse>(body).map_err(|e| {
        ApiError::InvalidResponse(format!("{} did not reply with JSON: {}", endpoint, e))
    })
}

/// Calculate retry delay with exponential backoff.
fn calculate_retry_delay(attempt: u32) -> u64 {
    RETRY_DELAY_MS * 2u64.pow(attempt - 1)
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}. This is insecure for production use.", url);
    }

    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_client() -> AdminClient {
        // Port 9 (discard) is closed on test machines, so requests fail fast
        AdminClient::new(&ServerConfig {
            base_url: "http://127.0.0.1:9/".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_normalize_base_url_removes_trailing_slash() {
        assert_eq!(
            normalize_base_url("https://admin.example.com/"),
            "https://admin.example.com"
        );
    }

    #[test]
    fn test_normalize_base_url_preserves_path() {
        assert_eq!(
            normalize_base_url("https://example.com/curb///"),
            "https://example.com/curb"
        );
    }

    #[test]
    fn test_url_joins_path() {
        let client = local_client();
        assert_eq!(client.base_url(), "http://127.0.0.1:9");
        assert_eq!(client.url("/build-route"), "http://127.0.0.1:9/build-route");
    }

    #[test]
    fn test_parse_submit_body_json() {
        let reply = parse_submit_body(
            "/build-route",
            r#"{"success": false, "message": "Issue saving route"}"#,
        )
        .unwrap();
        assert!(!reply.success);

        let reply = parse_submit_body("/build-route", r#"{"success": true}"#).unwrap();
        assert!(reply.success);
    }

    #[test]
    fn test_parse_submit_body_without_success_is_rejected() {
        let reply = parse_submit_body("/build-route", r#"{"message": "Issue saving route"}"#)
            .unwrap();
        assert!(!reply.success);
        assert_eq!(reply.message.as_deref(), Some("Issue saving route"));
    }

    #[test]
    fn test_parse_submit_body_html_is_invalid_response() {
        let result = parse_submit_body("/build-route", "<html><title>Login</title></html>");
        assert!(matches!(result, Err(ApiError::InvalidResponse(_))));
        let result = parse_submit_body("/build-route", "");
        assert!(matches!(result, Err(ApiError::InvalidResponse(_))));
    }

    #[test]
    fn test_error_from_response_prefers_server_message() {
        let err = error_from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "/build-route",
            r#"{"success": false, "message": "Issue saving route"}"#,
        );
        assert!(err.to_string().contains("Issue saving route"));

        let err = error_from_response(StatusCode::NOT_FOUND, "/build-route", "<html/>");
        assert!(matches!(err, ApiError::NotFound(ref p) if p == "/build-route"));
    }

    #[test]
    fn test_retry_delay_exponential() {
        assert_eq!(calculate_retry_delay(1), 500);
        assert_eq!(calculate_retry_delay(2), 1000);
        assert_eq!(calculate_retry_delay(3), 2000);
    }

    #[test]
    fn test_submit_connection_refused_is_network_error() {
        let client = local_client();
        let form = FormPayload::new().field("route_name", "North");
        let result = tokio_test::block_on(client.submit("/build-route", &form));
        assert!(matches!(result, Err(ApiError::Network(_))));
    }

    #[test]
    fn test_fetch_table_gives_up_after_retries() {
        let client = local_client();
        let result = tokio_test::block_on(client.fetch_table("/admin/addresses.json"));
        assert!(matches!(result, Err(ApiError::Network(_))));
    }

    #[test]
    fn test_post_connection_refused_is_network_error() {
        let client = local_client();
        let result = tokio_test::block_on(client.post("/mark_complete/4", &FormPayload::new()));
        assert!(matches!(result, Err(ApiError::Network(_))));
    }
}
