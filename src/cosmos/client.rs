// Cosmos platform HTTP client
// Author: kelexine (https://github.com/kelexine)

use super::{AskRequest, FilePayload, IndexApi};
use crate::config::CosmosConfig;
use crate::error::{IndexError, Result};
use crate::utils::logging::sanitize;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tracing::{debug, error};
use zeroize::Zeroizing;

/// Client for the Cosmos platform file-index API.
///
/// Authenticates every request with the configured API key and hands the
/// platform's JSON responses back unchanged. Errors are never retried.
pub struct CosmosClient {
    http_client: Client,
    base_url: String,
    api_key: Zeroizing<String>,
}

impl CosmosClient {
    /// Create a new client bound to `{api_key, api_server}`.
    ///
    /// Fails with [`IndexError::Config`] when the API key is missing or
    /// blank; nothing touches the network in that case.
    pub fn new(config: &CosmosConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            let err = IndexError::Config("COSMOS_API_KEY is missing or empty".to_string());
            error!("{}", err);
            return Err(err);
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .use_rustls_tls()
            .build()
            .map_err(|e| {
                let err = IndexError::ClientInit(format!("Failed to create HTTP client: {}", e));
                error!("{}", err);
                err
            })?;

        debug!("Created Cosmos client for {}", config.api_server);

        Ok(Self {
            http_client,
            base_url: config.api_server.trim_end_matches('/').to_string(),
            api_key: Zeroizing::new(config.api_key.clone()),
        })
    }

    /// Get the platform base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn index_op(&self, op: &str) -> String {
        self.endpoint(&format!("files/index/{}", op))
    }

    async fn post_json(&self, op: &str, body: Value) -> Result<Value> {
        let request = self.http_client.post(self.index_op(op)).json(&body);
        self.send(op, request).await
    }

    async fn post_multipart(&self, op: &str, form: Form) -> Result<Value> {
        let request = self.http_client.post(self.index_op(op)).multipart(form);
        self.send(op, request).await
    }

    async fn send(&self, op: &str, request: RequestBuilder) -> Result<Value> {
        debug!("Calling Cosmos operation: {}", op);
        let start = Instant::now();

        let result = self.execute(request).await;

        let outcome = if result.is_ok() { "success" } else { "error" };
        crate::metrics::record_remote_call(op, outcome, start.elapsed().as_secs_f64());

        if let Err(e) = &result {
            error!("Cosmos operation {} failed: {}", op, e);
        }
        result
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Value> {
        let response = request
            .header("apikey", self.api_key.as_str())
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            let message = Self::extract_error_message(&response_text)
                .unwrap_or_else(|| response_text.clone());
            let message = sanitize(&message, &self.api_key);
            return Err(IndexError::Remote(format!("HTTP {}: {}", status.as_u16(), message)));
        }

        if response_text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&response_text)?)
    }

    /// Extract error message from a platform error body.
    ///
    /// Understands `{"error": {"error_message", "details"}}` as well as
    /// `{"detail": ...}` and `{"message": ...}`.
    fn extract_error_message(response_text: &str) -> Option<String> {
        let body: Value = serde_json::from_str(response_text).ok()?;

        if let Some(error) = body.get("error") {
            let message = error.get("error_message").and_then(Value::as_str);
            let details = error.get("details").and_then(Value::as_str);
            match (message, details) {
                (Some(m), Some(d)) => return Some(format!("{} ({})", m, d)),
                (Some(m), None) => return Some(m.to_string()),
                (None, Some(d)) => return Some(d.to_string()),
                (None, None) => {
                    if let Some(s) = error.as_str() {
                        return Some(s.to_string());
                    }
                }
            }
        }

        ["detail", "message"]
            .iter()
            .find_map(|key| body.get(*key))
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
    }

    fn files_form(mut form: Form, files: Vec<FilePayload>) -> Form {
        for file in files {
            let part = Part::bytes(file.content.to_vec()).file_name(file.filename);
            form = form.part("files", part);
        }
        form
    }
}

#[async_trait]
impl IndexApi for CosmosClient {
    async fn list_indexes(&self) -> Result<Value> {
        self.post_json("list", json!({})).await
    }

    async fn index_details(&self, index_uuid: &str) -> Result<Value> {
        self.post_json("details", json!({ "index_uuid": index_uuid }))
            .await
    }

    async fn create_index(&self, name: &str, files: Vec<FilePayload>) -> Result<Value> {
        let form = Self::files_form(Form::new().text("name", name.to_string()), files);
        self.post_multipart("create", form).await
    }

    async fn ask(&self, index_uuid: &str, request: AskRequest) -> Result<Value> {
        let body = json!({
            "index_uuid": index_uuid,
            "question": request.question,
            "output_language": request.output_language,
            "active_files_hashes": request.active_files,
        });
        self.post_json("ask", body).await
    }

    async fn embed_index(&self, index_uuid: &str) -> Result<Value> {
        self.post_json("embed", json!({ "index_uuid": index_uuid }))
            .await
    }

    async fn add_files(&self, index_uuid: &str, files: Vec<FilePayload>) -> Result<Value> {
        let form = Self::files_form(Form::new().text("index_uuid", index_uuid.to_string()), files);
        self.post_multipart("add_files", form).await
    }

    async fn delete_files(&self, index_uuid: &str, files_hashes: Vec<String>) -> Result<Value> {
        let body = json!({ "index_uuid": index_uuid, "files_hashes": files_hashes });
        self.post_json("delete_files", body).await
    }

    async fn delete_index(&self, index_uuid: &str) -> Result<Value> {
        self.post_json("delete", json!({ "index_uuid": index_uuid }))
            .await
    }

    async fn restore_index(&self, index_uuid: &str) -> Result<Value> {
        self.post_json("restore", json!({ "index_uuid": index_uuid }))
            .await
    }

    async fn rename_index(&self, index_uuid: &str, name: &str) -> Result<Value> {
        let body = json!({ "index_uuid": index_uuid, "name": name });
        self.post_json("rename", body).await
    }

    async fn check_health(&self) -> Result<Value> {
        // Short timeout for health checks
        let request = self
            .http_client
            .get(self.endpoint("status/health"))
            .timeout(Duration::from_secs(5));
        self.send("health", request).await
    }
}
