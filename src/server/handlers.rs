// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use super::uploads::UploadForm;
use crate::cosmos::{AskRequest, FileScope};
use crate::error::{IndexError, Result};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub api_server: String,
    pub remote: HealthCheck,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Degraded,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

/// Body of `POST /files/index/{id}/ask`.
#[derive(Debug, Deserialize)]
pub struct AskBody {
    pub question: String,
    #[serde(default = "default_output_language")]
    pub output_language: String,
    #[serde(default, alias = "active_files_hashes")]
    pub active_files: FileScope,
}

/// Body of `DELETE /files/index/{id}/delete_files`: an object or a bare list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DeleteFilesBody {
    Wrapped { files_hashes: Vec<String> },
    Bare(Vec<String>),
}

impl DeleteFilesBody {
    fn into_hashes(self) -> Vec<String> {
        match self {
            DeleteFilesBody::Wrapped { files_hashes } => files_hashes,
            DeleteFilesBody::Bare(hashes) => hashes,
        }
    }
}

/// Body of `PUT /files/index/{id}/rename`.
#[derive(Debug, Deserialize)]
pub struct RenameBody {
    pub name: String,
}

fn default_output_language() -> String {
    "en".to_string()
}

/// Deserialize a JSON body, reporting failures as invalid input.
fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    if body.is_empty() {
        return Err(IndexError::InvalidRequest("Missing JSON body".to_string()));
    }
    serde_json::from_slice(body)
        .map_err(|e| IndexError::InvalidRequest(format!("JSON deserialization error: {}", e)))
}

fn require_non_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(IndexError::InvalidRequest(format!("Field must not be empty: {}", field)));
    }
    Ok(())
}

/// Health check: service version plus a live check of the platform.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, remote) = match state.client.check_health().await {
        Ok(body) => (
            HealthStatus::Ok,
            HealthCheck {
                status: "ok".to_string(),
                message: body.to_string(),
            },
        ),
        Err(e) => (
            HealthStatus::Degraded,
            HealthCheck {
                status: "error".to_string(),
                message: e.to_string(),
            },
        ),
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        api_server: state.config.cosmos.api_server.clone(),
        remote,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Prometheus text exposition
pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        crate::metrics::gather_metrics(),
    )
}

/// GET /files/index/list
pub async fn list_indexes_handler(State(state): State<AppState>) -> Result<Json<Value>> {
    debug!("Listing indexes");
    Ok(Json(state.client.list_indexes().await.map_err(IndexError::into_remote)?))
}

/// GET /files/index/{id}/details
pub async fn index_details_handler(
    State(state): State<AppState>,
    Path(index_uuid): Path<String>,
) -> Result<Json<Value>> {
    info!("Fetching details: index_uuid={}", index_uuid);
    Ok(Json(state.client.index_details(&index_uuid).await.map_err(IndexError::into_remote)?))
}

/// POST /files/index/create (multipart: `name` plus file parts)
pub async fn create_index_handler(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>> {
    let form = UploadForm::read(multipart).await?;
    let name = form.required_field("name")?.to_string();

    info!("Creating index: name={}, files={}", name, form.files.len());
    Ok(Json(state.client.create_index(&name, form.files).await.map_err(IndexError::into_remote)?))
}

/// POST /files/index/{id}/ask
pub async fn ask_handler(
    State(state): State<AppState>,
    Path(index_uuid): Path<String>,
    body: Bytes,
) -> Result<Json<Value>> {
    let body: AskBody = parse_json(&body)?;
    require_non_blank("question", &body.question)?;

    info!(
        "Asking index: index_uuid={}, output_language={}, active_files={:?}",
        index_uuid, body.output_language, body.active_files
    );

    let request = AskRequest {
        question: body.question,
        output_language: body.output_language,
        active_files: body.active_files,
    };
    Ok(Json(state.client.ask(&index_uuid, request).await.map_err(IndexError::into_remote)?))
}

/// POST /files/index/{id}/embed
pub async fn embed_index_handler(
    State(state): State<AppState>,
    Path(index_uuid): Path<String>,
) -> Result<Json<Value>> {
    info!("Embedding index: index_uuid={}", index_uuid);
    Ok(Json(state.client.embed_index(&index_uuid).await.map_err(IndexError::into_remote)?))
}

/// POST /files/index/{id}/add_files (multipart: file parts)
pub async fn add_files_handler(
    State(state): State<AppState>,
    Path(index_uuid): Path<String>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>> {
    let form = UploadForm::read(multipart).await?;

    info!("Adding files: index_uuid={}, files={}", index_uuid, form.files.len());
    Ok(Json(state.client.add_files(&index_uuid, form.files).await.map_err(IndexError::into_remote)?))
}

/// DELETE /files/index/{id}/delete_files
pub async fn delete_files_handler(
    State(state): State<AppState>,
    Path(index_uuid): Path<String>,
    body: Bytes,
) -> Result<Json<Value>> {
    let files_hashes = parse_json::<DeleteFilesBody>(&body)?.into_hashes();
    if files_hashes.is_empty() {
        return Err(IndexError::InvalidRequest("files_hashes must not be empty".to_string()));
    }

    info!("Deleting files: index_uuid={}, files_hashes={:?}", index_uuid, files_hashes);
    Ok(Json(state.client.delete_files(&index_uuid, files_hashes).await.map_err(IndexError::into_remote)?))
}

/// DELETE /files/index/{id}/delete
pub async fn delete_index_handler(
    State(state): State<AppState>,
    Path(index_uuid): Path<String>,
) -> Result<Json<Value>> {
    info!("Deleting index: index_uuid={}", index_uuid);
    Ok(Json(state.client.delete_index(&index_uuid).await.map_err(IndexError::into_remote)?))
}

/// PUT /files/index/{id}/restore
pub async fn restore_index_handler(
    State(state): State<AppState>,
    Path(index_uuid): Path<String>,
) -> Result<Json<Value>> {
    info!("Restoring index: index_uuid={}", index_uuid);
    Ok(Json(state.client.restore_index(&index_uuid).await.map_err(IndexError::into_remote)?))
}

/// PUT /files/index/{id}/rename
pub async fn rename_index_handler(
    State(state): State<AppState>,
    Path(index_uuid): Path<String>,
    body: Bytes,
) -> Result<Json<Value>> {
    let body: RenameBody = parse_json(&body)?;
    require_non_blank("name", &body.name)?;

    info!("Renaming index: index_uuid={}, name={}", index_uuid, body.name);
    Ok(Json(
        state
            .client
            .rename_index(&index_uuid, &body.name)
            .await
            .map_err(IndexError::into_remote)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_body_defaults() {
        let body: AskBody = parse_json(br#"{"question": "What is this?"}"#).unwrap();
        assert_eq!(body.output_language, "en");
        assert_eq!(body.active_files, FileScope::All);
    }

    #[test]
    fn test_ask_body_accepts_hash_alias() {
        let body: AskBody =
            parse_json(br#"{"question": "q", "active_files_hashes": ["h1", "h2"]}"#).unwrap();
        assert_eq!(
            body.active_files,
            FileScope::Hashes(vec!["h1".to_string(), "h2".to_string()])
        );
    }

    #[test]
    fn test_ask_body_requires_question() {
        let result: Result<AskBody> = parse_json(br#"{"output_language": "fr"}"#);
        assert!(matches!(result, Err(IndexError::InvalidRequest(_))));
    }

    #[test]
    fn test_delete_files_body_shapes() {
        let wrapped: DeleteFilesBody = parse_json(br#"{"files_hashes": ["a"]}"#).unwrap();
        assert_eq!(wrapped.into_hashes(), vec!["a".to_string()]);

        let bare: DeleteFilesBody = parse_json(br#"["a", "b"]"#).unwrap();
        assert_eq!(bare.into_hashes(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_empty_body_is_invalid() {
        let result: Result<RenameBody> = parse_json(b"");
        assert!(matches!(result, Err(IndexError::InvalidRequest(_))));
    }
}
