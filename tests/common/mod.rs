// Shared test helpers: a recording IndexApi double and request builders
// Author: kelexine (https://github.com/kelexine)

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use cosmos_index::config::AppConfig;
use cosmos_index::cosmos::{AskRequest, FilePayload, IndexApi};
use cosmos_index::error::{IndexError, Result};
use cosmos_index::server::create_router;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// One recorded remote call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Details(String),
    Create { name: String, files: Vec<FilePayload> },
    Ask { index_uuid: String, request: AskRequest },
    Embed(String),
    AddFiles { index_uuid: String, files: Vec<FilePayload> },
    DeleteFiles { index_uuid: String, files_hashes: Vec<String> },
    Delete(String),
    Restore(String),
    Rename { index_uuid: String, name: String },
    Health,
}

type FailureFn = Box<dyn Fn() -> IndexError + Send + Sync>;

/// Records every call and answers with a fixed value or a fixed error.
pub struct RecordingClient {
    calls: Mutex<Vec<Call>>,
    response: Value,
    failure: Option<FailureFn>,
}

impl RecordingClient {
    pub fn returning(response: Value) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            response,
            failure: None,
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        let message = message.to_string();
        Self::failing_with(move || IndexError::Remote(message.clone()))
    }

    /// Fail every call with whatever error `make_error` builds.
    pub fn failing_with(make_error: impl Fn() -> IndexError + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            response: Value::Null,
            failure: Some(Box::new(make_error)),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<Value> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some(make_error) => Err(make_error()),
            None => Ok(self.response.clone()),
        }
    }
}

#[async_trait]
impl IndexApi for RecordingClient {
    async fn list_indexes(&self) -> Result<Value> {
        self.record(Call::List)
    }

    async fn index_details(&self, index_uuid: &str) -> Result<Value> {
        self.record(Call::Details(index_uuid.to_string()))
    }

    async fn create_index(&self, name: &str, files: Vec<FilePayload>) -> Result<Value> {
        self.record(Call::Create {
            name: name.to_string(),
            files,
        })
    }

    async fn ask(&self, index_uuid: &str, request: AskRequest) -> Result<Value> {
        self.record(Call::Ask {
            index_uuid: index_uuid.to_string(),
            request,
        })
    }

    async fn embed_index(&self, index_uuid: &str) -> Result<Value> {
        self.record(Call::Embed(index_uuid.to_string()))
    }

    async fn add_files(&self, index_uuid: &str, files: Vec<FilePayload>) -> Result<Value> {
        self.record(Call::AddFiles {
            index_uuid: index_uuid.to_string(),
            files,
        })
    }

    async fn delete_files(&self, index_uuid: &str, files_hashes: Vec<String>) -> Result<Value> {
        self.record(Call::DeleteFiles {
            index_uuid: index_uuid.to_string(),
            files_hashes,
        })
    }

    async fn delete_index(&self, index_uuid: &str) -> Result<Value> {
        self.record(Call::Delete(index_uuid.to_string()))
    }

    async fn restore_index(&self, index_uuid: &str) -> Result<Value> {
        self.record(Call::Restore(index_uuid.to_string()))
    }

    async fn rename_index(&self, index_uuid: &str, name: &str) -> Result<Value> {
        self.record(Call::Rename {
            index_uuid: index_uuid.to_string(),
            name: name.to_string(),
        })
    }

    async fn check_health(&self) -> Result<Value> {
        self.record(Call::Health)
    }
}

/// Build the router around a recording double.
pub fn test_app(client: Arc<RecordingClient>) -> Router {
    create_router(AppConfig::default(), client)
}

/// A sample platform response.
pub fn sample_index() -> Value {
    json!({
        "data": {
            "index_uuid": "7d1c2b1e-4a4f-4a83-9d7e-3c1a2f0e9b10",
            "name": "docs",
            "vectorized": false,
            "status": "created",
            "storage": {"size_bytes": 5, "size_mb": 0.0, "num_files": 1}
        },
        "status": "success"
    })
}

pub const BOUNDARY: &str = "X-COSMOS-TEST-BOUNDARY";

/// Encode text fields and (filename, content) file parts as multipart/form-data.
pub fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    for (filename, content) in files {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"files\"; filename=\"{}\"\r\n",
                filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(method: &str, uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1_000_000)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
