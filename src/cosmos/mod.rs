// Cosmos platform client module
// Author: kelexine (https://github.com/kelexine)

mod client;

pub use client::CosmosClient;

use crate::error::{IndexError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// A named binary blob buffered from an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    pub filename: String,
    pub content: Bytes,
}

impl FilePayload {
    pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Hex-encoded SHA-256 of the content.
    pub fn sha256(&self) -> String {
        hex::encode(Sha256::digest(&self.content))
    }
}

/// Which files of an index a question is answered from.
///
/// Serialized as the string `"all"` or as an array of file hashes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFileScope", into = "RawFileScope")]
pub enum FileScope {
    #[default]
    All,
    Hashes(Vec<String>),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawFileScope {
    Keyword(String),
    Hashes(Vec<String>),
}

impl TryFrom<RawFileScope> for FileScope {
    type Error = String;

    fn try_from(raw: RawFileScope) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawFileScope::Keyword(k) if k == "all" => Ok(FileScope::All),
            RawFileScope::Keyword(k) => Err(format!(
                "file scope must be \"all\" or a list of file hashes, got \"{}\"",
                k
            )),
            RawFileScope::Hashes(hashes) => Ok(FileScope::Hashes(hashes)),
        }
    }
}

impl From<FileScope> for RawFileScope {
    fn from(scope: FileScope) -> Self {
        match scope {
            FileScope::All => RawFileScope::Keyword("all".to_string()),
            FileScope::Hashes(hashes) => RawFileScope::Hashes(hashes),
        }
    }
}

/// A question asked against one index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskRequest {
    pub question: String,
    pub output_language: String,
    pub active_files: FileScope,
}

/// The set of index operations offered by the Cosmos platform.
///
/// Every method performs exactly one remote call and returns the platform's
/// JSON response untouched.
#[async_trait]
pub trait IndexApi: Send + Sync {
    async fn list_indexes(&self) -> Result<Value>;

    async fn index_details(&self, index_uuid: &str) -> Result<Value>;

    async fn create_index(&self, name: &str, files: Vec<FilePayload>) -> Result<Value>;

    async fn ask(&self, index_uuid: &str, request: AskRequest) -> Result<Value>;

    async fn embed_index(&self, index_uuid: &str) -> Result<Value>;

    async fn add_files(&self, index_uuid: &str, files: Vec<FilePayload>) -> Result<Value>;

    async fn delete_files(&self, index_uuid: &str, files_hashes: Vec<String>) -> Result<Value>;

    async fn delete_index(&self, index_uuid: &str) -> Result<Value>;

    async fn restore_index(&self, index_uuid: &str) -> Result<Value>;

    async fn rename_index(&self, index_uuid: &str, name: &str) -> Result<Value>;

    /// Call the platform health endpoint.
    async fn check_health(&self) -> Result<Value> {
        Err(IndexError::Remote("health check not supported".to_string()))
    }
}
