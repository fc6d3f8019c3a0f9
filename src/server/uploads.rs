// Multipart upload buffering
// Author: kelexine (https://github.com/kelexine)

use crate::cosmos::FilePayload;
use crate::error::{IndexError, Result};
use axum::extract::{multipart::MultipartRejection, Multipart};
use std::collections::HashMap;
use tracing::debug;

/// A fully buffered multipart form.
#[derive(Debug, Default)]
pub struct UploadForm {
    /// Plain text fields by name; a repeated name keeps the last value.
    pub fields: HashMap<String, String>,
    /// File parts in upload order.
    pub files: Vec<FilePayload>,
}

impl UploadForm {
    /// Read every part of the request into memory.
    ///
    /// Any part carrying a filename is treated as a file, whatever its field
    /// name. Browsers submit an empty part with an empty filename when no
    /// file was picked; those are dropped.
    pub async fn read(multipart: std::result::Result<Multipart, MultipartRejection>) -> Result<Self> {
        let mut multipart = multipart
            .map_err(|e| IndexError::InvalidRequest(format!("Expected a multipart form: {}", e.body_text())))?;

        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| IndexError::InvalidRequest(format!("Malformed multipart body: {}", e.body_text())))?
        {
            let name = field.name().unwrap_or_default().to_string();

            match field.file_name().map(str::to_string) {
                Some(filename) => {
                    let content = field.bytes().await.map_err(|e| {
                        IndexError::InvalidRequest(format!("Failed to read file {}: {}", filename, e.body_text()))
                    })?;

                    if filename.is_empty() && content.is_empty() {
                        continue;
                    }

                    let payload = FilePayload::new(filename, content);
                    debug!(
                        "Buffered upload {} ({} bytes, sha256={})",
                        payload.filename,
                        payload.content.len(),
                        payload.sha256()
                    );
                    form.files.push(payload);
                }
                None => {
                    let value = field.text().await.map_err(|e| {
                        IndexError::InvalidRequest(format!("Failed to read field {}: {}", name, e.body_text()))
                    })?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    /// Return a required, non-blank text field exactly as submitted.
    pub fn required_field(&self, name: &str) -> Result<&str> {
        match self.fields.get(name).map(String::as_str) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            Some(_) => Err(IndexError::InvalidRequest(format!("Field must not be empty: {}", name))),
            None => Err(IndexError::InvalidRequest(format!("Missing required field: {}", name))),
        }
    }
}
