//! Media upload adapter: converts a local file into a durable hosted URL.
//!
//! Uploads are issued before the owning form's mutation; a failure aborts the
//! whole submission. A sibling upload that already succeeded in the same
//! submission is not rolled back.

use crate::config::MediaConfig;
use crate::http;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("transport: {0}")]
    Transport(#[from] curl::Error),
    #[error("building upload form: {0}")]
    Form(#[from] curl::FormError),
    #[error("media host returned HTTP {0}")]
    Status(u32),
    #[error("unexpected upload response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Seam for forms that attach files; lets tests observe upload calls.
pub trait MediaUpload {
    /// Upload a local file, returning its public URL.
    fn upload(&self, file: &Path) -> Result<String, UploadError>;
}

/// Unsigned multipart upload to the configured media host.
#[derive(Debug, Clone)]
pub struct CloudinaryUploader {
    endpoint: String,
    upload_preset: String,
}

impl CloudinaryUploader {
    pub fn new(cfg: &MediaConfig) -> Self {
        Self {
            endpoint: format!(
                "{}/v1_1/{}/image/upload",
                cfg.base_url.trim_end_matches('/'),
                cfg.cloud_name
            ),
            upload_preset: cfg.upload_preset.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl MediaUpload for CloudinaryUploader {
    fn upload(&self, file: &Path) -> Result<String, UploadError> {
        let mut form = curl::easy::Form::new();
        form.part("file").file(file).add()?;
        form.part("upload_preset")
            .contents(self.upload_preset.as_bytes())
            .add()?;

        let response = http::post_form(&self.endpoint, form, &[])?;
        if !response.is_success() {
            tracing::warn!("media upload failed with HTTP {}", response.status);
            return Err(UploadError::Status(response.status));
        }
        let parsed: UploadResponse = response.json()?;
        Ok(parsed.secure_url)
    }
}
