//! Multipart upload staging
//!
//! Publish and thumbnail requests arrive as multipart forms. Text parts are
//! collected as strings; file parts are streamed into temporary files so the
//! media host can read them from disk.

use std::collections::HashMap;
use std::path::Path;

use axum::extract::multipart::Field;
use axum::extract::Multipart;
use tokio::io::AsyncWriteExt;
use vidnest_core::AppError;
use vidnest_storage::StagedFile;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Text fields and staged files of one multipart request.
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    files: HashMap<String, StagedFile>,
}

impl UploadForm {
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Staged file for `name`, if the client sent a non-empty one.
    pub fn file(&self, name: &str) -> Option<&StagedFile> {
        self.files.get(name)
    }
}

/// Per-field size ceilings in bytes. Fields not listed use `default_max`.
#[derive(Debug, Clone)]
pub struct UploadLimits {
    per_field: Vec<(&'static str, usize)>,
    default_max: usize,
}

impl UploadLimits {
    pub fn new(default_max: usize) -> Self {
        Self {
            per_field: Vec::new(),
            default_max,
        }
    }

    pub fn with_field(mut self, name: &'static str, max: usize) -> Self {
        self.per_field.push((name, max));
        self
    }

    fn max_for(&self, name: &str) -> usize {
        self.per_field
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, max)| *max)
            .unwrap_or(self.default_max)
    }
}

/// Drain the multipart stream into an [`UploadForm`].
///
/// A file part that carries no bytes (what browsers send for an empty file
/// input) is treated as absent.
pub async fn read_upload_form(
    mut multipart: Multipart,
    limits: &UploadLimits,
) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if field.file_name().is_some() {
            let max = limits.max_for(&name);
            if let Some(staged) = stage_field(field, max).await? {
                form.files.insert(name, staged);
            }
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read field {}: {}", name, e)))?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

async fn stage_field(mut field: Field<'_>, max_size: usize) -> Result<Option<StagedFile>, AppError> {
    let file_name = field
        .file_name()
        .and_then(|n| Path::new(n).file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    let content_type = field
        .content_type()
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();

    let temp = tempfile::NamedTempFile::new()?;
    let mut out = tokio::fs::File::from_std(temp.reopen()?);
    let mut size: usize = 0;

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?
    {
        size += chunk.len();
        validate_file_size(size, max_size)?;
        out.write_all(&chunk).await?;
    }
    out.flush().await?;

    if size == 0 {
        return Ok(None);
    }

    tracing::debug!(file_name = %file_name, size_bytes = size, "Upload staged");
    Ok(Some(StagedFile::new(temp, file_name, content_type, size as u64)))
}

/// Validate file size
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(AppError::PayloadTooLarge(format!(
            "File size exceeds maximum allowed size of {} MB",
            max_size / 1024 / 1024
        )));
    }
    Ok(())
}
