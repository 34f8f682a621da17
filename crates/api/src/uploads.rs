//! Poster file storage on the local filesystem.
//!
//! Uploaded posters are written under the configured uploads directory and
//! referenced by records through a server-relative `/uploads/<name>` path,
//! which the router serves statically.

use std::path::{Path, PathBuf};

use axum::body::Bytes;

use crate::error::{AppError, AppResult};

/// URL prefix stored posters are served under.
pub const UPLOADS_ROUTE: &str = "/uploads";

/// File extensions accepted for posters (lowercase).
pub const ALLOWED_POSTER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// A file part received in a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Lowercased extension of `file_name` if it is an accepted image type.
pub fn poster_extension(file_name: &str) -> AppResult<String> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if ALLOWED_POSTER_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(AppError::BadRequest(format!(
            "Only image files are allowed ({})",
            ALLOWED_POSTER_EXTENSIONS.join(", ")
        )))
    }
}

/// Writes poster files and maps them to public paths.
#[derive(Debug, Clone)]
pub struct PosterStorage {
    dir: PathBuf,
}

impl PosterStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the uploads directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Store `file` under a unique name and return its public path.
    pub async fn save(&self, file: &UploadedFile) -> AppResult<String> {
        let ext = poster_extension(&file.file_name)?;
        let stored_name = format!(
            "poster-{}-{}.{ext}",
            chrono::Utc::now().timestamp_millis(),
            uuid::Uuid::new_v4()
        );

        self.ensure_dir()
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create uploads dir: {e}")))?;
        tokio::fs::write(self.dir.join(&stored_name), &file.bytes)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to store poster: {e}")))?;

        tracing::info!(file = %stored_name, size = file.bytes.len(), "Poster stored");
        Ok(format!("{UPLOADS_ROUTE}/{stored_name}"))
    }

    /// Remove a poster previously returned by [`PosterStorage::save`].
    ///
    /// Failures are logged and otherwise ignored; paths outside
    /// [`UPLOADS_ROUTE`] are left alone.
    pub async fn discard(&self, public_path: &str) {
        let Some(name) = public_path
            .strip_prefix(UPLOADS_ROUTE)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|name| name.starts_with("poster-") && !name.contains(['/', '\\']))
        else {
            return;
        };

        if let Err(e) = tokio::fs::remove_file(self.dir.join(name)).await {
            tracing::warn!(file = %name, error = %e, "Failed to remove orphaned poster");
        }
    }
}
