//! File storage for uploaded pictures and generated identifier images

use std::path::{Component, Path, PathBuf};

use crate::{
    config::MediaConfig,
    error::{AppError, AppResult},
};

/// Directory holding uploaded asset pictures
pub const ASSET_IMAGES_DIR: &str = "assets";
/// Directory holding generated identifier images
pub const QR_CODES_DIR: &str = "qr_codes";

/// Media files stored on the local filesystem, referenced by a path
/// relative to the media root.
#[derive(Clone, Debug)]
pub struct MediaStore {
    root: PathBuf,
    base_url: String,
}

impl MediaStore {
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            root: config.root.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Write `bytes` to `dir/file_name`, replacing any previous file, and
    /// return the stored reference.
    pub async fn save(&self, dir: &str, file_name: &str, bytes: &[u8]) -> AppResult<String> {
        let reference = format!("{}/{}", dir, file_name);
        let path = self.resolve(&reference)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!("Stored {} ({} bytes)", reference, bytes.len());
        Ok(reference)
    }

    /// Remove a stored file. Missing files are ignored.
    pub async fn remove(&self, reference: &str) -> AppResult<()> {
        let path = self.resolve(reference)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Public URL of a stored reference
    pub fn url(&self, reference: &str) -> String {
        format!("{}/{}", self.base_url, reference.trim_start_matches('/'))
    }

    fn resolve(&self, reference: &str) -> AppResult<PathBuf> {
        let relative = Path::new(reference);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes || reference.is_empty() {
            return Err(AppError::BadRequest(format!("Invalid media path: {}", reference)));
        }
        Ok(self.root.join(relative))
    }
}

/// File extension to keep for an uploaded picture, if it is an accepted type
pub fn image_extension(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("png"),
        "jpg" | "jpeg" => Some("jpg"),
        "gif" => Some("gif"),
        "webp" => Some("webp"),
        _ => None,
    }
}
