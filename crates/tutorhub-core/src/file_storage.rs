//! File storage abstraction for uploaded course thumbnails.
//!
//! Business logic only sees the [`FileStorage`] trait so the on-disk layout can
//! be swapped out without touching the usecases.
//!
//! # Example
//!
//! ```ignore
//! use tutorhub_core::file_storage::{FileStorage, LocalFileStorage};
//! use std::path::PathBuf;
//!
//! let storage = LocalFileStorage::new(
//!     PathBuf::from("./uploads"),
//!     "http://localhost:8080/uploads".to_string(),
//! );
//!
//! let key = storage.save("thumbnails/bimbel_1.png", bytes).await?;
//! let url = storage.get_url(&key)?;
//! storage.delete(&key).await?;
//! ```

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use axum::http::StatusCode;
use thiserror::Error;
use tokio::fs;

/// Image extensions accepted for thumbnails.
pub const THUMBNAIL_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + Send + 'a>>;

pub trait FileStorage: Send + Sync {
    /// Save file content under `key` and return the key.
    fn save<'a>(&'a self, key: &'a str, content: &'a [u8]) -> StorageFuture<'a, String>;

    /// Delete a file by key. Missing files are not an error.
    fn delete<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()>;

    /// Public URL for a stored key.
    fn get_url(&self, key: &str) -> Result<String, StorageError>;
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("file exceeds maximum size of {max_bytes} bytes")]
    TooLarge { max_bytes: usize },

    #[error("file type '{0}' is not allowed, use jpg, jpeg or png")]
    UnsupportedExtension(String),

    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedExtension(_) | Self::InvalidKey(_) => StatusCode::BAD_REQUEST,
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Lower-cased extension of an uploaded file name, if it is an accepted image type.
pub fn thumbnail_extension(file_name: &str) -> Result<String, StorageError> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if THUMBNAIL_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(StorageError::UnsupportedExtension(ext))
    }
}

/// Stores files in a directory and serves them under `base_url`.
#[derive(Clone, Debug)]
pub struct LocalFileStorage {
    base_dir: PathBuf,
    base_url: String,
    max_file_size: usize,
}

impl LocalFileStorage {
    pub fn new(base_dir: PathBuf, base_url: String) -> Self {
        Self::with_max_size(base_dir, base_url, 5 * 1024 * 1024)
    }

    pub fn with_max_size(base_dir: PathBuf, base_url: String, max_file_size: usize) -> Self {
        Self {
            base_dir,
            base_url,
            max_file_size,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Reject keys that could escape `base_dir`.
    fn validate_key(key: &str) -> Result<(), StorageError> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "key must not be empty, contain '..', or start with '/'".to_string(),
            ));
        }

        if !key
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '/' || c == '.')
        {
            return Err(StorageError::InvalidKey(
                "key contains invalid characters".to_string(),
            ));
        }

        Ok(())
    }
}

impl FileStorage for LocalFileStorage {
    fn save<'a>(&'a self, key: &'a str, content: &'a [u8]) -> StorageFuture<'a, String> {
        Box::pin(async move {
            Self::validate_key(key)?;

            if content.len() > self.max_file_size {
                return Err(StorageError::TooLarge {
                    max_bytes: self.max_file_size,
                });
            }

            let file_path = self.base_dir.join(key);
            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent).await?;
            }
            fs::write(&file_path, content).await?;

            tracing::debug!(key, bytes = content.len(), "stored file");
            Ok(key.to_string())
        })
    }

    fn delete<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            Self::validate_key(key)?;

            match fs::remove_file(self.base_dir.join(key)).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        })
    }

    fn get_url(&self, key: &str) -> Result<String, StorageError> {
        Self::validate_key(key)?;
        Ok(format!("{}/{}", self.base_url.trim_end_matches('/'), key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_storage(max: usize) -> LocalFileStorage {
        let dir = std::env::temp_dir().join(format!("tutorhub-storage-{}", uuid::Uuid::new_v4()));
        LocalFileStorage::with_max_size(dir, "http://localhost:8080/uploads".to_string(), max)
    }

    #[test]
    fn test_validate_key_accepts_valid_keys() {
        assert!(LocalFileStorage::validate_key("thumbnails/bimbel_1.png").is_ok());
        assert!(LocalFileStorage::validate_key("thumbnails/bimbel-abc.jpeg").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_traversal_and_absolute_paths() {
        assert!(LocalFileStorage::validate_key("../../../etc/passwd").is_err());
        assert!(LocalFileStorage::validate_key("/etc/passwd").is_err());
        assert!(LocalFileStorage::validate_key("\\windows\\system32").is_err());
        assert!(LocalFileStorage::validate_key("").is_err());
    }

    #[test]
    fn test_thumbnail_extension() {
        assert_eq!(thumbnail_extension("cover.PNG").unwrap(), "png");
        assert_eq!(thumbnail_extension("a.b.jpeg").unwrap(), "jpeg");
        assert!(matches!(
            thumbnail_extension("cover.gif"),
            Err(StorageError::UnsupportedExtension(ext)) if ext == "gif"
        ));
        assert!(thumbnail_extension("no_extension").is_err());
    }

    #[test]
    fn test_get_url_handles_trailing_slash() {
        let storage = LocalFileStorage::new(
            PathBuf::from("./uploads"),
            "http://localhost:8080/uploads/".to_string(),
        );

        let url = storage.get_url("thumbnails/a.png").unwrap();
        assert_eq!(url, "http://localhost:8080/uploads/thumbnails/a.png");
    }

    #[tokio::test]
    async fn test_save_then_delete_removes_file() {
        let storage = scratch_storage(1024);
        let key = storage.save("thumbnails/a.png", b"png-bytes").await.unwrap();
        let path = storage.base_dir().join(&key);
        assert!(path.exists());

        storage.delete(&key).await.unwrap();
        assert!(!path.exists());

        // deleting twice is fine
        storage.delete(&key).await.unwrap();
        let _ = std::fs::remove_dir_all(storage.base_dir());
    }

    #[tokio::test]
    async fn test_save_rejects_oversized_content() {
        let storage = scratch_storage(4);
        let err = storage.save("thumbnails/a.png", b"too large").await.unwrap_err();
        assert!(matches!(err, StorageError::TooLarge { max_bytes: 4 }));
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
