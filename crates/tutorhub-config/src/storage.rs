use std::path::PathBuf;

use crate::{env_lookup, parsed};

pub const DEFAULT_MAX_THUMBNAIL_BYTES: usize = 5 * 1024 * 1024;

/// URL prefix under which the upload directory is served.
pub const UPLOADS_PATH: &str = "/uploads";

#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
    pub max_thumbnail_bytes: usize,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            upload_dir: lookup("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("uploads")),
            max_thumbnail_bytes: parsed(&lookup, "MAX_THUMBNAIL_BYTES")
                .unwrap_or(DEFAULT_MAX_THUMBNAIL_BYTES),
        }
    }

    /// Public URL prefix for stored files.
    pub fn public_url(&self, public_base_url: &str) -> String {
        format!("{}{}", public_base_url.trim_end_matches('/'), UPLOADS_PATH)
    }
}
