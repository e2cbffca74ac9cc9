//! Logo storage
//!
//! Uploaded logos go through the [`LogoStorage`] trait so the handler does
//! not care where the bytes end up. [`LocalLogoStorage`] writes them below
//! the configured upload directory, which the router serves at `/uploads`.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;

/// URL prefix the upload directory is served under
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Error type for logo storage
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Somewhere uploaded logos can be kept
#[async_trait]
pub trait LogoStorage: Send + Sync {
    /// Stores `data` under `key` and returns the URL it can be fetched from
    async fn put(&self, key: &str, data: Bytes) -> Result<String, StorageError>;
}

/// Stores logos on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalLogoStorage {
    root: PathBuf,
}

impl LocalLogoStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl LogoStorage for LocalLogoStorage {
    async fn put(&self, key: &str, data: Bytes) -> Result<String, StorageError> {
        if key.is_empty() || key.starts_with('/') || key.split('/').any(|part| part == "..") {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        let path = self.root.join(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &data).await?;

        tracing::debug!(path = %path.display(), bytes = data.len(), "Stored logo");

        Ok(format!("{}/{}", PUBLIC_PREFIX, key))
    }
}

/// Builds the storage key for an uploaded logo: `logos/<millis>-<name>`
pub fn logo_key(file_name: &str, unix_millis: i64) -> String {
    format!("logos/{}-{}", unix_millis, sanitize_file_name(file_name))
}

/// Keeps the last path component and replaces anything unusual with `_`
fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        "logo".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logo_key() {
        assert_eq!(logo_key("cat.png", 1700000000000), "logos/1700000000000-cat.png");
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("my cat (1).png"), "my_cat__1_.png");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\logos\\shop.jpg"), "shop.jpg");
        assert_eq!(sanitize_file_name(".."), "logo");
        assert_eq!(sanitize_file_name(""), "logo");
        assert_eq!(sanitize_file_name("شعار.png"), "____.png");
    }

    #[tokio::test]
    async fn test_local_storage_writes_file() {
        let root = std::env::temp_dir().join(format!("moracat-storage-{}", uuid::Uuid::new_v4()));
        let storage = LocalLogoStorage::new(&root);

        let url = storage
            .put("logos/1-cat.png", Bytes::from_static(b"\x89PNG"))
            .await
            .unwrap();

        assert_eq!(url, "/uploads/logos/1-cat.png");
        let written = tokio::fs::read(root.join("logos/1-cat.png")).await.unwrap();
        assert_eq!(written, b"\x89PNG");

        tokio::fs::remove_dir_all(&root).await.unwrap();
    }

    #[tokio::test]
    async fn test_local_storage_rejects_traversal() {
        let storage = LocalLogoStorage::new(std::env::temp_dir());
        let err = storage.put("../escape.png", Bytes::new()).await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }
}
