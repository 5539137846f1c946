use crate::core::Storage;
use crate::utils::error::{Result, SongdlError};
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for LocalStorage {
    type Writer = File;

    async fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| SongdlError::filesystem("create directory", &self.base_path, e))
    }

    async fn create_file(&self, file_name: &str) -> Result<(PathBuf, File)> {
        let full_path = self.base_path.join(file_name);
        let file = File::create(&full_path)
            .await
            .map_err(|e| SongdlError::filesystem("create file", &full_path, e))?;
        Ok((full_path, file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn test_prepare_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("nested").join("downloads"));

        storage.prepare().await.unwrap();
        storage.prepare().await.unwrap();
        assert!(storage.base_path().is_dir());
    }

    #[tokio::test]
    async fn test_create_file_truncates_existing() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());
        std::fs::write(temp_dir.path().join("a.mp3"), b"old contents here").unwrap();

        let (path, mut file) = storage.create_file("a.mp3").await.unwrap();
        file.write_all(b"new").await.unwrap();
        file.flush().await.unwrap();
        drop(file);

        assert_eq!(path, temp_dir.path().join("a.mp3"));
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_create_file_without_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("missing"));

        let err = storage.create_file("a.mp3").await.unwrap_err();
        assert_eq!(err.kind(), crate::utils::error::ErrorKind::Filesystem);
        assert!(err.to_string().contains("create file"));
    }
}
