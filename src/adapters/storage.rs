use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem storage rooted at the project directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = fs::read(self.resolve(path))?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }

    async fn create_dir_all(&self, path: &str) -> Result<()> {
        fs::create_dir_all(self.resolve(path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ScrapeError;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_read_under_root() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        storage
            .write_file("backend/data/prices.json", b"{}")
            .await
            .unwrap();

        assert!(temp_dir.path().join("backend/data/prices.json").exists());
        assert_eq!(
            storage.read_file("backend/data/prices.json").await.unwrap(),
            b"{}"
        );
    }

    #[tokio::test]
    async fn test_create_dir_all_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        storage.create_dir_all("frontend/public/data").await.unwrap();
        storage.create_dir_all("frontend/public/data").await.unwrap();

        assert!(temp_dir.path().join("frontend/public/data").is_dir());
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        match storage.read_file("backend/configs/sites.json").await {
            Err(ScrapeError::IoError(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected NotFound, got {:?}", other.map(|b| b.len())),
        }
    }
}
