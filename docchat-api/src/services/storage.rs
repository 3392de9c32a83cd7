use async_trait::async_trait;
use service_core::error::AppError;
use std::path::{Path, PathBuf};
use tokio::fs;

/// A file that matched a cleanup prefix but could not be removed.
#[derive(Debug)]
pub struct CleanupFailure {
    pub file_name: String,
    pub error: std::io::Error,
}

/// Outcome of removing every file that shares a prefix.
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub removed: Vec<String>,
    pub failures: Vec<CleanupFailure>,
}

impl CleanupReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[async_trait]
pub trait Storage: Send + Sync {
    /// Writes `data` under `file_name` and returns the path it was written to.
    async fn store(&self, file_name: &str, data: &[u8]) -> Result<PathBuf, AppError>;
    async fn remove(&self, file_name: &str) -> Result<(), AppError>;
    /// Removes every file whose name starts with `prefix`.
    ///
    /// Failing to list the directory is an error; failing to remove an
    /// individual file is recorded in the report and does not stop the sweep.
    async fn remove_prefixed(&self, prefix: &str) -> Result<CleanupReport, AppError>;
}

/// Flat directory of uploaded files.
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub async fn new(base_path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let base_path = base_path.into();
        if !base_path.exists() {
            fs::create_dir_all(&base_path).await?;
        }
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn store(&self, file_name: &str, data: &[u8]) -> Result<PathBuf, AppError> {
        // The directory may have been removed since startup.
        fs::create_dir_all(&self.base_path).await?;
        let path = self.base_path.join(file_name);
        fs::write(&path, data).await?;
        Ok(path)
    }

    async fn remove(&self, file_name: &str) -> Result<(), AppError> {
        let path = self.base_path.join(file_name);
        if path.exists() {
            fs::remove_file(path).await?;
        }
        Ok(())
    }

    async fn remove_prefixed(&self, prefix: &str) -> Result<CleanupReport, AppError> {
        let mut report = CleanupReport::default();
        if !self.base_path.exists() {
            return Ok(report);
        }

        let mut entries = fs::read_dir(&self.base_path).await?;
        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if !file_name.starts_with(prefix) {
                continue;
            }

            match fs::remove_file(entry.path()).await {
                Ok(()) => report.removed.push(file_name),
                Err(error) => report.failures.push(CleanupFailure { file_name, error }),
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("nested").join("uploads");

        let storage = LocalStorage::new(&base).await.unwrap();
        assert!(storage.base_path().is_dir());
    }

    #[tokio::test]
    async fn store_writes_bytes_under_given_name() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let path = storage.store("abc_note.txt", b"hello").await.unwrap();
        assert_eq!(path, dir.path().join("abc_note.txt"));
        assert_eq!(std::fs::read(path).unwrap(), b"hello");
    }

    #[tokio::test]
    async fn remove_prefixed_only_touches_matching_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();
        storage.store("abc_one.txt", b"1").await.unwrap();
        storage.store("abc_two.pdf", b"2").await.unwrap();
        storage.store("abd_other.txt", b"3").await.unwrap();

        let report = storage.remove_prefixed("abc_").await.unwrap();

        let mut removed = report.removed.clone();
        removed.sort();
        assert_eq!(removed, vec!["abc_one.txt", "abc_two.pdf"]);
        assert!(report.is_clean());
        assert!(dir.path().join("abd_other.txt").exists());
    }

    #[tokio::test]
    async fn remove_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();
        assert!(storage.remove("nope.txt").await.is_ok());
    }
}
