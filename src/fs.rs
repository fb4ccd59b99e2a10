use std::future::Future;
use std::io;
use std::path::Path;

/// Async filesystem access used while resolving license content.
pub trait FileSystem: Send + Sync {
    fn does_folder_exist(&self, path: &Path) -> impl Future<Output = bool> + Send;
    fn does_file_exist(&self, path: &Path) -> impl Future<Output = bool> + Send;
    fn read_file(&self, path: &Path) -> impl Future<Output = io::Result<String>> + Send;
}

/// [`FileSystem`] backed by `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileSystem;

impl FileSystem for TokioFileSystem {
    async fn does_folder_exist(&self, path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    async fn does_file_exist(&self, path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    // Invalid UTF-8 is replaced rather than rejected; license files in the wild
    // are not always clean.
    async fn read_file(&self, path: &Path) -> io::Result<String> {
        let bytes = tokio::fs::read(path).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_folder_and_file_checks() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("LICENSE");
        std::fs::write(&file, "MIT License").unwrap();

        let fs = TokioFileSystem;
        assert!(fs.does_folder_exist(dir.path()).await);
        assert!(!fs.does_folder_exist(&file).await);
        assert!(fs.does_file_exist(&file).await);
        assert!(!fs.does_file_exist(dir.path()).await);
        assert!(!fs.does_file_exist(&dir.path().join("missing")).await);
    }

    #[tokio::test]
    async fn test_read_file_keeps_raw_text() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("LICENSE");
        std::fs::write(&file, "line one\r\nline two\n").unwrap();

        let content = TokioFileSystem.read_file(&file).await.unwrap();
        assert_eq!(content, "line one\r\nline two\n");
    }

    #[tokio::test]
    async fn test_read_file_replaces_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("LICENSE");
        std::fs::write(&file, b"caf\xe9").unwrap();

        let content = TokioFileSystem.read_file(&file).await.unwrap();
        assert_eq!(content, "caf\u{FFFD}");
    }
}
