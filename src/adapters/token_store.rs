use crate::domain::ports::TokenStore;
use crate::utils::error::{DashboardError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Keeps the token in a single file, the CLI's stand-in for browser storage.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let token = content.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token.to_string()))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        tokio::fs::write(&self.path, token.trim()).await?;
        tracing::debug!("Token saved to {}", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Shared in-process token. Clones see each other's writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Arc<RwLock<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token.into()))),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<String>> {
        Ok(self.token.read().await.clone())
    }

    async fn save(&self, token: &str) -> Result<()> {
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.token.write().await = None;
        Ok(())
    }
}

/// For APIs that need no authentication.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

#[async_trait]
impl TokenStore for NoToken {
    async fn load(&self) -> Result<Option<String>> {
        Ok(None)
    }

    /// There is nowhere to keep the token.
    async fn save(&self, _token: &str) -> Result<()> {
        Err(DashboardError::MissingConfigError {
            field: "auth.token_file".to_string(),
        })
    }

    async fn clear(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn file_store_round_trips_and_trims() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested/token"));

        assert_eq!(store.load().await.unwrap(), None);

        store.save("  abc.def.ghi\n").await.unwrap();
        assert_eq!(store.load().await.unwrap().as_deref(), Some("abc.def.ghi"));

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
        // clearing twice is fine
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn blank_token_file_means_no_token() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "\n  \n").unwrap();

        let store = FileTokenStore::new(&path);
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[test]
    fn memory_store_clones_share_state() {
        tokio_test::block_on(async {
            let store = MemoryTokenStore::new();
            let other = store.clone();

            store.save("first").await.unwrap();
            assert_eq!(other.load().await.unwrap().as_deref(), Some("first"));

            other.clear().await.unwrap();
            assert_eq!(store.load().await.unwrap(), None);
        });
    }

    #[test]
    fn no_token_never_has_one() {
        tokio_test::block_on(async {
            let err = NoToken.save("ignored").await.unwrap_err();
            assert!(matches!(err, DashboardError::MissingConfigError { ref field } if field == "auth.token_file"));
            assert_eq!(NoToken.load().await.unwrap(), None);
            NoToken.clear().await.unwrap();
        });
    }
}
