// Local filesystem adapter

use std::path::Path;

use async_trait::async_trait;
use tokio::fs;

use crate::ports::FsPort;

/// `FsPort` backed by `tokio::fs`
#[derive(Debug, Default, Clone)]
pub struct LocalFsAdapter;

impl LocalFsAdapter {
    /// Create new local filesystem adapter
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FsPort for LocalFsAdapter {
    async fn exists(&self, path: &Path) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }

    async fn rename(&self, from: &Path, to: &Path) -> std::io::Result<()> {
        fs::rename(from, to).await
    }

    async fn remove_file(&self, path: &Path) -> std::io::Result<()> {
        fs::remove_file(path).await
    }
}
