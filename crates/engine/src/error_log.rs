//! Append-only local record of notification failures

use chrono::Local;
use hoyo_core::Result;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Text file receiving one `[timestamp] message` line per failure
#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a timestamped line, creating the file if needed
    pub async fn append(&self, message: &str) -> Result<()> {
        let line = format!(
            "[{}] {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            message
        );
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
