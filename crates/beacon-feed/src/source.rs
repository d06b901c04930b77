use std::path::PathBuf;

use anyhow::Context;

/// Where telemetry payloads come from.
///
/// One call is one fetch; the feed loop decides when to call again.
pub trait SnapshotSource {
    async fn fetch(&mut self) -> anyhow::Result<String>;
}

/// Re-reads a JSON file on every fetch. Whatever writes the file is the
/// real transport.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotSource for FileSource {
    async fn fetch(&mut self) -> anyhow::Result<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading snapshot {}", self.path.display()))
    }
}
