use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

use crate::model::OneCallPayload;

use super::{ForecastRequest, ForecastSource};

/// Reads a One Call payload previously saved to disk.
///
/// The request coordinates are ignored; the file already names its location.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ForecastSource for FileSource {
    async fn fetch(&self, _request: &ForecastRequest) -> Result<OneCallPayload> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read payload file: {}", self.path.display()))?;

        serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse payload file: {}", self.path.display()))
    }
}
