use crate::domain::model::{SavedTrack, TrackMetadata};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWrite;

pub trait Storage: Send + Sync {
    type Writer: AsyncWrite + Unpin + Send;

    /// Makes sure the output location exists. Idempotent.
    fn prepare(&self) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Creates (or truncates) `file_name` and returns its full path with a writer.
    fn create_file(
        &self,
        file_name: &str,
    ) -> impl std::future::Future<Output = Result<(PathBuf, Self::Writer)>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn output_dir(&self) -> &Path;
    fn timeout(&self) -> Option<Duration>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn lookup(&self) -> Result<TrackMetadata>;
    fn resolve_filename(&self, metadata: &TrackMetadata) -> String;
    async fn download(&self, file_name: &str, metadata: &TrackMetadata) -> Result<SavedTrack>;
}
