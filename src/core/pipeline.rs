use crate::core::filename::derive_filename;
use crate::core::materializer::materialize;
use crate::core::metadata::fetch_metadata;
use crate::core::{ConfigProvider, Pipeline, SavedTrack, Storage, TrackMetadata, TrackQuery};
use crate::utils::error::{Result, SongdlError};
use reqwest::Client;

pub struct DownloadPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    query: TrackQuery,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> DownloadPipeline<S, C> {
    pub fn new(storage: S, config: C, query: TrackQuery) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SongdlError::network("client setup", e))?;

        Ok(Self {
            storage,
            config,
            query,
            client,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for DownloadPipeline<S, C> {
    async fn lookup(&self) -> Result<TrackMetadata> {
        if !self.query.quality_in_range() {
            tracing::warn!(
                "Quality {} is outside 1-14, passing it to the provider unchanged",
                self.query.quality_level
            );
        }
        tracing::debug!(
            "Looking up '{}' (n={}, q={}{})",
            self.query.keyword,
            self.query.result_index,
            self.query.quality_level,
            self.query
                .quality_tier_name()
                .map(|name| format!(", {}", name))
                .unwrap_or_default()
        );

        fetch_metadata(&self.client, self.config.api_endpoint(), &self.query).await
    }

    fn resolve_filename(&self, metadata: &TrackMetadata) -> String {
        derive_filename(&metadata.performer, &metadata.title, &metadata.audio_url)
    }

    async fn download(&self, file_name: &str, metadata: &TrackMetadata) -> Result<SavedTrack> {
        tracing::debug!(
            "Downloading into {}",
            self.config.output_dir().display()
        );
        materialize(&self.client, &self.storage, file_name, &metadata.audio_url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cli::LocalStorage;
    use crate::utils::error::ErrorKind;
    use httpmock::prelude::*;
    use std::path::{Path, PathBuf};
    use std::time::Duration;
    use tempfile::TempDir;

    struct MockConfig {
        api_endpoint: String,
        output_dir: PathBuf,
        timeout: Option<Duration>,
    }

    impl MockConfig {
        fn new(api_endpoint: String, output_dir: &Path) -> Self {
            Self {
                api_endpoint,
                output_dir: output_dir.to_path_buf(),
                timeout: None,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn api_endpoint(&self) -> &str {
            &self.api_endpoint
        }

        fn output_dir(&self) -> &Path {
            &self.output_dir
        }

        fn timeout(&self) -> Option<Duration> {
            self.timeout
        }
    }

    #[tokio::test]
    async fn test_lookup_and_download() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("downloads");
        let server = MockServer::start_async().await;

        let audio_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/audio/track.flac");
                then.status(200).body(b"fLaC\x00\x00\x00\x22");
            })
            .await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api").query_param("word", "晴天");
                then.status(200).json_body(serde_json::json!({
                    "code": 200,
                    "data": {
                        "singer": "周杰伦",
                        "song": "晴天",
                        "url": server.url("/audio/track.flac")
                    }
                }));
            })
            .await;

        let pipeline = DownloadPipeline::new(
            LocalStorage::new(&output_dir),
            MockConfig::new(server.url("/api"), &output_dir),
            TrackQuery::new("晴天", 1, 11),
        )
        .unwrap();

        let metadata = pipeline.lookup().await.unwrap();
        let file_name = pipeline.resolve_filename(&metadata);
        assert_eq!(file_name, "周杰伦 - 晴天.flac");

        let saved = pipeline.download(&file_name, &metadata).await.unwrap();
        api_mock.assert_async().await;
        audio_mock.assert_async().await;
        assert_eq!(saved.path, output_dir.join("周杰伦 - 晴天.flac"));
        assert_eq!(std::fs::read(saved.path).unwrap(), b"fLaC\x00\x00\x00\x22");
    }

    #[tokio::test]
    async fn test_timeout_applies_to_requests() {
        let temp_dir = TempDir::new().unwrap();
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/slow");
                then.status(200)
                    .delay(Duration::from_secs(3))
                    .json_body(serde_json::json!({"code": 200}));
            })
            .await;

        let mut config = MockConfig::new(server.url("/slow"), temp_dir.path());
        config.timeout = Some(Duration::from_millis(200));

        let pipeline = DownloadPipeline::new(
            LocalStorage::new(temp_dir.path()),
            config,
            TrackQuery::new("稻香", 1, 11),
        )
        .unwrap();

        let err = pipeline.lookup().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }
}
