use crate::core::{SavedTrack, Storage};
use crate::utils::error::{Result, SongdlError};
use reqwest::Client;
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;

const PROGRESS_INTERVAL: Duration = Duration::from_millis(500);

struct Progress {
    total: Option<u64>,
    downloaded: u64,
    started: Instant,
    last_report: Instant,
}

impl Progress {
    fn new(total: Option<u64>) -> Self {
        let now = Instant::now();
        Self {
            total,
            downloaded: 0,
            started: now,
            last_report: now,
        }
    }

    fn advance(&mut self, bytes: usize) {
        self.downloaded += bytes as u64;

        let now = Instant::now();
        if now.duration_since(self.last_report) < PROGRESS_INTERVAL {
            return;
        }
        self.last_report = now;

        let speed = self.bytes_per_second(now);
        match self.total.filter(|total| *total > 0) {
            Some(total) => tracing::debug!(
                "Download progress: {:.1}% ({}/{} bytes) | {:.1} KiB/s",
                self.downloaded as f64 / total as f64 * 100.0,
                self.downloaded,
                total,
                speed / 1024.0
            ),
            None => tracing::debug!(
                "Download progress: {} bytes | {:.1} KiB/s",
                self.downloaded,
                speed / 1024.0
            ),
        }
    }

    fn bytes_per_second(&self, now: Instant) -> f64 {
        let elapsed = now.duration_since(self.started).as_secs_f64();
        if elapsed > 0.0 {
            self.downloaded as f64 / elapsed
        } else {
            0.0
        }
    }
}

/// Streams `source_url` into `file_name` inside the storage location.
///
/// Stage order: output directory, request, file creation, copy. A failed
/// copy leaves the partial file behind.
pub async fn materialize<S: Storage>(
    client: &Client,
    storage: &S,
    file_name: &str,
    source_url: &str,
) -> Result<SavedTrack> {
    storage.prepare().await?;

    tracing::debug!("Making audio request to: {}", source_url);
    let mut response = client
        .get(source_url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|e| SongdlError::network("audio download", e))?;

    let (path, mut writer) = storage.create_file(file_name).await?;
    let mut progress = Progress::new(response.content_length());

    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| SongdlError::network("audio download", e))?
    {
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| SongdlError::filesystem("write", &path, e))?;
        progress.advance(chunk.len());
    }

    writer
        .flush()
        .await
        .map_err(|e| SongdlError::filesystem("write", &path, e))?;

    tracing::info!(
        "Saved {} bytes to {} in {:?}",
        progress.downloaded,
        path.display(),
        progress.started.elapsed()
    );

    Ok(SavedTrack {
        path,
        bytes_written: progress.downloaded,
    })
}
