use crate::core::{Pipeline, SavedTrack};
use crate::utils::error::Result;
use std::fmt;

/// Linear progression of one run; any stage may end in `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    MetadataFetched,
    FilenameResolved,
    Downloaded,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::MetadataFetched => "metadata fetched",
            Stage::FilenameResolved => "filename resolved",
            Stage::Downloaded => "downloaded",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

pub struct DownloadEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> DownloadEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<SavedTrack> {
        let mut stage = Stage::Start;
        let result = self.run_stages(&mut stage).await;

        if let Err(e) = &result {
            tracing::debug!("Stage: {} -> {} ({})", stage, Stage::Failed, e);
        }
        result
    }

    async fn run_stages(&self, stage: &mut Stage) -> Result<SavedTrack> {
        let metadata = self.pipeline.lookup().await?;
        advance(stage, Stage::MetadataFetched);
        println!(
            "Found: {} - {} ({})",
            metadata.title, metadata.performer, metadata.size_label
        );

        let file_name = self.pipeline.resolve_filename(&metadata);
        advance(stage, Stage::FilenameResolved);

        println!("Downloading: {}", file_name);
        println!("Quality: {}", metadata.quality_label);
        println!("Bitrate: {}", metadata.bitrate_label);

        let saved = self.pipeline.download(&file_name, &metadata).await?;
        advance(stage, Stage::Downloaded);
        println!("Download complete! Saved to: {}", saved.path.display());

        advance(stage, Stage::Done);
        Ok(saved)
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    tracing::debug!("Stage: {} -> {}", stage, next);
    *stage = next;
}
