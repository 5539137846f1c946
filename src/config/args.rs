use super::{DEFAULT_API_BASE, DEFAULT_OUTPUT_DIR};
use crate::core::{ConfigProvider, TrackQuery, DEFAULT_QUALITY, DEFAULT_RESULT_INDEX};
use crate::utils::error::{Result, SongdlError};
use crate::utils::validation::{validate_path, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "songdl", version)]
#[command(about = "Search a song by keyword and download the matched track")]
pub struct CliConfig {
    #[arg(short = 's', long = "search", default_value = "", help = "Name of the song to download")]
    pub search: String,

    #[arg(
        short = 'n',
        long = "number",
        default_value_t = DEFAULT_RESULT_INDEX,
        allow_negative_numbers = true,
        help = "Index of the search result, starting at 1"
    )]
    pub number: i64,

    #[arg(
        short = 'q',
        long = "quality",
        default_value_t = DEFAULT_QUALITY,
        allow_negative_numbers = true,
        help = "Audio quality, 1-14 from worst to best"
    )]
    pub quality: i64,

    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_DIR, help = "Directory downloads are written to")]
    pub output_dir: PathBuf,

    #[arg(long, env = "SONGDL_API_BASE", default_value = DEFAULT_API_BASE, help = "Metadata endpoint")]
    pub api_base: String,

    #[arg(long, value_name = "SECONDS", help = "HTTP timeout; no timeout when omitted")]
    pub timeout: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn track_query(&self) -> TrackQuery {
        TrackQuery::new(self.search.clone(), self.number, self.quality)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        self.track_query().validate()?;
        validate_url("api_base", &self.api_base)?;
        validate_path("output_dir", &self.output_dir.to_string_lossy())?;
        if self.timeout == Some(0) {
            return Err(SongdlError::usage("timeout must be at least 1 second"));
        }
        Ok(())
    }
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_base
    }

    fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}
