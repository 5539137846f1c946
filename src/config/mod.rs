pub mod cli;

#[cfg(feature = "cli")]
pub mod args;

#[cfg(feature = "cli")]
pub use args::CliConfig;

pub const DEFAULT_API_BASE: &str = "https://api.lolimi.cn/API/qqdg/";
pub const DEFAULT_OUTPUT_DIR: &str = "downloads";
