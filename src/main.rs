use clap::{CommandFactory, Parser};
use songdl::core::ConfigProvider;
use songdl::utils::{logger, validation::Validate};
use songdl::{CliConfig, DownloadEngine, DownloadPipeline, LocalStorage, SongdlError};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::debug!("CLI config: {:?}", config);

    if config.search.is_empty() {
        eprintln!("Please provide the name of the song to download (-s)");
        let _ = CliConfig::command().write_help(&mut std::io::stderr());
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        tracing::debug!("Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: CliConfig) -> Result<(), SongdlError> {
    config.validate()?;

    let query = config.track_query();
    let storage = LocalStorage::new(config.output_dir());
    let pipeline = DownloadPipeline::new(storage, config, query)?;

    DownloadEngine::new(pipeline).run().await?;
    Ok(())
}
