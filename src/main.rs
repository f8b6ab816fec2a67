//! Flurry CLI: export CDN core analytics blobs to a CSV file.

use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use flurry::{CliArgs, Config, init_tracing, run_export};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = CliArgs::parse();

    let config = match Config::from_file(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Exporting core analytics from {} to {}",
        config.storage.account_url, config.output.path
    );

    match run_export(&config).await {
        Ok(stats) => {
            info!("Exported {} blob(s)", stats.blobs);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Export failed: {e}");
            ExitCode::FAILURE
        }
    }
}
