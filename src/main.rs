//! Backup Uploader
//!
//! Uploads local backups to AWS Glacier or S3 and removes the local copies.

use clap::Parser;
use std::process::ExitCode;

use backup_uploader::config::Config;
use backup_uploader::telemetry;
use backup_uploader::uploader::Uploader;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env before clap reads environment fallbacks
    dotenvy::dotenv().ok();

    telemetry::init()?;
    tracing::info!("Start");

    let config = Config::parse();
    tracing::debug!(
        "Mode {:?}, target {}, backups in {}",
        config.mode,
        config.target_name(),
        config.backup_dir.display()
    );

    let uploader = Uploader::from_config(&config);
    let status = uploader.run(&config.backup_dir, &config.backup_ext).await;

    tracing::info!("Stop");
    Ok(ExitCode::from(status.exit_code()))
}
