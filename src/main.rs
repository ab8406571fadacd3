use anyhow::Context;
use clap::Parser;
use tracing::info;

use ctrlib_sync::config::log_path;
use ctrlib_sync::progress::TerminalProgress;
use ctrlib_sync::source::HttpReleaseSource;
use ctrlib_sync::{ReleaseSyncer, SyncConfig, SyncOutcome};

#[derive(Parser)]
#[command(name = "ctrlib-sync")]
#[command(
    version,
    about = "Mirror the latest CTRE Phoenix release into ./com/ctre/ctrlib"
)]
struct Cli {}

fn main() -> anyhow::Result<()> {
    let _cli = Cli::parse();
    let _guard = ctrlib_sync::logging::init(&log_path())?;

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run())
}

async fn run() -> anyhow::Result<()> {
    let syncer = ReleaseSyncer::new(HttpReleaseSource::new(), SyncConfig::default());
    let progress = TerminalProgress::new("CTRLib");

    let outcome = syncer.run(&progress).await;
    progress.finish();

    match outcome.context("Sync failed")? {
        SyncOutcome::UpToDate { .. } => info!("Nothing to do"),
        SyncOutcome::Updated { latest, output, .. } => info!(
            "Unpacked CTRLib {} into {} and {}",
            latest,
            output.java_dir.display(),
            output.native_dir.display()
        ),
    }

    Ok(())
}
