// File: src/bin/tui.rs
use anyhow::{Context, Result};
use party_planner::config::Config;
use party_planner::paths::AppPaths;
use simplelog::WriteLogger;
use std::fs::File;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().context("Could not load configuration")?;

    // The terminal belongs to the UI, so diagnostics go to a file.
    let log_path = AppPaths::log_file()?;
    let log_file = File::create(&log_path)
        .with_context(|| format!("Could not open log file {}", log_path.display()))?;
    WriteLogger::init(config.log_level(), simplelog::Config::default(), log_file)
        .context("Could not install logger")?;
    log::info!("party-planner {} starting", env!("CARGO_PKG_VERSION"));

    party_planner::tui::run(config).await
}
