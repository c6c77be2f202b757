use anyhow::Result;
use clap::Parser;
use tracing::info;

mod app;
mod auth;
mod calendar;
mod cli;
mod config;
mod domain;
mod format;
mod logging;
mod store;
mod tui;

use app::AppContext;
use cli::args::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = config::data_dir(cli.data_dir.clone())?;
    logging::enable_logging(&config::log_dir(&data_dir))?;
    info!(data_dir = %data_dir.display(), "moodiary starting");

    let app = AppContext::new(&data_dir);
    cli::commands::dispatch(&app, cli)
}
