use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use log::{info, warn, LevelFilter};

mod client;
mod components;
mod config;
mod connection_manager;
mod dialog;
mod i18n;
mod identity;
mod logging;
mod menu;
mod modal;
mod popup;
mod statusbar;
mod ui;
mod ui_utils;

use config::AppConfig;
use connection_manager::SimulatedConnection;
use popup::CommandPopupOpener;
use ui::App;

/// Terminal login client for password-protected conferences.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the configured log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Hide the Cancel button of the login dialog
    #[arg(long)]
    no_cancel: bool,

    /// Conference room shown in the waiting-for-host notice
    #[arg(long)]
    room: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    if let Some(room) = args.room {
        config.auth.room = room;
    }

    let level = config.log_level();
    logging::init_logger(*level.as_ref().unwrap_or(&LevelFilter::Info));
    if let Err(e) = level {
        warn!("{e:#}, using info");
    }
    if let Some(path) = &args.config {
        info!("Loaded configuration from {}", path.display());
    }

    let allow_cancel = config.auth.allow_cancel && !args.no_cancel;
    let service = Arc::new(SimulatedConnection::new(&config.service, &config.hosts));
    let popups = Box::new(CommandPopupOpener::from_command_line(&config.auth.popup_command));

    let mut app = App::new(config, allow_cancel, service, popups);
    app.run().await?;

    info!("Goodbye");
    Ok(())
}
