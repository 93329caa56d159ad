//! Command-line interface: argument parsing and command dispatch

/// Clap argument definitions
mod args;

/// Config command handlers
mod config;

/// A markdown file acting as the host editor
mod host;

/// `save`, `restore`, `show` commands
mod position;

use clap::Parser;
use std::path::PathBuf;

use remember_cursor_core::fs::{RealFileSystem, SyncToAsyncFs};
use remember_cursor_core::{Config, CursorError, CursorRange, FsMetadataStore, Position};

/// Type alias for the async filesystem used throughout the CLI.
pub type AsyncFs = SyncToAsyncFs<RealFileSystem>;

/// Type alias for the metadata store over markdown files on disk.
pub type CliStore = FsMetadataStore<AsyncFs>;

pub use args::Cli;
use args::Commands;

/// Main entry point for the CLI
pub fn run_cli() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("✗ Could not start async runtime: {}", e);
            std::process::exit(1);
        }
    };

    let success = runtime.block_on(run_command(cli));
    if !success {
        std::process::exit(1);
    }
}

async fn run_command(cli: Cli) -> bool {
    let store = FsMetadataStore::new(AsyncFs::new(RealFileSystem));

    match cli.command {
        Commands::Save {
            file,
            line,
            ch,
            to_line,
            to_ch,
            scroll,
        } => {
            let from = Position::new(line, ch);
            let to = Position::new(to_line.unwrap_or(line), to_ch.unwrap_or(ch));
            position::handle_save(&store, &file, CursorRange::new(from, to), scroll).await
        }

        Commands::Restore { file, on_open: false } => {
            position::handle_restore(&store, &file).await
        }

        Commands::Restore { file, on_open: true } => match resolve_settings_path(cli.config) {
            Ok(settings_path) => {
                position::handle_restore_on_open(store, &file, &settings_path).await
            }
            Err(e) => {
                eprintln!("✗ {}", e);
                false
            }
        },

        Commands::Show { file } => position::handle_show(&store, &file).await,

        Commands::Config { command } => match resolve_settings_path(cli.config) {
            Ok(path) => config::handle_config_command(command, store.fs(), &path).await,
            Err(e) => {
                eprintln!("✗ {}", e);
                false
            }
        },
    }
}

/// The `--config` override, or the platform config directory.
fn resolve_settings_path(config_override: Option<PathBuf>) -> Result<PathBuf, CursorError> {
    config_override
        .or_else(Config::config_path)
        .ok_or(CursorError::NoConfigDir)
}
