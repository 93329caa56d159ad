//! Config command handlers

use std::path::Path;

use remember_cursor_core::Config;
use remember_cursor_core::config::{MAX_DELAY_MS, MIN_DELAY_MS};

use crate::cli::AsyncFs;
use crate::cli::args::ConfigCommands;

pub async fn handle_config_command(
    command: Option<ConfigCommands>,
    fs: &AsyncFs,
    settings_path: &Path,
) -> bool {
    match command {
        None | Some(ConfigCommands::Show) => {
            show_config(fs, settings_path).await;
            true
        }
        Some(ConfigCommands::SetDelay { ms }) => set_delay(fs, settings_path, ms).await,
    }
}

async fn show_config(fs: &AsyncFs, settings_path: &Path) {
    let config = Config::load_from_or_default(fs, settings_path).await;
    println!("remember-cursor Configuration");
    println!("=============================");
    println!(
        "Delay after file opening: {} ms",
        config.delay_after_file_opening
    );
    println!("Config file: {}", settings_path.display());
}

async fn set_delay(fs: &AsyncFs, settings_path: &Path, ms: u32) -> bool {
    let mut config = Config::load_from_or_default(fs, settings_path).await;
    if let Err(e) = config.set_delay_after_file_opening(ms) {
        eprintln!("✗ {} (allowed: {}-{} ms)", e, MIN_DELAY_MS, MAX_DELAY_MS);
        return false;
    }

    match config.save_to(fs, settings_path).await {
        Ok(()) => {
            println!("✓ Delay after file opening set to {} ms", ms);
            true
        }
        Err(e) => {
            eprintln!("✗ Error saving config: {}", e);
            false
        }
    }
}
