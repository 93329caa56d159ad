//! Command-line argument structures and enums

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "remember-cursor")]
#[command(version)]
#[command(about = "Remember cursor position, selection and scroll in markdown frontmatter", long_about = None)]
pub struct Cli {
    /// Override the settings file location
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save a position & selection into a document's frontmatter
    Save {
        /// Markdown document
        file: PathBuf,

        /// Line of the selection start (zero-based, absolute)
        #[arg(short, long)]
        line: u32,

        /// Character of the selection start
        #[arg(long, default_value_t = 0)]
        ch: u32,

        /// Line of the selection end (defaults to the start)
        #[arg(long)]
        to_line: Option<u32>,

        /// Character of the selection end (defaults to the start)
        #[arg(long)]
        to_ch: Option<u32>,

        /// Scroll offset of the view
        #[arg(short, long)]
        scroll: Option<f64>,
    },

    /// Restore the position & selection stored in a document
    Restore {
        /// Markdown document
        file: PathBuf,

        /// Behave like opening the document: wait for the configured delay first
        #[arg(long)]
        on_open: bool,
    },

    /// Show the stored position & selection as JSON
    Show {
        /// Markdown document
        file: PathBuf,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current settings (default)
    Show,

    /// Set the wait after a document opens, in milliseconds (0-300)
    SetDelay {
        /// Delay in milliseconds
        ms: u32,
    },
}
