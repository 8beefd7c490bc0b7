use std::path::PathBuf;

use clap::Parser;

use crate::controller::DEFAULT_DISPLAY_LIMIT;

/// Command-line options for the minisheet editor.
#[derive(Debug, Parser)]
#[command(name = "minisheet", version, about = "A small CSV grid editor for the terminal")]
pub struct Args {
    /// CSV file to open at startup
    pub file: Option<PathBuf>,

    /// Rows in a fresh, unnamed sheet
    #[arg(long, default_value_t = 30)]
    pub rows: usize,

    /// Columns in a fresh, unnamed sheet
    #[arg(long, default_value_t = 15)]
    pub cols: usize,

    /// Character limit for truncated cell display
    #[arg(long = "display-limit", default_value_t = DEFAULT_DISPLAY_LIMIT)]
    pub display_limit: usize,

    /// Write a debug log to this file (stderr belongs to the UI)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
