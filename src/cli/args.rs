//! Command-line argument definitions
//!
//! This module defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Sort numbered photos into destination folders according to an Excel order sheet
#[derive(Parser, Debug)]
#[command(name = "photo_sorting_tool")]
#[command(version = "1.0.0")]
#[command(
    about = "Sort a folder of numbered photos into sub-folders according to rules from an Excel order sheet",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace (overrides config)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,
}

/// Which sheet layout the order table uses
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Row-grouped print-order layout (item number + customer name per row)
    Printing,
    /// Flat album layout (blank-row separated sections)
    Album,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sort photos according to an order sheet
    Sort {
        /// Sheet layout of the order table
        #[arg(short = 'L', long, value_enum, default_value = "printing")]
        layout: Layout,

        /// Path to the Excel order table
        #[arg(short, long)]
        table: PathBuf,

        /// Directory with the unsorted photos
        #[arg(short, long)]
        source: PathBuf,

        /// Output directory (defaults to the sort sub-directory inside the source)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Extension selector: ВСЕ/ALL, ФОТО/PHOTO, or a concrete extension
        #[arg(short, long, default_value = "ВСЕ")]
        extension: String,

        /// Retouch mode: copy every matched photo into one flat folder,
        /// one copy each
        #[arg(long)]
        retouch: bool,

        /// Descend into sub-directories of the source
        #[arg(long)]
        include_subdirs: bool,

        /// Name of the settings sheet (overrides config)
        #[arg(long)]
        settings_sheet: Option<String>,
    },

    /// Parse and display the settings sheet of an order table
    Settings {
        /// Path to the Excel order table
        #[arg(short, long)]
        table: PathBuf,

        /// Name of the settings sheet (overrides config)
        #[arg(long)]
        settings_sheet: Option<String>,
    },

    /// Build and display the photo number index of a source directory
    Index {
        /// Directory with the unsorted photos
        #[arg(short, long)]
        source: PathBuf,

        /// Extension selector: ВСЕ/ALL, ФОТО/PHOTO, or a concrete extension
        #[arg(short, long, default_value = "ВСЕ")]
        extension: String,

        /// Descend into sub-directories of the source
        #[arg(long)]
        include_subdirs: bool,
    },

    /// Inspect or reset the configuration file
    ///
    /// The config file is stored at:
    /// - Windows: %APPDATA%\photo_sorting_tool\config.toml
    /// - Linux/macOS: ~/.config/photo_sorting_tool/config.toml
    ///
    /// If no config file exists, a default one will be created.
    Config {
        /// Show the config file path without creating it
        #[arg(long)]
        path: bool,

        /// Reset config to defaults (creates a fresh config file)
        #[arg(long)]
        reset: bool,
    },

    /// Generate a configuration file at a specific location
    GenerateConfig {
        /// Output path for the config file (defaults to standard location)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show current configuration
    ShowConfig,
}
