//! Command-line argument definitions for the Layview CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, font lookup and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Layview renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input layout file
    #[arg(help = "Path to the input .lay file")]
    pub input: String,

    /// Path to the output PNG file
    #[arg(short, long, default_value = "out.png")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory font paths are resolved against, overriding the config
    #[arg(long)]
    pub fonts_dir: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
