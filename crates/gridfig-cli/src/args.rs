//! Command-line argument definitions for the gridfig CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the figure description input, the
//! output directory, backend selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the gridfig figure generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the JSON figure description
    #[arg(help = "Path to the figure description file")]
    pub input: String,

    /// Directory receiving images, fragments and the combined document
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Combined figure width in centimeters
    #[arg(short, long, default_value_t = 14.0)]
    pub width: f64,

    /// Rendering backend (tikz, html, pptx, sdl2); defaults to the
    /// configured backend
    #[arg(short, long)]
    pub backend: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
