//! CLI argument definitions for the tbcheck command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};

/// tbcheck - Verilog device library checks
#[derive(Parser)]
#[command(name = "tbcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Path to config file (JSON, default: tbcheck.json in the project root)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run every device test bench and validate the simulator output
    Exec {
        /// Project root (default: current directory)
        #[arg(short, long)]
        root: Option<String>,

        /// Run the simulator with dump files suppressed
        #[arg(long)]
        no_dump: bool,

        /// Print progress for each device
        #[arg(short, long)]
        verbose: bool,

        /// Output the verdict as JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Check that the device index lists every device exactly once
    Index {
        /// Project root (default: current directory)
        #[arg(short, long)]
        root: Option<String>,

        /// Output the verdict as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check source line lengths
    LineLengths {
        /// Project root (default: current directory)
        #[arg(short, long)]
        root: Option<String>,

        /// Source directory to check (default: from config)
        #[arg(short, long)]
        source: Option<String>,

        /// Output the verdict as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that the simulation toolchain is installed
    Doctor {
        /// Project root (default: current directory)
        #[arg(short, long)]
        root: Option<String>,
    },
}
