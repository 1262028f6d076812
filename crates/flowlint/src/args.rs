use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flowlint")]
#[command(about = "A linter for YAML UI test flow files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// lint flow files or directories
    #[command(name = "check")]
    Check {
        /// Files or directories to check [default: .]
        files: Vec<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        output_format: String,

        /// Exit with status code 0, even upon detecting lint violations
        #[arg(long)]
        exit_zero: bool,

        /// File name suffixes to collect from directories (can be used multiple times)
        #[arg(long = "suffix", short = 's', default_values = ["-test.yaml"])]
        suffixes: Vec<String>,
    },

    /// Show the supported commands and their properties
    Commands {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        output_format: String,
    },
}
