pub mod args;
pub mod commands;
pub mod output;

use args::Cli;
use commands::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    LintFailure = 1,
    Error = 2,
}

impl From<ExitStatus> for i32 {
    fn from(status: ExitStatus) -> Self {
        status as i32
    }
}

pub fn run(args: Cli) -> Result<ExitStatus, anyhow::Error> {
    match args.command {
        Some(args::Commands::Check {
            files,
            output_format,
            exit_zero,
            suffixes,
        }) => run_check(files, output_format, suffixes, exit_zero),
        Some(args::Commands::Commands { output_format }) => run_commands(output_format),
        None => {
            eprintln!("Error: A subcommand is required");
            eprintln!("\nUsage: flowlint <COMMAND>");
            eprintln!("\nCommands:");
            eprintln!("  check        Lint flow files or directories");
            eprintln!("  commands     Show the supported command vocabulary");
            eprintln!("\nFor more information, try 'flowlint --help'");
            Ok(ExitStatus::Error)
        }
    }
}
