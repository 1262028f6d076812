use clap::Parser;
use tracing_subscriber::EnvFilter;

use flowlint::ExitStatus;
use flowlint::args::Cli;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    match flowlint::run(args) {
        Ok(exit_status) => std::process::exit(exit_status.into()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(ExitStatus::Error.into());
        }
    }
}
