//! topic-check CLI entry point
//!
//! Checks declared topic configs against live cluster state.

use clap::Parser;
use topic_check::cli::args::{Args, Command};
use topic_check::commands::{check, list};
use topic_check::version::get_build_info;
use tracing_subscriber::EnvFilter;

use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    init_tracing(&args);

    match args.command {
        Command::Version => {
            println!("{}", get_build_info());
            ExitCode::SUCCESS
        }
        Command::List => {
            println!("{}", list::run());
            ExitCode::SUCCESS
        }
        Command::Check(ref check_args) => match check::run(check_args) {
            Ok(outcome) => {
                println!("{}", outcome.output);
                if outcome.failed() {
                    ExitCode::from(1)
                } else {
                    ExitCode::SUCCESS
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "check run aborted");
                eprintln!("Error: {}", e);
                ExitCode::from(3)
            }
        },
    }
}

/// Log to stderr; `RUST_LOG` overrides the verbosity flags.
fn init_tracing(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
