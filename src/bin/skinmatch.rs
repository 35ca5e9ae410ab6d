//! SkinMatch CLI binary.

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use skinmatch::cli::args::SkinMatchArgs;
use skinmatch::cli::commands::execute_command;

fn main() {
    let args = SkinMatchArgs::parse();

    // RUST_LOG wins over the verbosity flags
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_directive())),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
