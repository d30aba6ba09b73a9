//! The main entry point for the `bulkrep` command-line application.
//!
//! Parses arguments, loads the configuration and hands off to the runner.
//! Usage errors exit with clap's status (2) before the config is touched;
//! configuration and I/O errors exit with 1.

use bulkrep::cli;
use bulkrep::config::ConfigLoader;
use bulkrep::errors::Result;
use bulkrep::logging;
use bulkrep::reporter::Reporter;
use bulkrep::runner::{self, Mode};
use std::env;
use std::io;
use std::process;

fn main() {
    let args = cli::parse_args();
    let Some(mode) = args.mode() else {
        cli::mode_error().exit();
    };

    if let Err(e) = real_main(args, mode) {
        eprintln!("Error: {e}");
        if e.is_config() {
            eprintln!("Check the configuration document; no files were touched.");
        }
        process::exit(1);
    }
}

fn real_main(args: cli::Args, mode: Mode) -> Result<()> {
    logging::init_logger(logging::level_from_occurrences(args.verbose))?;

    log::info!("Using config file: {}", args.config.display());
    let config = ConfigLoader::load(&args.config)?;

    let repo_root = env::current_dir()?;
    let mut reporter = Reporter::new(io::stdout().lock());
    runner::run(&config, &repo_root, mode, &mut reporter)?;
    Ok(())
}
