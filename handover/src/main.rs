mod cli;

use clap::Parser;
use log::{error, LevelFilter};

fn main() {
    let cli = cli::Cli::parse();

    // https://docs.rs/env_logger/latest/env_logger/
    // RUST_LOG still refines per-module levels on top of this.
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .format_target(false)
        .init();

    if let Err(e) = cli::run(cli) {
        error!("{e:#}");
        std::process::exit(1);
    }
}
