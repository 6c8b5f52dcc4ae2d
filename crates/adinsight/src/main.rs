use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::setup::Cli;

/// Log filter variable. Falls back to `warn`, or `debug` with `--verbose`.
const LOG_ENV: &str = "ADINSIGHT_LOG";

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = cli::commands::run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
