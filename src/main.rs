mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use zcalc::config::Config;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let config = Config::load_or_default(args.config.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    cli::run(args, config)
}
