mod checker;
mod cli;
mod collector;
mod commands;
mod config;
mod notifier;
mod run;
mod scheduler;
mod shutdown;
mod telegram;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let opts = cli::Opts::parse();
    run::run(opts).await
}
