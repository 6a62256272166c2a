use clap::Parser;
use cloudfront_signatures_cli::{Configuration, ToolArgs};
use std::io;
use tracing_subscriber::EnvFilter;

fn main() -> miette::Result<()> {
    miette::set_panic_hook();
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = ToolArgs::parse();
    let config = Configuration::from_env()?;

    cloudfront_signatures_cli::run(&config, &mut io::stdout().lock(), args)
}
