use anyhow::Result;
use bid_insight::cli;
use clap::Parser;
use tracing::error;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    if let Err(err) = cli::dispatch(args) {
        // config and input errors can surface before logging is initialized
        if tracing::dispatcher::has_been_set() {
            error!("{:#}", err);
        } else {
            eprintln!("error: {:#}", err);
        }
        std::process::exit(1);
    }
    Ok(())
}
