use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gleaner::app::{AppContext, GleanerError};
use gleaner::cli::Cli;
use gleaner::pipeline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let ctx = AppContext::new()?;

    match pipeline::run(&ctx, cli).await {
        Ok(()) => Ok(()),
        Err(GleanerError::Aborted) => {
            println!("Aborted.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
