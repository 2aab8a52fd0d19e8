use anyhow::Result;
use clap::Parser;
use findash::cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    cli.run().await
}

/// Initializes the tracing subscriber. `RUST_LOG` takes precedence; otherwise
/// the default level for this crate depends on the `--verbose` flag.
fn init_logger(verbose: bool) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => {
            let level = if verbose { "debug" } else { "warn" };
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
