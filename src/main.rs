use anyhow::{Context, Result};
use clap::Parser;
use rmplaysnippet::cli::Cli;
use rmplaysnippet::commands::remove;
use rmplaysnippet::{Config, Console, GoogleConnector};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("rmplaysnippet=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::default();
    let connector = GoogleConnector::new(config.clone());

    let stdin = io::stdin();
    let mut console = Console {
        input: stdin.lock(),
        out: io::stdout(),
        err: io::stderr(),
    };

    let code = remove::run(&cli.target, &config, &connector, &mut console).await;
    console.out.flush().context("failed to flush stdout")?;

    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}
