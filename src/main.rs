//! RetireWise CLI
//!
//! Usage:
//!   retirewise serve --port 5000
//!   retirewise calculate --current-age 30 --retirement-age 60 --monthly-contribution 10000 \
//!       --expected-return 10 --annuity-return 8
//!   retirewise estimate --desired-monthly-pension 50000 ...
//!   retirewise scenario --current-age 30 --retirement-age 60 --monthly-contribution 10000 \
//!       --annuity-return 8
//!   retirewise inflate --value 1000 --rate 6 --years 10

mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so command output stays pipeable JSON
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let output = match cli.command {
        Commands::Serve(config) => {
            retirewise::api::run_http_server(config).await?;
            return Ok(());
        }
        Commands::Calculate(args) => cmd_calculate(&args)?,
        Commands::Estimate(args) => cmd_estimate(&args)?,
        Commands::Scenario(args) => cmd_scenario(&args)?,
        Commands::Inflate(args) => cmd_inflate(&args)?,
    };
    println!("{output}");
    Ok(())
}
