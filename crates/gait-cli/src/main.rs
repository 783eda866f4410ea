//! Gait CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gait_cli::{analyze, Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only JSON
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => {
            println!("{}", analyze::execute(&args)?);
        }
        Commands::Defaults => {
            println!("{}", analyze::defaults()?);
        }
    }

    Ok(())
}
