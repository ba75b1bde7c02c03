//! daqhid — send output/feature reports to USB HID data-acquisition
//! devices from the command line

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => commands::list(cli.json),
        Commands::Send {
            device,
            report_type,
            id,
            bytes,
        } => commands::send(device, report_type, id, &bytes, cli.json),
    }
}
