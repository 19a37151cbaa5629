#![deny(missing_docs)]

//! # WPC CLI
//!
//! Command Line Interface for the WordPress REST to Bruno collection compiler.
//!
//! Supported Commands:
//! - `generate`: Writes a Bruno collection directory.
//! - `export`: Writes the collection as a single JSON document.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wpc_core::AppResult;

mod export;
mod generate;
mod source;
mod writer;

#[derive(Parser, Debug)]
#[clap(author, version, about = "WordPress REST to Bruno collection compiler")]
struct Cli {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace).
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile the API into a Bruno collection directory.
    Generate(generate::GenerateArgs),
    /// Compile the API into a single collection JSON document.
    Export(export::ExportArgs),
}

/// Initializes the stderr subscriber. `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,wpc=info,wpc_core=info".to_string(),
            2 => "info,wpc=debug,wpc_core=debug".to_string(),
            _ => "debug,wpc=trace,wpc_core=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose >= 2)
                .with_level(true)
                .with_file(verbose >= 3)
                .with_line_number(verbose >= 3)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> AppResult<()> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Generate(args) => generate::execute(args)?,
        Commands::Export(args) => export::execute(args)?,
    }

    Ok(())
}
