//! Cereal CLI
//!
//! Command-line tools for cereal files.
//!
//! # Commands
//!
//! - `inspect` - Print the catalog/collection/entity tree of a file
//! - `verify` - Decode a file and report whether it is intact
//! - `demo` - Write and re-read a small sample document
//! - `version` - Show version information

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Cereal binary document tools.
#[derive(Parser)]
#[command(name = "cereal")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the document tree with types, counts and values
    Inspect {
        /// File to inspect
        file: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Decode a file and report success or the first error
    Verify {
        /// File to verify
        file: PathBuf,
    },

    /// Build the sample document, write it, and read it back
    Demo {
        /// Also save the encoded document to this file
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Collection wire version (1 or 2)
        #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u16).range(1..=2))]
        wire_version: u16,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Inspect { file, format } => {
            commands::inspect::run(&file, &format)?;
        }
        Commands::Verify { file } => {
            commands::verify::run(&file)?;
        }
        Commands::Demo { out, wire_version } => {
            commands::demo::run(out.as_deref(), wire_version)?;
        }
        Commands::Version => {
            println!("Cereal CLI v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "Latest collection version: {}",
                cereal_codec::Version::LATEST
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn demo_rejects_unknown_version() {
        assert!(Cli::try_parse_from(["cereal", "demo", "--wire-version", "3"]).is_err());
        let cli = Cli::try_parse_from(["cereal", "-v", "demo", "-w", "1"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Demo {
                wire_version: 1,
                out: None
            }
        ));
    }
}
