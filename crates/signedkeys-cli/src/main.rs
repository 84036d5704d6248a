//! Signedkeys CLI - generate and verify signed random keys.
//!
//! A thin front end over the `signedkeys` library. The generator is
//! described by a TOML settings file; without one, unsigned 16-byte keys
//! are produced.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod logging;

use logging::{LogConfig, LogFormat};

/// Signedkeys - random keys with embedded signatures
#[derive(Parser)]
#[command(name = "signedkeys")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a generator settings file
    #[arg(short, long, global = true, env = "SIGNEDKEYS_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate keys, one per line
    Generate {
        /// Number of keys to generate
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,
    },

    /// Verify a key; exits with status 1 if it is not valid
    Verify {
        /// The key to check, as printed by `generate`
        key: String,
    },

    /// Create an Ed25519 key pair for use in a settings file
    Keypair,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    let log_config = LogConfig::new(level).with_format(cli.log_format);
    let log_config = if cli.verbose {
        log_config.with_directive("signedkeys=debug")
    } else {
        log_config
    };
    if let Err(e) = logging::setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match cli.command {
        Commands::Generate { count } => {
            let generator = commands::load_generator(cli.config.as_deref())?;
            for key in commands::generate(&generator, count)? {
                println!("{key}");
            }
            Ok(ExitCode::SUCCESS)
        },
        Commands::Verify { key } => {
            let generator = commands::load_generator(cli.config.as_deref())?;
            if commands::verify(&generator, &key) {
                println!("valid");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("invalid");
                Ok(ExitCode::FAILURE)
            }
        },
        Commands::Keypair => {
            let (secret, public) = commands::keypair();
            println!("secret_key = \"{secret}\"");
            println!("public_key = \"{public}\"");
            Ok(ExitCode::SUCCESS)
        },
    }
}
