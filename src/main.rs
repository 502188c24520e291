//! psec - manage environments of secrets from the command line.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use psec::cli::output;
use psec::cli::{execute, Cli};
use psec::error::{EnvironmentError, Error, GeneratorError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("PSEC_LOG").unwrap_or_else(|_| {
        if cli.verbose > 0 {
            EnvFilter::new("psec=debug")
        } else {
            EnvFilter::new("psec=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::Environment(EnvironmentError::BasedirNotFound(_))
            | Error::Environment(EnvironmentError::InvalidBasedir(_)) => {
                Some("run: psec init (or pass --init)")
            }
            Error::Environment(EnvironmentError::NoName) => {
                Some("pass -e NAME, set D2_ENVIRONMENT, or run: psec environments default NAME")
            }
            Error::Environment(EnvironmentError::NotFound(_)) => {
                Some("run: psec environments create NAME")
            }
            Error::Generator(GeneratorError::TypeNotFound(_)) => {
                Some("run: psec secrets describe --types")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
