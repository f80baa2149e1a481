//! q3bsp-inspect binary entry point.
//!
//! A thin wrapper around the q3bsp-inspect library that parses arguments,
//! initializes logging and writes the requested report to stdout.

use anyhow::{Context, Result};
use q3bsp_inspect::{InspectConfig, run};
use std::io::{BufWriter, Write};

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let config = InspectConfig::from_args();
    config.validate()?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    run(&config, &mut out)
        .with_context(|| format!("Failed to inspect {}", config.file.display()))?;
    out.flush()?;

    Ok(())
}
