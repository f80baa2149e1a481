//! Command-line inspector for Quake III `IBSP` map files.
//!
//! The binary is a thin wrapper: configuration lives in [`config`], report
//! formatting in [`report`], and [`run`] ties them to a loaded map.
//!
//! # Example
//!
//! ```no_run
//! use q3bsp_inspect::{InspectConfig, run};
//!
//! let config = InspectConfig::from_args();
//! config.validate()?;
//! run(&config, &mut std::io::stdout())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![allow(clippy::uninlined_format_args)] // Backwards compatibility
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod report;

pub use config::{Command, InspectConfig};
pub use error::{ConfigError, InspectError, Result};

use q3bsp_format::BspMap;
use std::io::Write;
use tracing::info;

/// Load the configured map and write the selected report to `out`
pub fn run(config: &InspectConfig, out: &mut impl Write) -> Result<()> {
    let map = BspMap::load_with(&config.file, &config.load_options())?;
    info!(
        "Inspecting {} ({})",
        config.file.display(),
        if map.is_mapped() { "mapped" } else { "read" }
    );

    match config.command() {
        Command::Summary => report::summary(&map, out),
        Command::List { kind } => report::list(&map, kind, out),
        Command::View { kind, index } => report::view(&map, kind, index, out),
        Command::Entities { parsed } => report::entities(&map, parsed, out),
    }
}
