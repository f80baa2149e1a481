//! Inspector configuration.
//!
//! Configuration comes from CLI arguments, with the buffer backing also
//! settable through `Q3BSP_MMAP`.
//!
//! # Example
//!
//! ```no_run
//! use q3bsp_inspect::InspectConfig;
//!
//! let config = InspectConfig::from_args();
//! config.validate().expect("Invalid configuration");
//!
//! println!("Inspecting {}", config.file.display());
//! ```

use crate::error::ConfigError;
use clap::{Parser, Subcommand};
use q3bsp_format::{Backing, LoadOptions, LumpKind};
use std::path::PathBuf;

/// Inspector configuration loaded from CLI args and environment variables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "q3bsp-inspect",
    about = "Print the contents of a Quake III IBSP map file",
    version
)]
pub struct InspectConfig {
    /// Memory-map the file instead of reading it into memory
    #[arg(long, env = "Q3BSP_MMAP")]
    pub mmap: bool,

    /// Map file to inspect
    pub file: PathBuf,

    /// What to print (defaults to a summary)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Report to print.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// File size, version and per-lump record counts
    Summary,

    /// Every record of one lump
    List {
        /// Lump name, such as `textures` or `leaf-faces`
        kind: LumpKind,
    },

    /// A single record
    View {
        /// Lump name, such as `textures` or `leaf-faces`
        kind: LumpKind,
        /// Record index
        index: usize,
    },

    /// The entity text
    Entities {
        /// Print parsed key/value pairs instead of raw text
        #[arg(long)]
        parsed: bool,
    },
}

impl InspectConfig {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Report selected on the command line.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Summary)
    }

    /// Library load options for this configuration.
    pub fn load_options(&self) -> LoadOptions {
        let backing = if self.mmap {
            Backing::Mmap
        } else {
            Backing::Read
        };
        LoadOptions::new().backing(backing)
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the map file doesn't exist or is not a
    /// regular file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.file.exists() {
            return Err(ConfigError::FileNotFound(self.file.clone()));
        }
        if !self.file.is_file() {
            return Err(ConfigError::NotAFile(self.file.clone()));
        }
        Ok(())
    }
}
