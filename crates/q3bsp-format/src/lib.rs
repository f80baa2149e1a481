//! Loader for Quake III `IBSP` map files
//!
#![allow(clippy::cast_possible_truncation)] // Intentional for binary format parsing
#![allow(clippy::cast_possible_wrap)] // Intentional for binary operations
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
#![allow(clippy::cast_sign_loss)] // Record indices come from signed fields
#![allow(clippy::uninlined_format_args)] // Backwards compatibility
#![allow(clippy::doc_markdown)] // Many BSP-specific terms don't need backticks
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::float_cmp)] // Binary format requirements
#![allow(clippy::return_self_not_must_use)] // Builder patterns
#![allow(clippy::use_self)] // Type clarity
//! This crate reads a map file into memory (or maps it), validates the header
//! and the lump directory, and hands out typed, zero-copy views of each lump.
//!
//! # File Layout
//!
//! - **Header**: magic `IBSP`, version `0x2e`, then 17 `(offset, length)` lump
//!   descriptors, all little-endian
//! - **Fixed-record lumps**: 15 lumps of packed records (textures, planes,
//!   nodes, leafs, faces, lightmaps and the rest)
//! - **Entities**: plain text of `{ "key" "value" }` blocks
//! - **Visibility**: one self-describing record of cluster bit vectors
//!
//! # Guarantees
//!
//! - Loading is all or nothing: a map is returned only when every lump lies
//!   inside the file and every fixed-record lump holds a whole number of
//!   records
//! - Views borrow from the map and never copy record data
//! - The entity text is an owned, NUL-terminated copy
//!
//! # Example
//!
//! ```no_run
//! use q3bsp_format::{BspMap, LumpKind};
//!
//! let map = BspMap::load("maps/q3dm17.bsp")?;
//! println!("{} faces", map.count(LumpKind::Faces));
//! for texture in map.textures() {
//!     println!("{}", texture?.name());
//! }
//! # Ok::<(), q3bsp_format::BspError>(())
//! ```

#![warn(missing_docs)]

/// File buffer backing, heap or memory-mapped
pub mod buffer;
/// Entity text extraction and parsing
pub mod entities;
pub mod error;
/// File header and lump directory
pub mod header;
pub mod lump;
/// Loaded map handle
///
/// [`BspMap`] ties the other modules together: it owns the file buffer,
/// validates every lump on load, and rebuilds typed views on demand.
pub mod map;
pub mod records;
pub mod view;
pub mod vis;

// Test utilities module
#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
pub(crate) mod test_utils;

pub use buffer::MapBuffer;
pub use entities::{Entity, EntityParseError, EntityText, parse_entities};
pub use error::{BspError, ErrorKind, Result};
pub use header::{BSP_MAGIC, BspHeader, HEADER_SIZE, Q3_BSP_VERSION};
pub use lump::{LUMP_COUNT, LumpDescriptor, LumpKind, ParseLumpKindError};
pub use map::{Backing, BspMap, LoadOptions};
pub use records::{LumpRecord, Record, RecordRun};
pub use view::{LumpIter, LumpView};
pub use vis::VisData;
