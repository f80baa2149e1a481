//! Entity lump extraction and key/value parsing
//!
//! The entity lump is plain text and is not NUL-terminated on disk.
//! [`EntityText`] copies it out of the file buffer and appends a terminator,
//! so the text stays usable as a C string independently of the map buffer.
//!
//! ```text
//! {
//! "classname" "worldspawn"
//! "message" "Temple of Retribution"
//! }
//! {
//! "classname" "info_player_deathmatch"
//! "origin" "0 0 64"
//! }
//! ```

pub mod error;
pub mod parser;

pub use error::EntityParseError;
pub use parser::{Entity, parse_entities};

use crate::error::Result;
use crate::lump::{LumpDescriptor, LumpKind};
use std::borrow::Cow;
use std::ffi::CStr;

/// Owned, NUL-terminated copy of the entity lump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityText {
    /// Lump bytes followed by one NUL
    bytes: Box<[u8]>,
}

impl EntityText {
    /// Copy the entity lump out of `file`
    pub fn extract(file: &[u8], descriptor: LumpDescriptor) -> Result<Self> {
        let range = descriptor.byte_range(LumpKind::Entities, file.len())?;

        let mut bytes = Vec::with_capacity(range.len() + 1);
        bytes.extend_from_slice(&file[range]);
        bytes.push(0);

        Ok(Self {
            bytes: bytes.into_boxed_slice(),
        })
    }

    /// Lump bytes without the terminator
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.bytes.len() - 1]
    }

    /// Lump bytes including the terminator
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.bytes
    }

    /// Text up to the first NUL, which is the appended terminator unless the
    /// lump itself contains one
    pub fn as_c_str(&self) -> &CStr {
        CStr::from_bytes_until_nul(&self.bytes).unwrap_or_default()
    }

    /// Lump text, with invalid UTF-8 replaced
    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Length of the lump in bytes, without the terminator
    pub fn len(&self) -> usize {
        self.bytes.len() - 1
    }

    /// Whether the lump is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse the text into entities
    ///
    /// Parsing stops at the first NUL, matching how the engine reads the lump.
    pub fn parse(&self) -> std::result::Result<Vec<Entity>, EntityParseError> {
        parse_entities(&self.as_c_str().to_string_lossy())
    }
}

impl Default for EntityText {
    fn default() -> Self {
        Self {
            bytes: Box::new([0]),
        }
    }
}
