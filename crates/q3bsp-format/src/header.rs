//! IBSP header and lump directory
//!
//! The header is 136 bytes: magic (4), version (4), then 17 descriptors of
//! `(offset, length)` as little-endian u32 pairs.

use crate::error::{BspError, Result};
use crate::lump::{LUMP_COUNT, LumpDescriptor, LumpKind};
use binrw::BinRead;
use binrw::io::Cursor;

/// Magic bytes at the start of every map file
pub const BSP_MAGIC: [u8; 4] = *b"IBSP";

/// Format version written by the Quake III map compiler
pub const Q3_BSP_VERSION: u32 = 0x2e;

/// Size of the header including the lump directory
pub const HEADER_SIZE: usize = 8 + LUMP_COUNT * LumpDescriptor::SIZE;

/// Parsed file header
#[derive(BinRead, Debug, Clone, PartialEq, Eq)]
#[br(little)]
pub struct BspHeader {
    /// Magic bytes, always "IBSP" after a successful parse
    pub magic: [u8; 4],
    /// Format version
    pub version: u32,
    /// Lump directory in [`LumpKind`] order
    pub lumps: [LumpDescriptor; LUMP_COUNT],
}

impl BspHeader {
    /// Parse and validate the header at the start of `data`
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(BspError::Truncated {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }

        let mut cursor = Cursor::new(&data[..HEADER_SIZE]);
        let header = Self::read(&mut cursor).map_err(|_| BspError::Truncated {
            expected: HEADER_SIZE,
            actual: data.len(),
        })?;

        if header.magic != BSP_MAGIC {
            return Err(BspError::MagicMismatch {
                found: header.magic,
            });
        }

        Ok(header)
    }

    /// Descriptor for one lump
    pub const fn descriptor(&self, kind: LumpKind) -> LumpDescriptor {
        self.lumps[kind.index()]
    }

    /// Descriptors paired with their lump kinds, in directory order
    pub fn iter(&self) -> impl Iterator<Item = (LumpKind, LumpDescriptor)> + '_ {
        LumpKind::ALL.into_iter().zip(self.lumps.iter().copied())
    }
}
