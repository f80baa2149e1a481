//! Visibility lump
//!
//! The lump holds a single record: `n_vectors: u32`, `vector_size: u32`,
//! then `n_vectors * vector_size` bytes of cluster bit vectors. The true
//! size comes from those two counts; the descriptor length only bounds it.

use crate::error::{BspError, Result};
use crate::lump::{LumpDescriptor, LumpKind};

/// Size of the two leading counts
pub const VIS_HEADER_SIZE: usize = 8;

/// Parsed visibility record borrowing its vectors from the file buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisData<'a> {
    vector_count: u32,
    vector_size: u32,
    vectors: &'a [u8],
    record_len: usize,
}

/// Location of the visibility record inside the file, kept by the map so
/// the borrowed view can be rebuilt without re-validating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct VisSpan {
    pub(crate) vector_count: u32,
    pub(crate) vector_size: u32,
    pub(crate) payload_start: usize,
    pub(crate) payload_len: usize,
    pub(crate) record_len: usize,
}

impl VisSpan {
    /// Validate the visibility lump and locate its payload
    pub(crate) fn locate(file: &[u8], descriptor: LumpDescriptor) -> Result<Self> {
        let range = descriptor.byte_range(LumpKind::VisData, file.len())?;
        if range.is_empty() {
            return Ok(Self::default());
        }
        let lump = &file[range];

        let start = u64::from(descriptor.offset);
        let out_of_bounds = |end: u64| BspError::LumpOutOfBounds {
            lump: LumpKind::VisData,
            start,
            end,
            limit: descriptor.end(),
        };

        if lump.len() < VIS_HEADER_SIZE {
            return Err(out_of_bounds(start + VIS_HEADER_SIZE as u64));
        }

        let vector_count = u32::from_le_bytes([lump[0], lump[1], lump[2], lump[3]]);
        let vector_size = u32::from_le_bytes([lump[4], lump[5], lump[6], lump[7]]);

        // u32 * u32 + 8 always fits in u64
        let payload_len = u64::from(vector_count) * u64::from(vector_size);
        let required = VIS_HEADER_SIZE as u64 + payload_len;
        if required > lump.len() as u64 {
            return Err(out_of_bounds(start + required));
        }

        Ok(Self {
            vector_count,
            vector_size,
            payload_start: descriptor.offset as usize + VIS_HEADER_SIZE,
            payload_len: payload_len as usize,
            record_len: required as usize,
        })
    }

    /// Borrow the payload from the validated file
    pub(crate) fn view<'a>(&self, file: &'a [u8]) -> VisData<'a> {
        VisData {
            vector_count: self.vector_count,
            vector_size: self.vector_size,
            vectors: &file[self.payload_start..self.payload_start + self.payload_len],
            record_len: self.record_len,
        }
    }
}

impl<'a> VisData<'a> {
    /// Parse the visibility lump of `file`
    pub fn read(file: &'a [u8], descriptor: LumpDescriptor) -> Result<Self> {
        Ok(VisSpan::locate(file, descriptor)?.view(file))
    }

    /// Number of bit vectors, one per cluster
    pub const fn vector_count(&self) -> u32 {
        self.vector_count
    }

    /// Size of each bit vector in bytes
    pub const fn vector_size(&self) -> u32 {
        self.vector_size
    }

    /// All bit vectors, back to back
    pub const fn vectors(&self) -> &'a [u8] {
        self.vectors
    }

    /// Raw bytes of the bit vector at `index`
    pub fn vector(&self, index: usize) -> Option<&'a [u8]> {
        if index >= self.vector_count as usize {
            return None;
        }
        let size = self.vector_size as usize;
        let start = index * size;
        self.vectors.get(start..start + size)
    }

    /// Bytes the record occupies in the file, 0 for an empty lump
    pub const fn byte_len(&self) -> usize {
        self.record_len
    }

    /// Whether the lump carries no vectors
    pub const fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}
