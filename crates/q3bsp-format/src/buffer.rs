//! Owned file bytes backing every view of a loaded map

use crate::error::{BspError, Result};
use memmap2::{Mmap, MmapOptions};
use std::fs::File;
use std::io::Read;
use std::ops::Deref;
use std::path::Path;
use tracing::debug;

/// The complete contents of one map file
///
/// Either read into a heap buffer or memory-mapped read-only. Both expose the
/// same `&[u8]` and both are released together with the owning map.
pub enum MapBuffer {
    /// Bytes read into memory
    Owned(Vec<u8>),
    /// Read-only memory map of the file
    Mapped(Mmap),
}

impl MapBuffer {
    /// Read the whole file at `path`
    ///
    /// Fails with [`BspError::ShortRead`] if fewer bytes arrive than the file
    /// size reported when it was opened.
    pub fn read(path: &Path) -> Result<Self> {
        let open_error = |source| BspError::Open {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(open_error)?;
        let expected = file.metadata().map_err(open_error)?.len();

        let mut data = Vec::with_capacity(usize::try_from(expected).unwrap_or(0));
        file.read_to_end(&mut data).map_err(open_error)?;

        if (data.len() as u64) < expected {
            return Err(BspError::ShortRead {
                path: path.to_path_buf(),
                expected,
                actual: data.len(),
            });
        }

        debug!("Read {} bytes from {}", data.len(), path.display());
        Ok(Self::Owned(data))
    }

    /// Memory-map the file at `path` read-only
    pub fn map(path: &Path) -> Result<Self> {
        let open_error = |source| BspError::Open {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(open_error)?;

        // Truncating the file while it is mapped is undefined behavior
        #[allow(unsafe_code)]
        let mmap = unsafe { MmapOptions::new().map(&file).map_err(open_error)? };

        debug!("Mapped {} bytes from {}", mmap.len(), path.display());
        Ok(Self::Mapped(mmap))
    }

    /// Wrap bytes already in memory
    pub const fn from_vec(data: Vec<u8>) -> Self {
        Self::Owned(data)
    }

    /// Whether the buffer is memory-mapped
    pub const fn is_mapped(&self) -> bool {
        matches!(self, Self::Mapped(_))
    }
}

impl Deref for MapBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Self::Owned(data) => data.as_slice(),
            Self::Mapped(mmap) => &mmap[..],
        }
    }
}

impl AsRef<[u8]> for MapBuffer {
    fn as_ref(&self) -> &[u8] {
        self
    }
}

impl std::fmt::Debug for MapBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let backing = if self.is_mapped() { "Mapped" } else { "Owned" };
        f.debug_struct("MapBuffer")
            .field("backing", &backing)
            .field("len", &self.len())
            .finish()
    }
}
