//! Test utilities for building synthetic map files
//!
//! Lumps are laid out back to back after the header in directory order.
//! Descriptors can be overridden afterwards to produce malformed files.

use crate::header::{BSP_MAGIC, HEADER_SIZE, Q3_BSP_VERSION};
use crate::lump::{LUMP_COUNT, LumpDescriptor, LumpKind};

/// Builder for in-memory map files
#[derive(Debug, Clone)]
pub struct MapFileBuilder {
    magic: [u8; 4],
    version: u32,
    lumps: Vec<Vec<u8>>,
    overrides: Vec<(LumpKind, LumpDescriptor)>,
}

impl MapFileBuilder {
    /// Empty map with a valid header
    pub fn new() -> Self {
        Self {
            magic: BSP_MAGIC,
            version: Q3_BSP_VERSION,
            lumps: vec![Vec::new(); LUMP_COUNT],
            overrides: Vec::new(),
        }
    }

    pub fn magic(mut self, magic: [u8; 4]) -> Self {
        self.magic = magic;
        self
    }

    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Raw bytes of one lump
    pub fn lump(mut self, kind: LumpKind, bytes: Vec<u8>) -> Self {
        self.lumps[kind.index()] = bytes;
        self
    }

    pub fn entities(self, text: &str) -> Self {
        self.lump(LumpKind::Entities, text.as_bytes().to_vec())
    }

    /// Visibility record with the given counts and payload
    pub fn vis(self, vector_count: u32, vector_size: u32, payload: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(8 + payload.len());
        bytes.extend_from_slice(&vector_count.to_le_bytes());
        bytes.extend_from_slice(&vector_size.to_le_bytes());
        bytes.extend_from_slice(payload);
        self.lump(LumpKind::VisData, bytes)
    }

    /// Replace the computed descriptor for one lump
    pub fn descriptor(mut self, kind: LumpKind, descriptor: LumpDescriptor) -> Self {
        self.overrides.push((kind, descriptor));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut descriptors = [LumpDescriptor::default(); LUMP_COUNT];
        let mut offset = HEADER_SIZE;
        for (descriptor, bytes) in descriptors.iter_mut().zip(&self.lumps) {
            *descriptor = LumpDescriptor::new(offset as u32, bytes.len() as u32);
            offset += bytes.len();
        }
        for (kind, descriptor) in &self.overrides {
            descriptors[kind.index()] = *descriptor;
        }

        let mut data = Vec::with_capacity(offset);
        data.extend_from_slice(&self.magic);
        data.extend_from_slice(&self.version.to_le_bytes());
        for descriptor in &descriptors {
            data.extend_from_slice(&descriptor.offset.to_le_bytes());
            data.extend_from_slice(&descriptor.length.to_le_bytes());
        }
        for bytes in &self.lumps {
            data.extend_from_slice(bytes);
        }
        data
    }
}

impl Default for MapFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Encoded plane record
pub fn plane_bytes(normal: [f32; 3], distance: f32) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(16);
    for n in normal {
        bytes.extend_from_slice(&n.to_le_bytes());
    }
    bytes.extend_from_slice(&distance.to_le_bytes());
    bytes
}
