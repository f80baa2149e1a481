//! Synthetic map files for integration tests

#![allow(dead_code)]

use q3bsp_format::{BSP_MAGIC, HEADER_SIZE, LUMP_COUNT, LumpDescriptor, LumpKind, Q3_BSP_VERSION};

/// Lump contents laid out back to back after the header
pub struct SyntheticMap {
    pub magic: [u8; 4],
    pub version: u32,
    pub lumps: Vec<Vec<u8>>,
    pub overrides: Vec<(LumpKind, LumpDescriptor)>,
}

impl SyntheticMap {
    pub fn new() -> Self {
        Self {
            magic: BSP_MAGIC,
            version: Q3_BSP_VERSION,
            lumps: vec![Vec::new(); LUMP_COUNT],
            overrides: Vec::new(),
        }
    }

    pub fn with_lump(mut self, kind: LumpKind, bytes: Vec<u8>) -> Self {
        self.lumps[kind.index()] = bytes;
        self
    }

    pub fn with_descriptor(mut self, kind: LumpKind, descriptor: LumpDescriptor) -> Self {
        self.overrides.push((kind, descriptor));
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut descriptors = [LumpDescriptor::default(); LUMP_COUNT];
        let mut offset = HEADER_SIZE;
        for (i, bytes) in self.lumps.iter().enumerate() {
            descriptors[i] = LumpDescriptor::new(offset as u32, bytes.len() as u32);
            offset += bytes.len();
        }
        for (kind, descriptor) in &self.overrides {
            descriptors[kind.index()] = *descriptor;
        }

        let mut data = Vec::with_capacity(offset);
        data.extend_from_slice(&self.magic);
        data.extend_from_slice(&self.version.to_le_bytes());
        for d in &descriptors {
            data.extend_from_slice(&d.offset.to_le_bytes());
            data.extend_from_slice(&d.length.to_le_bytes());
        }
        for bytes in &self.lumps {
            data.extend_from_slice(bytes);
        }
        data
    }
}

pub fn plane(normal: [f32; 3], distance: f32) -> Vec<u8> {
    let mut bytes = Vec::new();
    for n in normal {
        bytes.extend_from_slice(&n.to_le_bytes());
    }
    bytes.extend_from_slice(&distance.to_le_bytes());
    bytes
}

/// Texture record with a NUL-padded name
pub fn texture(name: &str, flags: i32, contents: i32) -> Vec<u8> {
    let mut bytes = vec![0u8; 64];
    bytes[..name.len()].copy_from_slice(name.as_bytes());
    bytes.extend_from_slice(&flags.to_le_bytes());
    bytes.extend_from_slice(&contents.to_le_bytes());
    bytes
}

pub fn vis(vector_count: u32, vector_size: u32, payload: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&vector_count.to_le_bytes());
    bytes.extend_from_slice(&vector_size.to_le_bytes());
    bytes.extend_from_slice(payload);
    bytes
}
