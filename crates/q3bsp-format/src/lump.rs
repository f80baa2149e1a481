//! Lump kinds and directory descriptors
//!
//! The header directory holds 17 descriptors in a fixed order. That order is
//! part of the format and [`LumpKind`] discriminants mirror it.

use crate::error::{BspError, Result};
use crate::records::{
    Brush, BrushSide, Effect, Face, LeafBrush, LeafFace, Leaf, LightVol, Lightmap, LumpRecord,
    MeshVert, Model, Node, Plane, Texture, Vertex,
};
use binrw::BinRead;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use thiserror::Error;

/// Number of lump descriptors in the header directory
pub const LUMP_COUNT: usize = 17;

/// One of the 17 lumps, in directory order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LumpKind {
    /// Entity definitions as text
    Entities = 0,
    /// Surface descriptions
    Textures = 1,
    /// Partitioning planes
    Planes = 2,
    /// Internal tree nodes
    Nodes = 3,
    /// Tree leaves
    Leafs = 4,
    /// Face index lists for leaves
    LeafFaces = 5,
    /// Brush index lists for leaves
    LeafBrushes = 6,
    /// Rigid world geometry groups
    Models = 7,
    /// Convex volumes
    Brushes = 8,
    /// Brush bounding surfaces
    BrushSides = 9,
    /// Vertices
    Vertices = 10,
    /// Vertex offsets for mesh faces
    MeshVerts = 11,
    /// Effect (fog) references
    Effects = 12,
    /// Surface geometry
    Faces = 13,
    /// 128x128 RGB lightmaps
    Lightmaps = 14,
    /// Lighting grid samples
    LightVols = 15,
    /// Cluster visibility vectors
    VisData = 16,
}

impl LumpKind {
    /// All lumps, in directory order
    pub const ALL: [Self; LUMP_COUNT] = [
        Self::Entities,
        Self::Textures,
        Self::Planes,
        Self::Nodes,
        Self::Leafs,
        Self::LeafFaces,
        Self::LeafBrushes,
        Self::Models,
        Self::Brushes,
        Self::BrushSides,
        Self::Vertices,
        Self::MeshVerts,
        Self::Effects,
        Self::Faces,
        Self::Lightmaps,
        Self::LightVols,
        Self::VisData,
    ];

    /// Position of this lump's descriptor in the header directory
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable name, as used in error messages and on the command line
    pub const fn name(self) -> &'static str {
        match self {
            Self::Entities => "entities",
            Self::Textures => "textures",
            Self::Planes => "planes",
            Self::Nodes => "nodes",
            Self::Leafs => "leafs",
            Self::LeafFaces => "leaf-faces",
            Self::LeafBrushes => "leaf-brushes",
            Self::Models => "models",
            Self::Brushes => "brushes",
            Self::BrushSides => "brush-sides",
            Self::Vertices => "vertices",
            Self::MeshVerts => "mesh-verts",
            Self::Effects => "effects",
            Self::Faces => "faces",
            Self::Lightmaps => "lightmaps",
            Self::LightVols => "lightvols",
            Self::VisData => "vis-data",
        }
    }

    /// Record size in bytes, or `None` for the two irregular lumps
    pub const fn record_size(self) -> Option<usize> {
        match self {
            Self::Entities | Self::VisData => None,
            Self::Textures => Some(Texture::SIZE),
            Self::Planes => Some(Plane::SIZE),
            Self::Nodes => Some(Node::SIZE),
            Self::Leafs => Some(Leaf::SIZE),
            Self::LeafFaces => Some(LeafFace::SIZE),
            Self::LeafBrushes => Some(LeafBrush::SIZE),
            Self::Models => Some(Model::SIZE),
            Self::Brushes => Some(Brush::SIZE),
            Self::BrushSides => Some(BrushSide::SIZE),
            Self::Vertices => Some(Vertex::SIZE),
            Self::MeshVerts => Some(MeshVert::SIZE),
            Self::Effects => Some(Effect::SIZE),
            Self::Faces => Some(Face::SIZE),
            Self::Lightmaps => Some(Lightmap::SIZE),
            Self::LightVols => Some(LightVol::SIZE),
        }
    }

    /// Whether this lump is a homogeneous array of fixed-size records
    pub const fn is_fixed_record(self) -> bool {
        self.record_size().is_some()
    }
}

impl fmt::Display for LumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized lump name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown lump kind '{0}'")]
pub struct ParseLumpKindError(pub String);

impl FromStr for LumpKind {
    type Err = ParseLumpKindError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLumpKindError(s.to_string()))
    }
}

/// Directory entry locating one lump in the file
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[br(little)]
pub struct LumpDescriptor {
    /// Offset from the beginning of the file
    pub offset: u32,
    /// Length in bytes
    pub length: u32,
}

impl LumpDescriptor {
    /// Size of one directory entry on disk
    pub const SIZE: usize = 8;

    /// Create a descriptor
    pub const fn new(offset: u32, length: u32) -> Self {
        Self { offset, length }
    }

    /// One past the last byte, computed without overflow
    pub const fn end(&self) -> u64 {
        self.offset as u64 + self.length as u64
    }

    /// Whether the lump holds no bytes
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Check that the lump lies inside a file of `file_len` bytes and return
    /// its byte range
    pub fn byte_range(&self, lump: LumpKind, file_len: usize) -> Result<Range<usize>> {
        let limit = file_len as u64;
        if self.end() > limit {
            return Err(BspError::LumpOutOfBounds {
                lump,
                start: u64::from(self.offset),
                end: self.end(),
                limit,
            });
        }
        Ok(self.offset as usize..self.end() as usize)
    }
}
