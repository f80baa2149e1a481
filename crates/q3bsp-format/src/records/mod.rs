//! Fixed-size record types for the 15 array lumps
//!
//! Every record derives [`BinRead`] little-endian and declares its on-disk
//! size through [`LumpRecord`]. Records are decoded on access from the shared
//! file buffer, so nothing here is aligned or cast in place.

pub mod lighting;
pub mod model;
pub mod surface;
pub mod texture;
pub mod tree;

pub use lighting::{LIGHTMAP_SIZE, LightVol, Lightmap};
pub use model::{Brush, BrushSide, Model};
pub use surface::{Face, FaceType, MeshVert, Vertex};
pub use texture::{Effect, NAME_LEN, Texture};
pub use tree::{Leaf, LeafBrush, LeafFace, Node, NodeChild, Plane};

use crate::lump::LumpKind;
use binrw::io::Cursor;
use binrw::{BinRead, BinResult, Endian};
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

/// A record stored in one of the fixed-record lumps
pub trait LumpRecord: for<'a> BinRead<Args<'a> = ()> + Sized {
    /// Lump holding records of this type
    const KIND: LumpKind;
    /// Size of one record on disk
    const SIZE: usize;

    /// Decode one record from the start of `bytes`
    fn decode(bytes: &[u8]) -> BinResult<Self> {
        Self::read_options(&mut Cursor::new(bytes), Endian::Little, ())
    }
}

/// Packed 24-bit color
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[br(little)]
pub struct Rgb {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

/// Packed 32-bit color
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[br(little)]
pub struct Rgba {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

/// Text of a fixed-width name field
///
/// The name ends at the first NUL byte. A field with no NUL uses all of its
/// bytes. Invalid UTF-8 is replaced rather than rejected.
pub fn bounded_name(raw: &[u8]) -> Cow<'_, str> {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end])
}

/// A `(first, count)` run of records in another lump
///
/// Leaves, models, brushes and faces refer to contiguous stretches of other
/// lumps this way. Resolve a run with [`crate::LumpView::run`].
pub struct RecordRun<T> {
    /// Index of the first record; negative values never resolve
    pub first: i64,
    /// Number of records
    pub count: u32,
    _record: PhantomData<fn() -> T>,
}

impl<T> RecordRun<T> {
    /// Create a run
    pub const fn new(first: i64, count: u32) -> Self {
        Self {
            first,
            count,
            _record: PhantomData,
        }
    }
}

impl<T: LumpRecord> RecordRun<T> {
    /// Lump the run points into
    pub const fn lump(&self) -> LumpKind {
        T::KIND
    }
}

impl<T> Clone for RecordRun<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RecordRun<T> {}

impl<T> PartialEq for RecordRun<T> {
    fn eq(&self, other: &Self) -> bool {
        self.first == other.first && self.count == other.count
    }
}

impl<T> Eq for RecordRun<T> {}

impl<T: LumpRecord> fmt::Debug for RecordRun<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordRun")
            .field("lump", &T::KIND)
            .field("first", &self.first)
            .field("count", &self.count)
            .finish()
    }
}

/// Any single record, as returned by [`crate::BspMap::record_at`]
#[derive(Debug, Clone, PartialEq)]
pub enum Record<'a> {
    /// One byte of entity text
    EntityByte(u8),
    /// Texture record
    Texture(Texture),
    /// Plane record
    Plane(Plane),
    /// Node record
    Node(Node),
    /// Leaf record
    Leaf(Leaf),
    /// Leaf-face record
    LeafFace(LeafFace),
    /// Leaf-brush record
    LeafBrush(LeafBrush),
    /// Model record
    Model(Model),
    /// Brush record
    Brush(Brush),
    /// Brush-side record
    BrushSide(BrushSide),
    /// Vertex record
    Vertex(Vertex),
    /// Mesh-vert record
    MeshVert(MeshVert),
    /// Effect record
    Effect(Effect),
    /// Face record
    Face(Face),
    /// Lightmap record
    Lightmap(Lightmap),
    /// Light volume record
    LightVol(LightVol),
    /// Raw bytes of one visibility vector
    VisVector(&'a [u8]),
}

impl Record<'_> {
    /// Lump this record came from
    pub const fn kind(&self) -> LumpKind {
        match self {
            Self::EntityByte(_) => LumpKind::Entities,
            Self::Texture(_) => LumpKind::Textures,
            Self::Plane(_) => LumpKind::Planes,
            Self::Node(_) => LumpKind::Nodes,
            Self::Leaf(_) => LumpKind::Leafs,
            Self::LeafFace(_) => LumpKind::LeafFaces,
            Self::LeafBrush(_) => LumpKind::LeafBrushes,
            Self::Model(_) => LumpKind::Models,
            Self::Brush(_) => LumpKind::Brushes,
            Self::BrushSide(_) => LumpKind::BrushSides,
            Self::Vertex(_) => LumpKind::Vertices,
            Self::MeshVert(_) => LumpKind::MeshVerts,
            Self::Effect(_) => LumpKind::Effects,
            Self::Face(_) => LumpKind::Faces,
            Self::Lightmap(_) => LumpKind::Lightmaps,
            Self::LightVol(_) => LumpKind::LightVols,
            Self::VisVector(_) => LumpKind::VisData,
        }
    }
}
