//! Models, brushes and brush sides

use crate::lump::LumpKind;
use crate::records::{Face, LumpRecord, RecordRun};
use binrw::BinRead;

/// Rigid group of world geometry (40 bytes)
///
/// Model 0 is the world itself; the rest are brush entities such as doors
/// and platforms.
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Default)]
#[br(little)]
pub struct Model {
    /// Bounding box minimum
    pub mins: [f32; 3],
    /// Bounding box maximum
    pub maxs: [f32; 3],
    /// First face
    pub face: i32,
    /// Number of faces
    pub n_faces: u32,
    /// First brush
    pub brush: i32,
    /// Number of brushes
    pub n_brushes: u32,
}

impl Model {
    /// Run of this model's faces
    pub const fn faces(&self) -> RecordRun<Face> {
        RecordRun::new(self.face as i64, self.n_faces)
    }

    /// Run of this model's brushes
    pub const fn brushes(&self) -> RecordRun<Brush> {
        RecordRun::new(self.brush as i64, self.n_brushes)
    }
}

impl LumpRecord for Model {
    const KIND: LumpKind = LumpKind::Models;
    const SIZE: usize = 40;
}

/// Convex volume used for collision and painting (12 bytes)
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[br(little)]
pub struct Brush {
    /// First brush side
    pub brush_side: i32,
    /// Number of brush sides
    pub n_brush_sides: u32,
    /// Texture index
    pub texture: i32,
}

impl Brush {
    /// Run of this brush's sides
    pub const fn sides(&self) -> RecordRun<BrushSide> {
        RecordRun::new(self.brush_side as i64, self.n_brush_sides)
    }
}

impl LumpRecord for Brush {
    const KIND: LumpKind = LumpKind::Brushes;
    const SIZE: usize = 12;
}

/// Bounding surface of a brush (8 bytes)
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[br(little)]
pub struct BrushSide {
    /// Plane index
    pub plane: i32,
    /// Texture index
    pub texture: i32,
}

impl LumpRecord for BrushSide {
    const KIND: LumpKind = LumpKind::BrushSides;
    const SIZE: usize = 8;
}
