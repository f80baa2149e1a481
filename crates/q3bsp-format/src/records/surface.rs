//! Renderable surfaces: vertices, mesh vertex offsets and faces

use crate::lump::LumpKind;
use crate::records::{Effect, LumpRecord, RecordRun, Rgba, Texture};
use binrw::BinRead;

/// Map vertex (44 bytes)
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Default)]
#[br(little)]
pub struct Vertex {
    /// World position
    pub position: [f32; 3],
    /// Surface texture coordinates
    pub tex_coord: [f32; 2],
    /// Lightmap texture coordinates
    pub lightmap_coord: [f32; 2],
    /// Vertex normal
    pub normal: [f32; 3],
    /// Vertex color
    pub color: Rgba,
}

impl LumpRecord for Vertex {
    const KIND: LumpKind = LumpKind::Vertices;
    const SIZE: usize = 44;
}

/// Vertex offset, relative to a face's first vertex (4 bytes)
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[br(little)]
pub struct MeshVert {
    /// Offset added to the face's `vertex` field
    pub offset: i32,
}

impl LumpRecord for MeshVert {
    const KIND: LumpKind = LumpKind::MeshVerts;
    const SIZE: usize = 4;
}

/// Face type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceType {
    /// Planar polygon (1)
    Polygon,
    /// Bezier patch (2)
    Patch,
    /// Triangle mesh (3)
    Mesh,
    /// Camera-facing sprite (4)
    Billboard,
    /// Any other value, kept as found
    Unknown(i32),
}

impl FaceType {
    /// Interpret the on-disk tag
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            1 => Self::Polygon,
            2 => Self::Patch,
            3 => Self::Mesh,
            4 => Self::Billboard,
            other => Self::Unknown(other),
        }
    }

    /// The on-disk tag
    pub const fn raw(self) -> i32 {
        match self {
            Self::Polygon => 1,
            Self::Patch => 2,
            Self::Mesh => 3,
            Self::Billboard => 4,
            Self::Unknown(other) => other,
        }
    }
}

/// Surface geometry (104 bytes)
#[derive(BinRead, Debug, Clone, Copy, PartialEq)]
#[br(little)]
pub struct Face {
    /// Texture index
    pub texture: i32,
    /// Effect index, -1 for none
    pub effect: i32,
    /// Surface type
    #[br(map = |raw: i32| FaceType::from_raw(raw))]
    pub face_type: FaceType,
    /// First vertex
    pub vertex: i32,
    /// Number of vertices
    pub n_vertices: u32,
    /// First mesh vertex
    pub mesh_vert: i32,
    /// Number of mesh vertices
    pub n_mesh_verts: u32,
    /// Lightmap index, negative for none
    pub lightmap: i32,
    /// Corner of this face's region in the lightmap
    pub lightmap_start: [f32; 2],
    /// Size of this face's region in the lightmap
    pub lightmap_size: [f32; 2],
    /// World-space origin of the lightmap
    pub lightmap_origin: [f32; 3],
    /// World-space lightmap s and t unit vectors
    pub lightmap_vecs: [[f32; 3]; 2],
    /// Surface normal
    pub normal: [f32; 3],
    /// Patch control point dimensions
    pub patch_size: [i32; 2],
}

impl Face {
    /// Index into the effects lump, `None` when the face has no effect
    pub fn effect_index(&self) -> Option<usize> {
        usize::try_from(self.effect).ok()
    }

    /// Run of this face's vertices
    pub const fn vertices(&self) -> RecordRun<Vertex> {
        RecordRun::new(self.vertex as i64, self.n_vertices)
    }

    /// Run of this face's mesh vertex offsets
    pub const fn mesh_verts(&self) -> RecordRun<MeshVert> {
        RecordRun::new(self.mesh_vert as i64, self.n_mesh_verts)
    }

    /// Single-record run for this face's texture
    pub const fn texture_run(&self) -> RecordRun<Texture> {
        RecordRun::new(self.texture as i64, 1)
    }

    /// Single-record run for this face's effect; empty when there is none
    pub const fn effect_run(&self) -> RecordRun<Effect> {
        if self.effect < 0 {
            RecordRun::new(0, 0)
        } else {
            RecordRun::new(self.effect as i64, 1)
        }
    }
}

impl LumpRecord for Face {
    const KIND: LumpKind = LumpKind::Faces;
    const SIZE: usize = 104;
}
