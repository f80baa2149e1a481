//! Loaded map handle
//!
//! [`BspMap`] owns the file bytes and the entity text. Loading validates the
//! header and every lump up front, so views handed out afterwards never fail
//! to construct and a map with a bad lump is never returned.

use crate::buffer::MapBuffer;
use crate::entities::{Entity, EntityParseError, EntityText};
use crate::error::{BspError, Result};
use crate::header::{BspHeader, Q3_BSP_VERSION};
use crate::lump::{LumpDescriptor, LumpKind};
use crate::records::{
    Brush, BrushSide, Effect, Face, Leaf, LeafBrush, LeafFace, LightVol, Lightmap, LumpRecord,
    MeshVert, Model, Node, Plane, Record, RecordRun, Texture, Vertex,
};
use crate::view::LumpView;
use crate::vis::{VisData, VisSpan};
use std::path::Path;
use tracing::{debug, info, warn};

/// How the file bytes are brought into memory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backing {
    /// Read the whole file into a heap buffer
    #[default]
    Read,
    /// Memory-map the file read-only
    Mmap,
}

/// Options for [`BspMap::load_with`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Buffer backing
    pub backing: Backing,
}

impl LoadOptions {
    /// Default options: read into memory
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose the buffer backing
    pub const fn backing(mut self, backing: Backing) -> Self {
        self.backing = backing;
        self
    }
}

/// A fully loaded, validated map file
///
/// Immutable once loaded. Views borrow from the map, so the borrow checker
/// keeps them from outliving it; dropping the map releases the file bytes
/// and the entity text together.
#[derive(Debug)]
pub struct BspMap {
    buffer: MapBuffer,
    header: BspHeader,
    entities: EntityText,
    vis: VisSpan,
}

impl BspMap {
    /// Load the map file at `path` with default options
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(path, &LoadOptions::default())
    }

    /// Load the map file at `path`
    pub fn load_with(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        let buffer = match options.backing {
            Backing::Read => MapBuffer::read(path)?,
            Backing::Mmap => MapBuffer::map(path)?,
        };

        let map = Self::from_buffer(buffer)?;
        info!(
            "Loaded {} ({} bytes, version {:#x})",
            path.display(),
            map.file_len(),
            map.version()
        );
        Ok(map)
    }

    /// Load a map from bytes already in memory
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_buffer(MapBuffer::from_vec(data))
    }

    /// Load a map from an existing buffer
    pub fn from_buffer(buffer: MapBuffer) -> Result<Self> {
        let header = BspHeader::parse(&buffer)?;
        if header.version != Q3_BSP_VERSION {
            warn!(
                "Unexpected BSP version {:#x} (expected {:#x})",
                header.version, Q3_BSP_VERSION
            );
        }

        validate_lump::<Texture>(&buffer, &header)?;
        validate_lump::<Plane>(&buffer, &header)?;
        validate_lump::<Node>(&buffer, &header)?;
        validate_lump::<Leaf>(&buffer, &header)?;
        validate_lump::<LeafFace>(&buffer, &header)?;
        validate_lump::<LeafBrush>(&buffer, &header)?;
        validate_lump::<Model>(&buffer, &header)?;
        validate_lump::<Brush>(&buffer, &header)?;
        validate_lump::<BrushSide>(&buffer, &header)?;
        validate_lump::<Vertex>(&buffer, &header)?;
        validate_lump::<MeshVert>(&buffer, &header)?;
        validate_lump::<Effect>(&buffer, &header)?;
        validate_lump::<Face>(&buffer, &header)?;
        validate_lump::<Lightmap>(&buffer, &header)?;
        validate_lump::<LightVol>(&buffer, &header)?;

        let entities = EntityText::extract(&buffer, header.descriptor(LumpKind::Entities))?;
        debug!("Lump {}: {} bytes of text", LumpKind::Entities, entities.len());

        let vis = VisSpan::locate(&buffer, header.descriptor(LumpKind::VisData))?;
        debug!(
            "Lump {}: {} vectors of {} bytes",
            LumpKind::VisData,
            vis.vector_count,
            vis.vector_size
        );

        Ok(Self {
            buffer,
            header,
            entities,
            vis,
        })
    }

    /// Parsed header
    pub const fn header(&self) -> &BspHeader {
        &self.header
    }

    /// Format version from the header
    pub const fn version(&self) -> u32 {
        self.header.version
    }

    /// Total size of the file in bytes
    pub fn file_len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the file bytes are memory-mapped
    pub const fn is_mapped(&self) -> bool {
        self.buffer.is_mapped()
    }

    /// Directory entry for one lump
    pub const fn descriptor(&self, kind: LumpKind) -> LumpDescriptor {
        self.header.descriptor(kind)
    }

    /// Typed view of one fixed-record lump
    pub fn lump<T: LumpRecord>(&self) -> LumpView<'_, T> {
        // Every fixed-record lump was validated in from_buffer
        LumpView::new(&self.buffer, self.header.descriptor(T::KIND))
            .unwrap_or_else(|_| LumpView::empty())
    }

    /// Resolve a cross-reference run against its target lump
    pub fn run<T: LumpRecord>(&self, run: RecordRun<T>) -> Result<LumpView<'_, T>> {
        self.lump::<T>().run(run)
    }

    /// Texture records
    pub fn textures(&self) -> LumpView<'_, Texture> {
        self.lump()
    }

    /// Plane records
    pub fn planes(&self) -> LumpView<'_, Plane> {
        self.lump()
    }

    /// Node records
    pub fn nodes(&self) -> LumpView<'_, Node> {
        self.lump()
    }

    /// Leaf records
    pub fn leafs(&self) -> LumpView<'_, Leaf> {
        self.lump()
    }

    /// Leaf-face records
    pub fn leaf_faces(&self) -> LumpView<'_, LeafFace> {
        self.lump()
    }

    /// Leaf-brush records
    pub fn leaf_brushes(&self) -> LumpView<'_, LeafBrush> {
        self.lump()
    }

    /// Model records
    pub fn models(&self) -> LumpView<'_, Model> {
        self.lump()
    }

    /// Brush records
    pub fn brushes(&self) -> LumpView<'_, Brush> {
        self.lump()
    }

    /// Brush-side records
    pub fn brush_sides(&self) -> LumpView<'_, BrushSide> {
        self.lump()
    }

    /// Vertex records
    pub fn vertices(&self) -> LumpView<'_, Vertex> {
        self.lump()
    }

    /// Mesh-vert records
    pub fn mesh_verts(&self) -> LumpView<'_, MeshVert> {
        self.lump()
    }

    /// Effect records
    pub fn effects(&self) -> LumpView<'_, Effect> {
        self.lump()
    }

    /// Face records
    pub fn faces(&self) -> LumpView<'_, Face> {
        self.lump()
    }

    /// Lightmap records
    pub fn lightmaps(&self) -> LumpView<'_, Lightmap> {
        self.lump()
    }

    /// Light volume records
    pub fn lightvols(&self) -> LumpView<'_, LightVol> {
        self.lump()
    }

    /// Entity text, NUL-terminated
    pub const fn entities_text(&self) -> &EntityText {
        &self.entities
    }

    /// Entity text parsed into key/value entities
    pub fn entities(&self) -> std::result::Result<Vec<Entity>, EntityParseError> {
        self.entities.parse()
    }

    /// Visibility record
    pub fn vis_data(&self) -> VisData<'_> {
        self.vis.view(&self.buffer)
    }

    /// Number of records in a lump
    ///
    /// The entity lump counts bytes of text; the visibility lump counts
    /// vectors.
    pub fn count(&self, kind: LumpKind) -> usize {
        match kind.record_size() {
            Some(size) => self.descriptor(kind).length as usize / size,
            None if kind == LumpKind::Entities => self.entities.len(),
            None => self.vis.vector_count as usize,
        }
    }

    /// Record `index` of any lump
    pub fn record_at(&self, kind: LumpKind, index: usize) -> Result<Record<'_>> {
        let out_of_range = || BspError::IndexOutOfRange {
            lump: kind,
            index,
            count: self.count(kind),
        };

        match kind {
            LumpKind::Entities => self
                .entities
                .as_bytes()
                .get(index)
                .map(|&b| Record::EntityByte(b))
                .ok_or_else(out_of_range),
            LumpKind::Textures => self.textures().get(index).map(Record::Texture),
            LumpKind::Planes => self.planes().get(index).map(Record::Plane),
            LumpKind::Nodes => self.nodes().get(index).map(Record::Node),
            LumpKind::Leafs => self.leafs().get(index).map(Record::Leaf),
            LumpKind::LeafFaces => self.leaf_faces().get(index).map(Record::LeafFace),
            LumpKind::LeafBrushes => self.leaf_brushes().get(index).map(Record::LeafBrush),
            LumpKind::Models => self.models().get(index).map(Record::Model),
            LumpKind::Brushes => self.brushes().get(index).map(Record::Brush),
            LumpKind::BrushSides => self.brush_sides().get(index).map(Record::BrushSide),
            LumpKind::Vertices => self.vertices().get(index).map(Record::Vertex),
            LumpKind::MeshVerts => self.mesh_verts().get(index).map(Record::MeshVert),
            LumpKind::Effects => self.effects().get(index).map(Record::Effect),
            LumpKind::Faces => self.faces().get(index).map(Record::Face),
            LumpKind::Lightmaps => self.lightmaps().get(index).map(Record::Lightmap),
            LumpKind::LightVols => self.lightvols().get(index).map(Record::LightVol),
            LumpKind::VisData => self
                .vis_data()
                .vector(index)
                .map(Record::VisVector)
                .ok_or_else(out_of_range),
        }
    }
}

/// Check one fixed-record lump against the buffer
fn validate_lump<T: LumpRecord>(file: &[u8], header: &BspHeader) -> Result<()> {
    let view = LumpView::<T>::new(file, header.descriptor(T::KIND))?;
    debug!("Lump {}: {} records", T::KIND, view.len());
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::records::NodeChild;
    use crate::test_utils::{MapFileBuilder, plane_bytes};

    #[test]
    fn test_empty_map() {
        let data = MapFileBuilder::new().build();
        assert_eq!(data.len(), 136);

        let map = BspMap::from_bytes(data).expect("Should load empty map");
        assert_eq!(map.version(), Q3_BSP_VERSION);
        for kind in LumpKind::ALL {
            assert_eq!(map.count(kind), 0, "{kind} should be empty");
        }
        assert_eq!(map.entities_text().as_bytes_with_nul(), b"\0");
        assert!(map.vis_data().is_empty());
        assert!(map.entities().unwrap().is_empty());
    }

    #[test]
    fn test_single_plane() {
        let data = MapFileBuilder::new()
            .lump(LumpKind::Planes, plane_bytes([0.0, 0.0, 1.0], 5.0))
            .build();
        let map = BspMap::from_bytes(data).unwrap();

        assert_eq!(map.count(LumpKind::Planes), 1);
        let plane = map.planes().get(0).unwrap();
        assert_eq!(plane.normal, [0.0, 0.0, 1.0]);
        assert_eq!(plane.distance, 5.0);

        match map.record_at(LumpKind::Planes, 0).unwrap() {
            Record::Plane(p) => assert_eq!(p, plane),
            other => panic!("Expected a plane, got {other:?}"),
        }
    }

    #[test]
    fn test_each_lump_binds_to_its_own_descriptor() {
        // Distinct record counts per lump catch any lump read through
        // another lump's descriptor
        let mut builder = MapFileBuilder::new();
        for (i, kind) in LumpKind::ALL.iter().enumerate() {
            if let Some(size) = kind.record_size() {
                let records = if *kind == LumpKind::Lightmaps { 1 } else { i + 1 };
                builder = builder.lump(*kind, vec![0u8; size * records]);
            }
        }
        let map = BspMap::from_bytes(builder.build()).unwrap();

        for (i, kind) in LumpKind::ALL.iter().enumerate() {
            if kind.is_fixed_record() {
                let expected = if *kind == LumpKind::Lightmaps { 1 } else { i + 1 };
                assert_eq!(map.count(*kind), expected, "count for {kind}");
            }
        }
        assert_eq!(map.textures().len(), 2);
        assert_eq!(map.leaf_faces().len(), 6);
        assert_eq!(map.leaf_brushes().len(), 7);
        assert_eq!(map.brush_sides().len(), 10);
        assert_eq!(map.faces().len(), 14);
        assert_eq!(map.lightvols().len(), 16);
    }

    #[test]
    fn test_record_at_out_of_range_keeps_map_usable() {
        let data = MapFileBuilder::new()
            .lump(LumpKind::Planes, plane_bytes([1.0, 0.0, 0.0], 2.0))
            .entities("{ }")
            .build();
        let map = BspMap::from_bytes(data).unwrap();

        let err = map.record_at(LumpKind::Planes, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
        assert!(map.record_at(LumpKind::Planes, 0).is_ok());

        assert_eq!(map.count(LumpKind::Entities), 3);
        assert_eq!(
            map.record_at(LumpKind::Entities, 0).unwrap(),
            Record::EntityByte(b'{')
        );
        let err = map.record_at(LumpKind::Entities, 3).unwrap_err();
        assert!(matches!(
            err,
            BspError::IndexOutOfRange {
                lump: LumpKind::Entities,
                index: 3,
                count: 3
            }
        ));

        let err = map.record_at(LumpKind::VisData, 0).unwrap_err();
        assert_eq!(err.lump(), Some(LumpKind::VisData));
    }

    #[test]
    fn test_vis_vectors_through_record_at() {
        let data = MapFileBuilder::new().vis(2, 2, &[0b01, 0, 0b10, 0]).build();
        let map = BspMap::from_bytes(data).unwrap();

        assert_eq!(map.count(LumpKind::VisData), 2);
        assert_eq!(
            map.record_at(LumpKind::VisData, 1).unwrap(),
            Record::VisVector(&[0b10, 0])
        );
    }

    #[test]
    fn test_node_references() {
        let mut node = Vec::new();
        node.extend_from_slice(&0u32.to_le_bytes());
        node.extend_from_slice(&(-1i32).to_le_bytes());
        node.extend_from_slice(&(-2i32).to_le_bytes());
        node.extend_from_slice(&[0u8; 24]);

        let data = MapFileBuilder::new()
            .lump(LumpKind::Planes, plane_bytes([0.0, 1.0, 0.0], 0.0))
            .lump(LumpKind::Nodes, node)
            .lump(LumpKind::Leafs, vec![0u8; 48 * 2])
            .build();
        let map = BspMap::from_bytes(data).unwrap();

        let node = map.nodes().get(0).unwrap();
        assert_eq!(node.front(), NodeChild::Leaf(0));
        assert_eq!(node.back(), NodeChild::Leaf(1));
        assert!(map.planes().get(node.plane as usize).is_ok());
        assert_eq!(map.leafs().len(), 2);
    }

    #[test]
    fn test_resolve_runs() {
        let mut leaf_faces = Vec::new();
        for face in [7i32, 8, 9] {
            leaf_faces.extend_from_slice(&face.to_le_bytes());
        }
        let data = MapFileBuilder::new()
            .lump(LumpKind::LeafFaces, leaf_faces)
            .build();
        let map = BspMap::from_bytes(data).unwrap();

        let run = map.run(RecordRun::<LeafFace>::new(1, 2)).unwrap();
        let faces: Vec<i32> = run.iter().map(|f| f.unwrap().face).collect();
        assert_eq!(faces, vec![8, 9]);

        let err = map.run(RecordRun::<LeafFace>::new(2, 2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
    }

    #[test]
    fn test_misaligned_lump_fails_whole_load() {
        let data = MapFileBuilder::new()
            .lump(LumpKind::Textures, vec![0u8; 70])
            .build();
        let err = BspMap::from_bytes(data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MisalignedLumpSize);
        assert_eq!(err.lump(), Some(LumpKind::Textures));
        assert!(err.to_string().contains("textures"));
    }

    #[test]
    fn test_entities_out_of_bounds() {
        let data = MapFileBuilder::new()
            .descriptor(LumpKind::Entities, LumpDescriptor::new(136, 1))
            .build();
        let err = BspMap::from_bytes(data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LumpOutOfBounds);
        assert_eq!(err.lump(), Some(LumpKind::Entities));
    }

    #[test]
    fn test_unexpected_version_still_loads() {
        let data = MapFileBuilder::new().version(0x2f).build();
        let map = BspMap::from_bytes(data).unwrap();
        assert_eq!(map.version(), 0x2f);
    }

    #[test]
    fn test_map_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BspMap>();
        assert_send_sync::<LumpView<'static, Face>>();
        assert_send_sync::<VisData<'static>>();
    }

    #[test]
    fn test_shared_across_threads() {
        let data = MapFileBuilder::new()
            .lump(LumpKind::Planes, plane_bytes([0.0, 0.0, 1.0], 5.0))
            .build();
        let map = BspMap::from_bytes(data).unwrap();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    assert_eq!(map.planes().get(0).unwrap().distance, 5.0);
                });
            }
        });
    }

    #[test]
    fn test_load_options_builder() {
        let options = LoadOptions::new().backing(Backing::Mmap);
        assert_eq!(options.backing, Backing::Mmap);
        assert_eq!(LoadOptions::default().backing, Backing::Read);
    }
}
