//! Partition tree records: planes, nodes, leaves and the leaf index lists

use crate::lump::LumpKind;
use crate::records::{LumpRecord, RecordRun};
use binrw::BinRead;

/// Partitioning plane (16 bytes)
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Default)]
#[br(little)]
pub struct Plane {
    /// Plane normal
    pub normal: [f32; 3],
    /// Distance from the origin along the normal
    pub distance: f32,
}

impl LumpRecord for Plane {
    const KIND: LumpKind = LumpKind::Planes;
    const SIZE: usize = 16;
}

/// Child reference of a node
///
/// On disk a non-negative value is a node index and a negative value `c`
/// is leaf index `-c - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeChild {
    /// Index into the nodes lump
    Node(u32),
    /// Index into the leafs lump
    Leaf(u32),
}

impl NodeChild {
    /// Decode an on-disk child value
    pub const fn decode(raw: i32) -> Self {
        if raw >= 0 {
            Self::Node(raw as u32)
        } else {
            // !raw == -raw - 1, without overflow at i32::MIN
            Self::Leaf(!raw as u32)
        }
    }

    /// Encode back to the on-disk value; indices must not exceed `i32::MAX`
    pub const fn encode(self) -> i32 {
        match self {
            Self::Node(index) => index as i32,
            Self::Leaf(index) => !(index as i32),
        }
    }
}

/// Internal tree node (36 bytes)
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[br(little)]
pub struct Node {
    /// Index of the splitting plane
    pub plane: u32,
    /// Front and back children, encoded as described on [`NodeChild`]
    pub children: [i32; 2],
    /// Integer bounding box minimum
    pub mins: [i32; 3],
    /// Integer bounding box maximum
    pub maxs: [i32; 3],
}

impl Node {
    /// Child on the front side of the plane
    pub const fn front(&self) -> NodeChild {
        NodeChild::decode(self.children[0])
    }

    /// Child on the back side of the plane
    pub const fn back(&self) -> NodeChild {
        NodeChild::decode(self.children[1])
    }
}

impl LumpRecord for Node {
    const KIND: LumpKind = LumpKind::Nodes;
    const SIZE: usize = 36;
}

/// Tree leaf (48 bytes)
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[br(little)]
pub struct Leaf {
    /// Visibility cluster, negative when the leaf is outside the map
    pub cluster: i32,
    /// Areaportal area
    pub area: u32,
    /// Integer bounding box minimum
    pub mins: [i32; 3],
    /// Integer bounding box maximum
    pub maxs: [i32; 3],
    /// First entry in the leaf-faces lump
    pub leaf_face: i32,
    /// Number of leaf-faces entries
    pub n_leaf_faces: u32,
    /// First entry in the leaf-brushes lump
    pub leaf_brush: u32,
    /// Number of leaf-brushes entries
    pub n_leaf_brushes: u32,
}

impl Leaf {
    /// Run of this leaf's entries in the leaf-faces lump
    pub const fn leaf_faces(&self) -> RecordRun<LeafFace> {
        RecordRun::new(self.leaf_face as i64, self.n_leaf_faces)
    }

    /// Run of this leaf's entries in the leaf-brushes lump
    pub const fn leaf_brushes(&self) -> RecordRun<LeafBrush> {
        RecordRun::new(self.leaf_brush as i64, self.n_leaf_brushes)
    }
}

impl LumpRecord for Leaf {
    const KIND: LumpKind = LumpKind::Leafs;
    const SIZE: usize = 48;
}

/// Face index referenced by a leaf (4 bytes)
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[br(little)]
pub struct LeafFace {
    /// Index into the faces lump
    pub face: i32,
}

impl LumpRecord for LeafFace {
    const KIND: LumpKind = LumpKind::LeafFaces;
    const SIZE: usize = 4;
}

/// Brush index referenced by a leaf (4 bytes)
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[br(little)]
pub struct LeafBrush {
    /// Index into the brushes lump
    pub brush: i32,
}

impl LumpRecord for LeafBrush {
    const KIND: LumpKind = LumpKind::LeafBrushes;
    const SIZE: usize = 4;
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_plane_decode() {
        let mut data = Vec::new();
        for v in [0.0f32, 0.0, 1.0, 5.0] {
            data.extend_from_slice(&v.to_le_bytes());
        }
        let plane = Plane::decode(&data).expect("Should decode plane");
        assert_eq!(plane.normal, [0.0, 0.0, 1.0]);
        assert_eq!(plane.distance, 5.0);
    }

    #[test]
    fn test_node_children() {
        let mut data = Vec::new();
        data.extend_from_slice(&7u32.to_le_bytes());
        data.extend_from_slice(&3i32.to_le_bytes());
        data.extend_from_slice(&(-1i32).to_le_bytes());
        for v in [-64i32, -64, -64, 64, 64, 64] {
            data.extend_from_slice(&v.to_le_bytes());
        }

        let node = Node::decode(&data).expect("Should decode node");
        assert_eq!(node.plane, 7);
        assert_eq!(node.front(), NodeChild::Node(3));
        assert_eq!(node.back(), NodeChild::Leaf(0));
        assert_eq!(node.mins, [-64, -64, -64]);
        assert_eq!(node.maxs, [64, 64, 64]);
    }

    #[test]
    fn test_child_decoding_edges() {
        assert_eq!(NodeChild::decode(0), NodeChild::Node(0));
        assert_eq!(NodeChild::decode(-1), NodeChild::Leaf(0));
        assert_eq!(NodeChild::decode(-2), NodeChild::Leaf(1));
        assert_eq!(NodeChild::decode(i32::MIN), NodeChild::Leaf(i32::MAX as u32));
        assert_eq!(NodeChild::decode(i32::MAX), NodeChild::Node(i32::MAX as u32));
    }

    #[test]
    fn test_leaf_runs() {
        let leaf = Leaf {
            leaf_face: 10,
            n_leaf_faces: 3,
            leaf_brush: 4,
            n_leaf_brushes: 2,
            ..Leaf::default()
        };
        assert_eq!(leaf.leaf_faces(), RecordRun::new(10, 3));
        assert_eq!(leaf.leaf_brushes(), RecordRun::new(4, 2));
    }

    proptest! {
        /// A leaf index encoded as -(k + 1) decodes back to k
        #[test]
        fn leaf_index_round_trip(k in 0u32..=i32::MAX as u32) {
            let raw = -(k as i64 + 1) as i32;
            prop_assert_eq!(NodeChild::decode(raw), NodeChild::Leaf(k));
            prop_assert_eq!(NodeChild::Leaf(k).encode(), raw);
        }

        /// Non-negative children are node indices
        #[test]
        fn node_index_round_trip(c in 0i32..=i32::MAX) {
            prop_assert_eq!(NodeChild::decode(c), NodeChild::Node(c as u32));
            prop_assert_eq!(NodeChild::decode(c).encode(), c);
        }
    }
}
