//! Text reports over a loaded map.
//!
//! Every report writes to any [`Write`] so the binary can target stdout and
//! tests can target a buffer.

use crate::error::Result;
use q3bsp_format::records::{FaceType, LIGHTMAP_SIZE, Lightmap, NodeChild, Rgb};
use q3bsp_format::{BspMap, LumpKind, Record};
use std::io::Write;
use tracing::debug;

/// Human-readable plural label for a lump
const fn label(kind: LumpKind) -> &'static str {
    match kind {
        LumpKind::Entities => "Entities",
        LumpKind::Textures => "Textures",
        LumpKind::Planes => "Planes",
        LumpKind::Nodes => "Nodes",
        LumpKind::Leafs => "Leaves",
        LumpKind::LeafFaces => "Leaf Faces",
        LumpKind::LeafBrushes => "Leaf Brushes",
        LumpKind::Models => "Models",
        LumpKind::Brushes => "Brushes",
        LumpKind::BrushSides => "Brush Sides",
        LumpKind::Vertices => "Vertices",
        LumpKind::MeshVerts => "Mesh Vertices",
        LumpKind::Effects => "Effects",
        LumpKind::Faces => "Faces",
        LumpKind::Lightmaps => "Lightmaps",
        LumpKind::LightVols => "Light Volumes",
        LumpKind::VisData => "Visibility Vectors",
    }
}

/// File size, version and record counts
pub fn summary(map: &BspMap, out: &mut impl Write) -> Result<()> {
    writeln!(out, "File size: {} bytes", map.file_len())?;
    writeln!(out, "Version: {:#x}", map.version())?;
    writeln!(out, "Entity text: {} bytes", map.entities_text().len())?;

    for kind in LumpKind::ALL.into_iter().filter(|k| k.is_fixed_record()) {
        writeln!(out, "# of {}: {}", label(kind), map.count(kind))?;
    }

    let vis = map.vis_data();
    writeln!(
        out,
        "Visibility: {} vectors of {} bytes",
        vis.vector_count(),
        vis.vector_size()
    )?;
    Ok(())
}

/// Every record of one lump
///
/// The entity lump is printed as text rather than byte by byte.
pub fn list(map: &BspMap, kind: LumpKind, out: &mut impl Write) -> Result<()> {
    if kind == LumpKind::Entities {
        return entities(map, false, out);
    }

    let count = map.count(kind);
    debug!("Listing {} records of {}", count, kind);
    writeln!(out, "{}:", label(kind))?;
    for index in 0..count {
        let record = map.record_at(kind, index)?;
        write_record(out, index, &record)?;
    }
    Ok(())
}

/// A single record
///
/// For nodes the splitting plane is printed as well.
pub fn view(map: &BspMap, kind: LumpKind, index: usize, out: &mut impl Write) -> Result<()> {
    let record = map.record_at(kind, index)?;
    write_record(out, index, &record)?;

    if let Record::Node(node) = &record {
        let plane_index = node.plane as usize;
        let plane = map.record_at(LumpKind::Planes, plane_index)?;
        write_record(out, plane_index, &plane)?;
    }
    Ok(())
}

/// Entity text, raw or as key/value pairs
pub fn entities(map: &BspMap, parsed: bool, out: &mut impl Write) -> Result<()> {
    if !parsed {
        writeln!(out, "Entities: {}", map.entities_text().to_str_lossy())?;
        return Ok(());
    }

    for (index, entity) in map.entities()?.iter().enumerate() {
        writeln!(
            out,
            "Entity #{} ({}):",
            index,
            entity.class_name().unwrap_or("no classname")
        )?;
        for (key, value) in entity.properties() {
            writeln!(out, "    {key}: \"{value}\"")?;
        }
    }
    Ok(())
}

fn write_vec3f(out: &mut impl Write, v: [f32; 3]) -> std::io::Result<()> {
    write!(out, "{{ .x = {:.6}, .y = {:.6}, .z = {:.6} }}", v[0], v[1], v[2])
}

fn write_vec3i(out: &mut impl Write, v: [i32; 3]) -> std::io::Result<()> {
    write!(out, "{{ .x = {}, .y = {}, .z = {} }}", v[0], v[1], v[2])
}

fn rgb(c: Rgb) -> String {
    format!("rgb({}, {}, {})", c.r, c.g, c.b)
}

fn child(c: NodeChild) -> String {
    match c {
        NodeChild::Node(i) => format!("node {i}"),
        NodeChild::Leaf(i) => format!("leaf {i}"),
    }
}

fn face_type(t: FaceType) -> String {
    match t {
        FaceType::Polygon => "polygon".to_string(),
        FaceType::Patch => "patch".to_string(),
        FaceType::Mesh => "mesh".to_string(),
        FaceType::Billboard => "billboard".to_string(),
        FaceType::Unknown(raw) => format!("unknown ({raw})"),
    }
}

fn average_texel(lightmap: &Lightmap) -> Rgb {
    let n = lightmap.texels.len().max(1) as u64;
    let (r, g, b) = lightmap.texels.iter().fold((0u64, 0u64, 0u64), |acc, t| {
        (
            acc.0 + u64::from(t.r),
            acc.1 + u64::from(t.g),
            acc.2 + u64::from(t.b),
        )
    });
    Rgb {
        r: (r / n) as u8,
        g: (g / n) as u8,
        b: (b / n) as u8,
    }
}

/// One record as an indented block
fn write_record(out: &mut impl Write, index: usize, record: &Record<'_>) -> std::io::Result<()> {
    match record {
        Record::EntityByte(b) => {
            writeln!(out, "Entity byte #{index}: {b:#04x} {:?}", char::from(*b))?;
        }
        Record::Texture(t) => {
            writeln!(out, "Texture #{index}:")?;
            writeln!(out, "    name: \"{}\"", t.name())?;
            writeln!(out, "    flags: {:#x}", t.flags)?;
            writeln!(out, "    contents: {:#x}", t.contents)?;
        }
        Record::Plane(p) => {
            writeln!(out, "Plane #{index}:")?;
            write!(out, "    normal: ")?;
            write_vec3f(out, p.normal)?;
            writeln!(out)?;
            writeln!(out, "    distance: {:.6}", p.distance)?;
        }
        Record::Node(n) => {
            writeln!(out, "Node #{index}:")?;
            writeln!(out, "    plane: {}", n.plane)?;
            writeln!(out, "    front: {}", child(n.front()))?;
            writeln!(out, "    back: {}", child(n.back()))?;
            write!(out, "    mins: ")?;
            write_vec3i(out, n.mins)?;
            write!(out, "\n    maxs: ")?;
            write_vec3i(out, n.maxs)?;
            writeln!(out)?;
        }
        Record::Leaf(l) => {
            writeln!(out, "Leaf #{index}:")?;
            writeln!(out, "    cluster: {}", l.cluster)?;
            writeln!(out, "    area: {}", l.area)?;
            write!(out, "    mins: ")?;
            write_vec3i(out, l.mins)?;
            write!(out, "\n    maxs: ")?;
            write_vec3i(out, l.maxs)?;
            writeln!(out)?;
            writeln!(out, "    leaf faces: {} (+{})", l.leaf_face, l.n_leaf_faces)?;
            writeln!(out, "    leaf brushes: {} (+{})", l.leaf_brush, l.n_leaf_brushes)?;
        }
        Record::LeafFace(f) => writeln!(out, "Leaf face #{index}: face {}", f.face)?,
        Record::LeafBrush(b) => writeln!(out, "Leaf brush #{index}: brush {}", b.brush)?,
        Record::Model(m) => {
            writeln!(out, "Model #{index}:")?;
            write!(out, "    mins: ")?;
            write_vec3f(out, m.mins)?;
            write!(out, "\n    maxs: ")?;
            write_vec3f(out, m.maxs)?;
            writeln!(out)?;
            writeln!(out, "    faces: {} (+{})", m.face, m.n_faces)?;
            writeln!(out, "    brushes: {} (+{})", m.brush, m.n_brushes)?;
        }
        Record::Brush(b) => {
            writeln!(out, "Brush #{index}:")?;
            writeln!(out, "    sides: {} (+{})", b.brush_side, b.n_brush_sides)?;
            writeln!(out, "    texture: {}", b.texture)?;
        }
        Record::BrushSide(s) => {
            writeln!(out, "Brush side #{index}: plane {}, texture {}", s.plane, s.texture)?;
        }
        Record::Vertex(v) => {
            writeln!(out, "Vertex #{index}:")?;
            write!(out, "    position: ")?;
            write_vec3f(out, v.position)?;
            write!(out, "\n    normal: ")?;
            write_vec3f(out, v.normal)?;
            writeln!(out)?;
            writeln!(
                out,
                "    tex coord: ({:.6}, {:.6}), lightmap coord: ({:.6}, {:.6})",
                v.tex_coord[0], v.tex_coord[1], v.lightmap_coord[0], v.lightmap_coord[1]
            )?;
            writeln!(
                out,
                "    color: rgba({}, {}, {}, {})",
                v.color.r, v.color.g, v.color.b, v.color.a
            )?;
        }
        Record::MeshVert(m) => writeln!(out, "Mesh vert #{index}: offset {}", m.offset)?,
        Record::Effect(e) => {
            writeln!(out, "Effect #{index}:")?;
            writeln!(out, "    name: \"{}\"", e.name())?;
            writeln!(out, "    brush: {}", e.brush)?;
        }
        Record::Face(f) => {
            writeln!(out, "Face #{index}:")?;
            writeln!(out, "    type: {}", face_type(f.face_type))?;
            writeln!(out, "    texture: {}", f.texture)?;
            match f.effect_index() {
                Some(effect) => writeln!(out, "    effect: {effect}")?,
                None => writeln!(out, "    effect: none")?,
            }
            writeln!(out, "    vertices: {} (+{})", f.vertex, f.n_vertices)?;
            writeln!(out, "    mesh verts: {} (+{})", f.mesh_vert, f.n_mesh_verts)?;
            writeln!(out, "    lightmap: {}", f.lightmap)?;
            if f.face_type == FaceType::Patch {
                writeln!(
                    out,
                    "    patch size: {}x{}",
                    f.patch_size[0], f.patch_size[1]
                )?;
            }
        }
        Record::Lightmap(l) => {
            writeln!(
                out,
                "Lightmap #{index}: {LIGHTMAP_SIZE}x{LIGHTMAP_SIZE}, average {}",
                rgb(average_texel(l))
            )?;
        }
        Record::LightVol(v) => {
            writeln!(out, "Light volume #{index}:")?;
            writeln!(out, "    ambient: {}", rgb(v.ambient))?;
            writeln!(out, "    directional: {}", rgb(v.directional))?;
            writeln!(out, "    direction: phi {}, theta {}", v.phi(), v.theta())?;
        }
        Record::VisVector(bits) => {
            write!(out, "Cluster #{index}:")?;
            for byte in *bits {
                write!(out, " {byte:08b}")?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}
