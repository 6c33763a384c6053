use super::mesh::{Mesh, Vertex};
use crate::math::{Mat3, Mat4, Vec3};

/// Placement of one leaf mesh instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafInstance {
    pub position: Vec3,
    pub rotation: Mat3,
    /// Uniform scale applied to the unit leaf template
    pub scale: f32,
    /// Branch depth the leaf hangs from
    pub depth: usize,
}

impl LeafInstance {
    /// Column-major world transform (translation * rotation * scale)
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_trs(self.position, &self.rotation, self.scale)
    }
}

/// Blade outline in the XZ plane: base, left edge, tip, right edge
const LEAF_OUTLINE: [(f32, f32); 10] = [
    (0.0, 0.0),
    (-0.15, 0.2),
    (-0.35, 0.4),
    (-0.3, 0.6),
    (-0.15, 0.8),
    (0.0, 1.0),
    (0.15, 0.8),
    (0.3, 0.6),
    (0.35, 0.4),
    (0.15, 0.2),
];

/// Flat leaf blade of the given length, fanned from its base vertex.
///
/// The blade lies in the XZ plane with its base at the origin and tip at
/// `(0, 0, size)`, so an instance's forward axis runs along the leaf.
pub fn leaf_template_mesh(size: f32) -> Mesh {
    let mut mesh = Mesh::new();
    let normal = Vec3::new(0.0, -1.0, 0.0);

    mesh.add_vertices(LEAF_OUTLINE.iter().map(|&(x, z)| {
        Vertex::new(Vec3::new(x * size, 0.0, z * size), normal).with_uv(x + 0.5, z)
    }));

    for i in 1..(LEAF_OUTLINE.len() as u32 - 1) {
        mesh.add_triangle(0, i, i + 1);
    }

    mesh
}
