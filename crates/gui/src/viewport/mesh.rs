use glam::Vec3;

/// Floats per mesh vertex: position(3) + normal(3) + color(3)
pub const MESH_STRIDE: usize = 9;

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Clone, Debug, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / MESH_STRIDE
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Position of vertex `i`
    pub fn position(&self, i: usize) -> Vec3 {
        let base = i * MESH_STRIDE;
        Vec3::new(
            self.vertices[base],
            self.vertices[base + 1],
            self.vertices[base + 2],
        )
    }

    /// Iterate over all vertex positions
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        (0..self.vertex_count()).map(|i| self.position(i))
    }

    /// Overwrite the color of every vertex
    pub fn set_color(&mut self, color: [f32; 3]) {
        for chunk in self.vertices.chunks_exact_mut(MESH_STRIDE) {
            chunk[6..9].copy_from_slice(&color);
        }
    }
}

/// Lines mesh: interleaved [pos.x, pos.y, pos.z, r, g, b, a]
#[derive(Clone, Debug)]
pub struct LineMeshData {
    /// 7 floats per vertex: position(3) + color(4)
    pub vertices: Vec<f32>,
}

/// Convert a packed 0xRRGGBB color to linear-ish float RGB.
pub fn rgb_hex(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

// ── Primitive generation ──────────────────────────────────────

/// Axis-aligned box centered at the origin: `w` along X, `h` along Y, `d` along Z.
pub fn cuboid(w: f32, h: f32, d: f32, color: [f32; 3]) -> MeshData {
    let hw = w * 0.5;
    let hh = h * 0.5;
    let hd = d * 0.5;

    let faces: [([Vec3; 4], Vec3); 6] = [
        // Front (+Z)
        ([Vec3::new(-hw, -hh, hd), Vec3::new(hw, -hh, hd), Vec3::new(hw, hh, hd), Vec3::new(-hw, hh, hd)], Vec3::Z),
        // Back (-Z)
        ([Vec3::new(hw, -hh, -hd), Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, hh, -hd), Vec3::new(hw, hh, -hd)], Vec3::NEG_Z),
        // Right (+X)
        ([Vec3::new(hw, -hh, hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, hh, -hd), Vec3::new(hw, hh, hd)], Vec3::X),
        // Left (-X)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, -hh, hd), Vec3::new(-hw, hh, hd), Vec3::new(-hw, hh, -hd)], Vec3::NEG_X),
        // Top (+Y)
        ([Vec3::new(-hw, hh, hd), Vec3::new(hw, hh, hd), Vec3::new(hw, hh, -hd), Vec3::new(-hw, hh, -hd)], Vec3::Y),
        // Bottom (-Y)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, -hh, hd), Vec3::new(-hw, -hh, hd)], Vec3::NEG_Y),
    ];

    let mut vertices = Vec::with_capacity(24 * MESH_STRIDE);
    let mut indices = Vec::with_capacity(36);

    for (quad, normal) in &faces {
        let base = (vertices.len() / MESH_STRIDE) as u32;
        for v in quad {
            push_vert(&mut vertices, *v, *normal, color);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

/// Horizontal rectangle at y = 0, centered at the origin, facing +Y.
pub fn ground_plane(width: f32, depth: f32, color: [f32; 3]) -> MeshData {
    let hw = width * 0.5;
    let hd = depth * 0.5;
    let mut vertices = Vec::with_capacity(4 * MESH_STRIDE);
    for v in [
        Vec3::new(-hw, 0.0, hd),
        Vec3::new(hw, 0.0, hd),
        Vec3::new(hw, 0.0, -hd),
        Vec3::new(-hw, 0.0, -hd),
    ] {
        push_vert(&mut vertices, v, Vec3::Y, color);
    }
    MeshData {
        vertices,
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

/// Flat triangle soup lying at height `y`, facing +Y.
/// `points` are (x, z) pairs, `triangles` index into them.
pub fn flat_mesh(points: &[[f32; 2]], triangles: &[u32], y: f32, color: [f32; 3]) -> MeshData {
    let mut vertices = Vec::with_capacity(points.len() * MESH_STRIDE);
    for p in points {
        push_vert(&mut vertices, Vec3::new(p[0], y, p[1]), Vec3::Y, color);
    }
    MeshData {
        vertices,
        indices: triangles.to_vec(),
    }
}

/// Square grid of lines on the ground plane.
pub fn grid(range: i32, cell_size: f32, color: [f32; 4]) -> LineMeshData {
    let mut vertices = Vec::new();
    let axis_color = [color[0] * 0.6, color[1] * 0.6, color[2] * 0.6, color[3]];
    let extent = range as f32 * cell_size;

    for i in -range..=range {
        let f = i as f32 * cell_size;
        let c = if i == 0 { axis_color } else { color };
        // Line along Z
        push_line_vert(&mut vertices, f, 0.0, -extent, c);
        push_line_vert(&mut vertices, f, 0.0, extent, c);
        // Line along X
        push_line_vert(&mut vertices, -extent, 0.0, f, c);
        push_line_vert(&mut vertices, extent, 0.0, f, c);
    }

    LineMeshData { vertices }
}

/// Outline of a box footprint at height `y` (selection highlight).
pub fn footprint_outline(corners: [Vec3; 4], color: [f32; 4]) -> LineMeshData {
    let mut vertices = Vec::with_capacity(8 * 7);
    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        push_line_vert(&mut vertices, a.x, a.y, a.z, color);
        push_line_vert(&mut vertices, b.x, b.y, b.z, color);
    }
    LineMeshData { vertices }
}

// ── Helpers ──────────────────────────────────────────────────

fn push_vert(v: &mut Vec<f32>, p: Vec3, n: Vec3, c: [f32; 3]) {
    v.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z, c[0], c[1], c[2]]);
}

fn push_line_vert(v: &mut Vec<f32>, px: f32, py: f32, pz: f32, c: [f32; 4]) {
    v.extend_from_slice(&[px, py, pz, c[0], c[1], c[2], c[3]]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_counts() {
        let m = cuboid(1.0, 2.0, 3.0, [1.0, 0.0, 0.0]);
        assert_eq!(m.vertex_count(), 24);
        assert_eq!(m.triangle_count(), 12);
    }

    #[test]
    fn test_cuboid_extent() {
        let m = cuboid(2.0, 2.7, 0.2, [0.5; 3]);
        let max_x = m.positions().map(|p| p.x).fold(f32::MIN, f32::max);
        let max_y = m.positions().map(|p| p.y).fold(f32::MIN, f32::max);
        let min_z = m.positions().map(|p| p.z).fold(f32::MAX, f32::min);
        assert!((max_x - 1.0).abs() < 1e-6);
        assert!((max_y - 1.35).abs() < 1e-6);
        assert!((min_z + 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(rgb_hex(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(rgb_hex(0x000000), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_set_color() {
        let mut m = ground_plane(1.0, 1.0, [0.0; 3]);
        m.set_color([0.2, 0.4, 0.6]);
        for chunk in m.vertices.chunks_exact(MESH_STRIDE) {
            assert_eq!(&chunk[6..9], &[0.2, 0.4, 0.6]);
        }
    }

    #[test]
    fn test_grid_line_count() {
        let g = grid(2, 1.0, [0.5, 0.5, 0.5, 1.0]);
        // (2 * range + 1) positions, 2 lines each, 2 vertices per line
        assert_eq!(g.vertices.len() / 7, 5 * 2 * 2);
    }
}
