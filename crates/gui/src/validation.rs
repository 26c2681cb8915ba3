//! Mesh validation utilities.
//!
//! `MeshValidator` provides methods to check mesh data integrity:
//! correct stride, in-range indices, normalized normals, winding, AABB
//! dimensions, etc.

use glam::Vec3;

use crate::viewport::mesh::{MeshData, MESH_STRIDE};
use crate::viewport::picking::Aabb;

/// Validator for `MeshData` integrity checks.
pub struct MeshValidator<'a> {
    mesh: &'a MeshData,
}

impl<'a> MeshValidator<'a> {
    /// Create a new validator for the given mesh.
    pub fn new(mesh: &'a MeshData) -> Self {
        Self { mesh }
    }

    /// Number of vertices (vertices buffer length / 9).
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    /// Number of triangles (indices buffer length / 3).
    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    /// Check that the vertex buffer length is a multiple of 9 (the stride).
    pub fn is_stride_valid(&self) -> bool {
        self.mesh.vertices.len() % MESH_STRIDE == 0
    }

    /// Check that the index buffer length is a multiple of 3.
    pub fn is_index_stride_valid(&self) -> bool {
        self.mesh.indices.len() % 3 == 0
    }

    /// Check that all indices are within the valid vertex range.
    pub fn are_indices_in_range(&self) -> bool {
        let max_idx = self.vertex_count() as u32;
        self.mesh.indices.iter().all(|&i| i < max_idx)
    }

    /// Check that every vertex component is finite.
    pub fn are_values_finite(&self) -> bool {
        self.mesh.vertices.iter().all(|v| v.is_finite())
    }

    /// Check that all vertex normals have unit length (within epsilon).
    pub fn are_normals_normalized(&self, epsilon: f32) -> bool {
        self.mesh
            .vertices
            .chunks_exact(MESH_STRIDE)
            .all(|v| (Vec3::new(v[3], v[4], v[5]).length() - 1.0).abs() <= epsilon)
    }

    /// Triangles whose area is below `epsilon`.
    pub fn degenerate_triangle_count(&self, epsilon: f32) -> usize {
        self.triangles()
            .filter(|[a, b, c]| (*b - *a).cross(*c - *a).length() * 0.5 < epsilon)
            .count()
    }

    /// Check that every triangle winds counter-clockwise around its vertex normal.
    pub fn is_winding_consistent(&self) -> bool {
        self.mesh.indices.chunks_exact(3).all(|t| {
            let [a, b, c] = [0, 1, 2].map(|k| self.mesh.position(t[k] as usize));
            let base = t[0] as usize * MESH_STRIDE;
            let n = Vec3::new(
                self.mesh.vertices[base + 3],
                self.mesh.vertices[base + 4],
                self.mesh.vertices[base + 5],
            );
            (b - a).cross(c - a).dot(n) > 0.0
        })
    }

    /// Check that every vertex carries `color` (within 1e-4).
    pub fn has_uniform_color(&self, color: [f32; 3]) -> bool {
        self.mesh.vertices.chunks_exact(MESH_STRIDE).all(|v| {
            (v[6] - color[0]).abs() < 1e-4
                && (v[7] - color[1]).abs() < 1e-4
                && (v[8] - color[2]).abs() < 1e-4
        })
    }

    /// Total area of all triangles.
    pub fn surface_area(&self) -> f32 {
        self.triangles()
            .map(|[a, b, c]| (b - a).cross(c - a).length() * 0.5)
            .sum()
    }

    /// Compute the axis-aligned bounding box of the mesh.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_mesh(self.mesh)
    }

    /// Compute the dimensions (width, height, depth) of the bounding box.
    pub fn dimensions(&self) -> [f32; 3] {
        self.aabb().size().to_array()
    }

    /// Check that the AABB dimensions are approximately equal to `expected`.
    pub fn assert_dimensions_approx(&self, expected: [f32; 3], tolerance: f32) -> bool {
        let dims = self.dimensions();
        (dims[0] - expected[0]).abs() < tolerance
            && (dims[1] - expected[1]).abs() < tolerance
            && (dims[2] - expected[2]).abs() < tolerance
    }

    fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.mesh
            .indices
            .chunks_exact(3)
            .map(|t| [0, 1, 2].map(|k| self.mesh.position(t[k] as usize)))
    }

    /// Run all validation checks and return a list of error messages.
    /// An empty list means the mesh is valid.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.is_stride_valid() {
            errors.push(format!(
                "Vertex buffer length {} is not a multiple of 9",
                self.mesh.vertices.len()
            ));
        }

        if !self.is_index_stride_valid() {
            errors.push(format!(
                "Index buffer length {} is not a multiple of 3",
                self.mesh.indices.len()
            ));
        }

        if !self.are_indices_in_range() {
            let max_idx = self.vertex_count() as u32;
            let out_of_range: Vec<_> = self
                .mesh
                .indices
                .iter()
                .filter(|&&i| i >= max_idx)
                .take(5)
                .collect();
            errors.push(format!(
                "Indices out of range (vertex_count={}): {:?}",
                max_idx, out_of_range
            ));
            // Triangle checks below would index out of bounds
            return errors;
        }

        if !self.are_values_finite() {
            errors.push("Vertex buffer contains non-finite values".to_string());
        }

        if self.vertex_count() > 0 && !self.are_normals_normalized(0.1) {
            errors.push("Some normals are not unit-length (epsilon=0.1)".to_string());
        }

        let degenerate = self.degenerate_triangle_count(1e-9);
        if degenerate > 0 {
            errors.push(format!("{degenerate} degenerate triangles"));
        }

        errors
    }
}
