//! Quad mesh buffers.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A mesh of quadrilateral faces stored as a vertex buffer plus edge and
/// face index lists.
///
/// Meshes generated from sections never carry explicit edges; the list is
/// kept so sinks receive the full triple.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QuadMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,
    /// Explicit edges as vertex index pairs.
    pub edges: Vec<[u32; 2]>,
    /// Quad faces as vertex indices, wound `[tl, tr, br, bl]`.
    pub faces: Vec<[u32; 4]>,
}

impl QuadMesh {
    /// Create an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mesh with room for `vertices` vertices and `faces` faces.
    #[must_use]
    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            edges: Vec::new(),
            faces: Vec::with_capacity(faces),
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Check that every edge and face index refers to an existing vertex.
    #[must_use]
    pub fn indices_in_bounds(&self) -> bool {
        let n = self.vertices.len();
        let ok = |i: &u32| (*i as usize) < n;
        self.edges.iter().all(|e| e.iter().all(ok)) && self.faces.iter().all(|f| f.iter().all(ok))
    }

    /// Axis-aligned bounds `(min, max)`, or `None` for an empty mesh.
    #[must_use]
    pub fn bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(min, max), v| (min.inf(v), max.sup(v))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mesh() {
        let mesh = QuadMesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.face_count(), 0);
        assert!(mesh.bounds().is_none());
        assert!(mesh.indices_in_bounds());
    }

    #[test]
    fn test_bounds_and_indices() {
        let mut mesh = QuadMesh::with_capacity(4, 1);
        mesh.vertices.extend([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, -1.0),
            Point3::new(1.0, 1.0, 2.0),
        ]);
        mesh.faces.push([0, 1, 3, 2]);

        let (min, max) = mesh.bounds().unwrap();
        assert_eq!(min, Point3::new(0.0, 0.0, -1.0));
        assert_eq!(max, Point3::new(1.0, 1.0, 2.0));
        assert!(mesh.indices_in_bounds());

        mesh.faces.push([0, 1, 4, 2]);
        assert!(!mesh.indices_in_bounds());
    }
}
