//! The face-vertex quad mesh container.

use std::collections::HashMap;

use nalgebra::{Point3, Vector3};

use crate::error::{MeshError, Result};

/// A polygon mesh whose faces are all quads.
///
/// Vertices are identified only by their position in [`vertices`](Self::vertices);
/// each face lists four vertex indices with a consistent winding, so that
/// `face[i] -> face[(i + 1) % 4]` is one of its edges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuadMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,
    /// Quad faces as vertex indices.
    pub faces: Vec<[usize; 4]>,
}

impl QuadMesh {
    /// Create a mesh from vertex positions and quad faces without validation.
    ///
    /// Use [`validate`](Self::validate) or [`build_from_quads`] to check the
    /// input.
    ///
    /// [`build_from_quads`]: super::build_from_quads
    pub fn new(vertices: Vec<Point3<f64>>, faces: Vec<[usize; 4]>) -> Self {
        Self { vertices, faces }
    }

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty (no faces).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Count the unique undirected edges.
    pub fn num_edges(&self) -> usize {
        self.edge_face_counts().len()
    }

    /// Check whether every edge is shared by exactly two faces.
    pub fn is_closed(&self) -> bool {
        !self.faces.is_empty() && self.edge_face_counts().values().all(|&count| count == 2)
    }

    /// Count the edges that have a single incident face.
    pub fn num_boundary_edges(&self) -> usize {
        self.edge_face_counts()
            .values()
            .filter(|&&count| count == 1)
            .count()
    }

    /// Euler characteristic `V - E + F`.
    pub fn euler_characteristic(&self) -> i64 {
        self.num_vertices() as i64 - self.num_edges() as i64 + self.num_faces() as i64
    }

    /// Centroid of a face's four corners.
    pub fn face_centroid(&self, face: usize) -> Point3<f64> {
        let sum: Vector3<f64> = self.faces[face]
            .iter()
            .map(|&vi| self.vertices[vi].coords)
            .sum();
        Point3::from(sum / 4.0)
    }

    /// Compute the axis-aligned bounding box.
    ///
    /// Returns `None` if the mesh has no vertices.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = self.vertices.first()?;
        let (min, max) = self
            .vertices
            .iter()
            .fold((*first, *first), |(min, max), p| (min.inf(p), max.sup(p)));
        Some((min, max))
    }

    /// Check face indices and edge manifoldness.
    ///
    /// This does not reject open boundaries; subdivision decides about those
    /// according to its [`BoundaryRule`](crate::algo::subdivide::BoundaryRule).
    pub fn validate(&self) -> Result<()> {
        if self.faces.is_empty() {
            return Err(MeshError::EmptyMesh);
        }

        for (fi, face) in self.faces.iter().enumerate() {
            check_quad(fi, face, self.vertices.len())?;
        }

        for (&(v0, v1), &count) in &self.edge_face_counts() {
            if count > 2 {
                return Err(MeshError::NonManifoldEdge { v0, v1 });
            }
        }

        let mut used = vec![false; self.vertices.len()];
        for face in &self.faces {
            for &vi in face {
                used[vi] = true;
            }
        }
        if let Some(vertex) = used.iter().position(|&u| !u) {
            return Err(MeshError::IsolatedVertex { vertex });
        }

        Ok(())
    }

    /// Number of faces on each undirected edge, keyed by `(min, max)`.
    fn edge_face_counts(&self) -> HashMap<(usize, usize), usize> {
        let mut counts = HashMap::with_capacity(self.faces.len() * 2);
        for face in &self.faces {
            for i in 0..4 {
                let (a, b) = (face[i], face[(i + 1) % 4]);
                *counts.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }
        counts
    }
}

/// Validate a single quad's indices against the vertex count.
pub(crate) fn check_quad(fi: usize, face: &[usize; 4], num_vertices: usize) -> Result<()> {
    for &vi in face {
        if vi >= num_vertices {
            return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
        }
    }
    for i in 0..4 {
        for j in (i + 1)..4 {
            if face[i] == face[j] {
                return Err(MeshError::DegenerateFace { face: fi });
            }
        }
    }
    Ok(())
}
