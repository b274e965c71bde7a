//! Mesh construction utilities.
//!
//! This module provides functions for building quad meshes from face-vertex
//! lists as commonly found in mesh file formats, along with a couple of
//! procedural starting shapes.

use nalgebra::Point3;

use super::quad::{check_quad, QuadMesh};
use crate::error::{MeshError, Result};

/// Build a quad mesh from vertices and quad faces.
///
/// # Arguments
/// * `vertices` - List of vertex positions
/// * `faces` - List of quad faces, each as [v0, v1, v2, v3] indices
///
/// # Returns
/// A quad mesh, or an error if the input is invalid.
///
/// # Example
/// ```
/// use quadsub::mesh::build_from_quads;
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let faces = vec![[0, 1, 2, 3]];
///
/// let mesh = build_from_quads(&vertices, &faces).unwrap();
/// assert_eq!(mesh.num_vertices(), 4);
/// assert_eq!(mesh.num_faces(), 1);
/// ```
pub fn build_from_quads(vertices: &[Point3<f64>], faces: &[[usize; 4]]) -> Result<QuadMesh> {
    if faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    for (fi, face) in faces.iter().enumerate() {
        check_quad(fi, face, vertices.len())?;
    }

    Ok(QuadMesh::new(vertices.to_vec(), faces.to_vec()))
}

/// Build a quad mesh from arbitrary polygons, rejecting anything that is not
/// a quad.
///
/// File loaders go through this so that triangles and n-gons are reported
/// with their face index instead of being silently dropped.
pub fn build_from_polygons(vertices: Vec<Point3<f64>>, polygons: &[Vec<usize>]) -> Result<QuadMesh> {
    if polygons.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    let mut faces = Vec::with_capacity(polygons.len());
    for (fi, polygon) in polygons.iter().enumerate() {
        let face: [usize; 4] = polygon.as_slice().try_into().map_err(|_| MeshError::NonQuadFace {
            face: fi,
            sides: polygon.len(),
        })?;
        check_quad(fi, &face, vertices.len())?;
        faces.push(face);
    }

    Ok(QuadMesh::new(vertices, faces))
}

impl QuadMesh {
    /// Build from polygons; see [`build_from_polygons`].
    pub fn from_polygons(vertices: Vec<Point3<f64>>, polygons: &[Vec<usize>]) -> Result<Self> {
        build_from_polygons(vertices, polygons)
    }

    /// An axis-aligned cube spanning `[0, size]^3` with outward-facing
    /// counter-clockwise quads.
    pub fn cube(size: f64) -> Self {
        let s = size;
        let vertices = vec![
            // Bottom (z = 0)
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(s, 0.0, 0.0),
            Point3::new(s, s, 0.0),
            Point3::new(0.0, s, 0.0),
            // Top (z = s)
            Point3::new(0.0, 0.0, s),
            Point3::new(s, 0.0, s),
            Point3::new(s, s, s),
            Point3::new(0.0, s, s),
        ];
        let faces = vec![
            [0, 3, 2, 1], // bottom
            [4, 5, 6, 7], // top
            [0, 1, 5, 4], // front
            [2, 3, 7, 6], // back
            [0, 4, 7, 3], // left
            [1, 2, 6, 5], // right
        ];
        Self::new(vertices, faces)
    }

    /// A flat `nx` by `ny` grid of quads in the z = 0 plane.
    ///
    /// Vertex `(i, j)` sits at index `j * (nx + 1) + i`. The grid is open, so
    /// subdividing it needs [`BoundaryRule::Midpoint`].
    ///
    /// [`BoundaryRule::Midpoint`]: crate::algo::subdivide::BoundaryRule::Midpoint
    pub fn grid(nx: usize, ny: usize, spacing: f64) -> Self {
        let mut vertices = Vec::with_capacity((nx + 1) * (ny + 1));
        let mut faces = Vec::with_capacity(nx * ny);

        for j in 0..=ny {
            for i in 0..=nx {
                vertices.push(Point3::new(i as f64 * spacing, j as f64 * spacing, 0.0));
            }
        }

        for j in 0..ny {
            for i in 0..nx {
                let v00 = j * (nx + 1) + i;
                let v10 = v00 + 1;
                let v01 = v00 + (nx + 1);
                let v11 = v01 + 1;
                faces.push([v00, v10, v11, v01]);
            }
        }

        Self::new(vertices, faces)
    }
}
