//! Edge extraction: the deduplicated edge set of a quad mesh and the faces
//! on either side of each edge.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::trace;

use crate::error::{MeshError, Result};
use crate::mesh::{check_quad, QuadMesh};

use super::BoundaryRule;

/// An undirected edge with its one or two incident faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Endpoints, in the direction the first incident face walks them.
    pub vertices: [usize; 2],
    /// Incident faces; the second is `None` on a boundary.
    pub faces: (usize, Option<usize>),
}

impl Edge {
    /// Check if this edge has a single incident face.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.faces.1.is_none()
    }

    /// The endpoints as `[tail, head]`, in the direction `face` walks them.
    ///
    /// Stored order for the first incident face, reversed for any other. On a
    /// consistently wound mesh the two faces of an edge walk it in opposite
    /// directions, so this is the winding of `face`.
    #[inline]
    pub fn directed_for(&self, face: usize) -> [usize; 2] {
        let [a, b] = self.vertices;
        if self.faces.0 == face {
            [a, b]
        } else {
            [b, a]
        }
    }
}

/// The unique edges of a quad mesh plus, per face, which edge lies under each
/// of its four sides.
///
/// Only [`extract_edges`] builds one, so every table matches the mesh it was
/// extracted from.
#[derive(Debug, Clone)]
pub struct EdgeTable {
    edges: Vec<Edge>,
    face_edges: Vec<[usize; 4]>,
}

impl EdgeTable {
    /// Number of unique edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Check if the table has no edges.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// All edges, indexed by edge index.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Get an edge by index.
    #[inline]
    pub fn edge(&self, index: usize) -> &Edge {
        &self.edges[index]
    }

    /// For each face, the edge index under side `k` (`face[k] -> face[k + 1]`).
    #[inline]
    pub fn face_edges(&self) -> &[[usize; 4]] {
        &self.face_edges
    }

    /// Number of edges with a single incident face.
    pub fn num_boundary_edges(&self) -> usize {
        self.edges.iter().filter(|e| e.is_boundary()).count()
    }
}

/// Derive the unique edges of `mesh` and their incident faces.
///
/// Edges are keyed by their unordered vertex-index pair and listed in the
/// order they are first met while walking the faces, so the result is
/// deterministic for a given face list.
///
/// # Errors
///
/// - [`MeshError::EmptyMesh`] if there are no faces
/// - [`MeshError::InvalidVertexIndex`] or [`MeshError::DegenerateFace`] for a
///   bad face
/// - [`MeshError::NonManifoldEdge`] when a third face claims an edge
/// - [`MeshError::BoundaryEdge`] for an open edge under [`BoundaryRule::Reject`]
/// - [`MeshError::IsolatedVertex`] for a vertex no face uses
pub fn extract_edges(mesh: &QuadMesh, boundary: BoundaryRule) -> Result<EdgeTable> {
    if mesh.faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    let num_faces = mesh.num_faces();
    let mut lookup: HashMap<(usize, usize), usize> = HashMap::with_capacity(num_faces * 2);
    let mut edges: Vec<Edge> = Vec::with_capacity(num_faces * 2);
    let mut face_edges: Vec<[usize; 4]> = Vec::with_capacity(num_faces);
    let mut used = vec![false; mesh.num_vertices()];

    for (fi, face) in mesh.faces.iter().enumerate() {
        check_quad(fi, face, mesh.num_vertices())?;

        let mut sides = [0usize; 4];
        for (k, side) in sides.iter_mut().enumerate() {
            let v0 = face[k];
            let v1 = face[(k + 1) % 4];
            used[v0] = true;

            match lookup.entry((v0.min(v1), v0.max(v1))) {
                Entry::Vacant(slot) => {
                    *side = edges.len();
                    slot.insert(edges.len());
                    edges.push(Edge {
                        vertices: [v0, v1],
                        faces: (fi, None),
                    });
                }
                Entry::Occupied(slot) => {
                    let ei = *slot.get();
                    let edge = &mut edges[ei];
                    if edge.faces.1.is_some() {
                        return Err(MeshError::NonManifoldEdge {
                            v0: edge.vertices[0],
                            v1: edge.vertices[1],
                        });
                    }
                    edge.faces.1 = Some(fi);
                    *side = ei;
                }
            }
        }
        face_edges.push(sides);
    }

    if boundary == BoundaryRule::Reject {
        if let Some(edge) = edges.iter().find(|e| e.is_boundary()) {
            return Err(MeshError::BoundaryEdge {
                v0: edge.vertices[0],
                v1: edge.vertices[1],
            });
        }
    }

    if let Some(vertex) = used.iter().position(|&u| !u) {
        return Err(MeshError::IsolatedVertex { vertex });
    }

    trace!("extracted {} edges from {} faces", edges.len(), num_faces);

    Ok(EdgeTable { edges, face_edges })
}
