//! Reconstruction of the refined quads.
//!
//! The output vertex block is laid out as face points, then edge points, then
//! repositioned vertices:
//!
//! ```text
//! [ fp_0 .. fp_F | ep_0 .. ep_E | vp_0 .. vp_V ]
//! ```
//!
//! Each original face is split at its four corners. A corner is found where
//! two of the face's edges, directed along the face's winding, meet head to
//! tail.

use crate::mesh::QuadMesh;

use super::edges::EdgeTable;

/// Build the four new quads for every original face.
///
/// Each quad is `[face point, entering edge point, corner vertex, leaving edge
/// point]`, which keeps the winding of the face it came from. A face whose
/// edges do not chain head to tail (inconsistent winding) yields fewer than
/// four quads.
///
/// `edges` must come from [`extract_edges`] on this same `mesh`. The
/// emitted indices assume its face and edge counts, and a mismatched table
/// panics or produces out-of-range quads.
///
/// [`extract_edges`]: super::extract_edges
pub fn rebuild_faces(mesh: &QuadMesh, edges: &EdgeTable) -> Vec<[usize; 4]> {
    let num_faces = mesh.num_faces();
    let edge_base = num_faces;
    let vertex_base = num_faces + edges.len();

    let mut faces = Vec::with_capacity(num_faces * 4);

    for (fi, incident) in edges.face_edges().iter().enumerate() {
        let directed: [[usize; 2]; 4] = incident.map(|ei| edges.edge(ei).directed_for(fi));

        for j in 0..4 {
            for k in (j + 1)..4 {
                let [tail_j, head_j] = directed[j];
                let [tail_k, head_k] = directed[k];

                let (entering, corner, leaving) = if head_j == tail_k {
                    (incident[j], head_j, incident[k])
                } else if head_k == tail_j {
                    (incident[k], head_k, incident[j])
                } else {
                    continue;
                };

                faces.push([
                    fi,
                    edge_base + entering,
                    vertex_base + corner,
                    edge_base + leaving,
                ]);
            }
        }
    }

    faces
}
