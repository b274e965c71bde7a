//! Repositioning of the original vertices.

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

use crate::mesh::QuadMesh;

use super::edges::EdgeTable;

/// Per-vertex sums gathered in one sweep over faces and edges.
struct Neighborhood {
    face_sum: Vec<Vector3<f64>>,
    face_count: Vec<usize>,
    midpoint_sum: Vec<Vector3<f64>>,
    edge_count: Vec<usize>,
    boundary_neighbors: Vec<Vec<usize>>,
}

impl Neighborhood {
    fn gather(mesh: &QuadMesh, face_points: &[Point3<f64>], edges: &EdgeTable) -> Self {
        let n = mesh.num_vertices();
        let mut hood = Self {
            face_sum: vec![Vector3::zeros(); n],
            face_count: vec![0; n],
            midpoint_sum: vec![Vector3::zeros(); n],
            edge_count: vec![0; n],
            boundary_neighbors: vec![Vec::new(); n],
        };

        for (face, fp) in mesh.faces.iter().zip(face_points) {
            for &vi in face {
                hood.face_sum[vi] += fp.coords;
                hood.face_count[vi] += 1;
            }
        }

        for edge in edges.edges() {
            let [a, b] = edge.vertices;
            let midpoint = (mesh.vertices[a].coords + mesh.vertices[b].coords) * 0.5;
            for v in [a, b] {
                hood.midpoint_sum[v] += midpoint;
                hood.edge_count[v] += 1;
            }
            if edge.is_boundary() {
                hood.boundary_neighbors[a].push(b);
                hood.boundary_neighbors[b].push(a);
            }
        }

        hood
    }

    fn reposition(&self, vertices: &[Point3<f64>], i: usize) -> Point3<f64> {
        let pos = vertices[i];

        match self.boundary_neighbors[i].as_slice() {
            [] => {}
            // Boundary curve: 1/8 * (left + right) + 3/4 * v
            &[left, right] => {
                return Point3::from(
                    (vertices[left].coords + vertices[right].coords) * (1.0 / 8.0)
                        + pos.coords * (3.0 / 4.0),
                );
            }
            // More than one boundary loop meets here; pin it.
            _ => return pos,
        }

        let valence = self.face_count[i];
        if valence == 0 || self.edge_count[i] == 0 {
            return pos;
        }

        // Q = average of adjacent face points
        let q = self.face_sum[i] / valence as f64;
        // R = average of adjacent edge midpoints
        let r = self.midpoint_sum[i] / self.edge_count[i] as f64;
        let s = pos.coords;

        // (Q + 2R + (n-3)S) / n
        let n_f = valence as f64;
        Point3::from((q + r * 2.0 + s * (n_f - 3.0)) / n_f)
    }
}

/// Compute the smoothed position of every original vertex.
///
/// Interior vertices follow the Catmull-Clark vertex rule
/// `(Q + 2R + (n - 3) S) / n`, where
///
/// - `Q` is the average of the adjacent face points
/// - `R` is the average of the midpoints of the incident edges
/// - `S` is the original position
/// - `n` is the number of incident faces
///
/// Vertices on an open boundary (only reachable with
/// [`BoundaryRule::Midpoint`]) use the cubic B-spline curve rule along the
/// boundary instead.
///
/// The result replaces the original vertex list index for index.
///
/// `edges` must come from [`extract_edges`] on this same `mesh`, and
/// `face_points` from [`face_points`] on it. Indices are not rechecked, so a
/// table built for another mesh panics or gives meaningless positions.
///
/// [`extract_edges`]: super::extract_edges
/// [`face_points`]: super::face_points
/// [`BoundaryRule::Midpoint`]: super::BoundaryRule::Midpoint
pub fn reposition_vertices(
    mesh: &QuadMesh,
    face_points: &[Point3<f64>],
    edges: &EdgeTable,
    parallel: bool,
) -> Vec<Point3<f64>> {
    let hood = Neighborhood::gather(mesh, face_points, edges);
    let vertices = &mesh.vertices;

    if parallel {
        (0..vertices.len())
            .into_par_iter()
            .map(|i| hood.reposition(vertices, i))
            .collect()
    } else {
        (0..vertices.len())
            .map(|i| hood.reposition(vertices, i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::subdivide::{extract_edges, face_points, BoundaryRule};

    fn reposition(mesh: &QuadMesh, boundary: BoundaryRule) -> Vec<Point3<f64>> {
        let table = extract_edges(mesh, boundary).unwrap();
        let fps = face_points(mesh, false);
        reposition_vertices(mesh, &fps, &table, false)
    }

    #[test]
    fn test_flat_regular_grid_interior_is_fixed() {
        let grid = QuadMesh::grid(4, 4, 0.5);
        let updated = reposition(&grid, BoundaryRule::Midpoint);

        for j in 1..4 {
            for i in 1..4 {
                let vi = j * 5 + i;
                assert!(
                    (updated[vi] - grid.vertices[vi]).norm() < 1e-12,
                    "interior vertex {} moved to {:?}",
                    vi,
                    updated[vi]
                );
            }
        }
    }

    #[test]
    fn test_straight_boundary_is_fixed() {
        let grid = QuadMesh::grid(3, 3, 1.0);
        let updated = reposition(&grid, BoundaryRule::Midpoint);
        // Middle of the bottom row
        assert!((updated[1] - grid.vertices[1]).norm() < 1e-12);
        assert!((updated[2] - grid.vertices[2]).norm() < 1e-12);
    }

    #[test]
    fn test_grid_corner_pulls_inward() {
        let grid = QuadMesh::grid(2, 2, 1.0);
        let updated = reposition(&grid, BoundaryRule::Midpoint);
        // 3/4 * (0,0) + 1/8 * ((1,0) + (0,1))
        assert!((updated[0] - Point3::new(0.125, 0.125, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_cube_corner_rule() {
        let cube = QuadMesh::cube(1.0);
        let updated = reposition(&cube, BoundaryRule::Reject);

        // Vertex 0 at the origin: n = 3, Q = mean of three face centres,
        // R = mean of three edge midpoints, so the new position is (Q + 2R) / 3.
        let q = Vector3::new(1.0, 1.0, 1.0) / 3.0;
        let r = Vector3::new(1.0, 1.0, 1.0) / 6.0;
        let expected = Point3::from((q + r * 2.0) / 3.0);
        assert!((updated[0] - expected).norm() < 1e-12);

        // Symmetry: the opposite corner mirrors it.
        let mirrored = Point3::new(1.0 - expected.x, 1.0 - expected.y, 1.0 - expected.z);
        assert!((updated[6] - mirrored).norm() < 1e-12);
    }

    #[test]
    fn test_bowtie_vertex_is_pinned() {
        // Two quads touching only at vertex 2, so four boundary edges meet there.
        let mesh = QuadMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(2.0, 1.0, 0.0),
                Point3::new(2.0, 2.0, 0.0),
                Point3::new(1.0, 2.0, 0.0),
            ],
            vec![[0, 1, 2, 3], [2, 4, 5, 6]],
        );
        let updated = reposition(&mesh, BoundaryRule::Midpoint);

        assert_eq!(updated[2], mesh.vertices[2]);
        // Ordinary boundary corners still move.
        assert!((updated[0] - Point3::new(0.125, 0.125, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_vertex_without_edges_keeps_position() {
        let vertices = vec![Point3::new(0.5, -1.0, 2.0)];
        let hood = Neighborhood {
            face_sum: vec![Vector3::new(1.0, 1.0, 1.0)],
            face_count: vec![1],
            midpoint_sum: vec![Vector3::zeros()],
            edge_count: vec![0],
            boundary_neighbors: vec![Vec::new()],
        };
        assert_eq!(hood.reposition(&vertices, 0), vertices[0]);
    }

    #[test]
    fn test_replaces_every_vertex() {
        let cube = QuadMesh::cube(1.0);
        let updated = reposition(&cube, BoundaryRule::Reject);
        assert_eq!(updated.len(), cube.num_vertices());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let cube = QuadMesh::cube(1.0);
        let table = extract_edges(&cube, BoundaryRule::Reject).unwrap();
        let fps = face_points(&cube, false);
        assert_eq!(
            reposition_vertices(&cube, &fps, &table, true),
            reposition_vertices(&cube, &fps, &table, false)
        );
    }
}
