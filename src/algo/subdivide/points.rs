//! Face points and edge points.

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

use crate::mesh::QuadMesh;

use super::edges::{Edge, EdgeTable};

/// Compute one face point per face: the centroid of its four corners.
pub fn face_points(mesh: &QuadMesh, parallel: bool) -> Vec<Point3<f64>> {
    if parallel {
        (0..mesh.num_faces())
            .into_par_iter()
            .map(|fi| mesh.face_centroid(fi))
            .collect()
    } else {
        (0..mesh.num_faces()).map(|fi| mesh.face_centroid(fi)).collect()
    }
}

/// Compute one edge point per edge, indexed like `edges`.
///
/// An interior edge point is the mean of the two endpoints and the two
/// adjacent face points. A boundary edge (only present when the edge table
/// was extracted with [`BoundaryRule::Midpoint`]) gets its midpoint.
///
/// `edges` must come from [`extract_edges`] on this same `mesh` and
/// `face_points` from [`face_points`] on it; indices are not rechecked, so a
/// mismatched table panics.
///
/// [`BoundaryRule::Midpoint`]: super::BoundaryRule::Midpoint
/// [`extract_edges`]: super::extract_edges
pub fn edge_points(
    mesh: &QuadMesh,
    face_points: &[Point3<f64>],
    edges: &EdgeTable,
    parallel: bool,
) -> Vec<Point3<f64>> {
    let compute = |edge: &Edge| edge_point(&mesh.vertices, face_points, edge);

    if parallel {
        edges.edges().par_iter().map(compute).collect()
    } else {
        edges.edges().iter().map(compute).collect()
    }
}

fn edge_point(vertices: &[Point3<f64>], face_points: &[Point3<f64>], edge: &Edge) -> Point3<f64> {
    let [a, b] = edge.vertices;
    let ends: Vector3<f64> = vertices[a].coords + vertices[b].coords;

    match edge.faces {
        (f1, Some(f2)) => Point3::from((ends + face_points[f1].coords + face_points[f2].coords) / 4.0),
        (_, None) => Point3::from(ends * 0.5),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::subdivide::{extract_edges, BoundaryRule};

    #[test]
    fn test_face_point_is_centroid() {
        let mesh = QuadMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2, 3]],
        );
        let points = face_points(&mesh, false);
        assert_eq!(points, vec![Point3::new(0.5, 0.5, 0.0)]);
    }

    #[test]
    fn test_face_points_per_face() {
        let cube = QuadMesh::cube(2.0);
        let points = face_points(&cube, true);
        assert_eq!(points.len(), cube.num_faces());
        // Top face sits at z = 2
        assert!((points[1] - Point3::new(1.0, 1.0, 2.0)).norm() < 1e-12);
        // Left face sits at x = 0
        assert!((points[4] - Point3::new(0.0, 1.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_interior_edge_point() {
        let cube = QuadMesh::cube(1.0);
        let fps = face_points(&cube, false);
        let table = extract_edges(&cube, BoundaryRule::Reject).unwrap();
        let eps = edge_points(&cube, &fps, &table, false);
        assert_eq!(eps.len(), table.len());

        // Edge (0, 1) lies between the bottom and front faces.
        let ei = table
            .edges()
            .iter()
            .position(|e| e.vertices == [1, 0] || e.vertices == [0, 1])
            .unwrap();
        assert!((eps[ei] - Point3::new(0.5, 0.125, 0.125)).norm() < 1e-12);
    }

    #[test]
    fn test_boundary_edge_point_is_midpoint() {
        let grid = QuadMesh::grid(1, 1, 2.0);
        let fps = face_points(&grid, false);
        let table = extract_edges(&grid, BoundaryRule::Midpoint).unwrap();
        let eps = edge_points(&grid, &fps, &table, false);
        assert_eq!(eps[0], Point3::new(1.0, 0.0, 0.0));
        assert_eq!(eps[1], Point3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let cube = QuadMesh::cube(1.0);
        let table = extract_edges(&cube, BoundaryRule::Reject).unwrap();
        let fps = face_points(&cube, true);
        assert_eq!(fps, face_points(&cube, false));
        assert_eq!(
            edge_points(&cube, &fps, &table, true),
            edge_points(&cube, &fps, &table, false)
        );
    }
}
