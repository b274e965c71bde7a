//! Catmull-Clark subdivision.
//!
//! Catmull-Clark subdivision (Catmull & Clark, 1978) is an approximating
//! subdivision scheme for quad meshes. One pass:
//!
//! 1. Extracts the unique edges and the faces on either side of each
//! 2. Creates a face point at each face centroid
//! 3. Creates an edge point from each edge's endpoints and adjacent face points
//! 4. Moves every original vertex by a weighted average of its neighbourhood
//! 5. Connects face points, edge points and moved vertices into new quads
//!
//! The result has four times as many faces and converges to a C² continuous
//! surface (C¹ at extraordinary vertices) when applied repeatedly.
//!
//! Each stage is a public function over the previous stage's output, so the
//! pipeline can be inspected step by step:
//!
//! ```
//! use quadsub::algo::subdivide::{
//!     edge_points, extract_edges, face_points, rebuild_faces, reposition_vertices, BoundaryRule,
//! };
//! use quadsub::mesh::QuadMesh;
//!
//! let cube = QuadMesh::cube(1.0);
//! let edges = extract_edges(&cube, BoundaryRule::Reject).unwrap();
//! let fps = face_points(&cube, false);
//! let eps = edge_points(&cube, &fps, &edges, false);
//! let vps = reposition_vertices(&cube, &fps, &edges, false);
//! let faces = rebuild_faces(&cube, &edges);
//!
//! assert_eq!(fps.len() + eps.len() + vps.len(), 26);
//! assert_eq!(faces.len(), 24);
//! ```
//!
//! # Example
//!
//! ```
//! use quadsub::algo::subdivide::subdivide;
//! use quadsub::mesh::QuadMesh;
//!
//! let mut mesh = QuadMesh::cube(1.0);
//! for _ in 0..2 {
//!     mesh = subdivide(&mesh).unwrap();
//! }
//! assert_eq!(mesh.num_faces(), 6 * 16);
//! ```
//!
//! # Boundaries
//!
//! The scheme is defined here for closed meshes. Open edges are rejected
//! unless [`BoundaryRule::Midpoint`] is selected, which places boundary edge
//! points at edge midpoints and moves boundary vertices along the boundary
//! curve only.
//!
//! # References
//!
//! - Catmull, E. & Clark, J. (1978). "Recursively generated B-spline surfaces
//!   on arbitrary topological meshes." Computer-Aided Design, 10(6), 350-355.

mod edges;
mod points;
mod topology;
mod vertices;

use log::{debug, trace};

use crate::algo::Progress;
use crate::error::Result;
use crate::mesh::QuadMesh;

pub use edges::{extract_edges, Edge, EdgeTable};
pub use points::{edge_points, face_points};
pub use topology::rebuild_faces;
pub use vertices::reposition_vertices;

/// How edges with a single incident face are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryRule {
    /// Fail with [`MeshError::BoundaryEdge`](crate::error::MeshError::BoundaryEdge).
    #[default]
    Reject,
    /// Edge point at the edge midpoint; boundary vertices follow the
    /// boundary curve.
    Midpoint,
}

/// Options for Catmull-Clark subdivision.
#[derive(Debug, Clone)]
pub struct SubdivideOptions {
    /// Treatment of open edges.
    pub boundary: BoundaryRule,

    /// Whether to use parallel execution (default: true).
    pub parallel: bool,
}

impl Default for SubdivideOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl SubdivideOptions {
    /// Create default options: closed meshes only, parallel execution.
    pub fn new() -> Self {
        Self {
            boundary: BoundaryRule::Reject,
            parallel: true,
        }
    }

    /// Set the boundary rule.
    pub fn with_boundary(mut self, boundary: BoundaryRule) -> Self {
        self.boundary = boundary;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Subdivide a closed quad mesh once with default options.
///
/// The returned mesh holds `F + E + V` vertices (face points, then edge
/// points, then the repositioned original vertices) and `4F` quads.
///
/// # Errors
///
/// Returns a malformed-mesh [`MeshError`](crate::error::MeshError) if the
/// input has open edges, edges shared by more than two faces, out-of-range or
/// repeated indices, or vertices that no face uses.
pub fn subdivide(mesh: &QuadMesh) -> Result<QuadMesh> {
    catmull_clark(mesh, &SubdivideOptions::new())
}

/// Performs one pass of Catmull-Clark subdivision.
///
/// # Arguments
///
/// * `mesh` - The quad mesh to subdivide
/// * `options` - Subdivision parameters
///
/// # Vertex Rules
///
/// - **Face point**: centroid of the face's four vertices
/// - **Edge point**: average of the two endpoints and the two adjacent face points
/// - **Vertex point**: (Q + 2R + (n-3)S) / n where:
///   - Q = average of adjacent face points
///   - R = average of adjacent edge midpoints
///   - S = original position
///   - n = valence
pub fn catmull_clark(mesh: &QuadMesh, options: &SubdivideOptions) -> Result<QuadMesh> {
    catmull_clark_with_progress(mesh, options, &Progress::none())
}

/// Catmull-Clark subdivision with progress reporting, one step per stage.
pub fn catmull_clark_with_progress(
    mesh: &QuadMesh,
    options: &SubdivideOptions,
    progress: &Progress,
) -> Result<QuadMesh> {
    const STAGES: usize = 5;

    progress.report(0, STAGES, "Extracting edges");
    let edges = extract_edges(mesh, options.boundary)?;

    progress.report(1, STAGES, "Computing face points");
    let face_points = face_points(mesh, options.parallel);

    progress.report(2, STAGES, "Computing edge points");
    let edge_points = edge_points(mesh, &face_points, &edges, options.parallel);

    progress.report(3, STAGES, "Repositioning vertices");
    let vertex_points = reposition_vertices(mesh, &face_points, &edges, options.parallel);

    progress.report(4, STAGES, "Rebuilding faces");
    let faces = rebuild_faces(mesh, &edges);
    trace!("rebuilt {} faces", faces.len());

    let mut vertices =
        Vec::with_capacity(face_points.len() + edge_points.len() + vertex_points.len());
    vertices.extend(face_points);
    vertices.extend(edge_points);
    vertices.extend(vertex_points);

    debug!(
        "Catmull-Clark: {} vertices, {} edges, {} faces -> {} vertices, {} faces",
        mesh.num_vertices(),
        edges.len(),
        mesh.num_faces(),
        vertices.len(),
        faces.len()
    );
    progress.report(STAGES, STAGES, "Catmull-Clark subdivision");

    Ok(QuadMesh::new(vertices, faces))
}

impl QuadMesh {
    /// Subdivide once with default options; see [`subdivide`].
    pub fn subdivided(&self) -> Result<QuadMesh> {
        subdivide(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeshError;
    use nalgebra::{Point3, Vector3};
    use std::sync::{Arc, Mutex};

    fn create_single_quad() -> QuadMesh {
        QuadMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2, 3]],
        )
    }

    fn create_two_quads() -> QuadMesh {
        // Two quads sharing an edge
        QuadMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(2.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2, 3], [1, 4, 5, 2]],
        )
    }

    fn open() -> SubdivideOptions {
        SubdivideOptions::new().with_boundary(BoundaryRule::Midpoint)
    }

    #[test]
    fn test_cube_counts() {
        let cube = QuadMesh::cube(1.0);
        let result = subdivide(&cube).unwrap();

        assert_eq!(result.num_vertices(), 6 + 12 + 8);
        assert_eq!(result.num_faces(), 24);
        assert!(result.validate().is_ok());
        assert!(result.is_closed());
    }

    #[test]
    fn test_cube_stays_in_bounding_box() {
        let cube = QuadMesh::cube(1.0);
        let result = subdivide(&cube).unwrap();

        for p in &result.vertices {
            for c in p.iter() {
                assert!((0.0..=1.0).contains(c), "{:?} outside unit cube", p);
            }
        }
    }

    #[test]
    fn test_vertex_block_layout() {
        let cube = QuadMesh::cube(1.0);
        let result = subdivide(&cube).unwrap();

        // Face points come first...
        for fi in 0..cube.num_faces() {
            assert_eq!(result.vertices[fi], cube.face_centroid(fi));
        }
        // ...and the repositioned originals last, in their original order.
        let base = cube.num_faces() + 12;
        let centre = Point3::new(0.5, 0.5, 0.5);
        for (vi, original) in cube.vertices.iter().enumerate() {
            let moved = result.vertices[base + vi];
            assert!((moved - centre).norm() < (original - centre).norm());
        }
    }

    #[test]
    fn test_count_law_on_two_quads() {
        let mesh = create_two_quads();
        let result = catmull_clark(&mesh, &open()).unwrap();

        // 2 face points + 7 edge points + 6 vertices
        assert_eq!(result.num_vertices(), 15);
        assert_eq!(result.num_faces(), 8);
        assert!(result.validate().is_ok());
    }

    #[test]
    fn test_single_quad_with_boundary_rule() {
        let mesh = create_single_quad();
        let result = catmull_clark(&mesh, &open()).unwrap();

        assert_eq!(result.num_vertices(), 9);
        assert_eq!(result.num_faces(), 4);
        assert_eq!(result.vertices[0], Point3::new(0.5, 0.5, 0.0));
        // Bottom edge point is the midpoint of the open edge.
        assert_eq!(result.vertices[1], Point3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_open_mesh_rejected_by_default() {
        let mesh = create_single_quad();
        assert!(matches!(subdivide(&mesh), Err(MeshError::BoundaryEdge { .. })));
    }

    #[test]
    fn test_quadruples_faces_over_passes() {
        let mut mesh = QuadMesh::cube(1.0);
        for pass in 1..=3 {
            mesh = mesh.subdivided().unwrap();
            assert_eq!(mesh.num_faces(), 6 * 4usize.pow(pass));
        }
    }

    #[test]
    fn test_preserves_euler() {
        let cube = QuadMesh::cube(1.0);
        let result = subdivide(&cube).unwrap();
        assert_eq!(result.euler_characteristic(), cube.euler_characteristic());

        let grid = QuadMesh::grid(3, 2, 1.0);
        let result = catmull_clark(&grid, &open()).unwrap();
        assert_eq!(result.euler_characteristic(), grid.euler_characteristic());
    }

    #[test]
    fn test_output_indices_in_range() {
        let mut mesh = QuadMesh::cube(1.0);
        for _ in 0..2 {
            mesh = subdivide(&mesh).unwrap();
            let n = mesh.num_vertices();
            assert!(mesh.faces.iter().flatten().all(|&vi| vi < n));
        }
    }

    #[test]
    fn test_flat_grid_interior_unchanged() {
        let grid = QuadMesh::grid(4, 4, 1.0);
        let result = catmull_clark(&grid, &open()).unwrap();

        let base = grid.num_faces() + grid.num_edges();
        let vi = 2 * 5 + 2;
        assert!((result.vertices[base + vi] - grid.vertices[vi]).norm() < 1e-12);
        assert!(result.vertices.iter().all(|p| p.z == 0.0));
    }

    #[test]
    fn test_deterministic() {
        let cube = QuadMesh::cube(1.0);
        let a = subdivide(&cube).unwrap();
        let b = subdivide(&cube).unwrap();
        assert_eq!(a, b);

        let c = catmull_clark(&cube, &SubdivideOptions::new().sequential()).unwrap();
        assert_eq!(a, c);
    }

    #[test]
    fn test_shrinks_toward_centre() {
        // Catmull-Clark is approximating, so closed meshes shrink toward their centre
        let cube = QuadMesh::cube(2.0);
        let result = subdivide(&subdivide(&cube).unwrap()).unwrap();

        let centroid: Vector3<f64> = result.vertices.iter().map(|p| p.coords).sum::<Vector3<f64>>()
            / result.num_vertices() as f64;
        assert!((centroid - Vector3::new(1.0, 1.0, 1.0)).norm() < 1e-9);

        let (min, max) = result.bounding_box().unwrap();
        assert!(min.x > 0.0 && max.x < 2.0);
    }

    #[test]
    fn test_progress_reports_each_stage() {
        let steps = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&steps);
        let progress = Progress::new(move |current, total, _| {
            sink.lock().unwrap().push((current, total));
        });

        let cube = QuadMesh::cube(1.0);
        catmull_clark_with_progress(&cube, &SubdivideOptions::new(), &progress).unwrap();

        let steps = steps.lock().unwrap();
        assert_eq!(*steps, vec![(0, 5), (1, 5), (2, 5), (3, 5), (4, 5), (5, 5)]);
    }

    #[test]
    fn test_options_builder() {
        let options = SubdivideOptions::new()
            .with_boundary(BoundaryRule::Midpoint)
            .with_parallel(true)
            .sequential();
        assert_eq!(options.boundary, BoundaryRule::Midpoint);
        assert!(!options.parallel);
    }
}
