//! Core mesh data structures.
//!
//! The primary type is [`QuadMesh`], a face-vertex list of quads: a vertex
//! sequence plus a sequence of 4-tuples of vertex indices. It is the input
//! and output shape of every algorithm in this crate.
//!
//! # Construction
//!
//! Meshes are typically constructed from file I/O, from face-vertex lists or
//! from one of the procedural shapes:
//!
//! ```
//! use quadsub::mesh::{build_from_quads, QuadMesh};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let quad = build_from_quads(&vertices, &[[0, 1, 2, 3]]).unwrap();
//! assert_eq!(quad.num_edges(), 4);
//!
//! let cube = QuadMesh::cube(1.0);
//! assert!(cube.is_closed());
//! ```

mod builder;
mod quad;

pub use builder::{build_from_polygons, build_from_quads};
pub use quad::QuadMesh;
pub(crate) use quad::check_quad;
