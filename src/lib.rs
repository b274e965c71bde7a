//! # quadsub
//!
//! Catmull-Clark subdivision for closed quad meshes.
//!
//! A [`QuadMesh`](mesh::QuadMesh) is a plain face-vertex list: vertex positions
//! plus quads given as four vertex indices with consistent winding. One pass of
//! [`subdivide`](algo::subdivide::subdivide) turns it into a smoother quad mesh
//! with four times as many faces. Running several passes is up to the caller.
//!
//! ## Quick Start
//!
//! ```
//! use quadsub::prelude::*;
//!
//! let cube = QuadMesh::cube(1.0);
//! let refined = subdivide(&cube).unwrap();
//!
//! // 6 face points + 12 edge points + 8 moved corners
//! assert_eq!(refined.num_vertices(), 26);
//! assert_eq!(refined.num_faces(), 24);
//! ```
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use quadsub::prelude::*;
//! use nalgebra::Point3;
//!
//! // A square tube: four side walls, open at both ends
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(0.0, 0.0, 1.0),
//!     Point3::new(1.0, 0.0, 1.0),
//!     Point3::new(1.0, 1.0, 1.0),
//!     Point3::new(0.0, 1.0, 1.0),
//! ];
//! let faces = vec![[0, 1, 5, 4], [1, 2, 6, 5], [2, 3, 7, 6], [3, 0, 4, 7]];
//! let tube = build_from_quads(&vertices, &faces).unwrap();
//!
//! // Open edges must be opted into.
//! assert!(subdivide(&tube).is_err());
//!
//! let options = SubdivideOptions::new().with_boundary(BoundaryRule::Midpoint);
//! let refined = catmull_clark(&tube, &options).unwrap();
//! assert_eq!(refined.num_faces(), 16);
//! ```
//!
//! ## Logging
//!
//! The library logs through the [`log`](https://docs.rs/log) facade at
//! `debug` and `trace` level; install any logger to see it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod io;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use quadsub::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::subdivide::{
        catmull_clark, subdivide, BoundaryRule, SubdivideOptions,
    };
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{build_from_polygons, build_from_quads, QuadMesh};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
