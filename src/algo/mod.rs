//! Mesh processing algorithms.
//!
//! - **Subdivision**: Catmull-Clark subdivision of quad meshes, see
//!   [`subdivide`]
//! - **Progress**: callback-based progress reporting, see [`Progress`]

pub mod progress;
pub mod subdivide;

pub use progress::Progress;
