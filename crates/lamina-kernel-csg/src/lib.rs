//! Boolean operations on closed triangle meshes.
//!
//! Solids are represented as sets of convex planar polygons and combined
//! with BSP-tree clipping. The three set operations share one kernel:
//! each operand is built into a [`bsp::Node`], the trees clip each other,
//! and the surviving polygons form the result boundary.
//!
//! Inputs must be closed, outward-oriented boundaries. Open or
//! self-intersecting input produces open or self-intersecting output.

#![warn(missing_docs)]

pub mod bsp;
pub mod convert;
pub mod ops;
pub mod plane;
pub mod polygon;
pub mod shapes;
pub mod vertex;

pub use bsp::Node;
pub use convert::{mesh_to_polygons, polygons_to_mesh};
pub use ops::{difference, intersection, union, union_all};
pub use plane::Plane;
pub use polygon::Polygon;
pub use shapes::{cuboid, sphere, sphere_directions};
pub use vertex::Vertex;
