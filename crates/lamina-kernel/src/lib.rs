#![warn(missing_docs)]

//! CSG kernel facade for lamina.
//!
//! Provides the [`Solid`] type — the primary interface for creating,
//! combining, and offsetting 3D geometry — and the [`eval`] module, which
//! evaluates a declarative [`lamina_ir::Graph`] into solids.
//!
//! # Example
//!
//! ```
//! use lamina_kernel::Solid;
//!
//! let plate = Solid::cuboid(10.0, 20.0, 3.0);
//! let hole = Solid::sphere(4.0, 16);
//! let drilled = plate.difference(&hole);
//! assert!(drilled.volume() < plate.volume());
//! ```

pub use lamina_kernel_csg;
pub use lamina_kernel_math;
pub use lamina_kernel_mesh;
pub use lamina_kernel_offset;

pub mod eval;

use lamina_kernel_csg::{
    difference, intersection, mesh_to_polygons, polygons_to_mesh, shapes, union, union_all,
    Polygon,
};
use lamina_kernel_math::{Point3, Transform};
use lamina_kernel_mesh::TriangleMesh;
use lamina_kernel_offset::OffsetError;
use thiserror::Error;

/// Errors produced when evaluating kernel operations.
#[derive(Debug, Error)]
pub enum KernelError {
    /// A graph node referenced an id that is not in the graph.
    #[error("graph references missing node {0}")]
    MissingNode(lamina_ir::NodeId),
    /// A graph external slot had no solid bound to it.
    #[error("no solid bound for external input '{0}'")]
    UnboundExternal(String),
    /// A morphological offset failed.
    #[error(transparent)]
    Offset(#[from] OffsetError),
}

/// Result alias for kernel operations.
pub type Result<T> = std::result::Result<T, KernelError>;

/// The internal representation of a solid.
#[derive(Debug, Clone)]
enum SolidRepr {
    /// Closed boundary as a set of convex planar polygons.
    Polygons(Vec<Polygon>),
    /// Empty solid (no geometry).
    Empty,
}

/// A 3D solid bounded by a closed polygon set.
///
/// Solids are created from primitives or input meshes, combined with CSG
/// boolean operations, transformed, and dilated. Conversion to an indexed
/// triangle mesh is done on demand.
#[derive(Debug, Clone)]
pub struct Solid {
    repr: SolidRepr,
}

enum BoolOp {
    Union,
    Difference,
    Intersection,
}

impl Solid {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create an empty solid.
    pub fn empty() -> Self {
        Self {
            repr: SolidRepr::Empty,
        }
    }

    /// Create an axis-aligned box centered at the origin.
    pub fn cuboid(sx: f64, sy: f64, sz: f64) -> Self {
        Self::from_polygons(shapes::cuboid(sx, sy, sz))
    }

    /// Create a sphere centered at the origin.
    pub fn sphere(radius: f64, segments: u32) -> Self {
        Self::from_polygons(shapes::sphere(radius, segments))
    }

    /// Create a solid from a closed, outward-oriented triangle mesh.
    pub fn from_mesh(mesh: &TriangleMesh) -> Self {
        Self::from_polygons(mesh_to_polygons(mesh))
    }

    /// Create a solid directly from a polygon set.
    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        if polygons.is_empty() {
            Self::empty()
        } else {
            Self {
                repr: SolidRepr::Polygons(polygons),
            }
        }
    }

    /// The boundary polygons, empty for an empty solid.
    pub fn polygons(&self) -> &[Polygon] {
        match &self.repr {
            SolidRepr::Polygons(p) => p,
            SolidRepr::Empty => &[],
        }
    }

    // =========================================================================
    // CSG boolean operations
    // =========================================================================

    /// Boolean union (self ∪ other).
    pub fn union(&self, other: &Solid) -> Solid {
        self.boolean(other, BoolOp::Union)
    }

    /// Boolean difference (self − other).
    pub fn difference(&self, other: &Solid) -> Solid {
        self.boolean(other, BoolOp::Difference)
    }

    /// Boolean intersection (self ∩ other).
    pub fn intersection(&self, other: &Solid) -> Solid {
        self.boolean(other, BoolOp::Intersection)
    }

    fn boolean(&self, other: &Solid, op: BoolOp) -> Solid {
        match (&self.repr, &other.repr) {
            (SolidRepr::Empty, _) => match op {
                BoolOp::Union => other.clone(),
                BoolOp::Difference | BoolOp::Intersection => Solid::empty(),
            },
            (_, SolidRepr::Empty) => match op {
                BoolOp::Union | BoolOp::Difference => self.clone(),
                BoolOp::Intersection => Solid::empty(),
            },
            (SolidRepr::Polygons(a), SolidRepr::Polygons(b)) => {
                let result = match op {
                    BoolOp::Union => union(a, b),
                    BoolOp::Difference => difference(a, b),
                    BoolOp::Intersection => intersection(a, b),
                };
                Solid::from_polygons(result)
            }
        }
    }

    /// Union of many solids with balanced parallel reduction.
    pub fn union_all(solids: Vec<Solid>) -> Solid {
        let parts: Vec<Vec<Polygon>> = solids
            .into_iter()
            .filter_map(|s| match s.repr {
                SolidRepr::Polygons(p) => Some(p),
                SolidRepr::Empty => None,
            })
            .collect();
        Solid::from_polygons(union_all(parts))
    }

    // =========================================================================
    // Transforms
    // =========================================================================

    /// Translate by `(x, y, z)`.
    pub fn translate(&self, x: f64, y: f64, z: f64) -> Solid {
        self.apply_transform(&Transform::translation(x, y, z))
    }

    /// Rotate by Euler angles in degrees, applied as X, then Y, then Z.
    pub fn rotate_deg(&self, x_deg: f64, y_deg: f64, z_deg: f64) -> Solid {
        self.apply_transform(&Transform::euler_deg(x_deg, y_deg, z_deg))
    }

    /// Scale about the origin, per axis.
    pub fn scale(&self, sx: f64, sy: f64, sz: f64) -> Solid {
        self.apply_transform(&Transform::scale(sx, sy, sz))
    }

    /// Apply an arbitrary affine transform.
    ///
    /// Polygons collapsed to zero area by the transform are dropped.
    pub fn apply_transform(&self, transform: &Transform) -> Solid {
        match &self.repr {
            SolidRepr::Empty => Solid::empty(),
            SolidRepr::Polygons(polys) => Solid::from_polygons(
                polys.iter().filter_map(|p| p.transformed(transform)).collect(),
            ),
        }
    }

    // =========================================================================
    // Offsetting
    // =========================================================================

    /// Dilate the solid outward by `radius` (Minkowski sum with a sphere).
    pub fn inflate(&self, radius: f64, segments: u32) -> Result<Solid> {
        let polys = lamina_kernel_offset::inflate(self.polygons(), radius, segments)?;
        Ok(Solid::from_polygons(polys))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Check if the solid has no geometry.
    pub fn is_empty(&self) -> bool {
        matches!(self.repr, SolidRepr::Empty)
    }

    /// Get the indexed triangle mesh representation.
    pub fn to_mesh(&self) -> TriangleMesh {
        match &self.repr {
            SolidRepr::Empty => TriangleMesh::new(),
            SolidRepr::Polygons(p) => polygons_to_mesh(p),
        }
    }

    /// Compute the enclosed volume from the triangle mesh.
    pub fn volume(&self) -> f64 {
        self.to_mesh().volume()
    }

    /// Compute the surface area from the triangle mesh.
    pub fn surface_area(&self) -> f64 {
        self.to_mesh().surface_area()
    }

    /// Axis-aligned bounding box as `(min, max)`, `None` if empty.
    pub fn bounding_box(&self) -> Option<(Point3, Point3)> {
        let mut lo = Point3::new(f64::MAX, f64::MAX, f64::MAX);
        let mut hi = Point3::new(f64::MIN, f64::MIN, f64::MIN);
        let polys = self.polygons();
        if polys.is_empty() {
            return None;
        }
        for poly in polys {
            for v in &poly.vertices {
                lo.x = lo.x.min(v.pos.x);
                lo.y = lo.y.min(v.pos.y);
                lo.z = lo.z.min(v.pos.z);
                hi.x = hi.x.max(v.pos.x);
                hi.y = hi.y.max(v.pos.y);
                hi.z = hi.z.max(v.pos.z);
            }
        }
        Some((lo, hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_operand_shortcuts() {
        let cube = Solid::cuboid(10.0, 10.0, 10.0);
        let empty = Solid::empty();
        assert!((empty.union(&cube).volume() - 1000.0).abs() < 1e-6);
        assert!(empty.difference(&cube).is_empty());
        assert!(empty.intersection(&cube).is_empty());
        assert!((cube.union(&empty).volume() - 1000.0).abs() < 1e-6);
        assert!((cube.difference(&empty).volume() - 1000.0).abs() < 1e-6);
        assert!(cube.intersection(&empty).is_empty());
    }

    #[test]
    fn difference_removes_material() {
        let plate = Solid::cuboid(40.0, 40.0, 4.0);
        let punch = Solid::cuboid(10.0, 10.0, 10.0);
        let v = plate.difference(&punch).volume();
        assert!((v - (40.0 * 40.0 * 4.0 - 10.0 * 10.0 * 4.0)).abs() < 1e-3);
    }

    #[test]
    fn intersection_clips_to_window() {
        let ball = Solid::sphere(10.0, 16);
        let window = Solid::cuboid(40.0, 40.0, 10.0).translate(0.0, 0.0, 5.0);
        let half = ball.intersection(&window);
        let (lo, hi) = half.bounding_box().unwrap();
        assert!(lo.z >= -1e-6);
        assert!(hi.z <= 10.0 + 1e-6);
        assert!(half.volume() < ball.volume());
        assert!(half.volume() > 0.0);
    }

    #[test]
    fn translate_moves_bounds() {
        let cube = Solid::cuboid(10.0, 10.0, 10.0).translate(100.0, 0.0, 0.0);
        let (lo, hi) = cube.bounding_box().unwrap();
        assert!((lo.x - 95.0).abs() < 1e-9);
        assert!((hi.x - 105.0).abs() < 1e-9);
    }

    #[test]
    fn union_all_of_disjoint_cubes() {
        let cubes: Vec<Solid> = (0..4)
            .map(|i| Solid::cuboid(5.0, 5.0, 5.0).translate(i as f64 * 10.0, 0.0, 0.0))
            .collect();
        let all = Solid::union_all(cubes);
        assert!((all.volume() - 4.0 * 125.0).abs() < 1e-3);
    }

    #[test]
    fn inflate_grows_volume() {
        let cube = Solid::cuboid(8.0, 8.0, 8.0);
        let fat = cube.inflate(1.5, 8).unwrap();
        assert!(fat.volume() > cube.volume());
    }

    #[test]
    fn inflate_of_empty_fails() {
        assert!(Solid::empty().inflate(1.0, 8).is_err());
    }
}
