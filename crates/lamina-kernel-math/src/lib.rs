#![warn(missing_docs)]

//! Math types for the lamina geometry kernel.
//!
//! Thin wrappers around nalgebra providing domain-specific types for the
//! mask pipeline: points, vectors, affine transforms, and tolerance
//! constants. All lengths are conventionally millimeters.

use nalgebra::{Matrix4, Unit, Vector3, Vector4};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A 4x4 affine transformation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Non-uniform scale by `(sx, sy, sz)` about the origin.
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 0)] = sx;
        m[(1, 1)] = sy;
        m[(2, 2)] = sz;
        Self { matrix: m }
    }

    /// Uniform scale by `s` about the origin.
    pub fn uniform_scale(s: f64) -> Self {
        Self::scale(s, s, s)
    }

    /// Rotation about the X axis by `angle` radians.
    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(1, 1)] = c;
        m[(1, 2)] = -s;
        m[(2, 1)] = s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Rotation about the Y axis by `angle` radians.
    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 2)] = s;
        m[(2, 0)] = -s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Rotation about the Z axis by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = -s;
        m[(1, 0)] = s;
        m[(1, 1)] = c;
        Self { matrix: m }
    }

    /// Euler rotation from degrees, applied as X, then Y, then Z.
    pub fn euler_deg(x_deg: f64, y_deg: f64, z_deg: f64) -> Self {
        let rx = Self::rotation_x(x_deg.to_radians());
        let ry = Self::rotation_y(y_deg.to_radians());
        let rz = Self::rotation_z(z_deg.to_radians());
        rz.then(&ry).then(&rx)
    }

    /// Compose: the returned transform applies `other` first, then `self`.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Transform a direction vector (ignores translation).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let r = self.matrix * Vector4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(r.x, r.y, r.z)
    }

    /// Determinant of the upper-left 3x3 block.
    ///
    /// Negative means the transform mirrors, which flips mesh winding.
    pub fn linear_determinant(&self) -> f64 {
        self.matrix.fixed_view::<3, 3>(0, 0).determinant()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Linear distance tolerance in mm for coincidence tests and vertex welding.
pub const LINEAR_TOL: f64 = 1e-6;

/// Plane-side classification tolerance for BSP splitting.
///
/// Looser than [`LINEAR_TOL`]: polygon splitting must treat near-coplanar
/// vertices as coplanar or the BSP sprays sliver polygons.
pub const PLANE_TOL: f64 = 1e-5;
