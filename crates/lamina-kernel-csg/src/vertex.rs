//! Polygon vertex: position plus surface normal.

use lamina_kernel_math::{Point3, Vec3};

/// A polygon corner with an outward surface normal.
///
/// Normals are carried through splits and flips so that curved primitives
/// (spheres, dilation hulls) keep smooth shading data, but all boolean
/// classification uses positions only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in 3D space.
    pub pos: Point3,
    /// Outward surface normal (unit length for well-formed input).
    pub normal: Vec3,
}

impl Vertex {
    /// Create a new vertex.
    pub fn new(pos: Point3, normal: Vec3) -> Self {
        Self { pos, normal }
    }

    /// Invert orientation: flips the normal in place.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Linear interpolation toward `other` by parameter `t` in `[0, 1]`.
    pub fn interpolate(&self, other: &Vertex, t: f64) -> Vertex {
        Vertex {
            pos: self.pos + (other.pos - self.pos) * t,
            normal: self.normal + (other.normal - self.normal) * t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolate_midpoint() {
        let a = Vertex::new(Point3::new(0.0, 0.0, 0.0), Vec3::x());
        let b = Vertex::new(Point3::new(2.0, 4.0, 6.0), Vec3::y());
        let mid = a.interpolate(&b, 0.5);
        assert!((mid.pos - Point3::new(1.0, 2.0, 3.0)).norm() < 1e-12);
        assert!((mid.normal - Vec3::new(0.5, 0.5, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn flip_negates_normal() {
        let mut v = Vertex::new(Point3::origin(), Vec3::z());
        v.flip();
        assert!((v.normal + Vec3::z()).norm() < 1e-12);
    }
}
