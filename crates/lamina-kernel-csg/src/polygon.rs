//! Convex planar polygon, the unit of BSP clipping.

use crate::plane::Plane;
use crate::vertex::Vertex;
use lamina_kernel_math::Transform;

/// A convex planar polygon with at least three vertices.
///
/// All polygons produced by the primitive generators are convex; BSP
/// splitting of a convex polygon yields convex pieces, so convexity is an
/// invariant of the whole kernel and fan triangulation is always valid.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Corner vertices in counter-clockwise order seen from outside.
    pub vertices: Vec<Vertex>,
    /// The polygon's supporting plane.
    pub plane: Plane,
}

impl Polygon {
    /// Build a polygon from vertices, computing the supporting plane.
    ///
    /// Returns `None` when fewer than three vertices remain or the first
    /// three corners are degenerate (collinear).
    pub fn from_vertices(vertices: Vec<Vertex>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let plane = Plane::from_points(
            &vertices[0].pos,
            &vertices[1].pos,
            &vertices[2].pos,
        )?;
        Some(Self { vertices, plane })
    }

    /// Invert orientation: reverses winding and flips normals.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.plane.flip();
    }

    /// Apply an affine transform, recomputing the supporting plane.
    ///
    /// Returns `None` if the transform collapses the polygon (zero scale).
    pub fn transformed(&self, t: &Transform) -> Option<Self> {
        let mut vertices: Vec<Vertex> = self
            .vertices
            .iter()
            .map(|v| Vertex::new(t.apply_point(&v.pos), t.apply_vec(&v.normal)))
            .collect();
        if t.linear_determinant() < 0.0 {
            vertices.reverse();
        }
        Self::from_vertices(vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lamina_kernel_math::{Point3, Vec3};

    fn tri() -> Polygon {
        Polygon::from_vertices(vec![
            Vertex::new(Point3::new(0.0, 0.0, 0.0), Vec3::z()),
            Vertex::new(Point3::new(1.0, 0.0, 0.0), Vec3::z()),
            Vertex::new(Point3::new(0.0, 1.0, 0.0), Vec3::z()),
        ])
        .expect("triangle")
    }

    #[test]
    fn plane_follows_winding() {
        let p = tri();
        assert!((p.plane.normal - Vec3::z()).norm() < 1e-12);
        let mut q = p.clone();
        q.flip();
        assert!((q.plane.normal + Vec3::z()).norm() < 1e-12);
    }

    #[test]
    fn too_few_vertices_rejected() {
        assert!(Polygon::from_vertices(vec![
            Vertex::new(Point3::origin(), Vec3::z()),
            Vertex::new(Point3::new(1.0, 0.0, 0.0), Vec3::z()),
        ])
        .is_none());
    }

    #[test]
    fn transform_recomputes_plane() {
        let p = tri();
        let rotated = p
            .transformed(&Transform::rotation_x(std::f64::consts::FRAC_PI_2))
            .expect("valid transform");
        // +90 about X sends +Z to -Y.
        assert!((rotated.plane.normal - Vec3::new(0.0, -1.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn mirror_preserves_outward_plane() {
        let p = tri();
        let mirrored = p
            .transformed(&Transform::scale(-1.0, 1.0, 1.0))
            .expect("valid transform");
        // Winding reversal keeps the mirrored plane on the +z side.
        assert!(mirrored.plane.normal.z > 0.99);
    }
}
