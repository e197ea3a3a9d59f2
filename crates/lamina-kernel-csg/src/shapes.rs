//! Primitive polygon-set generators.

use crate::polygon::Polygon;
use crate::vertex::Vertex;
use lamina_kernel_math::{Point3, Vec3};
use std::f64::consts::PI;

/// Axis-aligned box of the given size, centered at the origin.
pub fn cuboid(sx: f64, sy: f64, sz: f64) -> Vec<Polygon> {
    let h = [sx / 2.0, sy / 2.0, sz / 2.0];
    // Each face: four corner indices into the unit-corner table plus the
    // outward normal, CCW from outside.
    #[rustfmt::skip]
    let faces: [([usize; 4], Vec3); 6] = [
        ([0, 4, 6, 2], Vec3::new(-1.0, 0.0, 0.0)),
        ([1, 3, 7, 5], Vec3::new(1.0, 0.0, 0.0)),
        ([0, 1, 5, 4], Vec3::new(0.0, -1.0, 0.0)),
        ([2, 6, 7, 3], Vec3::new(0.0, 1.0, 0.0)),
        ([0, 2, 3, 1], Vec3::new(0.0, 0.0, -1.0)),
        ([4, 5, 7, 6], Vec3::new(0.0, 0.0, 1.0)),
    ];

    faces
        .iter()
        .filter_map(|(corners, normal)| {
            let vertices = corners
                .iter()
                .map(|&i| {
                    let pos = Point3::new(
                        if i & 1 != 0 { h[0] } else { -h[0] },
                        if i & 2 != 0 { h[1] } else { -h[1] },
                        if i & 4 != 0 { h[2] } else { -h[2] },
                    );
                    Vertex::new(pos, *normal)
                })
                .collect();
            Polygon::from_vertices(vertices)
        })
        .collect()
}

/// Sphere of the given radius centered at the origin.
///
/// `segments` controls longitude slices; latitude stacks are half that.
/// This is the tessellation-resolution knob for every curved feature in the
/// pipeline (dilation spheres, rounded opening corners).
pub fn sphere(radius: f64, segments: u32) -> Vec<Polygon> {
    let slices = segments.max(3);
    let stacks = (segments / 2).max(2);
    let mut polygons = Vec::with_capacity((slices * stacks) as usize);

    let vertex = |theta: f64, phi: f64| -> Vertex {
        let dir = Vec3::new(
            theta.cos() * phi.sin(),
            phi.cos(),
            theta.sin() * phi.sin(),
        );
        Vertex::new(Point3::from(dir * radius), dir)
    };

    for i in 0..slices {
        for j in 0..stacks {
            let t0 = i as f64 / slices as f64 * 2.0 * PI;
            let t1 = (i + 1) as f64 / slices as f64 * 2.0 * PI;
            let p0 = j as f64 / stacks as f64 * PI;
            let p1 = (j + 1) as f64 / stacks as f64 * PI;

            let mut vertices = vec![vertex(t0, p0)];
            if j > 0 {
                vertices.push(vertex(t1, p0));
            }
            if j < stacks - 1 {
                vertices.push(vertex(t1, p1));
            }
            vertices.push(vertex(t0, p1));

            if let Some(p) = Polygon::from_vertices(vertices) {
                polygons.push(p);
            }
        }
    }
    polygons
}

/// Evenly distributed unit directions on the sphere, including both poles.
///
/// The dilation kernel offsets face vertices along these directions; using
/// the same lat/long layout as [`sphere`] keeps the offset surface
/// consistent with the rounded-primitive tessellation.
pub fn sphere_directions(segments: u32) -> Vec<Vec3> {
    let slices = segments.max(3);
    let stacks = (segments / 2).max(2);
    let mut dirs = vec![Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0)];
    for j in 1..stacks {
        let phi = j as f64 / stacks as f64 * PI;
        for i in 0..slices {
            let theta = i as f64 / slices as f64 * 2.0 * PI;
            dirs.push(Vec3::new(
                theta.cos() * phi.sin(),
                phi.cos(),
                theta.sin() * phi.sin(),
            ));
        }
    }
    dirs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::polygons_to_mesh;

    #[test]
    fn cuboid_has_six_faces_and_right_volume() {
        let polys = cuboid(10.0, 20.0, 30.0);
        assert_eq!(polys.len(), 6);
        let mesh = polygons_to_mesh(&polys);
        assert!((mesh.volume() - 6000.0).abs() < 1e-6);
        assert_eq!(mesh.boundary_edge_count(), 0);
    }

    #[test]
    fn cuboid_normals_point_outward() {
        for p in cuboid(2.0, 2.0, 2.0) {
            let centroid = p
                .vertices
                .iter()
                .fold(Vec3::zeros(), |acc, v| acc + v.pos.coords)
                / p.vertices.len() as f64;
            assert!(p.plane.normal.dot(&centroid) > 0.0);
        }
    }

    #[test]
    fn sphere_volume_approaches_ideal() {
        let mesh = polygons_to_mesh(&sphere(10.0, 32));
        let ideal = 4.0 / 3.0 * PI * 1000.0;
        // Inscribed tessellation is a few percent under the ideal.
        assert!(mesh.volume() > ideal * 0.95 && mesh.volume() < ideal);
        assert_eq!(mesh.boundary_edge_count(), 0);
    }

    #[test]
    fn sphere_is_watertight_at_low_resolution() {
        let mesh = polygons_to_mesh(&sphere(3.0, 6));
        assert!(!mesh.is_empty());
        assert_eq!(mesh.boundary_edge_count(), 0);
    }

    #[test]
    fn sphere_directions_are_unit_and_cover_poles() {
        let dirs = sphere_directions(12);
        assert!(dirs.iter().all(|d| (d.norm() - 1.0).abs() < 1e-9));
        assert!(dirs.iter().any(|d| d.y > 0.999));
        assert!(dirs.iter().any(|d| d.y < -0.999));
    }
}
