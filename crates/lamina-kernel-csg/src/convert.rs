//! Conversion between polygon sets and indexed triangle meshes.

use crate::polygon::Polygon;
use crate::vertex::Vertex;
use lamina_kernel_mesh::{weld_triangles, TriangleMesh};
use lamina_kernel_math::{Point3, LINEAR_TOL};

/// Triangulate a polygon set into an indexed mesh.
///
/// Polygons are fan-triangulated (valid because the kernel only produces
/// convex polygons) and coincident vertices are welded so the result is
/// indexed and exportable.
pub fn polygons_to_mesh(polygons: &[Polygon]) -> TriangleMesh {
    let mut triangles: Vec<[Point3; 3]> = Vec::new();
    for polygon in polygons {
        let vs = &polygon.vertices;
        for k in 1..vs.len() - 1 {
            triangles.push([vs[0].pos, vs[k].pos, vs[k + 1].pos]);
        }
    }
    weld_triangles(&triangles, LINEAR_TOL)
}

/// Interpret an indexed triangle mesh as a polygon set.
///
/// Per-vertex normals are taken from the face plane; degenerate triangles
/// are dropped. The mesh is assumed closed and outward-oriented.
pub fn mesh_to_polygons(mesh: &TriangleMesh) -> Vec<Polygon> {
    let mut polygons = Vec::with_capacity(mesh.num_triangles());
    for t in 0..mesh.num_triangles() {
        let [a, b, c] = mesh.triangle(t);
        let n = (b - a).cross(&(c - a));
        let len = n.norm();
        if len < 1e-12 {
            continue;
        }
        let normal = n / len;
        if let Some(p) = Polygon::from_vertices(vec![
            Vertex::new(a, normal),
            Vertex::new(b, normal),
            Vertex::new(c, normal),
        ]) {
            polygons.push(p);
        }
    }
    polygons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::cuboid;
    use lamina_kernel_mesh::unit_cube;

    #[test]
    fn mesh_roundtrip_preserves_volume() {
        let mesh = unit_cube(10.0);
        let polys = mesh_to_polygons(&mesh);
        assert_eq!(polys.len(), 12);
        let back = polygons_to_mesh(&polys);
        assert!((back.volume() - 1000.0).abs() < 1e-3);
        assert_eq!(back.boundary_edge_count(), 0);
    }

    #[test]
    fn quads_fan_into_two_triangles() {
        let mesh = polygons_to_mesh(&cuboid(4.0, 4.0, 4.0));
        assert_eq!(mesh.num_triangles(), 12);
        assert_eq!(mesh.num_vertices(), 8);
    }

    #[test]
    fn degenerate_triangles_skipped() {
        let mut mesh = unit_cube(4.0);
        // Repeat an index to create a zero-area triangle.
        let i = mesh.indices[0];
        mesh.indices.extend_from_slice(&[i, i, i]);
        let polys = mesh_to_polygons(&mesh);
        assert_eq!(polys.len(), 12);
    }
}
