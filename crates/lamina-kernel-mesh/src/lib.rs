#![warn(missing_docs)]

//! Indexed triangle mesh type and metrics for the lamina kernel.
//!
//! [`TriangleMesh`] is the interchange format at the pipeline boundaries:
//! the scanned head arrives as one, and the finished mask leaves as one.
//! Vertices are flat f32 arrays so the type maps directly onto STL and GPU
//! buffer layouts; all metric computation is done in f64.

use lamina_kernel_math::{Point3, Transform, Vec3};
use std::collections::HashMap;

/// Output triangle mesh for import, export, and metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleMesh {
    /// Flat array of vertex positions: `[x0, y0, z0, x1, y1, z1, ...]` (f32).
    pub vertices: Vec<f32>,
    /// Flat array of triangle indices: `[i0, i1, i2, ...]` (u32).
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// True if the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Position of vertex `i` as an f64 point.
    pub fn point(&self, i: u32) -> Point3 {
        let k = i as usize * 3;
        Point3::new(
            self.vertices[k] as f64,
            self.vertices[k + 1] as f64,
            self.vertices[k + 2] as f64,
        )
    }

    /// Corner points of triangle `t`.
    pub fn triangle(&self, t: usize) -> [Point3; 3] {
        let i = t * 3;
        [
            self.point(self.indices[i]),
            self.point(self.indices[i + 1]),
            self.point(self.indices[i + 2]),
        ]
    }

    /// Merge another mesh into this one.
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.num_vertices() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|&i| i + offset));
    }

    /// Apply an affine transform to all vertices.
    ///
    /// A mirroring transform (negative determinant) flips triangle winding
    /// so outward orientation is preserved.
    pub fn transform(&mut self, t: &Transform) {
        for chunk in self.vertices.chunks_mut(3) {
            let p = Point3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
            let tp = t.apply_point(&p);
            chunk[0] = tp.x as f32;
            chunk[1] = tp.y as f32;
            chunk[2] = tp.z as f32;
        }
        if t.linear_determinant() < 0.0 {
            for tri in self.indices.chunks_mut(3) {
                tri.swap(1, 2);
            }
        }
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Point3, Point3)> {
        if self.vertices.is_empty() {
            return None;
        }
        let mut min = [f64::MAX; 3];
        let mut max = [f64::MIN; 3];
        for chunk in self.vertices.chunks(3) {
            for i in 0..3 {
                let v = chunk[i] as f64;
                min[i] = min[i].min(v);
                max[i] = max[i].max(v);
            }
        }
        Some((
            Point3::new(min[0], min[1], min[2]),
            Point3::new(max[0], max[1], max[2]),
        ))
    }

    /// Signed-tetrahedron volume of the (assumed closed) mesh, in mm^3.
    pub fn volume(&self) -> f64 {
        let mut vol = 0.0;
        for t in 0..self.num_triangles() {
            let [v0, v1, v2] = self.triangle(t);
            vol += v0.coords.dot(&v1.coords.cross(&v2.coords));
        }
        (vol / 6.0).abs()
    }

    /// Total triangle area, in mm^2.
    pub fn surface_area(&self) -> f64 {
        let mut area = 0.0;
        for t in 0..self.num_triangles() {
            let [v0, v1, v2] = self.triangle(t);
            area += (v1 - v0).cross(&(v2 - v0)).norm() / 2.0;
        }
        area
    }

    /// Geometric normal of triangle `t` (not normalized; zero if degenerate).
    pub fn triangle_normal(&self, t: usize) -> Vec3 {
        let [v0, v1, v2] = self.triangle(t);
        (v1 - v0).cross(&(v2 - v0))
    }

    /// Number of edges not shared by exactly two triangles.
    ///
    /// Zero for a watertight manifold mesh. This is a diagnostic, not a
    /// validity gate: boolean output is reported, never repaired.
    pub fn boundary_edge_count(&self) -> usize {
        let mut edges: HashMap<(u32, u32), i32> = HashMap::new();
        for tri in self.indices.chunks(3) {
            for k in 0..3 {
                let a = tri[k];
                let b = tri[(k + 1) % 3];
                // Count directed edges; a manifold interior edge appears
                // once in each direction.
                let key = if a < b { (a, b) } else { (b, a) };
                let delta = if a < b { 1 } else { -1 };
                *edges.entry(key).or_insert(0) += delta;
            }
        }
        edges.values().filter(|&&c| c != 0).count()
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}

/// Build an indexed mesh from triangle soup, welding coincident vertices.
///
/// Positions within `tol` of each other collapse onto one index via grid
/// quantization. Degenerate (zero-area) triangles are dropped.
pub fn weld_triangles(triangles: &[[Point3; 3]], tol: f64) -> TriangleMesh {
    let inv = 1.0 / tol.max(1e-12);
    let mut mesh = TriangleMesh::new();
    let mut lookup: HashMap<(i64, i64, i64), u32> = HashMap::new();

    let mut index_of = |mesh: &mut TriangleMesh, p: &Point3| -> u32 {
        let key = (
            (p.x * inv).round() as i64,
            (p.y * inv).round() as i64,
            (p.z * inv).round() as i64,
        );
        *lookup.entry(key).or_insert_with(|| {
            let idx = mesh.num_vertices() as u32;
            mesh.vertices
                .extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
            idx
        })
    };

    for tri in triangles {
        let area2 = (tri[1] - tri[0]).cross(&(tri[2] - tri[0])).norm();
        if area2 < tol * tol {
            continue;
        }
        let i0 = index_of(&mut mesh, &tri[0]);
        let i1 = index_of(&mut mesh, &tri[1]);
        let i2 = index_of(&mut mesh, &tri[2]);
        if i0 != i1 && i1 != i2 && i0 != i2 {
            mesh.indices.extend_from_slice(&[i0, i1, i2]);
        }
    }
    mesh
}

/// A unit cube mesh (12 triangles) for tests and demos.
pub fn unit_cube(size: f64) -> TriangleMesh {
    let h = size / 2.0;
    let corners = [
        [-h, -h, -h],
        [h, -h, -h],
        [h, h, -h],
        [-h, h, -h],
        [-h, -h, h],
        [h, -h, h],
        [h, h, h],
        [-h, h, h],
    ];
    let mut mesh = TriangleMesh::new();
    for c in &corners {
        mesh.vertices
            .extend_from_slice(&[c[0] as f32, c[1] as f32, c[2] as f32]);
    }
    // CCW when seen from outside.
    let faces: [[u32; 3]; 12] = [
        [0, 2, 1],
        [0, 3, 2], // bottom (-z)
        [4, 5, 6],
        [4, 6, 7], // top (+z)
        [0, 1, 5],
        [0, 5, 4], // front (-y)
        [2, 3, 7],
        [2, 7, 6], // back (+y)
        [0, 4, 7],
        [0, 7, 3], // left (-x)
        [1, 2, 6],
        [1, 6, 5], // right (+x)
    ];
    for f in &faces {
        mesh.indices.extend_from_slice(f);
    }
    mesh
}
