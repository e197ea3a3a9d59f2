//! Outward offsetting of polygon solids by Minkowski sphere dilation.
//!
//! The offset of a solid by radius `r` is its Minkowski sum with a sphere
//! of radius `r`. Computing that sum exactly for a non-convex solid is
//! expensive, so the kernel uses the standard decomposition: the dilated
//! solid equals the base solid unioned with the dilation of each boundary
//! face, and each face (being convex) dilates to the convex hull of its
//! vertices translated along every sphere sample direction.
//!
//! Cost scales with face count times sphere tessellation, so callers
//! should keep `segments` as low as tolerances allow.

#![warn(missing_docs)]

use chull::ConvexHullWrapper;
use lamina_kernel_csg::{sphere_directions, union_all, Polygon, Vertex};
use lamina_kernel_math::Point3;
use rayon::prelude::*;
use thiserror::Error;

/// Errors produced by the offset kernel.
#[derive(Debug, Error)]
pub enum OffsetError {
    /// The requested offset radius was negative.
    #[error("offset radius must be non-negative, got {0}")]
    InvalidRadius(f64),
    /// The input solid had no faces to dilate.
    #[error("cannot offset an empty solid")]
    EmptyInput,
    /// Convex hull construction failed for a face dilation.
    #[error("convex hull failed: {0}")]
    Hull(String),
}

/// Result alias for offset operations.
pub type Result<T> = std::result::Result<T, OffsetError>;

/// Dilate a closed solid outward by `radius`.
///
/// `segments` controls the tessellation of the structuring sphere; the
/// dilated surface is faceted accordingly. The result is again a closed
/// polygon set suitable for further boolean work. A zero radius is the
/// identity dilation and returns the input unchanged.
pub fn inflate(polygons: &[Polygon], radius: f64, segments: u32) -> Result<Vec<Polygon>> {
    if radius < 0.0 {
        return Err(OffsetError::InvalidRadius(radius));
    }
    if polygons.is_empty() {
        return Err(OffsetError::EmptyInput);
    }
    if radius == 0.0 {
        return Ok(polygons.to_vec());
    }

    let offsets: Vec<_> = sphere_directions(segments)
        .into_iter()
        .map(|d| d * radius)
        .collect();

    let hulls = polygons
        .par_iter()
        .map(|face| face_dilation(face, &offsets))
        .collect::<Result<Vec<_>>>()?;

    let mut parts = hulls;
    parts.push(polygons.to_vec());
    Ok(union_all(parts))
}

/// Dilate a single convex face: hull of its vertices swept along every
/// sphere sample direction.
fn face_dilation(face: &Polygon, offsets: &[lamina_kernel_math::Vec3]) -> Result<Vec<Polygon>> {
    let mut points: Vec<Vec<f64>> = Vec::with_capacity(face.vertices.len() * offsets.len());
    for v in &face.vertices {
        for d in offsets {
            let p = v.pos + d;
            points.push(vec![p.x, p.y, p.z]);
        }
    }
    let hull = ConvexHullWrapper::try_new(&points, None)
        .map_err(|e| OffsetError::Hull(format!("{e:?}")))?;
    let (verts, indices) = hull.vertices_indices();

    let mut result = Vec::with_capacity(indices.len() / 3);
    for tri in indices.chunks(3) {
        let a = hull_point(&verts[tri[0]]);
        let b = hull_point(&verts[tri[1]]);
        let c = hull_point(&verts[tri[2]]);
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
            result.push(p);
        }
    }
    Ok(result)
}

fn hull_point(coords: &[f64]) -> Point3 {
    Point3::new(coords[0], coords[1], coords[2])
}
