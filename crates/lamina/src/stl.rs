//! Binary STL import and export.
//!
//! The pipeline reads the head scan from a binary STL triangle soup and
//! writes the finished mask back out the same way. ASCII STL is
//! rejected with a dedicated error rather than misparsed.

use std::path::Path;

use lamina_kernel::lamina_kernel_math::Point3;
use lamina_kernel::lamina_kernel_mesh::{weld_triangles, TriangleMesh};

use crate::error::{MaskError, Result};

const HEADER_LEN: usize = 80;
const TRIANGLE_LEN: usize = 50;

/// Welding tolerance for imported triangle soup (mm).
const WELD_TOL: f64 = 1e-4;

/// Parse a binary STL byte buffer into an indexed mesh.
///
/// Coincident vertices are welded so the soup becomes a connected
/// surface the boolean kernel can work with.
pub fn read_stl(bytes: &[u8]) -> Result<TriangleMesh> {
    if bytes.len() < HEADER_LEN + 4 {
        return Err(MaskError::InvalidStl(format!(
            "file too short ({} bytes)",
            bytes.len()
        )));
    }
    let count = u32::from_le_bytes([
        bytes[HEADER_LEN],
        bytes[HEADER_LEN + 1],
        bytes[HEADER_LEN + 2],
        bytes[HEADER_LEN + 3],
    ]) as usize;
    // An ASCII file can coincidentally match the binary length, so the
    // signature check comes first.
    if bytes.starts_with(b"solid") {
        return Err(MaskError::InvalidStl(
            "ASCII STL is not supported, convert to binary".into(),
        ));
    }
    let expected = HEADER_LEN + 4 + count * TRIANGLE_LEN;
    if bytes.len() != expected {
        return Err(MaskError::InvalidStl(format!(
            "expected {expected} bytes for {count} triangles, got {}",
            bytes.len()
        )));
    }

    let mut triangles = Vec::with_capacity(count);
    for t in 0..count {
        // Skip the stored normal; it is recomputed from the winding.
        let base = HEADER_LEN + 4 + t * TRIANGLE_LEN + 12;
        let mut tri = [Point3::origin(); 3];
        for (v, point) in tri.iter_mut().enumerate() {
            let o = base + v * 12;
            *point = Point3::new(
                read_f32(&bytes[o..]) as f64,
                read_f32(&bytes[o + 4..]) as f64,
                read_f32(&bytes[o + 8..]) as f64,
            );
        }
        triangles.push(tri);
    }
    Ok(weld_triangles(&triangles, WELD_TOL))
}

/// Serialize a mesh as binary STL with recomputed facet normals.
pub fn write_stl(mesh: &TriangleMesh) -> Vec<u8> {
    let count = mesh.num_triangles();
    let mut data = Vec::with_capacity(HEADER_LEN + 4 + count * TRIANGLE_LEN);

    let mut header = [b' '; HEADER_LEN];
    let tag = b"lamina mask export";
    header[..tag.len()].copy_from_slice(tag);
    data.extend_from_slice(&header);
    data.extend_from_slice(&(count as u32).to_le_bytes());

    for t in 0..count {
        let [a, b, c] = mesh.triangle(t);
        let n = (b - a).cross(&(c - a));
        let len = n.norm();
        let n = if len > 1e-12 {
            n / len
        } else {
            n * 0.0
        };
        for value in [n.x, n.y, n.z] {
            data.extend_from_slice(&(value as f32).to_le_bytes());
        }
        for p in [a, b, c] {
            for value in [p.x, p.y, p.z] {
                data.extend_from_slice(&(value as f32).to_le_bytes());
            }
        }
        data.extend_from_slice(&0u16.to_le_bytes());
    }
    data
}

/// Read a binary STL from disk.
pub fn read_stl_file(path: impl AsRef<Path>) -> Result<TriangleMesh> {
    let bytes = std::fs::read(path)?;
    read_stl(&bytes)
}

/// Write a mesh to disk as binary STL.
pub fn write_stl_file(path: impl AsRef<Path>, mesh: &TriangleMesh) -> Result<()> {
    std::fs::write(path, write_stl(mesh))?;
    Ok(())
}

fn read_f32(bytes: &[u8]) -> f32 {
    f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
