//! The clip volume ("face window").
//!
//! An axis-aligned prism centered in X/Y with its front plane at a fixed
//! Z offset. Expansion grows every dimension symmetrically; the front
//! plane is anchored to the configured offset and only moves by the
//! expansion itself, never by recentering.

use crate::error::{MaskError, Result};

/// Axis-aligned clip prism. Spans `[-width/2, width/2]` in X,
/// `[-height/2, height/2]` in Y, and `[front, front + depth]` in Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipBox {
    /// Extent along X (mm).
    pub width: f64,
    /// Extent along Y (mm).
    pub height: f64,
    /// Extent along Z (mm).
    pub depth: f64,
    /// Z position of the front plane (mm).
    pub front: f64,
}

impl ClipBox {
    /// Grow (positive `e`) or inset (negative `e`) every face by `e`.
    ///
    /// Width, height, and depth each change by `2e`; the front plane
    /// moves to `front - e`. An inset large enough to invert any
    /// dimension is a configuration error.
    pub fn expanded(&self, e: f64) -> Result<ClipBox> {
        let grown = ClipBox {
            width: self.width + 2.0 * e,
            height: self.height + 2.0 * e,
            depth: self.depth + 2.0 * e,
            front: self.front - e,
        };
        if grown.width <= 0.0 || grown.height <= 0.0 || grown.depth <= 0.0 {
            return Err(MaskError::Config(format!(
                "clip expansion {e} inverts the face window ({} x {} x {})",
                self.width, self.height, self.depth
            )));
        }
        Ok(grown)
    }

    /// Center of the prism.
    pub fn center(&self) -> [f64; 3] {
        [0.0, 0.0, self.front + self.depth / 2.0]
    }

    /// Extent along each axis.
    pub fn size(&self) -> [f64; 3] {
        [self.width, self.height, self.depth]
    }
}
