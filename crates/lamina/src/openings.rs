//! Eye and nose opening volumes.
//!
//! Openings are rounded rectangular prisms: a plain box dilated by a
//! small corner sphere. The box dimensions are the configured opening
//! size; rounding adds [`CORNER_RADIUS`] on top. Cut depth is centered on
//! the clip front plane so the cut always pierces the shell wall.

use crate::config::{EyeSettings, NoseSettings};

/// Radius of the corner-rounding dilation sphere (mm).
pub const CORNER_RADIUS: f64 = 2.0;

/// Placement of one opening cut before rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpeningBox {
    /// Center of the box (mm).
    pub center: [f64; 3],
    /// Box extent along each axis (mm).
    pub size: [f64; 3],
}

/// The two eye openings, mirrored about the X axis.
pub fn eye_openings(eyes: &EyeSettings, front: f64) -> [OpeningBox; 2] {
    let size = [eyes.width, eyes.height, eyes.depth];
    [
        OpeningBox {
            center: [-eyes.offset_x, eyes.offset_y, front],
            size,
        },
        OpeningBox {
            center: [eyes.offset_x, eyes.offset_y, front],
            size,
        },
    ]
}

/// The nose/mouth slot.
pub fn nose_opening(nose: &NoseSettings, front: f64) -> OpeningBox {
    OpeningBox {
        center: [0.0, nose.offset_y, front],
        size: [nose.width, nose.height, nose.depth],
    }
}
