//! Strap tab volumes.
//!
//! Plain rectangular boxes at the left and right edges of the face
//! window, straddling the window's side planes. Tabs are never dilated
//! and are unioned into the mask after all cuts.

use crate::config::{TabSettings, WindowSettings};

/// Placement of one strap tab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabBox {
    /// Center of the box (mm).
    pub center: [f64; 3],
    /// Box extent along each axis (mm).
    pub size: [f64; 3],
}

/// The two strap tabs, mirrored about the X axis.
pub fn strap_tabs(tabs: &TabSettings, window: &WindowSettings) -> [TabBox; 2] {
    let size = [tabs.width, tabs.height, tabs.depth];
    let z = window.front + tabs.offset_z;
    [
        TabBox {
            center: [-window.width / 2.0, tabs.offset_y, z],
            size,
        },
        TabBox {
            center: [window.width / 2.0, tabs.offset_y, z],
            size,
        },
    ]
}
