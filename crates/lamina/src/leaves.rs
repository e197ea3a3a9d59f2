//! Leaf field generation.
//!
//! A pure mapping from the grid settings to leaf placement
//! descriptors. What leaves exist is decided here; how they become
//! geometry is the plan's job, which keeps the grid logic independently
//! testable.

use crate::config::{LeafSettings, WindowSettings};

/// Placement of one leaf plate: grid position in the window plane and a
/// twist about the depth axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafPrimitive {
    /// X position of the leaf center (mm), after row stagger.
    pub x: f64,
    /// Y position of the leaf center (mm).
    pub y: f64,
    /// Twist about the depth axis (degrees).
    pub angle_deg: f64,
}

/// Deterministic rotation jitter for the grid cell at `(x, y)`.
///
/// A trigonometric hash, not an RNG: identical `(x, y, spread)` always
/// yields the identical angle, on every platform, so fabrication runs are
/// reproducible. The result lies in `[-spread, spread]`.
pub fn twist_jitter(x: f64, y: f64, spread: f64) -> f64 {
    let h = (x * 12.9898 + y * 78.233).sin() * 43758.5453;
    let unit = h - h.floor();
    spread * (2.0 * unit - 1.0)
}

/// Generate the leaf placements covering the face window.
///
/// The grid spans the window inclusively in both axes with the configured
/// spacing. Odd rows shift by half a spacing (brick stagger), which
/// removes straight vertical seams. Jitter is seeded from the unstaggered
/// cell coordinates so staggering never changes a leaf's twist.
pub fn generate(leaves: &LeafSettings, window: &WindowSettings) -> Vec<LeafPrimitive> {
    let xs = grid_axis(window.width, leaves.spacing);
    let ys = grid_axis(window.height, leaves.spacing);

    let mut field = Vec::with_capacity(xs.len() * ys.len());
    for (iy, &y) in ys.iter().enumerate() {
        let stagger = if iy % 2 == 1 { leaves.spacing / 2.0 } else { 0.0 };
        for &x in &xs {
            field.push(LeafPrimitive {
                x: x + stagger,
                y,
                angle_deg: twist_jitter(x, y, leaves.twist_spread),
            });
        }
    }
    field
}

/// Grid coordinates along one axis: from `-extent/2` in `spacing` steps,
/// with the `+extent/2` endpoint always emitted even when the extent does
/// not divide evenly.
fn grid_axis(extent: f64, spacing: f64) -> Vec<f64> {
    let half = extent / 2.0;
    let steps = (extent / spacing).floor() as i64;
    let mut coords: Vec<f64> = (0..=steps).map(|i| -half + i as f64 * spacing).collect();
    if let Some(&last) = coords.last() {
        // Tolerance absorbs float noise on evenly divisible extents.
        if half - last > spacing * 1e-9 {
            coords.push(half);
        }
    }
    coords
}

impl LeafPrimitive {
    /// Whether the point `(px, py)` lies inside this leaf's footprint
    /// (the twisted `width x length` rectangle, before shell conformance).
    pub fn covers(&self, px: f64, py: f64, leaves: &LeafSettings) -> bool {
        let (sin, cos) = self.angle_deg.to_radians().sin_cos();
        let dx = px - self.x;
        let dy = py - self.y;
        // Rotate the point into the leaf's frame.
        let local_x = dx * cos + dy * sin;
        let local_y = -dx * sin + dy * cos;
        local_x.abs() <= leaves.width / 2.0 && local_y.abs() <= leaves.length / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_coverage(leaves: &LeafSettings, window: &WindowSettings) -> (usize, usize) {
        let field = generate(leaves, window);
        let mut sampled = 0;
        let mut covered = 0;
        let mut y = -window.height / 2.0;
        while y <= window.height / 2.0 {
            let mut x = -window.width / 2.0;
            while x <= window.width / 2.0 {
                sampled += 1;
                if field.iter().any(|leaf| leaf.covers(x, y, leaves)) {
                    covered += 1;
                }
                x += 5.0;
            }
            y += 5.0;
        }
        (sampled, covered)
    }

    #[test]
    fn jitter_is_pure_and_bounded() {
        for ix in -10..10 {
            for iy in -10..10 {
                let x = ix as f64 * 20.0;
                let y = iy as f64 * 20.0;
                let a = twist_jitter(x, y, 14.0);
                let b = twist_jitter(x, y, 14.0);
                assert_relative_eq!(a, b);
                assert!(a.abs() <= 14.0, "jitter {a} out of bound at ({x}, {y})");
            }
        }
    }

    #[test]
    fn jitter_varies_across_cells() {
        let a = twist_jitter(0.0, 0.0, 14.0);
        let b = twist_jitter(20.0, 0.0, 14.0);
        let c = twist_jitter(0.0, 20.0, 14.0);
        assert!((a - b).abs() > 1e-6);
        assert!((a - c).abs() > 1e-6);
    }

    #[test]
    fn zero_spread_means_no_twist() {
        assert_relative_eq!(twist_jitter(40.0, -60.0, 0.0), 0.0);
    }

    #[test]
    fn odd_rows_are_staggered() {
        let leaves = LeafSettings::default();
        let window = WindowSettings::default();
        let field = generate(&leaves, &window);
        let half_w = window.width / 2.0;
        let half_h = window.height / 2.0;
        let spacing = leaves.spacing;

        let row0: Vec<_> = field.iter().filter(|l| l.y == -half_h).collect();
        let row1: Vec<_> = field
            .iter()
            .filter(|l| l.y == -half_h + spacing)
            .collect();
        assert_eq!(row0.len(), row1.len());
        assert_relative_eq!(row0[0].x, -half_w);
        assert_relative_eq!(row1[0].x, -half_w + spacing / 2.0);
    }

    #[test]
    fn stagger_does_not_change_jitter() {
        let leaves = LeafSettings::default();
        let window = WindowSettings::default();
        let field = generate(&leaves, &window);
        let spacing = leaves.spacing;
        let half_w = window.width / 2.0;
        let half_h = window.height / 2.0;

        // A staggered leaf's twist matches the hash of its unstaggered
        // cell coordinates.
        let leaf = field
            .iter()
            .find(|l| l.y == -half_h + spacing && l.x == -half_w + spacing / 2.0)
            .unwrap();
        assert_relative_eq!(
            leaf.angle_deg,
            twist_jitter(-half_w, -half_h + spacing, leaves.twist_spread)
        );
    }

    #[test]
    fn field_covers_window_at_valid_spacing() {
        let leaves = LeafSettings::default();
        let window = WindowSettings::default();
        assert!(leaves.spacing <= leaves.length.min(leaves.width));
        let (sampled, covered) = sample_coverage(&leaves, &window);
        assert_eq!(sampled, covered, "{} sample points uncovered", sampled - covered);
    }

    #[test]
    fn field_covers_non_divisible_window() {
        // 175.9 / 22 leaves a 21.9 mm remainder, so the endpoint column is
        // appended rather than reached by stepping.
        let leaves = LeafSettings {
            length: 36.0,
            width: 22.0,
            spacing: 22.0,
            ..LeafSettings::default()
        };
        let window = WindowSettings {
            width: 175.9,
            ..WindowSettings::default()
        };
        assert!(leaves.spacing <= leaves.length.min(leaves.width));
        let field = generate(&leaves, &window);
        assert!(
            field.iter().any(|leaf| leaf.covers(80.0, -90.0, &leaves)),
            "edge point uncovered"
        );
        let (sampled, covered) = sample_coverage(&leaves, &window);
        assert_eq!(sampled, covered, "{} sample points uncovered", sampled - covered);
    }

    #[test]
    fn grid_reaches_both_endpoints() {
        let leaves = LeafSettings {
            spacing: 22.0,
            ..LeafSettings::default()
        };
        let window = WindowSettings {
            width: 175.9,
            height: 180.0,
            ..WindowSettings::default()
        };
        let field = generate(&leaves, &window);
        let eps = 1e-9;
        assert!(field.iter().any(|l| (l.x - (-175.9 / 2.0)).abs() < eps));
        assert!(field.iter().any(|l| (l.x - 175.9 / 2.0).abs() < eps));
        assert!(field.iter().any(|l| (l.y - (-90.0)).abs() < eps));
        assert!(field.iter().any(|l| (l.y - 90.0).abs() < eps));
    }

    #[test]
    fn oversized_spacing_leaves_gaps() {
        let leaves = LeafSettings {
            spacing: 50.0,
            ..LeafSettings::default()
        };
        let window = WindowSettings::default();
        let (sampled, covered) = sample_coverage(&leaves, &window);
        assert!(covered < sampled, "expected gaps at spacing 50");
    }

    #[test]
    fn same_config_generates_identical_field() {
        let leaves = LeafSettings::default();
        let window = WindowSettings::default();
        assert_eq!(generate(&leaves, &window), generate(&leaves, &window));
    }
}
