//! Mask parameters.
//!
//! One immutable [`MaskConfig`] value is constructed (from defaults or a
//! TOML file), validated once, and passed into every pipeline component.
//! Components read only the sections they need.

use serde::{Deserialize, Serialize};

use crate::clip::ClipBox;
use crate::error::{MaskError, Result};

/// Pre-clip placement of the input head mesh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadSettings {
    /// Uniform scale factor.
    pub scale: f64,
    /// Euler rotation in degrees, applied as X, then Y, then Z.
    pub rotation: [f64; 3],
    /// Translation in mm.
    pub translation: [f64; 3],
}

impl Default for HeadSettings {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation: [0.0; 3],
            translation: [0.0; 3],
        }
    }
}

/// The face window: the region of the head the mask covers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Window width along X (mm).
    pub width: f64,
    /// Window height along Y (mm).
    pub height: f64,
    /// Window depth along Z (mm).
    pub depth: f64,
    /// Z position of the front plane (mm); the window spans
    /// `[front, front + depth]`.
    pub front: f64,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 140.0,
            height: 180.0,
            depth: 90.0,
            front: -45.0,
        }
    }
}

impl WindowSettings {
    /// The clip volume this window describes.
    pub fn clip(&self) -> ClipBox {
        ClipBox {
            width: self.width,
            height: self.height,
            depth: self.depth,
            front: self.front,
        }
    }
}

/// Offset shell parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellSettings {
    /// Gap between the head surface and the inner mask surface (mm).
    /// This is the inner offset radius.
    pub clearance: f64,
    /// Nominal wall thickness (mm). The outer offset radius is
    /// `clearance + thickness`.
    pub thickness: f64,
    /// Inset applied to the inner core's clip volume to trim the thin
    /// knife-edge geometry at the rim (mm).
    pub edge_bleed: f64,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            clearance: 2.0,
            thickness: 2.5,
            edge_bleed: 3.0,
        }
    }
}

impl ShellSettings {
    /// Inner offset radius.
    pub fn inner_radius(&self) -> f64 {
        self.clearance
    }

    /// Outer offset radius, always strictly greater than the inner.
    pub fn outer_radius(&self) -> f64 {
        self.clearance + self.thickness
    }
}

/// Leaf field parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LeafSettings {
    /// Leaf footprint along Y (mm).
    pub length: f64,
    /// Leaf footprint along X (mm).
    pub width: f64,
    /// Leaf plate thickness (mm).
    pub thickness: f64,
    /// Grid spacing (mm). Must not exceed `min(length, width)` or the
    /// field develops gaps.
    pub spacing: f64,
    /// Extra backward extension so each leaf fully pierces the shell (mm).
    pub push: f64,
    /// Bound of the per-leaf rotation jitter (degrees).
    pub twist_spread: f64,
}

impl Default for LeafSettings {
    fn default() -> Self {
        Self {
            length: 36.0,
            width: 22.0,
            thickness: 2.5,
            spacing: 20.0,
            push: 6.0,
            twist_spread: 14.0,
        }
    }
}

/// Eye opening parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EyeSettings {
    /// Cut eye openings at all.
    pub enabled: bool,
    /// Opening width along X before corner rounding (mm).
    pub width: f64,
    /// Opening height along Y before corner rounding (mm).
    pub height: f64,
    /// Cut depth along Z (mm), centered on the front plane.
    pub depth: f64,
    /// Horizontal half-distance between the two openings (mm).
    pub offset_x: f64,
    /// Vertical position of both openings (mm).
    pub offset_y: f64,
}

impl Default for EyeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 60.0,
            height: 30.0,
            depth: 60.0,
            offset_x: 35.0,
            offset_y: 20.0,
        }
    }
}

/// Nose/mouth slot parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NoseSettings {
    /// Cut the slot at all.
    pub enabled: bool,
    /// Slot width along X before corner rounding (mm).
    pub width: f64,
    /// Slot height along Y before corner rounding (mm).
    pub height: f64,
    /// Cut depth along Z (mm), centered on the front plane.
    pub depth: f64,
    /// Vertical position of the slot (mm).
    pub offset_y: f64,
}

impl Default for NoseSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 26.0,
            height: 40.0,
            depth: 60.0,
            offset_y: -25.0,
        }
    }
}

/// Strap tab parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TabSettings {
    /// Add strap tabs at all.
    pub enabled: bool,
    /// Tab width along X (mm); tabs straddle the window's side planes.
    pub width: f64,
    /// Tab height along Y (mm).
    pub height: f64,
    /// Tab depth along Z (mm).
    pub depth: f64,
    /// Vertical position of both tabs (mm).
    pub offset_y: f64,
    /// Z position of both tabs relative to the front plane (mm).
    pub offset_z: f64,
}

impl Default for TabSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 16.0,
            height: 24.0,
            depth: 6.0,
            offset_y: 0.0,
            offset_z: 12.0,
        }
    }
}

/// Complete parameter set for one mask run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskConfig {
    /// Tessellation segments for dilation spheres and rounded corners.
    pub segments: u32,
    /// Head placement.
    pub head: HeadSettings,
    /// Face window.
    pub window: WindowSettings,
    /// Offset shell.
    pub shell: ShellSettings,
    /// Leaf field.
    pub leaves: LeafSettings,
    /// Eye openings.
    pub eyes: EyeSettings,
    /// Nose/mouth slot.
    pub nose: NoseSettings,
    /// Strap tabs.
    pub tabs: TabSettings,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            segments: 12,
            head: HeadSettings::default(),
            window: WindowSettings::default(),
            shell: ShellSettings::default(),
            leaves: LeafSettings::default(),
            eyes: EyeSettings::default(),
            nose: NoseSettings::default(),
            tabs: TabSettings::default(),
        }
    }
}

impl MaskConfig {
    /// Parse a config from TOML text. Unset fields take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: MaskConfig = toml::from_str(text)?;
        Ok(config)
    }

    /// Serialize the config as TOML text.
    pub fn to_toml_string(&self) -> String {
        // MaskConfig has no maps or non-string keys, so serialization
        // cannot fail.
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Validate the whole parameter set before any geometry work.
    pub fn validate(&self) -> Result<()> {
        if self.segments < 4 {
            return Err(MaskError::Config("segments must be at least 4".into()));
        }
        if self.head.scale <= 0.0 {
            return Err(MaskError::Config("head.scale must be positive".into()));
        }
        if self.window.width <= 0.0 || self.window.height <= 0.0 || self.window.depth <= 0.0 {
            return Err(MaskError::Config(
                "window dimensions must be positive".into(),
            ));
        }
        if self.shell.clearance < 0.0 {
            return Err(MaskError::Config(
                "shell.clearance must not be negative".into(),
            ));
        }
        if self.shell.thickness <= 0.0 {
            return Err(MaskError::Config("shell.thickness must be positive".into()));
        }
        if self.shell.edge_bleed < 0.0 {
            return Err(MaskError::Config(
                "shell.edge_bleed must not be negative".into(),
            ));
        }
        // The inset clip must not invert.
        self.window.clip().expanded(-self.shell.edge_bleed)?;

        let l = &self.leaves;
        if l.length <= 0.0 || l.width <= 0.0 || l.thickness <= 0.0 {
            return Err(MaskError::Config("leaf dimensions must be positive".into()));
        }
        if l.spacing <= 0.0 {
            return Err(MaskError::Config("leaves.spacing must be positive".into()));
        }
        if l.spacing > l.length.min(l.width) {
            return Err(MaskError::Config(format!(
                "leaves.spacing ({}) exceeds the leaf footprint ({} x {}); the field would have gaps",
                l.spacing, l.width, l.length
            )));
        }
        if l.push < 0.0 {
            return Err(MaskError::Config("leaves.push must not be negative".into()));
        }
        if l.twist_spread < 0.0 {
            return Err(MaskError::Config(
                "leaves.twist_spread must not be negative".into(),
            ));
        }

        if self.eyes.enabled
            && (self.eyes.width <= 0.0 || self.eyes.height <= 0.0 || self.eyes.depth <= 0.0)
        {
            return Err(MaskError::Config(
                "eye opening dimensions must be positive".into(),
            ));
        }
        if self.nose.enabled
            && (self.nose.width <= 0.0 || self.nose.height <= 0.0 || self.nose.depth <= 0.0)
        {
            return Err(MaskError::Config(
                "nose slot dimensions must be positive".into(),
            ));
        }
        if self.tabs.enabled
            && (self.tabs.width <= 0.0 || self.tabs.height <= 0.0 || self.tabs.depth <= 0.0)
        {
            return Err(MaskError::Config("tab dimensions must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(MaskConfig::default().validate().is_ok());
    }

    #[test]
    fn spacing_beyond_footprint_rejected() {
        let mut config = MaskConfig::default();
        config.leaves.spacing = 50.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, MaskError::Config(_)));
        assert!(err.to_string().contains("gaps"));
    }

    #[test]
    fn zero_clearance_validates() {
        // A snug-fit shell: inner surface offset by zero.
        let mut config = MaskConfig::default();
        config.shell.clearance = 0.0;
        assert!(config.validate().is_ok());
        config.shell.clearance = -0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn edge_bleed_inverting_window_rejected() {
        let mut config = MaskConfig::default();
        config.shell.edge_bleed = 100.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn toml_roundtrip_with_partial_file() {
        let text = r#"
segments = 8

[window]
width = 120.0

[tabs]
enabled = false
"#;
        let config = MaskConfig::from_toml_str(text).unwrap();
        assert_eq!(config.segments, 8);
        assert_eq!(config.window.width, 120.0);
        assert_eq!(config.window.height, 180.0);
        assert!(!config.tabs.enabled);

        let dumped = config.to_toml_string();
        let restored = MaskConfig::from_toml_str(&dumped).unwrap();
        assert_eq!(restored.window.width, 120.0);
        assert!(!restored.tabs.enabled);
    }

    #[test]
    fn outer_radius_exceeds_inner() {
        let shell = ShellSettings::default();
        assert!(shell.outer_radius() > shell.inner_radius());
    }
}
