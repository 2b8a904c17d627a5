//! TOML configuration for the visualizer host.
//! Every field has a default; a missing file yields the default config.

use std::path::Path;

use armview_core::{ArmGeometry, ConfigurationError, Pose};
use armview_render::{Palette, ViewportLayout};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] ConfigurationError),
}

/// Arm dimensions in mm.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeometrySection {
    pub shoulder_height: f64,
    pub upper_arm_length: f64,
    pub forearm_length: f64,
}

impl Default for GeometrySection {
    fn default() -> Self {
        let geo = ArmGeometry::default();
        Self {
            shoulder_height: geo.shoulder_height(),
            upper_arm_length: geo.upper_arm_length(),
            forearm_length: geo.forearm_length(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewSection {
    pub width: u32,
    pub height: u32,
    /// Pixels per mm.
    pub scale: f32,
    pub ground_margin: u32,
}

impl Default for ViewSection {
    fn default() -> Self {
        let layout = ViewportLayout::default();
        Self {
            width: layout.width,
            height: layout.height,
            scale: layout.scale,
            ground_margin: layout.ground_margin,
        }
    }
}

/// Pose shown before the first update arrives.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PoseSection {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub gripper_open: bool,
}

impl Default for PoseSection {
    fn default() -> Self {
        let pose = Pose::default();
        Self {
            x: pose.x,
            y: pose.y,
            z: pose.z,
            gripper_open: pose.gripper_open,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConsoleSection {
    /// Maximum retained history lines.
    pub capacity: usize,
}

impl Default for ConsoleSection {
    fn default() -> Self {
        Self { capacity: 200 }
    }
}

/// All configurable viewer parameters.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub geometry: GeometrySection,
    pub view: ViewSection,
    pub pose: PoseSection,
    pub palette: Palette,
    pub console: ConsoleSection,
}

impl ViewerConfig {
    /// Load from a TOML file. A missing file is not an error.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            log::info!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let cfg = Self::parse(&text)?;
        log::info!("Loaded config from {:?}", path);
        Ok(cfg)
    }

    pub fn parse(text: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(text)?)
    }

    pub fn geometry(&self) -> Result<ArmGeometry, ConfigurationError> {
        ArmGeometry::new(
            self.geometry.shoulder_height,
            self.geometry.upper_arm_length,
            self.geometry.forearm_length,
        )
    }

    pub fn layout(&self) -> ViewportLayout {
        ViewportLayout {
            width: self.view.width,
            height: self.view.height,
            scale: self.view.scale,
            ground_margin: self.view.ground_margin,
        }
    }

    pub fn initial_pose(&self) -> Pose {
        Pose::new(self.pose.x, self.pose.y, self.pose.z, self.pose.gripper_open)
    }
}
