//! ArmView core types shared across crates.
//!
//! Provides the arm geometry, the Cartesian pose, configuration errors, and
//! conversion between nalgebra (millimeter space) and glam (pixel space).

use nalgebra as na;
use thiserror::Error;

// Re-export key types so downstream crates don't repeat use-declarations
pub use na::{Point2, Point3, Vector2};

/// Default shoulder height above the ground plane (mm).
pub const DEFAULT_SHOULDER_HEIGHT: f64 = 140.0;
/// Default upper arm length, shoulder to elbow (mm).
pub const DEFAULT_UPPER_ARM_LENGTH: f64 = 160.0;
/// Default forearm length, elbow to wrist (mm).
pub const DEFAULT_FOREARM_LENGTH: f64 = 160.0;

/// Construction-time misconfiguration. Always fatal.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("{name} must be a positive finite length in mm, got {value}")]
    NonPositiveLength { name: &'static str, value: f64 },

    #[error("view scale must be positive and finite, got {0}")]
    NonPositiveScale(f64),

    #[error("canvas must have a non-zero size, got {width}x{height}")]
    EmptyCanvas { width: u32, height: u32 },
}

/// Convert a millimeter-space point → glam Vec2 (pixel-space arithmetic).
pub fn point_to_glam(p: &Point2<f64>) -> glam::Vec2 {
    glam::Vec2::new(p.x as f32, p.y as f32)
}

/// Convert glam Vec2 → millimeter-space point.
pub fn glam_to_point(v: glam::Vec2) -> Point2<f64> {
    Point2::new(v.x as f64, v.y as f64)
}

/// Fixed physical dimensions of the visualized arm.
///
/// Lengths are validated once at construction and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmGeometry {
    shoulder_height: f64,
    upper_arm_length: f64,
    forearm_length: f64,
}

impl ArmGeometry {
    /// Build a geometry, rejecting non-positive or non-finite lengths.
    pub fn new(
        shoulder_height: f64,
        upper_arm_length: f64,
        forearm_length: f64,
    ) -> Result<Self, ConfigurationError> {
        check_length("shoulder_height", shoulder_height)?;
        check_length("upper_arm_length", upper_arm_length)?;
        check_length("forearm_length", forearm_length)?;
        Ok(Self {
            shoulder_height,
            upper_arm_length,
            forearm_length,
        })
    }

    /// L1: height of the shoulder joint above the ground plane.
    pub fn shoulder_height(&self) -> f64 {
        self.shoulder_height
    }

    /// L2: shoulder to elbow.
    pub fn upper_arm_length(&self) -> f64 {
        self.upper_arm_length
    }

    /// L3: elbow to wrist.
    pub fn forearm_length(&self) -> f64 {
        self.forearm_length
    }

    /// Maximum shoulder-to-wrist distance, L2 + L3.
    pub fn max_reach(&self) -> f64 {
        self.upper_arm_length + self.forearm_length
    }

    /// Shoulder joint in the side-view (R, Z) plane.
    pub fn shoulder(&self) -> Point2<f64> {
        Point2::new(0.0, self.shoulder_height)
    }
}

impl Default for ArmGeometry {
    fn default() -> Self {
        Self {
            shoulder_height: DEFAULT_SHOULDER_HEIGHT,
            upper_arm_length: DEFAULT_UPPER_ARM_LENGTH,
            forearm_length: DEFAULT_FOREARM_LENGTH,
        }
    }
}

fn check_length(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::NonPositiveLength { name, value })
    }
}

/// Cartesian end-effector target plus gripper state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// X (mm), forward from the base.
    pub x: f64,
    /// Y (mm), lateral.
    pub y: f64,
    /// Z (mm), height above the ground plane.
    pub z: f64,
    pub gripper_open: bool,
}

impl Pose {
    pub fn new(x: f64, y: f64, z: f64, gripper_open: bool) -> Self {
        Self {
            x,
            y,
            z,
            gripper_open,
        }
    }

    pub fn position(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    /// Horizontal distance from the base axis, hypot(x, y).
    pub fn radial_distance(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Target in the side-view (R, Z) plane.
    pub fn side_point(&self) -> Point2<f64> {
        Point2::new(self.radial_distance(), self.z)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(150.0, 0.0, 150.0, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_geometry() {
        let geo = ArmGeometry::default();
        assert_eq!(geo.shoulder_height(), 140.0);
        assert_eq!(geo.max_reach(), 320.0);
        assert_eq!(geo.shoulder(), Point2::new(0.0, 140.0));
    }

    #[test]
    fn test_geometry_rejects_bad_lengths() {
        let err = ArmGeometry::new(140.0, 0.0, 160.0).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::NonPositiveLength {
                name: "upper_arm_length",
                value: 0.0
            }
        );
        assert!(ArmGeometry::new(140.0, 160.0, -1.0).is_err());
        assert!(ArmGeometry::new(-5.0, 160.0, 160.0).is_err());
        assert!(ArmGeometry::new(140.0, f64::NAN, 160.0).is_err());
        assert!(ArmGeometry::new(140.0, 160.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_message_names_field() {
        let err = ArmGeometry::new(140.0, 160.0, 0.0).unwrap_err();
        assert!(err.to_string().contains("forearm_length"), "{}", err);
    }

    #[test]
    fn test_pose_radial_distance() {
        let pose = Pose::new(30.0, 40.0, 10.0, true);
        assert_relative_eq!(pose.radial_distance(), 50.0);
        assert_eq!(pose.side_point(), Point2::new(50.0, 10.0));
        assert_eq!(pose.position(), Point3::new(30.0, 40.0, 10.0));
    }

    #[test]
    fn test_glam_roundtrip() {
        let p = Point2::new(12.5, -3.25);
        let back = glam_to_point(point_to_glam(&p));
        assert!((back.x - p.x).abs() < 1e-6);
        assert!((back.y - p.y).abs() < 1e-6);
    }
}
