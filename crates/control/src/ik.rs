//! Analytic two-link inverse kinematics in the side-view (R, Z) plane.
//!
//! Only the end-effector target is known, so the elbow is reconstructed from
//! the shoulder–wrist triangle (law of cosines). Targets outside the reach
//! produce a fully extended arm pointing at the target; a domain failure in
//! the cosine argument falls back to a vertical upper arm.

use armview_core::{ArmGeometry, Point2};

/// Which path of the solver produced an elbow position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IkBranch {
    /// Law-of-cosines solve, elbow-up.
    Reachable,
    /// Target beyond L2 + L3: upper arm extended toward the target.
    OutOfReach,
    /// Target coincides with the shoulder.
    Degenerate,
    /// Cosine argument left [-1, 1]: vertical upper arm.
    Fallback,
}

/// Elbow position in the (R, Z) plane, recomputed on every render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElbowSolution {
    pub elbow: Point2<f64>,
    pub branch: IkBranch,
}

impl ElbowSolution {
    pub fn elbow_r(&self) -> f64 {
        self.elbow.x
    }

    pub fn elbow_z(&self) -> f64 {
        self.elbow.y
    }
}

/// Closed-form planar IK for the shoulder/elbow pair.
#[derive(Debug, Clone, Copy)]
pub struct PlanarIkSolver {
    geometry: ArmGeometry,
}

impl PlanarIkSolver {
    pub fn new(geometry: ArmGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &ArmGeometry {
        &self.geometry
    }

    /// Solve for the elbow given a wrist target at radial distance
    /// `target_r` (≥ 0) and height `target_z`, both in mm.
    ///
    /// Always returns a numeric pair for finite input.
    pub fn solve(&self, target_r: f64, target_z: f64) -> ElbowSolution {
        let l1 = self.geometry.shoulder_height();
        let l2 = self.geometry.upper_arm_length();
        let l3 = self.geometry.forearm_length();

        let z_rel = target_z - l1;
        let dist = target_r.hypot(z_rel);

        if dist > self.geometry.max_reach() || dist == 0.0 {
            let (ratio, branch) = if dist > 0.0 {
                (l2 / dist, IkBranch::OutOfReach)
            } else {
                (0.0, IkBranch::Degenerate)
            };
            log::debug!(
                "IK target (R={:.1}, Z={:.1}) {:?}: extending arm, ratio={:.4}",
                target_r,
                target_z,
                branch,
                ratio
            );
            return ElbowSolution {
                elbow: Point2::new(target_r * ratio, l1 + z_rel * ratio),
                branch,
            };
        }

        let cos_alpha = (l2 * l2 + dist * dist - l3 * l3) / (2.0 * l2 * dist);
        if !(-1.0..=1.0).contains(&cos_alpha) {
            log::debug!(
                "IK cosine argument {:.6} out of domain at (R={:.1}, Z={:.1}), vertical fallback",
                cos_alpha,
                target_r,
                target_z
            );
            return self.vertical_fallback();
        }

        let alpha = cos_alpha.acos();
        let theta_base = z_rel.atan2(target_r);
        // Elbow-up branch; theta_base - alpha would mirror the elbow below the line
        let theta1 = theta_base + alpha;
        let (s1, c1) = theta1.sin_cos();

        ElbowSolution {
            elbow: Point2::new(l2 * c1, l1 + l2 * s1),
            branch: IkBranch::Reachable,
        }
    }

    fn vertical_fallback(&self) -> ElbowSolution {
        ElbowSolution {
            elbow: Point2::new(
                0.0,
                self.geometry.shoulder_height() + self.geometry.upper_arm_length(),
            ),
            branch: IkBranch::Fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn solver() -> PlanarIkSolver {
        PlanarIkSolver::new(ArmGeometry::default())
    }

    #[test]
    fn test_reachable_scenario() {
        // L = (140, 160, 160), target (150, 0, 150): D ≈ 150.33
        let sol = solver().solve(150.0, 150.0);
        assert_eq!(sol.branch, IkBranch::Reachable);
        assert!(
            (sol.elbow_r() - 65.6046).abs() < 1e-3,
            "elbow_r = {}",
            sol.elbow_r()
        );
        assert!(
            (sol.elbow_z() - 285.9316).abs() < 1e-3,
            "elbow_z = {}",
            sol.elbow_z()
        );
    }

    #[test]
    fn test_out_of_reach_scenario() {
        let sol = solver().solve(500.0, 150.0);
        assert_eq!(sol.branch, IkBranch::OutOfReach);
        assert!((sol.elbow_r() - 159.968).abs() < 1e-3, "elbow_r = {}", sol.elbow_r());
        assert!((sol.elbow_z() - 143.199).abs() < 1e-3, "elbow_z = {}", sol.elbow_z());
    }

    #[test]
    fn test_link_lengths_preserved_when_reachable() {
        let s = solver();
        let geo = *s.geometry();
        let shoulder = geo.shoulder();
        let targets = [
            (150.0, 150.0),
            (100.0, 300.0),
            (0.0, 400.0),
            (250.0, 20.0),
            (10.0, 0.0),
            (319.0, 140.0),
            (1.0, 141.0),
        ];
        for &(r, z) in &targets {
            let sol = s.solve(r, z);
            assert_eq!(sol.branch, IkBranch::Reachable, "target ({}, {})", r, z);
            let upper = (sol.elbow - shoulder).norm();
            let fore = (Point2::new(r, z) - sol.elbow).norm();
            assert!(
                (upper - geo.upper_arm_length()).abs() < 1e-6 * geo.upper_arm_length(),
                "upper arm {} at target ({}, {})",
                upper,
                r,
                z
            );
            assert!(
                (fore - geo.forearm_length()).abs() < 1e-6 * geo.forearm_length(),
                "forearm {} at target ({}, {})",
                fore,
                r,
                z
            );
        }
    }

    #[test]
    fn test_elbow_up_convention() {
        // Horizontal reach: the elbow must sit above the shoulder-wrist line
        let sol = solver().solve(200.0, 140.0);
        assert!(sol.elbow_z() > 140.0, "elbow below line: {}", sol.elbow_z());
    }

    #[test]
    fn test_out_of_reach_preserves_direction() {
        let s = solver();
        let shoulder = s.geometry().shoulder();
        for &(r, z) in &[(500.0, 150.0), (0.0, 900.0), (300.0, -300.0), (1000.0, 1000.0)] {
            let sol = s.solve(r, z);
            assert_eq!(sol.branch, IkBranch::OutOfReach);
            let to_elbow = sol.elbow - shoulder;
            let to_target = Point2::new(r, z) - shoulder;
            assert_relative_eq!(to_elbow.norm(), 160.0, epsilon = 1e-9);
            let cross = to_elbow.x * to_target.y - to_elbow.y * to_target.x;
            assert!(cross.abs() < 1e-6 * to_target.norm(), "not parallel: {}", cross);
            assert!(to_elbow.dot(&to_target) > 0.0, "opposite direction");
        }
    }

    #[test]
    fn test_target_at_shoulder_is_degenerate() {
        let sol = solver().solve(0.0, 140.0);
        assert_eq!(sol.branch, IkBranch::Degenerate);
        assert_eq!(sol.elbow, Point2::new(0.0, 140.0));
    }

    #[test]
    fn test_reach_boundary_is_straight() {
        let sol = solver().solve(320.0, 140.0);
        assert_eq!(sol.branch, IkBranch::Reachable);
        assert_relative_eq!(sol.elbow_r(), 160.0, epsilon = 1e-9);
        assert_relative_eq!(sol.elbow_z(), 140.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unequal_links_fall_back_inside_min_reach() {
        // |L2 - L3| = 150; a target 100 mm from the shoulder has no triangle
        let geo = ArmGeometry::new(100.0, 200.0, 50.0).unwrap();
        let sol = PlanarIkSolver::new(geo).solve(100.0, 100.0);
        assert_eq!(sol.branch, IkBranch::Fallback);
        assert_eq!(sol.elbow, Point2::new(0.0, 300.0));
    }

    #[test]
    fn test_never_produces_nan_for_finite_input() {
        let geo = ArmGeometry::new(100.0, 200.0, 50.0).unwrap();
        let s = PlanarIkSolver::new(geo);
        for i in 0..60 {
            for j in -30..60 {
                let sol = s.solve(i as f64 * 7.5, j as f64 * 7.5);
                assert!(
                    sol.elbow.x.is_finite() && sol.elbow.y.is_finite(),
                    "non-finite elbow at ({}, {})",
                    i,
                    j
                );
            }
        }
    }
}
