//! Current arm pose, the only externally mutated entity of the visualizer.

use armview_core::Pose;

/// Holds the pose most recently reported by the robot controller.
///
/// Every setter marks the state dirty; the owner redraws and then calls
/// [`ArmPoseState::mark_drawn`]. No reachability or workspace validation is
/// done here.
#[derive(Debug, Clone)]
pub struct ArmPoseState {
    pose: Pose,
    dirty: bool,
    revision: u64,
}

impl ArmPoseState {
    /// New state at `initial`, dirty so the first frame gets drawn.
    pub fn new(initial: Pose) -> Self {
        Self {
            pose: initial,
            dirty: true,
            revision: 0,
        }
    }

    pub fn set_position(&mut self, x: f64, y: f64, z: f64) {
        self.pose.x = x;
        self.pose.y = y;
        self.pose.z = z;
        self.touch();
    }

    pub fn set_gripper(&mut self, is_open: bool) {
        self.pose.gripper_open = is_open;
        self.touch();
    }

    pub fn current_pose(&self) -> Pose {
        self.pose
    }

    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    pub fn mark_drawn(&mut self) {
        self.dirty = false;
    }

    /// Number of mutations since construction.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.dirty = true;
        self.revision += 1;
    }
}

impl Default for ArmPoseState {
    fn default() -> Self {
        Self::new(Pose::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_needs_redraw() {
        let state = ArmPoseState::default();
        assert!(state.needs_redraw());
        assert_eq!(state.revision(), 0);
        assert_eq!(state.current_pose(), Pose::new(150.0, 0.0, 150.0, false));
    }

    #[test]
    fn test_setters_mark_dirty() {
        let mut state = ArmPoseState::default();
        state.mark_drawn();
        assert!(!state.needs_redraw());

        state.set_position(10.0, 20.0, 30.0);
        assert!(state.needs_redraw());
        assert_eq!(state.revision(), 1);
        state.mark_drawn();

        state.set_gripper(true);
        assert!(state.needs_redraw());
        assert_eq!(state.revision(), 2);

        let pose = state.current_pose();
        assert_eq!((pose.x, pose.y, pose.z), (10.0, 20.0, 30.0));
        assert!(pose.gripper_open);
    }

    #[test]
    fn test_position_does_not_touch_gripper() {
        let mut state = ArmPoseState::new(Pose::new(0.0, 0.0, 0.0, true));
        state.set_position(1000.0, -1000.0, 5000.0);
        assert!(state.current_pose().gripper_open);
    }
}
