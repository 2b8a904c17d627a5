//! Pose-side logic: planar IK for the side view and the mutable pose state.

pub mod ik;
pub mod state;

pub use ik::{ElbowSolution, IkBranch, PlanarIkSolver};
pub use state::ArmPoseState;
