//! The visualizer: pose state, renderer and console owned together.
//!
//! Setters redraw synchronously before returning, so the latest frame always
//! matches the latest pose.

use armview_control::ArmPoseState;
use armview_core::{ArmGeometry, Pose};
use armview_render::{Canvas, DualViewFrame, DualViewRenderer, PoseRenderer};

use crate::console::CommandConsole;

pub struct RobotVisualizer<R: PoseRenderer = DualViewRenderer> {
    geometry: ArmGeometry,
    state: ArmPoseState,
    renderer: R,
    console: CommandConsole,
    frame: DualViewFrame,
    frames_drawn: u64,
}

impl<R: PoseRenderer> RobotVisualizer<R> {
    /// Draw the initial pose and log the startup line.
    pub fn new(geometry: ArmGeometry, initial: Pose, renderer: R, console: CommandConsole) -> Self {
        let frame = renderer.render(&initial, &geometry);
        let mut state = ArmPoseState::new(initial);
        state.mark_drawn();
        let mut viz = Self {
            geometry,
            state,
            renderer,
            console,
            frame,
            frames_drawn: 1,
        };
        viz.log("Visualization system started.");
        viz
    }

    pub fn set_position(&mut self, x: f64, y: f64, z: f64) {
        self.state.set_position(x, y, z);
        self.redraw();
    }

    pub fn set_gripper(&mut self, is_open: bool) {
        self.state.set_gripper(is_open);
        self.redraw();
    }

    /// Pass-through status line for the host.
    pub fn log(&mut self, message: &str) {
        self.console.log(message);
    }

    pub fn pose(&self) -> Pose {
        self.state.current_pose()
    }

    pub fn geometry(&self) -> &ArmGeometry {
        &self.geometry
    }

    pub fn frame(&self) -> &DualViewFrame {
        &self.frame
    }

    pub fn console(&self) -> &CommandConsole {
        &self.console
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Replay the current frame onto host canvases.
    pub fn paint<T: Canvas + ?Sized, S: Canvas + ?Sized>(&self, top: &mut T, side: &mut S) {
        self.frame.paint(top, side);
    }

    fn redraw(&mut self) {
        if !self.state.needs_redraw() {
            return;
        }
        let pose = self.state.current_pose();
        self.frame = self.renderer.render(&pose, &self.geometry);
        self.state.mark_drawn();
        self.frames_drawn += 1;
        log::debug!(
            "redraw #{} (revision {}) elbow {:?}",
            self.frames_drawn,
            self.state.revision(),
            self.frame.elbow.branch
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armview_control::IkBranch;
    use armview_render::{DrawCommand, ViewportLayout};
    use std::cell::Cell;

    fn visualizer() -> RobotVisualizer {
        RobotVisualizer::new(
            ArmGeometry::default(),
            Pose::default(),
            DualViewRenderer::new(ViewportLayout::default()).unwrap(),
            CommandConsole::new(16),
        )
    }

    #[test]
    fn test_startup_draws_and_logs() {
        let viz = visualizer();
        assert_eq!(viz.frames_drawn(), 1);
        assert_eq!(viz.frame().elbow.branch, IkBranch::Reachable);
        let lines: Vec<&str> = viz.console().lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("Visualization system started."));
    }

    #[test]
    fn test_setters_redraw_immediately() {
        let mut viz = visualizer();
        viz.set_position(500.0, 0.0, 150.0);
        assert_eq!(viz.frames_drawn(), 2);
        assert_eq!(viz.frame().elbow.branch, IkBranch::OutOfReach);
        assert!((viz.frame().radial_distance - 500.0).abs() < 1e-9);

        viz.set_gripper(true);
        assert_eq!(viz.frames_drawn(), 3);
        assert!(viz.pose().gripper_open);
    }

    #[test]
    fn test_frame_matches_fresh_render() {
        let mut viz = visualizer();
        viz.set_position(-80.0, 60.0, 220.0);
        let fresh = DualViewRenderer::new(ViewportLayout::default())
            .unwrap()
            .render(&viz.pose(), viz.geometry());
        assert_eq!(viz.frame(), &fresh);
    }

    #[test]
    fn test_paint_forwards_frame() {
        let viz = visualizer();
        let mut top: Vec<DrawCommand> = Vec::new();
        let mut side: Vec<DrawCommand> = Vec::new();
        viz.paint(&mut top, &mut side);
        assert_eq!(top, viz.frame().top);
        assert_eq!(side, viz.frame().side);
    }

    /// Counts render calls and delegates to the real renderer.
    struct CountingRenderer {
        inner: DualViewRenderer,
        calls: Cell<u32>,
    }

    impl PoseRenderer for CountingRenderer {
        fn render(&self, pose: &Pose, geometry: &ArmGeometry) -> DualViewFrame {
            self.calls.set(self.calls.get() + 1);
            self.inner.render(pose, geometry)
        }
    }

    #[test]
    fn test_one_render_per_mutation() {
        let renderer = CountingRenderer {
            inner: DualViewRenderer::new(ViewportLayout::default()).unwrap(),
            calls: Cell::new(0),
        };
        let mut viz = RobotVisualizer::new(
            ArmGeometry::default(),
            Pose::default(),
            renderer,
            CommandConsole::new(4),
        );
        viz.set_position(1.0, 2.0, 3.0);
        viz.set_position(4.0, 5.0, 6.0);
        viz.set_gripper(false);
        assert_eq!(viz.renderer.calls.get(), 4);
    }
}
