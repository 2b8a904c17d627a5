//! Top (plan) and side (elevation) arm views as drawing command lists.
//!
//! The top view is a direct projection of (x, y). The side view works in the
//! (R, Z) plane with R = hypot(x, y), and needs the planar IK solve to place
//! the elbow between the fixed shoulder and the wrist target.

use armview_control::{ElbowSolution, PlanarIkSolver};
use armview_core::{ArmGeometry, ConfigurationError, Pose};
use glam::Vec2;
use serde::Deserialize;

use crate::draw::{Anchor, Canvas, CapStyle, Color, DrawCommand, Font, Stroke};
use crate::projection::{CoordinateMapper, View, ViewportLayout};

/// Grid spacing (px) and dash pattern.
const GRID_STEP: usize = 50;
const GRID_DASH: (f32, f32) = (2.0, 4.0);

const BASE_RADIUS: f32 = 20.0;
const BASE_SCREW_RADIUS: f32 = 3.0;
const TOP_ARM_WIDTH: f32 = 12.0;
const TOP_HIGHLIGHT_WIDTH: f32 = 4.0;
const GRIPPER_MARKER_HALF: f32 = 8.0;

/// Pedestal half-widths at the ground and just below the shoulder (px).
const PEDESTAL_FOOT: f32 = 30.0;
const PEDESTAL_NECK: f32 = 15.0;
const PEDESTAL_NECK_DROP: f32 = 10.0;
const UPPER_ARM_WIDTH: f32 = 14.0;
const FOREARM_WIDTH: f32 = 10.0;
/// Shoulder, elbow, wrist.
const JOINT_RADII: [f32; 3] = [10.0, 8.0, 6.0];
const JOINT_PIN_RADIUS: f32 = 2.0;

const FINGER_LENGTH: f32 = 15.0;
const FINGER_GAP_OPEN: f32 = 10.0;
const FINGER_GAP_CLOSED: f32 = 2.0;

const INFO_POSITION: Vec2 = Vec2::new(10.0, 10.0);
const TITLE_TOP: f32 = 2.0;

pub const TOP_VIEW_TITLE: &str = "Top view (XY)";
pub const SIDE_VIEW_TITLE: &str = "Side view (Z)";

/// Industrial dark theme colors.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Color,
    pub grid: Color,
    pub base: Color,
    pub link: Color,
    pub link_highlight: Color,
    pub joint: Color,
    pub joint_pin: Color,
    pub pedestal_outline: Color,
    pub gripper_open: Color,
    /// Closed gripper doubles as the alarm color.
    pub gripper_closed: Color,
    pub text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::hex(0x2E2E2E),
            grid: Color::hex(0x404040),
            base: Color::hex(0x505050),
            link: Color::hex(0xD4D4D4),
            link_highlight: Color::hex(0xF0F0F0),
            joint: Color::hex(0xFF8C00),
            joint_pin: Color::hex(0x333333),
            pedestal_outline: Color::hex(0x666666),
            gripper_open: Color::hex(0x32CD32),
            gripper_closed: Color::hex(0xFF0000),
            text: Color::WHITE,
        }
    }
}

impl Palette {
    pub fn gripper(&self, open: bool) -> Color {
        if open {
            self.gripper_open
        } else {
            self.gripper_closed
        }
    }
}

/// Output of one render: both command lists plus the derived side-view data.
#[derive(Debug, Clone, PartialEq)]
pub struct DualViewFrame {
    pub top: Vec<DrawCommand>,
    pub side: Vec<DrawCommand>,
    /// R = hypot(x, y) used for the side view (mm).
    pub radial_distance: f64,
    pub elbow: ElbowSolution,
}

impl DualViewFrame {
    /// Replay both views onto their host canvases.
    pub fn paint<T: Canvas + ?Sized, S: Canvas + ?Sized>(&self, top: &mut T, side: &mut S) {
        for cmd in &self.top {
            cmd.paint(top);
        }
        for cmd in &self.side {
            cmd.paint(side);
        }
    }
}

/// Anything that turns a pose into drawable views.
pub trait PoseRenderer {
    fn render(&self, pose: &Pose, geometry: &ArmGeometry) -> DualViewFrame;
}

/// Renders the plan and elevation views of the arm.
///
/// Stateless: the output depends only on the pose and geometry passed in.
#[derive(Debug, Clone)]
pub struct DualViewRenderer {
    layout: ViewportLayout,
    mapper: CoordinateMapper,
    palette: Palette,
}

impl DualViewRenderer {
    pub fn new(layout: ViewportLayout) -> Result<Self, ConfigurationError> {
        Ok(Self {
            mapper: CoordinateMapper::from_layout(&layout)?,
            layout,
            palette: Palette::default(),
        })
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn layout(&self) -> &ViewportLayout {
        &self.layout
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    fn draw_grid(&self, canvas: &mut Vec<DrawCommand>, width: u32, height: u32) {
        let (w, h) = (width as f32, height as f32);
        for x in (0..width as usize).step_by(GRID_STEP) {
            let x = x as f32;
            canvas.line(
                Vec2::new(x, 0.0),
                Vec2::new(x, h),
                1.0,
                CapStyle::Butt,
                self.palette.grid,
                Some(GRID_DASH),
            );
        }
        for y in (0..height as usize).step_by(GRID_STEP) {
            let y = y as f32;
            canvas.line(
                Vec2::new(0.0, y),
                Vec2::new(w, y),
                1.0,
                CapStyle::Butt,
                self.palette.grid,
                Some(GRID_DASH),
            );
        }
    }

    fn draw_title(&self, canvas: &mut Vec<DrawCommand>, width: u32, title: &str) {
        canvas.text(
            Vec2::new((width / 2) as f32, TITLE_TOP),
            Anchor::North,
            title,
            self.palette.text,
            Font {
                family: "Arial",
                size: 8,
                bold: true,
            },
        );
    }

    fn render_top(&self, pose: &Pose) -> Vec<DrawCommand> {
        let (width, height) = self.layout.top_size();
        let mut cmds = Vec::new();
        self.draw_grid(&mut cmds, width, height);

        let origin = self.mapper.to_screen(0.0, 0.0, View::Top);
        let target = self.mapper.to_screen(pose.x, pose.y, View::Top);

        // Rotating base with a center screw
        cmds.oval(
            origin,
            BASE_RADIUS,
            self.palette.base,
            Some(Stroke::new(self.palette.link, 2.0)),
        );
        cmds.oval(origin, BASE_SCREW_RADIUS, self.palette.joint, None);

        // The whole arm collapses onto one segment in plan
        cmds.line(
            origin,
            target,
            TOP_ARM_WIDTH,
            CapStyle::Round,
            self.palette.link,
            None,
        );
        cmds.line(
            origin,
            target,
            TOP_HIGHLIGHT_WIDTH,
            CapStyle::Round,
            self.palette.link_highlight,
            None,
        );

        let half = Vec2::splat(GRIPPER_MARKER_HALF);
        cmds.rectangle(
            target - half,
            target + half,
            self.palette.gripper(pose.gripper_open),
            Some(Stroke::new(Color::WHITE, 1.0)),
        );

        cmds.text(
            INFO_POSITION,
            Anchor::NorthWest,
            &format!("X: {:.1} mm\nY: {:.1} mm", pose.x, pose.y),
            self.palette.text,
            Font::default(),
        );
        self.draw_title(&mut cmds, width, TOP_VIEW_TITLE);
        cmds
    }

    fn render_side(
        &self,
        pose: &Pose,
        geometry: &ArmGeometry,
        radial: f64,
        elbow: &ElbowSolution,
    ) -> Vec<DrawCommand> {
        let (width, height) = self.layout.side_size();
        let mut cmds = Vec::new();
        self.draw_grid(&mut cmds, width, height);

        let base = self.mapper.to_screen(0.0, 0.0, View::Side);
        let shoulder = self
            .mapper
            .to_screen(0.0, geometry.shoulder_height(), View::Side);
        let elbow_px = self
            .mapper
            .to_screen(elbow.elbow_r(), elbow.elbow_z(), View::Side);
        let wrist = self.mapper.to_screen(radial, pose.z, View::Side);

        let neck_y = shoulder.y + PEDESTAL_NECK_DROP;
        cmds.polygon(
            &[
                Vec2::new(base.x - PEDESTAL_FOOT, base.y),
                Vec2::new(base.x - PEDESTAL_NECK, neck_y),
                Vec2::new(base.x + PEDESTAL_NECK, neck_y),
                Vec2::new(base.x + PEDESTAL_FOOT, base.y),
            ],
            self.palette.base,
            Some(Stroke::new(self.palette.pedestal_outline, 2.0)),
        );
        cmds.line(
            Vec2::new(0.0, base.y),
            Vec2::new(width as f32, base.y),
            2.0,
            CapStyle::Butt,
            self.palette.pedestal_outline,
            None,
        );

        cmds.line(
            shoulder,
            elbow_px,
            UPPER_ARM_WIDTH,
            CapStyle::Round,
            self.palette.link,
            None,
        );
        cmds.line(
            elbow_px,
            wrist,
            FOREARM_WIDTH,
            CapStyle::Round,
            self.palette.link,
            None,
        );

        for (center, radius) in [shoulder, elbow_px, wrist].into_iter().zip(JOINT_RADII) {
            cmds.oval(
                center,
                radius,
                self.palette.joint,
                Some(Stroke::new(Color::BLACK, 1.0)),
            );
            cmds.oval(center, JOINT_PIN_RADIUS, self.palette.joint_pin, None);
        }

        self.draw_gripper(&mut cmds, wrist, pose.gripper_open);

        cmds.text(
            INFO_POSITION,
            Anchor::NorthWest,
            &format!("Radius: {:.1} mm\nHeight Z: {:.1} mm", radial, pose.z),
            self.palette.text,
            Font::default(),
        );
        self.draw_title(&mut cmds, width, SIDE_VIEW_TITLE);
        cmds
    }

    /// Two fingers opening symmetrically about the wrist.
    fn draw_gripper(&self, canvas: &mut Vec<DrawCommand>, wrist: Vec2, open: bool) {
        let color = self.palette.gripper(open);
        let gap = if open {
            FINGER_GAP_OPEN
        } else {
            FINGER_GAP_CLOSED
        };
        let outline = Some(Stroke::new(Color::BLACK, 1.0));
        let Vec2 { x, y } = wrist;
        let tip = x + FINGER_LENGTH;

        canvas.polygon(
            &[
                Vec2::new(x, y - 2.0),
                Vec2::new(tip, y - 2.0 - gap),
                Vec2::new(tip, y - 6.0 - gap),
                Vec2::new(x, y - 6.0),
            ],
            color,
            outline,
        );
        canvas.polygon(
            &[
                Vec2::new(x, y + 2.0),
                Vec2::new(tip, y + 2.0 + gap),
                Vec2::new(tip, y + 6.0 + gap),
                Vec2::new(x, y + 6.0),
            ],
            color,
            outline,
        );
    }
}

impl PoseRenderer for DualViewRenderer {
    fn render(&self, pose: &Pose, geometry: &ArmGeometry) -> DualViewFrame {
        let radial = pose.radial_distance();
        let elbow = PlanarIkSolver::new(*geometry).solve(radial, pose.z);
        log::trace!(
            "render pose ({:.1}, {:.1}, {:.1}) R={:.1} elbow=({:.1}, {:.1}) {:?}",
            pose.x,
            pose.y,
            pose.z,
            radial,
            elbow.elbow_r(),
            elbow.elbow_z(),
            elbow.branch
        );

        DualViewFrame {
            top: self.render_top(pose),
            side: self.render_side(pose, geometry, radial, &elbow),
            radial_distance: radial,
            elbow,
        }
    }
}
