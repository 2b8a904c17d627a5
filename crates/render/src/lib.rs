//! Projection and drawing for the ArmView top and side views.
//!
//! Everything here works in canvas pixels through the [`draw::Canvas`]
//! capability, so no UI toolkit is required.

pub mod draw;
pub mod dual_view;
pub mod projection;
pub mod svg;

pub use draw::{Anchor, Canvas, CapStyle, Color, DrawCommand, Font, Stroke};
pub use dual_view::{DualViewFrame, DualViewRenderer, Palette, PoseRenderer};
pub use projection::{CoordinateMapper, View, ViewProjection, ViewportLayout};
pub use svg::SvgCanvas;
