//! Millimeter → pixel affine projection for the top and side views.

use armview_core::{glam_to_point, ConfigurationError, Point2};
use glam::Vec2;

/// Which of the two orthogonal views a point belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Plan view, X/Y.
    Top,
    /// Elevation view, radial distance/Z.
    Side,
}

/// Affine transform from one view's mm plane to its canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewProjection {
    /// Pixel position of the mm origin.
    pub origin: Vec2,
    /// Pixels per millimeter.
    pub scale: f32,
    /// Screen Y grows downward, so the standard views flip the vertical axis.
    pub vertical_flip: bool,
}

impl ViewProjection {
    pub fn new(
        origin_x: f32,
        origin_y: f32,
        scale: f32,
        vertical_flip: bool,
    ) -> Result<Self, ConfigurationError> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ConfigurationError::NonPositiveScale(scale as f64));
        }
        Ok(Self {
            origin: Vec2::new(origin_x, origin_y),
            scale,
            vertical_flip,
        })
    }

    fn vertical_sign(&self) -> f32 {
        if self.vertical_flip {
            -1.0
        } else {
            1.0
        }
    }

    /// Project a (horizontal, vertical) mm point to pixels.
    pub fn to_screen(&self, horizontal: f64, vertical: f64) -> Vec2 {
        Vec2::new(
            self.origin.x + horizontal as f32 * self.scale,
            self.origin.y + self.vertical_sign() * vertical as f32 * self.scale,
        )
    }

    /// Inverse of [`ViewProjection::to_screen`].
    pub fn to_world(&self, pixel: Vec2) -> Point2<f64> {
        let h = (pixel.x - self.origin.x) / self.scale;
        let v = self.vertical_sign() * (pixel.y - self.origin.y) / self.scale;
        glam_to_point(Vec2::new(h, v))
    }
}

/// Canvas dimensions and scale shared by both views.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportLayout {
    /// Canvas width (px). The top canvas is square, `width × width`.
    pub width: u32,
    /// Side canvas height (px).
    pub height: u32,
    /// Pixels per millimeter.
    pub scale: f32,
    /// Distance from the side canvas bottom edge to the ground line (px).
    pub ground_margin: u32,
}

impl Default for ViewportLayout {
    fn default() -> Self {
        Self {
            width: 300,
            height: 300,
            scale: 0.4,
            ground_margin: 50,
        }
    }
}

impl ViewportLayout {
    pub fn top_size(&self) -> (u32, u32) {
        (self.width, self.width)
    }

    pub fn side_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Holds one [`ViewProjection`] per view and applies exactly one per call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    top: ViewProjection,
    side: ViewProjection,
}

impl CoordinateMapper {
    pub fn new(top: ViewProjection, side: ViewProjection) -> Self {
        Self { top, side }
    }

    /// Standard layout: top origin at the canvas center (integer halves),
    /// side origin centered horizontally and `ground_margin` above the bottom.
    pub fn from_layout(layout: &ViewportLayout) -> Result<Self, ConfigurationError> {
        if layout.width == 0 || layout.height == 0 {
            return Err(ConfigurationError::EmptyCanvas {
                width: layout.width,
                height: layout.height,
            });
        }
        let center_x = (layout.width / 2) as f32;
        let top = ViewProjection::new(center_x, (layout.height / 2) as f32, layout.scale, true)?;
        let side_y = layout.height.saturating_sub(layout.ground_margin) as f32;
        let side = ViewProjection::new(center_x, side_y, layout.scale, true)?;
        Ok(Self { top, side })
    }

    pub fn projection(&self, view: View) -> &ViewProjection {
        match view {
            View::Top => &self.top,
            View::Side => &self.side,
        }
    }

    pub fn to_screen(&self, horizontal: f64, vertical: f64, view: View) -> Vec2 {
        self.projection(view).to_screen(horizontal, vertical)
    }

    pub fn to_world(&self, pixel: Vec2, view: View) -> Point2<f64> {
        self.projection(view).to_world(pixel)
    }
}
