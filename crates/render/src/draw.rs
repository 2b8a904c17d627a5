//! Pixel-space drawing primitives and the canvas capability that consumes them.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 24-bit RGB color, written and parsed as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub const fn hex(v: u32) -> Self {
        Self::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid color '{0}', expected #RRGGBB")]
pub struct ColorParseError(pub String);

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| ColorParseError(s.to_string()))?;
        u32::from_str_radix(digits, 16)
            .map(Color::hex)
            .map_err(|_| ColorParseError(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Line end style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapStyle {
    Butt,
    Round,
}

/// Which point of the text block sits at the given position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Top-left corner.
    NorthWest,
    /// Top edge, horizontally centered.
    North,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    pub family: &'static str,
    pub size: u32,
    pub bold: bool,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "Arial",
            size: 9,
            bold: false,
        }
    }
}

/// Outline of a filled shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// One drawing instruction in canvas pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        cap: CapStyle,
        color: Color,
        /// Dash pattern (on, off) in pixels; `None` draws a solid line.
        dash: Option<(f32, f32)>,
    },
    /// Circle of `radius` around `center`.
    Oval {
        center: Vec2,
        radius: f32,
        fill: Color,
        outline: Option<Stroke>,
    },
    /// Axis-aligned rectangle spanning `min`..`max`.
    Rectangle {
        min: Vec2,
        max: Vec2,
        fill: Color,
        outline: Option<Stroke>,
    },
    Polygon {
        points: Vec<Vec2>,
        fill: Color,
        outline: Option<Stroke>,
    },
    /// Text block; `content` may contain `\n` line breaks.
    Text {
        position: Vec2,
        anchor: Anchor,
        content: String,
        color: Color,
        font: Font,
    },
}

/// Host drawing surface. Implementations never see mm coordinates.
pub trait Canvas {
    fn line(
        &mut self,
        from: Vec2,
        to: Vec2,
        width: f32,
        cap: CapStyle,
        color: Color,
        dash: Option<(f32, f32)>,
    );

    fn oval(&mut self, center: Vec2, radius: f32, fill: Color, outline: Option<Stroke>);

    fn rectangle(&mut self, min: Vec2, max: Vec2, fill: Color, outline: Option<Stroke>);

    fn polygon(&mut self, points: &[Vec2], fill: Color, outline: Option<Stroke>);

    fn text(&mut self, position: Vec2, anchor: Anchor, content: &str, color: Color, font: Font);
}

impl DrawCommand {
    /// Issue this command on `canvas`.
    pub fn paint<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        match self {
            DrawCommand::Line {
                from,
                to,
                width,
                cap,
                color,
                dash,
            } => canvas.line(*from, *to, *width, *cap, *color, *dash),
            DrawCommand::Oval {
                center,
                radius,
                fill,
                outline,
            } => canvas.oval(*center, *radius, *fill, *outline),
            DrawCommand::Rectangle {
                min,
                max,
                fill,
                outline,
            } => canvas.rectangle(*min, *max, *fill, *outline),
            DrawCommand::Polygon {
                points,
                fill,
                outline,
            } => canvas.polygon(points, *fill, *outline),
            DrawCommand::Text {
                position,
                anchor,
                content,
                color,
                font,
            } => canvas.text(*position, *anchor, content, *color, *font),
        }
    }
}

/// A plain command list is itself a canvas; useful for re-recording.
impl Canvas for Vec<DrawCommand> {
    fn line(
        &mut self,
        from: Vec2,
        to: Vec2,
        width: f32,
        cap: CapStyle,
        color: Color,
        dash: Option<(f32, f32)>,
    ) {
        self.push(DrawCommand::Line {
            from,
            to,
            width,
            cap,
            color,
            dash,
        });
    }

    fn oval(&mut self, center: Vec2, radius: f32, fill: Color, outline: Option<Stroke>) {
        self.push(DrawCommand::Oval {
            center,
            radius,
            fill,
            outline,
        });
    }

    fn rectangle(&mut self, min: Vec2, max: Vec2, fill: Color, outline: Option<Stroke>) {
        self.push(DrawCommand::Rectangle {
            min,
            max,
            fill,
            outline,
        });
    }

    fn polygon(&mut self, points: &[Vec2], fill: Color, outline: Option<Stroke>) {
        self.push(DrawCommand::Polygon {
            points: points.to_vec(),
            fill,
            outline,
        });
    }

    fn text(&mut self, position: Vec2, anchor: Anchor, content: &str, color: Color, font: Font) {
        self.push(DrawCommand::Text {
            position,
            anchor,
            content: content.to_string(),
            color,
            font,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse_and_format() {
        let c: Color = "#FF8C00".parse().unwrap();
        assert_eq!(c, Color::rgb(0xFF, 0x8C, 0x00));
        assert_eq!(c.to_string(), "#FF8C00");
        assert_eq!("#32cd32".parse::<Color>().unwrap(), Color::hex(0x32CD32));
    }

    #[test]
    fn test_color_parse_rejects_garbage() {
        assert!("FF8C00".parse::<Color>().is_err());
        assert!("#FF8C0".parse::<Color>().is_err());
        assert!("#GG0000".parse::<Color>().is_err());
        assert!("#+F0000".parse::<Color>().is_err());
    }

    #[test]
    fn test_replay_into_vec_is_identity() {
        let commands = vec![
            DrawCommand::Line {
                from: Vec2::ZERO,
                to: Vec2::new(10.0, 5.0),
                width: 2.0,
                cap: CapStyle::Round,
                color: Color::WHITE,
                dash: Some((2.0, 4.0)),
            },
            DrawCommand::Polygon {
                points: vec![Vec2::ZERO, Vec2::X, Vec2::Y],
                fill: Color::BLACK,
                outline: Some(Stroke::new(Color::WHITE, 1.0)),
            },
            DrawCommand::Text {
                position: Vec2::new(10.0, 10.0),
                anchor: Anchor::NorthWest,
                content: "a\nb".into(),
                color: Color::WHITE,
                font: Font::default(),
            },
        ];
        let mut recorded: Vec<DrawCommand> = Vec::new();
        for cmd in &commands {
            cmd.paint(&mut recorded);
        }
        assert_eq!(recorded, commands);
    }
}
