//! Canvas implementation that writes a standalone SVG document.

use std::fmt::Write;

use glam::Vec2;

use crate::draw::{Anchor, Canvas, CapStyle, Color, Font, Stroke};

/// Accumulates SVG elements; [`SvgCanvas::finish`] returns the document.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    width: u32,
    height: u32,
    body: String,
}

impl SvgCanvas {
    /// Start a document filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let mut body = String::new();
        let _ = writeln!(
            body,
            r#"  <rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            width, height, background
        );
        Self {
            width,
            height,
            body,
        }
    }

    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

fn stroke_attrs(outline: Option<Stroke>) -> String {
    match outline {
        Some(s) => format!(r#"stroke="{}" stroke-width="{:.2}""#, s.color, s.width),
        None => r#"stroke="none""#.to_string(),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

impl Canvas for SvgCanvas {
    fn line(
        &mut self,
        from: Vec2,
        to: Vec2,
        width: f32,
        cap: CapStyle,
        color: Color,
        dash: Option<(f32, f32)>,
    ) {
        let cap = match cap {
            CapStyle::Butt => "butt",
            CapStyle::Round => "round",
        };
        let dash = dash
            .map(|(on, off)| format!(r#" stroke-dasharray="{:.1} {:.1}""#, on, off))
            .unwrap_or_default();
        let _ = writeln!(
            self.body,
            r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{:.2}" stroke-linecap="{}"{}/>"#,
            from.x, from.y, to.x, to.y, color, width, cap, dash
        );
    }

    fn oval(&mut self, center: Vec2, radius: f32, fill: Color, outline: Option<Stroke>) {
        let _ = writeln!(
            self.body,
            r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}" {}/>"#,
            center.x,
            center.y,
            radius,
            fill,
            stroke_attrs(outline)
        );
    }

    fn rectangle(&mut self, min: Vec2, max: Vec2, fill: Color, outline: Option<Stroke>) {
        let size = max - min;
        let _ = writeln!(
            self.body,
            r#"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" {}/>"#,
            min.x,
            min.y,
            size.x,
            size.y,
            fill,
            stroke_attrs(outline)
        );
    }

    fn polygon(&mut self, points: &[Vec2], fill: Color, outline: Option<Stroke>) {
        let pts: Vec<String> = points
            .iter()
            .map(|p| format!("{:.2},{:.2}", p.x, p.y))
            .collect();
        let _ = writeln!(
            self.body,
            r#"  <polygon points="{}" fill="{}" {}/>"#,
            pts.join(" "),
            fill,
            stroke_attrs(outline)
        );
    }

    fn text(&mut self, position: Vec2, anchor: Anchor, content: &str, color: Color, font: Font) {
        let text_anchor = match anchor {
            Anchor::NorthWest => "start",
            Anchor::North => "middle",
        };
        let weight = if font.bold { "bold" } else { "normal" };
        let _ = write!(
            self.body,
            r#"  <text x="{:.2}" y="{:.2}" fill="{}" font-family="{}" font-size="{}pt" font-weight="{}" text-anchor="{}" dominant-baseline="hanging">"#,
            position.x, position.y, color, font.family, font.size, weight, text_anchor
        );
        for (i, line) in content.split('\n').enumerate() {
            let dy = if i == 0 { "0" } else { "1.2em" };
            let _ = write!(
                self.body,
                r#"<tspan x="{:.2}" dy="{}">{}</tspan>"#,
                position.x,
                dy,
                escape(line)
            );
        }
        self.body.push_str("</text>\n");
    }
}
