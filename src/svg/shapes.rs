//! SVG Shape Primitives
//!
//! Node markers, link arcs and labels.

use super::palette::Color;
use crate::graph::Position;
use crate::layout::LinkGeometry;

/// A circle
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    /// Center position
    pub center: Position,
    /// Radius
    pub radius: f32,
    /// Fill color
    pub fill: Option<Color>,
    /// Stroke color
    pub stroke: Option<Color>,
    /// Stroke width
    pub stroke_width: f32,
}

impl Circle {
    /// Create a new circle
    pub fn new(cx: f32, cy: f32, r: f32) -> Self {
        Self {
            center: Position::new(cx, cy),
            radius: r,
            fill: None,
            stroke: None,
            stroke_width: 1.0,
        }
    }

    /// Set fill color
    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    /// Set stroke
    pub fn with_stroke(mut self, color: Color, width: f32) -> Self {
        self.stroke = Some(color);
        self.stroke_width = width;
        self
    }

    /// Render to SVG element
    pub fn to_svg(&self) -> String {
        let mut attrs = format!(
            "cx=\"{}\" cy=\"{}\" r=\"{}\"",
            self.center.x, self.center.y, self.radius
        );

        if let Some(fill) = &self.fill {
            attrs.push_str(&format!(" fill=\"{}\"", fill.to_css()));
        }

        if let Some(stroke) = &self.stroke {
            attrs.push_str(&format!(
                " stroke=\"{}\" stroke-width=\"{}\"",
                stroke.to_css(),
                self.stroke_width
            ));
        }

        format!("<circle {}/>", attrs)
    }
}

/// SVG path commands
#[derive(Debug, Clone, PartialEq)]
pub enum PathCommand {
    /// Move to (x, y)
    MoveTo(f32, f32),
    /// Elliptical arc to (x, y)
    ArcTo {
        rx: f32,
        ry: f32,
        rotation: f32,
        large_arc: bool,
        sweep: bool,
        x: f32,
        y: f32,
    },
}

impl PathCommand {
    /// Convert to SVG path data string
    pub fn to_svg(&self) -> String {
        match self {
            Self::MoveTo(x, y) => format!("M{},{}", x, y),
            Self::ArcTo {
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
                x,
                y,
            } => format!(
                "A{},{} {} {},{} {},{}",
                rx,
                ry,
                rotation,
                u8::from(*large_arc),
                u8::from(*sweep),
                x,
                y
            ),
        }
    }
}

/// A path shape
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Path commands
    pub commands: Vec<PathCommand>,
    /// Stroke color
    pub stroke: Option<Color>,
    /// Stroke width
    pub stroke_width: f32,
    /// Element opacity
    pub opacity: f32,
}

impl Path {
    /// Create a new empty path
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            stroke: None,
            stroke_width: 1.0,
            opacity: 1.0,
        }
    }

    /// Clockwise arc between the link endpoints, radius equal to their distance
    pub fn link_arc(geometry: &LinkGeometry) -> Self {
        let dr = geometry.arc_radius();
        let (s, t) = (geometry.source, geometry.target);
        Self::new().move_to(s.x, s.y).arc_to(dr, dr, t.x, t.y)
    }

    /// Move to a point
    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::MoveTo(x, y));
        self
    }

    /// Small clockwise arc to a point
    pub fn arc_to(mut self, rx: f32, ry: f32, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::ArcTo {
            rx,
            ry,
            rotation: 0.0,
            large_arc: false,
            sweep: true,
            x,
            y,
        });
        self
    }

    /// Set stroke
    pub fn with_stroke(mut self, color: Color, width: f32) -> Self {
        self.stroke = Some(color);
        self.stroke_width = width;
        self
    }

    /// Set opacity
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Get the path data string
    pub fn to_path_data(&self) -> String {
        self.commands.iter().map(PathCommand::to_svg).collect()
    }

    /// Render to SVG element
    pub fn to_svg(&self) -> String {
        let mut attrs = format!("class=\"link\" d=\"{}\" fill=\"none\"", self.to_path_data());

        if let Some(stroke) = &self.stroke {
            attrs.push_str(&format!(
                " stroke=\"{}\" stroke-width=\"{}\"",
                stroke.to_css(),
                self.stroke_width
            ));
        }

        if self.opacity < 1.0 {
            attrs.push_str(&format!(" opacity=\"{}\"", self.opacity));
        }

        format!("<path {}/>", attrs)
    }
}

impl Default for Path {
    fn default() -> Self {
        Self::new()
    }
}

/// A text element
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    /// Offset from the parent origin
    pub offset: Position,
    /// Text content
    pub content: String,
    /// Font size in pixels
    pub font_size: f32,
    /// Fill color
    pub fill: Color,
}

impl Text {
    /// Create a new centered label
    pub fn new(content: &str, font_size: f32, fill: Color) -> Self {
        Self {
            offset: Position::default(),
            content: content.to_string(),
            font_size,
            fill,
        }
    }

    /// Set offset (dx, dy)
    pub fn with_offset(mut self, dx: f32, dy: f32) -> Self {
        self.offset = Position::new(dx, dy);
        self
    }

    /// Render to SVG element
    pub fn to_svg(&self) -> String {
        format!(
            "<text class=\"text\" text-anchor=\"middle\" dx=\"{}\" dy=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            self.offset.x,
            self.offset.y,
            self.font_size,
            self.fill.to_css(),
            html_escape(&self.content)
        )
    }
}

/// Escape HTML special characters
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
