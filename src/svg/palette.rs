//! Colors for the SVG surface

/// An RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color with full opacity
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Convert to CSS hex string (with #)
    pub fn to_css_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Convert to CSS rgba string
    pub fn to_css_rgba(&self) -> String {
        if self.a == 255 {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.2})",
                self.r,
                self.g,
                self.b,
                self.a as f32 / 255.0
            )
        }
    }

    /// CSS value: hex when opaque, rgba otherwise
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            self.to_css_hex()
        } else {
            self.to_css_rgba()
        }
    }

    /// Apply opacity (0.0 - 1.0) to this color
    pub fn with_opacity(&self, opacity: f32) -> Self {
        Self {
            a: (opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..*self
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0, 0, 0)
    }
}

/// Colors of a chain diagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainPalette {
    /// Canvas background
    pub background: Color,
    /// Node marker fill
    pub node_fill: Color,
    /// Node marker outline
    pub node_stroke: Color,
    /// Label text
    pub label: Color,
    /// Link arcs
    pub link: Color,
}

impl ChainPalette {
    /// Light labels on a dark canvas
    pub fn dark() -> Self {
        let white = Color::rgb(255, 255, 255);
        Self {
            background: Color::rgb(0x1C, 0x1B, 0x1F),
            node_fill: Color::rgb(0, 0, 0),
            node_stroke: white.with_opacity(0.5),
            label: white,
            link: Color::rgb(0x93, 0x8F, 0x99),
        }
    }
}

impl Default for ChainPalette {
    fn default() -> Self {
        Self::dark()
    }
}
