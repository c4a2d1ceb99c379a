//! SVG output
//!
//! A [`RenderSurface`](crate::layout::RenderSurface) that renders the chain as
//! arcs between circular markers with centered labels, and serializes to a
//! standalone SVG document.

pub mod palette;
pub mod shapes;
mod surface;

pub use palette::{ChainPalette, Color};
pub use shapes::{Circle, Path, PathCommand, Text};
pub use surface::SvgSurface;
