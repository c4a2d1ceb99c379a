//! Terminal rendering
//!
//! Contains `RenderMode`, `RenderedGraph` and `TerminalSurface`, a
//! [`RenderSurface`] that keeps elements in memory and rasterizes them into a
//! character buffer on demand.

use std::collections::HashSet;

use indexmap::IndexMap;

use super::types::{LinkKey, Position};
use crate::layout::{keyed_join, JoinSummary, LinkGeometry, NodeVisual, RenderSurface, Viewport, FULL_OPACITY};
use crate::tokenize::Token;

const NODE_COLOR: &str = "\x1b[36m";
const LINK_COLOR: &str = "\x1b[37m";
const DIM_COLOR: &str = "\x1b[90m";

/// Render mode for terminal compatibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Unicode with colors (default)
    #[default]
    Unicode,
    /// ASCII fallback for legacy terminals
    Ascii,
    /// Plain text without colors
    Plain,
}

impl RenderMode {
    fn node_char(self) -> char {
        match self {
            Self::Unicode => '●',
            Self::Ascii | Self::Plain => 'o',
        }
    }

    fn link_char(self) -> char {
        match self {
            Self::Unicode => '·',
            Self::Ascii | Self::Plain => '.',
        }
    }

    fn color(self, color: &'static str) -> Option<&'static str> {
        match self {
            Self::Unicode | Self::Ascii => Some(color),
            Self::Plain => None,
        }
    }
}

/// Rendered graph as string buffer
#[derive(Debug, Clone)]
pub struct RenderedGraph {
    /// Width in characters
    pub width: usize,
    /// Height in characters
    pub height: usize,
    /// Character buffer
    pub buffer: Vec<Vec<char>>,
    /// Color buffer (ANSI codes per cell)
    pub colors: Vec<Vec<Option<&'static str>>>,
}

impl RenderedGraph {
    /// Create new render buffer
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            buffer: vec![vec![' '; width]; height],
            colors: vec![vec![None; width]; height],
        }
    }

    /// Set character at position
    pub fn set(&mut self, x: usize, y: usize, ch: char, color: Option<&'static str>) {
        if let Some(cell) = self.buffer.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = ch;
            self.colors[y][x] = color;
        }
    }

    /// Character at position
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        self.buffer.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Render to string with ANSI colors
    #[must_use]
    pub fn to_string_colored(&self) -> String {
        let mut result = String::new();
        for (row, colors) in self.buffer.iter().zip(&self.colors) {
            for (&ch, color) in row.iter().zip(colors) {
                if let Some(color) = color {
                    result.push_str(color);
                    result.push(ch);
                    result.push_str("\x1b[0m");
                } else {
                    result.push(ch);
                }
            }
            result.push('\n');
        }
        result
    }

    /// Render to plain string (no colors)
    #[must_use]
    pub fn to_string_plain(&self) -> String {
        self.buffer
            .iter()
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone)]
struct TermNode {
    label: String,
    position: Option<Position>,
    opacity: f32,
}

#[derive(Debug, Clone)]
struct TermLink {
    geometry: Option<LinkGeometry>,
    opacity: f32,
}

/// In-memory surface rasterized to the terminal
#[derive(Debug, Clone)]
pub struct TerminalSurface {
    viewport: Viewport,
    nodes: IndexMap<Token, TermNode>,
    links: IndexMap<LinkKey, TermLink>,
    hover: HashSet<Token>,
    /// Render mode
    pub mode: RenderMode,
    /// Show labels
    pub show_labels: bool,
}

impl TerminalSurface {
    /// Create surface for a layout area
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            nodes: IndexMap::new(),
            links: IndexMap::new(),
            hover: HashSet::new(),
            mode: RenderMode::Unicode,
            show_labels: true,
        }
    }

    /// Set render mode
    #[must_use]
    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Resize the layout area; picked up on the next bind
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Number of node elements
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of link elements
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Opacity of a node element
    #[must_use]
    pub fn node_opacity(&self, id: &str) -> Option<f32> {
        self.nodes.get(id).map(|n| n.opacity)
    }

    /// Rasterize into a `cols` x `rows` buffer
    #[must_use]
    pub fn draw(&self, cols: usize, rows: usize) -> RenderedGraph {
        let mut output = RenderedGraph::new(cols, rows);

        // Links first so nodes draw on top
        for link in self.links.values() {
            if let Some(geometry) = link.geometry {
                let color = if link.opacity < FULL_OPACITY { DIM_COLOR } else { LINK_COLOR };
                self.draw_link(&mut output, &geometry, color);
            }
        }

        for node in self.nodes.values() {
            if let Some(position) = node.position {
                let color = if node.opacity < FULL_OPACITY { DIM_COLOR } else { NODE_COLOR };
                self.draw_node(&mut output, node, position, color);
            }
        }

        output
    }

    fn to_cell(&self, position: Position, output: &RenderedGraph) -> (i32, i32) {
        let w = self.viewport.width.max(1.0);
        let h = self.viewport.height.max(1.0);
        (
            (position.x / w * output.width as f32) as i32,
            (position.y / h * output.height as f32) as i32,
        )
    }

    fn draw_node(&self, output: &mut RenderedGraph, node: &TermNode, position: Position, color: &'static str) {
        let (x, y) = self.to_cell(position, output);
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let color = self.mode.color(color);
        output.set(x, y, self.mode.node_char(), color);

        if self.show_labels {
            let label_start = x.saturating_add(2);
            for (i, c) in node.label.chars().take(10).enumerate() {
                output.set(label_start + i, y, c, color);
            }
        }
    }

    fn draw_link(&self, output: &mut RenderedGraph, geometry: &LinkGeometry, color: &'static str) {
        let (x1, y1) = self.to_cell(geometry.source, output);
        let (x2, y2) = self.to_cell(geometry.target, output);

        // Bresenham's line algorithm
        let dx = (x2 - x1).abs();
        let dy = (y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx - dy;

        let mut x = x1;
        let mut y = y1;
        let ch = self.mode.link_char();
        let color = self.mode.color(color);

        while x != x2 || y != y2 {
            if x >= 0 && y >= 0 && output.get(x as usize, y as usize) == Some(' ') {
                output.set(x as usize, y as usize, ch, color);
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }
}

impl RenderSurface for TerminalSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn join_links(&mut self, keys: &[LinkKey]) -> JoinSummary {
        keyed_join(
            &mut self.links,
            keys,
            LinkKey::clone,
            |_| TermLink {
                geometry: None,
                opacity: FULL_OPACITY,
            },
            |_, _| false,
        )
    }

    fn join_nodes(&mut self, nodes: &[NodeVisual]) -> JoinSummary {
        keyed_join(
            &mut self.nodes,
            nodes,
            |v| v.id.clone(),
            |v| TermNode {
                label: v.label.clone(),
                position: None,
                opacity: FULL_OPACITY,
            },
            |node, v| {
                if node.label == v.label {
                    false
                } else {
                    node.label = v.label.clone();
                    true
                }
            },
        )
    }

    fn set_link_geometry(&mut self, key: &LinkKey, geometry: LinkGeometry) {
        if let Some(link) = self.links.get_mut(key) {
            link.geometry = Some(geometry);
        }
    }

    fn set_node_position(&mut self, id: &str, position: Position) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.position = Some(position);
        }
    }

    fn set_node_opacity(&mut self, id: &str, opacity: f32) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.opacity = opacity;
        }
    }

    fn set_link_opacity(&mut self, key: &LinkKey, opacity: f32) {
        if let Some(link) = self.links.get_mut(key) {
            link.opacity = opacity;
        }
    }

    fn bind_hover(&mut self, ids: &[Token]) {
        self.hover = ids.iter().cloned().collect();
    }

    fn is_hover_target(&self, id: &str) -> bool {
        self.hover.contains(id)
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.links.clear();
        self.hover.clear();
    }
}
