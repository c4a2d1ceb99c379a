//! SVG document surface
//!
//! Keeps one group per node (marker + label) and one arc per link, keyed the
//! same way the layout engine binds them, and serializes the current state
//! as a standalone document.

use std::collections::HashSet;
use std::fmt::Write as _;

use indexmap::IndexMap;

use super::palette::ChainPalette;
use super::shapes::{html_escape, Circle, Path, Text};
use crate::error::Result;
use crate::graph::{LinkKey, Position};
use crate::layout::{keyed_join, JoinSummary, LinkGeometry, NodeVisual, RenderSurface, Viewport, FULL_OPACITY};
use crate::tokenize::Token;

const LABEL_DY: f32 = 5.0;
const LINK_STROKE_WIDTH: f32 = 1.0;

#[derive(Debug, Clone)]
struct NodeGroup {
    visual: NodeVisual,
    marker: Circle,
    label: Text,
    position: Option<Position>,
    opacity: f32,
    builds: usize,
}

#[derive(Debug, Clone)]
struct LinkArc {
    geometry: Option<LinkGeometry>,
    opacity: f32,
}

fn build_children(palette: &ChainPalette, visual: &NodeVisual) -> (Circle, Text) {
    let marker = Circle::new(0.0, 0.0, visual.radius)
        .with_fill(palette.node_fill)
        .with_stroke(palette.node_stroke, 1.0);
    let label = Text::new(&visual.label, visual.font_size, palette.label).with_offset(0.0, LABEL_DY);
    (marker, label)
}

/// Render surface producing an SVG document
#[derive(Debug, Clone)]
pub struct SvgSurface {
    viewport: Viewport,
    palette: ChainPalette,
    nodes: IndexMap<Token, NodeGroup>,
    links: IndexMap<LinkKey, LinkArc>,
    hover: HashSet<Token>,
}

impl SvgSurface {
    /// Create surface with the default palette
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self::with_palette(viewport, ChainPalette::default())
    }

    /// Create surface with a custom palette
    #[must_use]
    pub fn with_palette(viewport: Viewport, palette: ChainPalette) -> Self {
        Self {
            viewport,
            palette,
            nodes: IndexMap::new(),
            links: IndexMap::new(),
            hover: HashSet::new(),
        }
    }

    /// Resize the canvas; picked up on the next bind
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Number of node groups
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of link arcs
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Node ids in document order
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Opacity of a node group
    #[must_use]
    pub fn node_opacity(&self, id: &str) -> Option<f32> {
        self.nodes.get(id).map(|n| n.opacity)
    }

    /// Opacity of a link arc
    #[must_use]
    pub fn link_opacity(&self, key: &LinkKey) -> Option<f32> {
        self.links.get(key).map(|l| l.opacity)
    }

    /// Times the marker and label of a node were built
    #[must_use]
    pub fn node_builds(&self, id: &str) -> Option<usize> {
        self.nodes.get(id).map(|n| n.builds)
    }

    /// Marker radius of a node
    #[must_use]
    pub fn node_radius(&self, id: &str) -> Option<f32> {
        self.nodes.get(id).map(|n| n.marker.radius)
    }

    /// `translate(x,y)` of a node group, once positioned
    #[must_use]
    pub fn node_transform(&self, id: &str) -> Option<String> {
        let p = self.nodes.get(id)?.position?;
        Some(format!("translate({},{})", p.x, p.y))
    }

    /// Arc path data of a link, once positioned
    #[must_use]
    pub fn link_path(&self, key: &LinkKey) -> Option<String> {
        let geometry = self.links.get(key)?.geometry?;
        Some(Path::link_arc(&geometry).to_path_data())
    }

    /// Serialize the current state
    #[must_use]
    pub fn to_svg(&self) -> String {
        let Viewport { width, height } = self.viewport;
        let mut out = String::new();
        let _ = writeln!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {width} {height}\" width=\"{width}\" height=\"{height}\">"
        );
        let _ = writeln!(
            out,
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            self.palette.background.to_css()
        );

        out.push_str("<g class=\"links\">\n");
        for link in self.links.values() {
            if let Some(geometry) = link.geometry {
                let path = Path::link_arc(&geometry)
                    .with_stroke(self.palette.link, LINK_STROKE_WIDTH)
                    .with_opacity(link.opacity);
                let _ = writeln!(out, "{}", path.to_svg());
            }
        }
        out.push_str("</g>\n");

        out.push_str("<g class=\"nodes\">\n");
        for (id, node) in &self.nodes {
            let Some(p) = node.position else {
                continue;
            };
            let opacity = if node.opacity < FULL_OPACITY {
                format!(" opacity=\"{}\"", node.opacity)
            } else {
                String::new()
            };
            let _ = writeln!(
                out,
                "<g class=\"node\" data-id=\"{}\" transform=\"translate({},{})\"{}>{}{}</g>",
                html_escape(id),
                p.x,
                p.y,
                opacity,
                node.marker.to_svg(),
                node.label.to_svg()
            );
        }
        out.push_str("</g>\n</svg>\n");
        out
    }

    /// Write the serialized document to a file
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        std::fs::write(path, self.to_svg())?;
        Ok(())
    }
}

impl RenderSurface for SvgSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn join_links(&mut self, keys: &[LinkKey]) -> JoinSummary {
        keyed_join(
            &mut self.links,
            keys,
            LinkKey::clone,
            |_| LinkArc {
                geometry: None,
                opacity: FULL_OPACITY,
            },
            |_, _| false,
        )
    }

    fn join_nodes(&mut self, nodes: &[NodeVisual]) -> JoinSummary {
        let palette = &self.palette;
        keyed_join(
            &mut self.nodes,
            nodes,
            |v| v.id.clone(),
            |v| {
                let (marker, label) = build_children(palette, v);
                NodeGroup {
                    visual: v.clone(),
                    marker,
                    label,
                    position: None,
                    opacity: FULL_OPACITY,
                    builds: 1,
                }
            },
            |group, v| {
                if group.visual == *v {
                    return false;
                }
                let (marker, label) = build_children(palette, v);
                group.visual = v.clone();
                group.marker = marker;
                group.label = label;
                group.builds += 1;
                true
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

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> SvgSurface {
        SvgSurface::new(Viewport::new(200.0, 100.0))
    }

    #[test]
    fn test_join_nodes_builds_children_once() {
        let mut s = surface();
        let visuals = vec![NodeVisual::for_token("a", 16.0), NodeVisual::for_token("bb", 16.0)];
        let first = s.join_nodes(&visuals);
        assert_eq!(first.entered, 2);
        assert_eq!(first.children_built, 2);

        let second = s.join_nodes(&visuals);
        assert_eq!(second.updated, 2);
        assert_eq!(second.children_built, 0);
        assert_eq!(s.node_builds("a"), Some(1));
    }

    #[test]
    fn test_join_nodes_rebuilds_on_font_change() {
        let mut s = surface();
        s.join_nodes(&[NodeVisual::for_token("a", 16.0)]);
        let summary = s.join_nodes(&[NodeVisual::for_token("a", 24.0)]);
        assert_eq!(summary.children_built, 1);
        assert_eq!(s.node_builds("a"), Some(2));
        assert_eq!(s.node_radius("a"), Some(13.0));
    }

    #[test]
    fn test_join_removes_exited() {
        let mut s = surface();
        s.join_links(&[LinkKey::new("a", "b"), LinkKey::new("b", "a")]);
        let summary = s.join_links(&[LinkKey::new("b", "a")]);
        assert_eq!(summary.exited, 1);
        assert_eq!(s.link_count(), 1);
        assert_eq!(s.link_opacity(&LinkKey::new("a", "b")), None);
    }

    #[test]
    fn test_transform_and_path_after_positioning() {
        let mut s = surface();
        let key = LinkKey::new("a", "b");
        s.join_nodes(&[NodeVisual::for_token("a", 16.0)]);
        s.join_links(std::slice::from_ref(&key));
        assert_eq!(s.node_transform("a"), None);

        s.set_node_position("a", Position::new(10.0, 20.0));
        s.set_link_geometry(&key, LinkGeometry::new(Position::new(0.0, 0.0), Position::new(3.0, 4.0)));
        assert_eq!(s.node_transform("a").as_deref(), Some("translate(10,20)"));
        assert_eq!(s.link_path(&key).as_deref(), Some("M0,0A5,5 0 0,1 3,4"));
    }

    #[test]
    fn test_document_structure() {
        let mut s = surface();
        s.join_nodes(&[NodeVisual::for_token("hi", 16.0)]);
        s.set_node_position("hi", Position::new(50.0, 50.0));
        s.set_node_opacity("hi", 0.1);

        let svg = s.to_svg();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 200 100\""));
        assert!(svg.contains("<g class=\"node\" data-id=\"hi\" transform=\"translate(50,50)\" opacity=\"0.1\">"));
        assert!(svg.contains("stroke=\"rgba(255, 255, 255, 0.50)\""));
        assert!(svg.contains(">hi</text>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_unpositioned_elements_are_not_serialized() {
        let mut s = surface();
        s.join_nodes(&[NodeVisual::for_token("hidden", 16.0)]);
        s.join_links(&[LinkKey::new("hidden", "hidden")]);
        let svg = s.to_svg();
        assert!(!svg.contains("hidden"));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn test_save_writes_document() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("chain.svg");
        surface().save(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<svg"));
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = surface().save(&dir.path().join("nope/chain.svg")).unwrap_err();
        assert!(matches!(err, crate::ChainvizError::Output(_)));
    }

    #[test]
    fn test_hover_targets_replaced_on_bind() {
        let mut s = surface();
        s.bind_hover(&["a".to_string()]);
        assert!(s.is_hover_target("a"));
        s.bind_hover(&["b".to_string()]);
        assert!(!s.is_hover_target("a"));
        assert!(s.is_hover_target("b"));
    }
}
