//! Render boundary
//!
//! The layout engine drives a [`RenderSurface`]: it binds keyed node and link
//! sets with enter/update/exit semantics, pushes per-tick geometry, and sets
//! per-element opacity for highlighting. Surfaces own the actual elements.

use std::hash::Hash;

use indexmap::IndexMap;

use crate::graph::{LinkKey, Position};
use crate::tokenize::Token;

/// Drawing area dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create new viewport
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Center point, used as the anchor of the centering force
    #[must_use]
    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Marker radius for a token: longer tokens get larger markers so the label
/// fits inside.
#[must_use]
pub fn marker_radius(id: &str, font_size: f32) -> f32 {
    id.chars().count() as f32 * (font_size / 3.0) + 5.0
}

/// Visual attributes of a node's marker and label sub-elements
#[derive(Debug, Clone, PartialEq)]
pub struct NodeVisual {
    pub id: Token,
    pub radius: f32,
    pub label: String,
    pub font_size: f32,
}

impl NodeVisual {
    /// Visual for a token at the given font size
    #[must_use]
    pub fn for_token(id: &str, font_size: f32) -> Self {
        Self {
            id: id.to_string(),
            radius: marker_radius(id, font_size),
            label: id.to_string(),
            font_size,
        }
    }
}

/// Endpoints of a link at the current tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkGeometry {
    pub source: Position,
    pub target: Position,
}

impl LinkGeometry {
    /// Create new geometry
    #[must_use]
    pub const fn new(source: Position, target: Position) -> Self {
        Self { source, target }
    }

    /// Radius of the arc drawn between the endpoints (their distance)
    #[must_use]
    pub fn arc_radius(&self) -> f32 {
        self.source.distance(&self.target)
    }
}

/// Outcome of a keyed join
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JoinSummary {
    /// Elements created for new keys
    pub entered: usize,
    /// Existing elements kept for matching keys
    pub updated: usize,
    /// Elements removed for keys no longer present
    pub exited: usize,
    /// Elements whose sub-elements were built, on enter or on change
    pub children_built: usize,
}

/// Rendering capability consumed by the layout engine
pub trait RenderSurface {
    /// Current drawing area. Read once per bind, not tracked.
    fn viewport(&self) -> Viewport;

    /// Key link elements by `(source, target)`; create, keep or remove.
    fn join_links(&mut self, keys: &[LinkKey]) -> JoinSummary;

    /// Key node elements by id; create, keep or remove. Marker and label are
    /// rebuilt only when their visual attributes differ.
    fn join_nodes(&mut self, nodes: &[NodeVisual]) -> JoinSummary;

    /// Per-tick link geometry
    fn set_link_geometry(&mut self, key: &LinkKey, geometry: LinkGeometry);

    /// Per-tick node translation
    fn set_node_position(&mut self, id: &str, position: Position);

    /// Node group opacity
    fn set_node_opacity(&mut self, id: &str, opacity: f32);

    /// Link opacity
    fn set_link_opacity(&mut self, key: &LinkKey, opacity: f32);

    /// Replace the set of nodes that receive pointer enter/leave events
    fn bind_hover(&mut self, ids: &[Token]);

    /// True when pointer events for `id` are routed to the engine
    fn is_hover_target(&self, id: &str) -> bool;

    /// Remove every element (view teardown)
    fn clear(&mut self);
}

/// Keyed data join over an ordered element map.
///
/// Elements are reordered to follow `data`. `enter` builds an element for a new
/// key; `update` refreshes an existing one and returns true when it rebuilt
/// the element's children.
pub fn keyed_join<K, V, T>(
    elements: &mut IndexMap<K, V>,
    data: &[T],
    key: impl Fn(&T) -> K,
    mut enter: impl FnMut(&T) -> V,
    mut update: impl FnMut(&mut V, &T) -> bool,
) -> JoinSummary
where
    K: Hash + Eq,
{
    let mut summary = JoinSummary::default();
    let mut joined = IndexMap::with_capacity(data.len());

    for datum in data {
        let k = key(datum);
        if joined.contains_key(&k) {
            continue;
        }
        match elements.swap_remove(&k) {
            Some(mut element) => {
                summary.updated += 1;
                if update(&mut element, datum) {
                    summary.children_built += 1;
                }
                joined.insert(k, element);
            }
            None => {
                summary.entered += 1;
                summary.children_built += 1;
                joined.insert(k, enter(datum));
            }
        }
    }

    summary.exited = elements.len();
    *elements = joined;
    summary
}
