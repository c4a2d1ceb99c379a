//! Hover interaction
//!
//! Pointer enter/leave over a node highlights its neighborhood and reports a
//! focused token to the host. Highlighting is momentary: every event is
//! evaluated against the graph bound at that moment.

use tracing::debug;

use super::surface::RenderSurface;
use crate::graph::TransitionGraph;
use crate::tokenize::Token;

/// Opacity of highlighted and un-highlighted elements
pub const FULL_OPACITY: f32 = 1.0;

/// Host-side focus callbacks
pub trait FocusHost {
    /// A node was entered
    fn on_node_focus(&mut self, token: &str);

    /// The pointer left a node
    fn on_node_unfocus(&mut self);
}

/// Focus state kept by a host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusState {
    focused: Option<Token>,
}

impl FocusState {
    /// Currently focused token
    #[must_use]
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }
}

impl FocusHost for FocusState {
    fn on_node_focus(&mut self, token: &str) {
        self.focused = Some(token.to_string());
    }

    fn on_node_unfocus(&mut self) {
        self.focused = None;
    }
}

impl FocusHost for () {
    fn on_node_focus(&mut self, _token: &str) {}

    fn on_node_unfocus(&mut self) {}
}

/// Pointer event over a node element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerEvent {
    Enter(Token),
    Leave(Token),
}

impl PointerEvent {
    /// Token of the node under the pointer
    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            Self::Enter(t) | Self::Leave(t) => t,
        }
    }
}

/// Translates pointer events into opacity effects and focus callbacks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionController {
    dim_opacity: f32,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl InteractionController {
    /// Create controller with the opacity used for non-neighbors
    #[must_use]
    pub fn new(dim_opacity: f32) -> Self {
        Self { dim_opacity }
    }

    /// Opacity used for elements outside the hovered neighborhood
    #[must_use]
    pub fn dim_opacity(&self) -> f32 {
        self.dim_opacity
    }

    /// Dispatch one event
    pub fn handle<S, H>(&self, event: &PointerEvent, graph: &TransitionGraph, surface: &mut S, host: &mut H)
    where
        S: RenderSurface + ?Sized,
        H: FocusHost + ?Sized,
    {
        match event {
            PointerEvent::Enter(token) => self.pointer_enter(token, graph, surface, host),
            PointerEvent::Leave(token) => self.pointer_leave(token, graph, surface, host),
        }
    }

    /// Highlight `token` and everything connected to it
    pub fn pointer_enter<S, H>(&self, token: &str, graph: &TransitionGraph, surface: &mut S, host: &mut H)
    where
        S: RenderSurface + ?Sized,
        H: FocusHost + ?Sized,
    {
        host.on_node_focus(token);

        let connectivity = graph.connectivity();
        let mut highlighted = 0;
        for node in graph.nodes() {
            let opacity = if connectivity.is_connected(token, &node.id) {
                highlighted += 1;
                FULL_OPACITY
            } else {
                self.dim_opacity
            };
            surface.set_node_opacity(&node.id, opacity);
        }

        for link in graph.links() {
            let opacity = if link.touches(token) {
                FULL_OPACITY
            } else {
                self.dim_opacity
            };
            surface.set_link_opacity(&link.key(), opacity);
        }

        debug!(token, highlighted, "Node focused");
    }

    /// Clear focus and restore every element to full opacity
    pub fn pointer_leave<S, H>(&self, token: &str, graph: &TransitionGraph, surface: &mut S, host: &mut H)
    where
        S: RenderSurface + ?Sized,
        H: FocusHost + ?Sized,
    {
        host.on_node_unfocus();

        for node in graph.nodes() {
            surface.set_node_opacity(&node.id, FULL_OPACITY);
        }
        for link in graph.links() {
            surface.set_link_opacity(&link.key(), FULL_OPACITY);
        }

        debug!(token, "Node unfocused");
    }
}
