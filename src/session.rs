//! Host session
//!
//! Owns the input text and everything derived from it. Replacing the input
//! re-derives tokens, model and graph in full and hands the graph to the
//! layout engine; pointer events update the focused token, which in turn
//! selects what the debug panel shows.

use tracing::{debug, info};

use crate::chain::TransitionModel;
use crate::config::VizConfig;
use crate::error::Result;
use crate::graph::{focus_view, ChainView, TransitionGraph};
use crate::layout::{FocusState, LayoutEngine, PointerEvent, RenderReport, RenderSurface};
use crate::tokenize::{tokenize, Token};

/// One visualization session bound to a render surface
#[derive(Debug)]
pub struct Session<S: RenderSurface> {
    input: String,
    tokens: Vec<Token>,
    model: TransitionModel,
    focus: FocusState,
    engine: LayoutEngine<S>,
    max_ticks: usize,
}

impl<S: RenderSurface> Session<S> {
    /// Start an empty session
    pub fn new(surface: S, config: VizConfig) -> Self {
        let max_ticks = config.layout.max_ticks;
        Self {
            input: String::new(),
            tokens: Vec::new(),
            model: TransitionModel::new(),
            focus: FocusState::default(),
            engine: LayoutEngine::new(surface, config),
            max_ticks,
        }
    }

    /// Replace the input and run a full rebuild cycle
    pub fn set_input(&mut self, input: impl Into<String>) -> RenderReport {
        self.input = input.into();
        self.tokens = tokenize(&self.input);
        self.model = TransitionModel::build(&self.tokens);
        let graph = TransitionGraph::adapt(&self.model);

        info!(
            tokens = self.tokens.len(),
            nodes = graph.node_count(),
            links = graph.link_count(),
            "Input rebuilt"
        );
        self.engine.render(graph)
    }

    /// Route a pointer event; returns false when it was ignored
    pub fn pointer(&mut self, event: &PointerEvent) -> bool {
        let handled = self.engine.handle_pointer(event, &mut self.focus);
        debug!(handled, focused = ?self.focus.focused(), "Pointer event");
        handled
    }

    /// Pointer entered a node
    pub fn hover(&mut self, token: &str) -> bool {
        self.pointer(&PointerEvent::Enter(token.to_string()))
    }

    /// Pointer left a node
    pub fn unhover(&mut self, token: &str) -> bool {
        self.pointer(&PointerEvent::Leave(token.to_string()))
    }

    /// One cooperative layout tick
    pub fn tick(&mut self) -> bool {
        self.engine.tick()
    }

    /// Tick until the layout settles, bounded by the configured tick limit
    pub fn settle(&mut self) -> usize {
        let ticks = self.engine.run(self.max_ticks);
        debug!(ticks, alpha = self.engine.alpha(), "Layout settled");
        ticks
    }

    /// Current input text
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Tokens of the current input
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Transition model of the current input
    #[must_use]
    pub fn model(&self) -> &TransitionModel {
        &self.model
    }

    /// Focused token, if any
    #[must_use]
    pub fn focused(&self) -> Option<&str> {
        self.focus.focused()
    }

    /// Full model, or the focused token's entry while a node is hovered
    #[must_use]
    pub fn visible(&self) -> ChainView<'_> {
        focus_view(&self.model, self.focus.focused())
    }

    /// Debug panel text
    pub fn visible_json(&self) -> Result<String> {
        self.visible().to_json_pretty()
    }

    /// Layout engine
    #[must_use]
    pub fn engine(&self) -> &LayoutEngine<S> {
        &self.engine
    }

    /// Mutable layout engine
    pub fn engine_mut(&mut self) -> &mut LayoutEngine<S> {
        &mut self.engine
    }

    /// Render surface
    #[must_use]
    pub fn surface(&self) -> &S {
        self.engine.surface()
    }

    /// Tear down the view, keeping input and model
    pub fn close(&mut self) {
        self.engine.teardown();
    }

    /// Detach the surface
    pub fn into_surface(self) -> S {
        self.engine.into_surface()
    }
}
