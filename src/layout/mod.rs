//! Layout engine
//!
//! Owns the running force simulation for one view and reconciles each newly
//! adapted graph against it.
//!
//! ## States
//!
//! - **Uninitialized**: no elements bound. The first [`LayoutEngine::render`]
//!   binds everything, configures the forces and starts at alpha 1.0.
//! - **Running**: later renders stop the simulation before touching any state,
//!   carry position and velocity over for nodes that persist (identity = id),
//!   re-join elements by key, and reheat at a moderate alpha.
//!
//! Ticks are cooperative: the host calls [`LayoutEngine::tick`] from its event
//! loop, and each call returns before the next is made.

pub mod interaction;
pub mod simulation;
pub mod surface;

use std::collections::HashMap;

use tracing::{debug, info, trace};

use crate::config::VizConfig;
use crate::graph::{LinkKey, Position, TransitionGraph};
use crate::tokenize::Token;

pub use interaction::{FocusHost, FocusState, InteractionController, PointerEvent, FULL_OPACITY};
pub use simulation::{ForceSimulation, Physics, SimLink, SimNode};
pub use surface::{
    keyed_join, marker_radius, JoinSummary, LinkGeometry, NodeVisual, RenderSurface, Viewport,
};

/// Alpha of a cold start
pub const INITIAL_ALPHA: f32 = 1.0;

/// Engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutPhase {
    /// Nothing bound yet, or torn down
    Uninitialized,
    /// Elements bound and simulation registered
    Running,
}

/// Result of one render call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderReport {
    /// Phase before the call
    pub from: LayoutPhase,
    /// Link join outcome
    pub links: JoinSummary,
    /// Node join outcome
    pub nodes: JoinSummary,
}

/// Simulation records and bindings of the current view
#[derive(Debug, Clone)]
pub struct SimulationState {
    nodes: Vec<SimNode>,
    links: Vec<SimLink>,
    link_keys: Vec<LinkKey>,
    graph: TransitionGraph,
    center: Position,
}

impl SimulationState {
    /// Node records with current position and velocity
    #[must_use]
    pub fn nodes(&self) -> &[SimNode] {
        &self.nodes
    }

    /// Links resolved to node indices
    #[must_use]
    pub fn links(&self) -> &[SimLink] {
        &self.links
    }

    /// Graph currently bound to the surface
    #[must_use]
    pub fn graph(&self) -> &TransitionGraph {
        &self.graph
    }

    /// Centering anchor read at the last bind
    #[must_use]
    pub fn center(&self) -> Position {
        self.center
    }
}

/// Force-directed layout for a single view
#[derive(Debug)]
pub struct LayoutEngine<S: RenderSurface, P: Physics = ForceSimulation> {
    surface: S,
    physics: P,
    config: VizConfig,
    interaction: InteractionController,
    state: Option<SimulationState>,
}

impl<S: RenderSurface> LayoutEngine<S, ForceSimulation> {
    /// Attach to a surface using the built-in force simulation
    pub fn new(surface: S, config: VizConfig) -> Self {
        Self::with_physics(surface, ForceSimulation::new(), config)
    }
}

impl<S: RenderSurface, P: Physics> LayoutEngine<S, P> {
    /// Attach to a surface with an injected physics implementation
    pub fn with_physics(surface: S, physics: P, config: VizConfig) -> Self {
        let interaction = InteractionController::new(config.render.dim_opacity);
        Self {
            surface,
            physics,
            config,
            interaction,
            state: None,
        }
    }

    /// Current phase
    #[must_use]
    pub fn phase(&self) -> LayoutPhase {
        if self.state.is_some() {
            LayoutPhase::Running
        } else {
            LayoutPhase::Uninitialized
        }
    }

    /// Simulation state, when running
    #[must_use]
    pub fn state(&self) -> Option<&SimulationState> {
        self.state.as_ref()
    }

    /// Current simulation energy
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.physics.alpha()
    }

    /// True while ticks would still move nodes
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.physics.is_running()
    }

    /// Position of a node, if bound
    #[must_use]
    pub fn node_position(&self, id: &str) -> Option<Position> {
        self.state
            .as_ref()?
            .nodes
            .iter()
            .find(|n| n.id == id)
            .map(SimNode::position)
    }

    /// Node records of the current bind, empty when uninitialized
    #[must_use]
    pub fn nodes(&self) -> &[SimNode] {
        self.state.as_ref().map(|s| s.nodes.as_slice()).unwrap_or_default()
    }

    /// Graph of the current bind
    #[must_use]
    pub fn graph(&self) -> Option<&TransitionGraph> {
        self.state.as_ref().map(|s| &s.graph)
    }

    /// Render surface
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable render surface, e.g. to resize it
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Physics implementation
    #[must_use]
    pub fn physics(&self) -> &P {
        &self.physics
    }

    /// Bind a newly adapted graph, initializing or reconciling
    pub fn render(&mut self, graph: TransitionGraph) -> RenderReport {
        match self.state.take() {
            None => self.initialize(graph),
            Some(previous) => self.reconcile(previous, graph),
        }
    }

    /// Uninitialized -> Running
    fn initialize(&mut self, graph: TransitionGraph) -> RenderReport {
        let center = self.surface.viewport().center();
        let nodes: Vec<SimNode> = graph.nodes().iter().map(|n| SimNode::new(n.id.as_str())).collect();

        let (links, nodes_join) = self.bind(graph, nodes, center, INITIAL_ALPHA);

        info!(
            nodes = nodes_join.entered,
            links = links.entered,
            "Layout initialized"
        );

        RenderReport {
            from: LayoutPhase::Uninitialized,
            links,
            nodes: nodes_join,
        }
    }

    /// Running -> Running
    fn reconcile(&mut self, previous: SimulationState, graph: TransitionGraph) -> RenderReport {
        // Nothing may tick while the node and link sets are replaced
        self.physics.stop();

        let mut old: HashMap<Token, SimNode> = previous
            .nodes
            .into_iter()
            .map(|n| (n.id.clone(), n))
            .collect();
        let nodes: Vec<SimNode> = graph
            .nodes()
            .iter()
            .map(|n| {
                old.remove(n.id.as_str())
                    .unwrap_or_else(|| SimNode::new(n.id.as_str()))
            })
            .collect();

        let center = self.surface.viewport().center();
        let reheat = self.config.layout.reheat_alpha;
        let (links, nodes_join) = self.bind(graph, nodes, center, reheat);

        debug!(
            entered = nodes_join.entered,
            kept = nodes_join.updated,
            exited = nodes_join.exited,
            rebuilt = nodes_join.children_built,
            links = links.updated + links.entered,
            "Layout reconciled"
        );

        RenderReport {
            from: LayoutPhase::Running,
            links,
            nodes: nodes_join,
        }
    }

    /// Join elements, register with physics and start ticking
    fn bind(
        &mut self,
        graph: TransitionGraph,
        mut nodes: Vec<SimNode>,
        center: Position,
        alpha: f32,
    ) -> (JoinSummary, JoinSummary) {
        let index: HashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect();

        let mut links = Vec::with_capacity(graph.link_count());
        let mut link_keys = Vec::with_capacity(graph.link_count());
        for link in graph.links() {
            if let (Some(&source), Some(&target)) =
                (index.get(link.source.as_str()), index.get(link.target.as_str()))
            {
                links.push(SimLink { source, target });
                link_keys.push(link.key());
            }
        }
        drop(index);

        let font_size = self.config.render.font_size;
        let visuals: Vec<NodeVisual> = graph
            .nodes()
            .iter()
            .map(|n| NodeVisual::for_token(&n.id, font_size))
            .collect();
        let ids: Vec<Token> = graph.nodes().iter().map(|n| n.id.clone()).collect();

        let links_join = self.surface.join_links(&link_keys);
        let nodes_join = self.surface.join_nodes(&visuals);
        self.surface.bind_hover(&ids);

        self.physics.configure(&self.config.layout, center);
        self.physics.initialize(&mut nodes, &links);
        self.physics.start(alpha);

        self.state = Some(SimulationState {
            nodes,
            links,
            link_keys,
            graph,
            center,
        });

        (links_join, nodes_join)
    }

    /// Advance one tick and push positions to the surface.
    ///
    /// Returns false once the simulation has cooled or was stopped.
    pub fn tick(&mut self) -> bool {
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        if !self.physics.step(&mut state.nodes, &state.links) {
            return false;
        }

        for (link, key) in state.links.iter().zip(&state.link_keys) {
            if let (Some(source), Some(target)) =
                (state.nodes.get(link.source), state.nodes.get(link.target))
            {
                self.surface
                    .set_link_geometry(key, LinkGeometry::new(source.position(), target.position()));
            }
        }
        for node in &state.nodes {
            self.surface.set_node_position(&node.id, node.position());
        }

        trace!(alpha = self.physics.alpha(), "Layout tick");
        self.physics.is_running()
    }

    /// Tick until the simulation cools or `max_ticks` is reached.
    /// Returns the number of ticks performed.
    pub fn run(&mut self, max_ticks: usize) -> usize {
        let mut ticks = 0;
        while ticks < max_ticks && self.physics.is_running() {
            ticks += 1;
            if !self.tick() {
                break;
            }
        }
        ticks
    }

    /// Route a pointer event from the surface to the interaction controller.
    ///
    /// Returns false when an enter targets a node without a bound handler.
    /// A leave always clears focus, even for a node removed by a rebuild.
    pub fn handle_pointer<H: FocusHost + ?Sized>(&mut self, event: &PointerEvent, host: &mut H) -> bool {
        let Some(state) = self.state.as_ref() else {
            debug!(token = event.token(), "Pointer event before layout initialized");
            return false;
        };
        if matches!(event, PointerEvent::Enter(_)) && !self.surface.is_hover_target(event.token()) {
            debug!(token = event.token(), "Pointer event on unbound node");
            return false;
        }
        self.interaction
            .handle(event, &state.graph, &mut self.surface, host);
        true
    }

    /// Tear the view down: stop ticking, remove elements, drop state
    pub fn teardown(&mut self) {
        self.physics.stop();
        self.surface.clear();
        if self.state.take().is_some() {
            info!("Layout torn down");
        }
    }

    /// Detach the surface, consuming the engine
    pub fn into_surface(mut self) -> S {
        self.physics.stop();
        self.surface
    }
}
