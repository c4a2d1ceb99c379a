//! Force simulation
//!
//! The physics capability driven by the layout engine, and a velocity-Verlet
//! implementation with three forces: link springs toward a target distance,
//! many-body repulsion, and a centering translation.
//!
//! ## Academic References
//!
//! - Fruchterman & Reingold (1991) - Force-directed layout
//! - Dwyer (2009) - Scalable, versatile and simple constrained graph layout
//!
//! Integration is iterative; positions settle approximately and are not
//! reproducible bit-for-bit across different node orders. Many-body is the
//! direct O(n²) sum per tick.

use crate::config::LayoutConfig;
use crate::graph::Position;
use crate::tokenize::Token;

/// Per-node simulation record
#[derive(Debug, Clone, PartialEq)]
pub struct SimNode {
    pub id: Token,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// False until the physics assigns an initial position
    pub placed: bool,
}

impl SimNode {
    /// New node without a position
    pub fn new(id: impl Into<Token>) -> Self {
        Self {
            id: id.into(),
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            placed: false,
        }
    }

    /// Node placed at a fixed starting position
    pub fn at(id: impl Into<Token>, position: Position) -> Self {
        Self {
            x: position.x,
            y: position.y,
            placed: true,
            ..Self::new(id)
        }
    }

    /// Current position
    #[must_use]
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Link resolved to node indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimLink {
    pub source: usize,
    pub target: usize,
}

/// Physics capability: forces, energy and stepping
pub trait Physics {
    /// Set force parameters and the centering anchor
    fn configure(&mut self, config: &LayoutConfig, center: Position);

    /// Register the node and link sets; assigns positions to unplaced nodes
    fn initialize(&mut self, nodes: &mut [SimNode], links: &[SimLink]);

    /// Begin ticking at the given energy
    fn start(&mut self, alpha: f32);

    /// Halt ticking; alpha is kept
    fn stop(&mut self);

    /// True while ticks are scheduled
    fn is_running(&self) -> bool;

    /// Current energy
    fn alpha(&self) -> f32;

    /// Advance one tick. Returns false without touching the nodes when not
    /// running. Stops itself once alpha falls below the minimum.
    fn step(&mut self, nodes: &mut [SimNode], links: &[SimLink]) -> bool;
}

/// Radius step of the initial phyllotaxis arrangement
const INITIAL_RADIUS: f32 = 10.0;

/// Squared minimum distance used by the many-body force
const DISTANCE_MIN_SQUARED: f32 = 1.0;

/// Deterministic linear congruential generator for jitter
#[derive(Debug, Clone)]
struct Lcg(u32);

impl Lcg {
    fn next(&mut self) -> f32 {
        self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (self.0 as f64 / 4_294_967_296.0) as f32
    }

    /// Tiny non-zero offset separating coincident nodes
    fn jiggle(&mut self) -> f32 {
        (self.next() - 0.5) * 1e-6
    }
}

/// Built-in force simulation
#[derive(Debug, Clone)]
pub struct ForceSimulation {
    config: LayoutConfig,
    center: Position,
    alpha: f32,
    alpha_target: f32,
    running: bool,
    /// Link bias toward the lower-degree endpoint, per link
    bias: Vec<f32>,
    random: Lcg,
}

impl Default for ForceSimulation {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceSimulation {
    /// Create a stopped simulation with default forces
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: LayoutConfig::default(),
            center: Position::default(),
            alpha: 1.0,
            alpha_target: 0.0,
            running: false,
            bias: Vec::new(),
            random: Lcg(1),
        }
    }

    /// Current centering anchor
    #[must_use]
    pub fn center(&self) -> Position {
        self.center
    }

    fn apply_links(&mut self, nodes: &mut [SimNode], links: &[SimLink]) {
        let distance = self.config.link_distance;
        let strength = self.config.link_strength;

        for (i, link) in links.iter().enumerate() {
            // Self-loops exert no spring force
            if link.source == link.target {
                continue;
            }
            let (Some(source), Some(target)) = (nodes.get(link.source), nodes.get(link.target))
            else {
                continue;
            };

            let mut x = target.x + target.vx - source.x - source.vx;
            let mut y = target.y + target.vy - source.y - source.vy;
            if x == 0.0 {
                x = self.random.jiggle();
            }
            if y == 0.0 {
                y = self.random.jiggle();
            }
            let mut l = (x * x + y * y).sqrt();
            l = (l - distance) / l * self.alpha * strength;
            x *= l;
            y *= l;

            let b = self.bias.get(i).copied().unwrap_or(0.5);
            if let Some(target) = nodes.get_mut(link.target) {
                target.vx -= x * b;
                target.vy -= y * b;
            }
            if let Some(source) = nodes.get_mut(link.source) {
                source.vx += x * (1.0 - b);
                source.vy += y * (1.0 - b);
            }
        }
    }

    fn apply_many_body(&mut self, nodes: &mut [SimNode]) {
        let n = nodes.len();
        let strength = self.config.charge_strength * self.alpha;
        let mut deltas = vec![(0.0_f32, 0.0_f32); n];

        for (i, delta) in deltas.iter_mut().enumerate() {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let mut x = nodes[j].x - nodes[i].x;
                let mut y = nodes[j].y - nodes[i].y;
                let mut l = x * x + y * y;
                if x == 0.0 {
                    x = self.random.jiggle();
                    l += x * x;
                }
                if y == 0.0 {
                    y = self.random.jiggle();
                    l += y * y;
                }
                if l < DISTANCE_MIN_SQUARED {
                    l = (DISTANCE_MIN_SQUARED * l).sqrt();
                }
                delta.0 += x * strength / l;
                delta.1 += y * strength / l;
            }
        }

        for (node, (dx, dy)) in nodes.iter_mut().zip(deltas) {
            node.vx += dx;
            node.vy += dy;
        }
    }

    fn apply_center(&self, nodes: &mut [SimNode]) {
        if nodes.is_empty() {
            return;
        }
        let n = nodes.len() as f32;
        let (sx, sy) = nodes
            .iter()
            .fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
        let shift_x = (sx / n - self.center.x) * self.config.center_strength;
        let shift_y = (sy / n - self.center.y) * self.config.center_strength;
        for node in nodes.iter_mut() {
            node.x -= shift_x;
            node.y -= shift_y;
        }
    }
}

impl Physics for ForceSimulation {
    fn configure(&mut self, config: &LayoutConfig, center: Position) {
        self.config = config.clone();
        self.center = center;
    }

    fn initialize(&mut self, nodes: &mut [SimNode], links: &[SimLink]) {
        let angle_step = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
        for (i, node) in nodes.iter_mut().enumerate() {
            if node.placed {
                continue;
            }
            let radius = INITIAL_RADIUS * (0.5 + i as f32).sqrt();
            let angle = i as f32 * angle_step;
            node.x = self.center.x + radius * angle.cos();
            node.y = self.center.y + radius * angle.sin();
            node.vx = 0.0;
            node.vy = 0.0;
            node.placed = true;
        }

        let mut degree = vec![0_usize; nodes.len()];
        for link in links {
            if let Some(d) = degree.get_mut(link.source) {
                *d += 1;
            }
            if let Some(d) = degree.get_mut(link.target) {
                *d += 1;
            }
        }
        self.bias = links
            .iter()
            .map(|link| {
                let s = degree.get(link.source).copied().unwrap_or(0) as f32;
                let t = degree.get(link.target).copied().unwrap_or(0) as f32;
                if s + t > 0.0 {
                    s / (s + t)
                } else {
                    0.5
                }
            })
            .collect();
    }

    fn start(&mut self, alpha: f32) {
        self.alpha = alpha;
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn alpha(&self) -> f32 {
        self.alpha
    }

    fn step(&mut self, nodes: &mut [SimNode], links: &[SimLink]) -> bool {
        if !self.running {
            return false;
        }

        self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;

        self.apply_links(nodes, links);
        self.apply_many_body(nodes);
        self.apply_center(nodes);

        let keep = 1.0 - self.config.velocity_decay;
        for node in nodes.iter_mut() {
            node.vx *= keep;
            node.vy *= keep;
            node.x += node.vx;
            node.y += node.vy;
        }

        if self.alpha < self.config.alpha_min {
            self.running = false;
        }
        true
    }
}
