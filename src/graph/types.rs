//! Core types for transition graph visualization
//!
//! Contains `Position`, `GraphNode`, `GraphLink` and `LinkKey`.

use serde::{Deserialize, Serialize};

use crate::tokenize::Token;

/// 2D position for layout
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Create new position
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position
    #[must_use]
    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One node per distinct token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: Token,
}

impl GraphNode {
    /// Create new node
    pub fn new(id: impl Into<Token>) -> Self {
        Self { id: id.into() }
    }
}

/// Directed link weighted by transition chance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: Token,
    pub target: Token,
    pub value: f64,
}

impl GraphLink {
    /// Create new link
    pub fn new(source: impl Into<Token>, target: impl Into<Token>, value: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value,
        }
    }

    /// Identity used to key link elements on a surface
    #[must_use]
    pub fn key(&self) -> LinkKey {
        LinkKey::new(self.source.clone(), self.target.clone())
    }

    /// True when either endpoint is `id`
    #[must_use]
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }

    /// Source and target are the same token
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// Directed `(source, target)` identity of a link
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkKey {
    pub source: Token,
    pub target: Token,
}

impl LinkKey {
    /// Create new key
    pub fn new(source: impl Into<Token>, target: impl Into<Token>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}
