//! Transition graph
//!
//! Adapts a [`TransitionModel`] into the node list, directed link list and
//! connectivity index consumed by the layout engine.

use std::collections::HashSet;

use super::connectivity::ConnectivityIndex;
use super::types::{GraphLink, GraphNode};
use crate::chain::TransitionModel;

/// Nodes, links and connectivity for one adaptation of a model
#[derive(Debug, Clone, Default)]
pub struct TransitionGraph {
    /// One node per token, in model key order
    pub(crate) nodes: Vec<GraphNode>,
    /// One link per observed transition
    pub(crate) links: Vec<GraphLink>,
    /// Unordered adjacency for highlighting
    connectivity: ConnectivityIndex,
}

impl TransitionGraph {
    /// Adapt a transition model
    #[must_use]
    pub fn adapt(model: &TransitionModel) -> Self {
        let nodes: Vec<GraphNode> = model.tokens().map(|t| GraphNode::new(t.as_str())).collect();

        let links: Vec<GraphLink> = model
            .transitions()
            .filter(|(_, _, t)| t.count >= 1)
            .map(|(from, to, t)| GraphLink::new(from.as_str(), to.as_str(), t.chance))
            .collect();

        let connectivity = ConnectivityIndex::from_links(&links);

        Self {
            nodes,
            links,
            connectivity,
        }
    }

    /// Get node count
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get link count
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// True when there are no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in model key order
    #[must_use]
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Directed links
    #[must_use]
    pub fn links(&self) -> &[GraphLink] {
        &self.links
    }

    /// Connectivity index of the current links
    #[must_use]
    pub fn connectivity(&self) -> &ConnectivityIndex {
        &self.connectivity
    }

    /// Get node by ID
    #[must_use]
    pub fn get_node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Check whether two nodes are adjacent (or identical)
    #[must_use]
    pub fn is_connected(&self, a: &GraphNode, b: &GraphNode) -> bool {
        self.connectivity.is_connected(&a.id, &b.id)
    }

    /// Outgoing targets of a node
    #[must_use]
    pub fn neighbors(&self, id: &str) -> Vec<&str> {
        self.links
            .iter()
            .filter(|l| l.source == id)
            .map(|l| l.target.as_str())
            .collect()
    }

    /// Links with `id` as either endpoint
    pub fn links_touching<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a GraphLink> + 'a {
        self.links.iter().filter(move |l| l.touches(id))
    }

    /// IDs of every node connected to `id`, including itself
    #[must_use]
    pub fn neighborhood(&self, id: &str) -> HashSet<&str> {
        self.nodes
            .iter()
            .map(|n| n.id.as_str())
            .filter(|other| self.connectivity.is_connected(id, other))
            .collect()
    }
}
