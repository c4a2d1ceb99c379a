//! Core tests for transition graph adaptation
//!
//! Tests for node/link derivation, connectivity and neighborhoods.

use super::*;
use crate::chain::TransitionModel;
use crate::tokenize::tokenize;

fn graph_of(text: &str) -> TransitionGraph {
    TransitionGraph::adapt(&TransitionModel::build(&tokenize(text)))
}

// -------------------------------------------------------------------------
// Adaptation Tests
// -------------------------------------------------------------------------

#[test]
fn test_adapt_empty_model() {
    let graph = graph_of("");
    assert!(graph.is_empty());
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.link_count(), 0);
    assert!(graph.connectivity().is_empty());
}

#[test]
fn test_adapt_single_token() {
    let graph = graph_of("alone");
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.link_count(), 0);
    assert!(graph.get_node("alone").is_some());
}

#[test]
fn test_adapt_nodes_follow_first_appearance() {
    let graph = graph_of("1 2 3 2 1");
    let ids: Vec<&str> = graph.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[test]
fn test_adapt_links_carry_chance() {
    let graph = graph_of("1 2 3 2 1");
    assert_eq!(graph.link_count(), 4);

    let from_two: Vec<(&str, f64)> = graph
        .links()
        .iter()
        .filter(|l| l.source == "2")
        .map(|l| (l.target.as_str(), l.value))
        .collect();
    assert_eq!(from_two, vec![("3", 0.5), ("1", 0.5)]);
}

#[test]
fn test_adapt_self_loop() {
    let graph = graph_of("a a a");
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.link_count(), 1);
    let link = &graph.links()[0];
    assert!(link.is_self_loop());
    assert_eq!(link.value, 1.0);
}

#[test]
fn test_adapt_is_deterministic() {
    let model = TransitionModel::build(&tokenize("the cat the dog the cat"));
    let a = TransitionGraph::adapt(&model);
    let b = TransitionGraph::adapt(&model);
    assert_eq!(a.nodes(), b.nodes());
    assert_eq!(a.links(), b.links());
    assert_eq!(a.connectivity(), b.connectivity());
}

// -------------------------------------------------------------------------
// Connectivity Tests
// -------------------------------------------------------------------------

#[test]
fn test_connectivity_is_symmetric_for_directed_link() {
    let graph = graph_of("x y");
    let x = graph.get_node("x").cloned();
    let y = graph.get_node("y").cloned();
    let (Some(x), Some(y)) = (x, y) else {
        panic!("nodes missing");
    };
    assert!(graph.is_connected(&x, &y));
    assert!(graph.is_connected(&y, &x));
}

#[test]
fn test_connectivity_is_reflexive() {
    let graph = graph_of("x y z");
    let Some(z) = graph.get_node("z").cloned() else {
        panic!("node missing");
    };
    assert!(graph.is_connected(&z, &z));
}

#[test]
fn test_connectivity_excludes_two_hop_nodes() {
    let graph = graph_of("x y z");
    assert!(!graph.connectivity().is_connected("x", "z"));
}

#[test]
fn test_neighbors_are_outgoing_targets() {
    let graph = graph_of("1 2 3 2 1");
    assert_eq!(graph.neighbors("2"), vec!["3", "1"]);
    assert_eq!(graph.neighbors("3"), vec!["2"]);
    assert!(graph.neighbors("missing").is_empty());
}

#[test]
fn test_neighborhood_includes_incoming_and_self() {
    let graph = graph_of("a b c");
    let hood = graph.neighborhood("b");
    assert_eq!(hood.len(), 3);
    assert!(hood.contains("a"));
    assert!(hood.contains("b"));
    assert!(hood.contains("c"));

    let edge = graph.neighborhood("a");
    assert!(!edge.contains("c"));
}

#[test]
fn test_links_touching() {
    let graph = graph_of("a b c");
    assert_eq!(graph.links_touching("b").count(), 2);
    assert_eq!(graph.links_touching("a").count(), 1);
}
