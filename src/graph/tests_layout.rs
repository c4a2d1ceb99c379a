//! Layout tests on the terminal surface
//!
//! Settles real graphs and checks what ends up in the character buffer.

use super::*;
use crate::chain::TransitionModel;
use crate::config::VizConfig;
use crate::layout::{FocusState, LayoutEngine, PointerEvent, RenderSurface, Viewport};
use crate::tokenize::tokenize;

fn settled(text: &str) -> LayoutEngine<TerminalSurface> {
    let config = VizConfig::default();
    let surface = TerminalSurface::new(config.render.viewport()).with_mode(RenderMode::Plain);
    let mut engine = LayoutEngine::new(surface, config);
    engine.render(TransitionGraph::adapt(&TransitionModel::build(&tokenize(text))));
    engine.run(300);
    engine
}

// -------------------------------------------------------------------------
// Settling
// -------------------------------------------------------------------------

#[test]
fn test_settled_nodes_stay_near_viewport_center() {
    let engine = settled("1 2 3 4 3 2 1");
    let center = engine.surface().viewport().center();
    for node in engine.nodes() {
        let d = node.position().distance(&center);
        assert!(d < 300.0, "{} drifted {d} from center", node.id);
    }
}

#[test]
fn test_settled_nodes_are_distinct() {
    let engine = settled("a b c d e a");
    let nodes = engine.nodes();
    for (i, a) in nodes.iter().enumerate() {
        for b in &nodes[i + 1..] {
            assert!(a.position().distance(&b.position()) > 1.0);
        }
    }
}

#[test]
fn test_draw_contains_every_label() {
    let engine = settled("red green blue");
    let out = engine.surface().draw(160, 60).to_string_plain();
    for label in ["red", "green", "blue"] {
        assert!(out.contains(label), "missing {label} in\n{out}");
    }
}

#[test]
fn test_draw_empty_graph_is_blank() {
    let engine = settled("");
    let out = engine.surface().draw(40, 10).to_string_plain();
    assert!(out.trim().is_empty());
}

// -------------------------------------------------------------------------
// Highlighting
// -------------------------------------------------------------------------

#[test]
fn test_focus_dims_only_outside_neighborhood() {
    let mut engine = settled("a b c d");
    let mut focus = FocusState::default();
    engine.handle_pointer(&PointerEvent::Enter("a".into()), &mut focus);

    let surface = engine.surface();
    assert_eq!(surface.node_opacity("a"), Some(1.0));
    assert_eq!(surface.node_opacity("b"), Some(1.0));
    assert_eq!(surface.node_opacity("c"), Some(0.1));
    assert_eq!(surface.node_opacity("d"), Some(0.1));
}

#[test]
fn test_dim_opacity_follows_config() {
    let mut config = VizConfig::default();
    config.render.dim_opacity = 0.3;
    let surface = TerminalSurface::new(Viewport::new(100.0, 100.0));
    let mut engine = LayoutEngine::new(surface, config);
    engine.render(TransitionGraph::adapt(&TransitionModel::build(&tokenize("a b c"))));

    engine.handle_pointer(&PointerEvent::Enter("a".into()), &mut ());
    assert_eq!(engine.surface().node_opacity("c"), Some(0.3));
}

#[test]
fn test_rebuild_on_terminal_surface_keeps_positions() {
    let mut engine = settled("a b");
    let before = engine.node_position("a");
    engine.render(TransitionGraph::adapt(&TransitionModel::build(&tokenize("a b a c"))));
    assert_eq!(engine.node_position("a"), before);
    assert_eq!(engine.surface().node_count(), 3);
}
