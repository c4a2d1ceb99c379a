//! Transition graph
//!
//! Node/link view of a [`TransitionModel`](crate::chain::TransitionModel) plus
//! the in-memory terminal surface it is drawn on.
//!
//! ## Layout of this module
//!
//! - `types`: positions, nodes, directed links and link keys
//! - `connectivity`: unordered adjacency used for hover highlighting
//! - `graph_core`: adaptation from the transition model
//! - `filtering`: focus view of the model for the textual panel
//! - `rendering`: terminal buffer and [`TerminalSurface`]

mod connectivity;
mod filtering;
mod graph_core;
mod rendering;
mod types;

#[cfg(test)]
mod tests_core;
#[cfg(test)]
mod tests_filtering;
#[cfg(test)]
mod tests_layout;

pub use connectivity::ConnectivityIndex;
pub use filtering::{focus_view, focus_view_json, ChainView};
pub use graph_core::TransitionGraph;
pub use rendering::{RenderMode, RenderedGraph, TerminalSurface};
pub use types::{GraphLink, GraphNode, LinkKey, Position};
