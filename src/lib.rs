//! Markov transition graphs of token sequences
//!
//! Text is split into whitespace-delimited tokens, folded into a first-order
//! Markov chain, adapted into a node/link graph and laid out with a
//! force-directed simulation on a pluggable render surface. Hovering a node
//! highlights its neighborhood and narrows the textual chain view to it.
//!
//! ```
//! use chainviz::{tokenize, TransitionModel};
//!
//! let model = TransitionModel::build(&tokenize("1 2 3 2 1"));
//! let chance = model.transition("2", "3").map(|t| t.chance);
//! assert_eq!(chance, Some(0.5));
//! ```

pub mod chain;
pub mod config;
pub mod error;
pub mod graph;
pub mod layout;
pub mod session;
pub mod svg;
pub mod tokenize;

// Re-export key types for convenience
pub use chain::{Successors, Transition, TransitionModel};
pub use config::VizConfig;
pub use error::{ChainvizError, Result};
pub use graph::TransitionGraph;
pub use layout::{LayoutEngine, LayoutPhase};
pub use session::Session;
pub use tokenize::{tokenize, Token};
