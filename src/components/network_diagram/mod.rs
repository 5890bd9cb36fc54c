//! Force-directed network diagram: a pure simulation/interaction engine plus
//! the canvas component that drives it.

mod component;
mod error;
mod render;
pub mod scale;
pub mod simulation;
mod state;
mod timer;
mod types;

pub use component::NetworkDiagram;
pub use error::ConfigurationError;
pub use render::{MUTED_ALPHA, MUTED_COLOR, Style, edge_style, node_style};
pub use state::{Category, DiagramEngine, DragState, HIT_RADIUS, NODE_RADIUS, Node};
pub use types::{CategoryConfig, DiagramConfig, EdgeConfig, NodeConfig, Point};
