use std::collections::HashSet;
use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{DiagramEngine, NODE_RADIUS};

const BACKGROUND: &str = "white";
const EDGE_COLOR: &str = "black";
const LABEL_COLOR: &str = "black";
const LABEL_OFFSET: f64 = 30.0;
const LABEL_FONT: &str = "10px sans-serif";

/// Color of de-emphasized nodes and edges.
pub const MUTED_COLOR: &str = "lightgrey";
/// Opacity of de-emphasized nodes and edges.
pub const MUTED_ALPHA: f64 = 0.2;

/// How one node or edge is painted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style<'a> {
	pub color: &'a str,
	/// Opacity in `[0, 1]`.
	pub alpha: f64,
}

impl Style<'_> {
	const MUTED: Style<'static> = Style {
		color: MUTED_COLOR,
		alpha: MUTED_ALPHA,
	};
}

/// Style of node `idx` given the current highlight (`None` = nothing selected).
pub fn node_style<'a>(
	engine: &'a DiagramEngine,
	idx: usize,
	highlight: Option<&HashSet<usize>>,
) -> Style<'a> {
	match highlight {
		Some(set) if !set.contains(&idx) => Style::MUTED,
		_ => Style {
			color: engine.color(&engine.nodes()[idx]),
			alpha: 1.0,
		},
	}
}

/// Style of an edge: emphasized unless a selection exists and the edge does
/// not touch it.
pub fn edge_style((src, tgt): (usize, usize), selected: Option<usize>) -> Style<'static> {
	match selected {
		Some(sel) if src != sel && tgt != sel => Style::MUTED,
		_ => Style {
			color: EDGE_COLOR,
			alpha: 1.0,
		},
	}
}

/// Paints the whole diagram onto a canvas sized to the engine's viewport.
pub fn render(engine: &DiagramEngine, ctx: &CanvasRenderingContext2d) {
	let viewport = engine.viewport();
	ctx.set_global_alpha(1.0);
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);
	draw_edges(engine, ctx);
	draw_nodes(engine, ctx);
	ctx.set_global_alpha(1.0);
}

fn draw_edges(engine: &DiagramEngine, ctx: &CanvasRenderingContext2d) {
	let nodes = engine.nodes();
	let selected = engine.selected_index();
	ctx.set_line_width(1.0);

	for &(src, tgt) in engine.edges() {
		let style = edge_style((src, tgt), selected);
		let (a, b) = (nodes[src].position, nodes[tgt].position);
		ctx.set_global_alpha(style.alpha);
		ctx.set_stroke_style_str(style.color);
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
	}
}

fn draw_nodes(engine: &DiagramEngine, ctx: &CanvasRenderingContext2d) {
	let highlight = engine.highlighted();
	ctx.set_font(LABEL_FONT);
	ctx.set_text_align("center");

	for (idx, node) in engine.nodes().iter().enumerate() {
		let style = node_style(engine, idx, highlight.as_ref());
		let p = node.position;
		ctx.set_global_alpha(style.alpha);

		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(style.color);
		ctx.fill();

		ctx.set_fill_style_str(LABEL_COLOR);
		let _ = ctx.fill_text(&node.name, p.x, p.y + LABEL_OFFSET);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_diagram::types::{CategoryConfig, DiagramConfig, EdgeConfig, NodeConfig};

	fn engine() -> DiagramEngine {
		let mut config = DiagramConfig::new(500.0, 500.0);
		config.categories = vec![
			CategoryConfig {
				name: "concept".into(),
				color: "red".into(),
			},
			CategoryConfig {
				name: "attribute".into(),
				color: "blue".into(),
			},
		];
		config.nodes = vec![
			NodeConfig::new("a", "A", "concept"),
			NodeConfig::new("b", "B", "attribute"),
			NodeConfig::new("c", "C", "attribute"),
		];
		config.edges = vec![EdgeConfig::new("a", "b"), EdgeConfig::new("b", "c")];
		DiagramEngine::from_config(&config).unwrap()
	}

	#[test]
	fn everything_is_emphasized_without_selection() {
		let engine = engine();
		let highlight = engine.highlighted();
		assert_eq!(
			node_style(&engine, 0, highlight.as_ref()),
			Style {
				color: "red",
				alpha: 1.0
			}
		);
		assert_eq!(node_style(&engine, 2, highlight.as_ref()).color, "blue");
		assert_eq!(edge_style((1, 2), None).alpha, 1.0);
	}

	#[test]
	fn selection_mutes_everything_outside_its_neighborhood() {
		let mut engine = engine();
		engine.select("a");
		let highlight = engine.highlighted();
		let selected = engine.selected_index();

		assert_eq!(node_style(&engine, 0, highlight.as_ref()).color, "red");
		assert_eq!(node_style(&engine, 1, highlight.as_ref()).color, "blue");
		assert_eq!(node_style(&engine, 2, highlight.as_ref()), Style::MUTED);

		assert_eq!(edge_style((0, 1), selected).color, EDGE_COLOR);
		assert_eq!(edge_style((1, 2), selected), Style::MUTED);
	}

	#[test]
	fn edges_between_neighbors_of_selection_are_muted() {
		// b-c touches neither endpoint of a selection on "a", even though b is lit.
		assert_eq!(edge_style((1, 2), Some(0)).alpha, MUTED_ALPHA);
		assert_eq!(edge_style((2, 0), Some(0)).alpha, 1.0);
	}
}
