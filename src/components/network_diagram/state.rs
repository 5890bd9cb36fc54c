use std::collections::{BTreeSet, HashMap, HashSet};
use std::f64::consts::PI;

use log::{debug, trace};

use super::error::ConfigurationError;
use super::scale::CoordinateSpace;
use super::simulation::{self, SimulationParameters, Viewport};
use super::types::{CategoryConfig, DiagramConfig, EdgeConfig, NodeConfig, Point};

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

/// Radius of a drawn node, in diagram units.
pub const NODE_RADIUS: f64 = 20.0;
/// Distance from a node's center within which a pointer hits it.
pub const HIT_RADIUS: f64 = NODE_RADIUS;

/// A styling class and its resolved color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
	pub name: String,
	pub color: String,
}

/// A node of a live diagram.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: String,
	pub name: String,
	/// Index into [`DiagramEngine::categories`].
	pub category: usize,
	/// Current position, always inside the viewport.
	pub position: Point,
}

/// The node under an active drag and the last pointer position seen for it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState {
	/// Index of the dragged node.
	pub node: usize,
	/// Last pointer position, in diagram space.
	pub pointer: Point,
}

/// Owns one diagram: its fixed node/edge set, the simulated positions and the
/// transient interaction state.
///
/// The dragged node (if any) is owned by the pointer handlers; every other
/// node is owned by [`tick`](Self::tick). Nothing here is shared between
/// instances.
#[derive(Clone, Debug)]
pub struct DiagramEngine {
	nodes: Vec<Node>,
	edges: Vec<(usize, usize)>,
	neighbors: Vec<Vec<usize>>,
	index: HashMap<String, usize>,
	categories: Vec<Category>,
	params: SimulationParameters,
	viewport: Viewport,
	drag: Option<DragState>,
	selected: Option<usize>,
}

impl DiagramEngine {
	/// Builds an engine with reference parameters and palette colors.
	///
	/// Nodes without a hand-placed position are laid out on a circle around
	/// the viewport center. Fails if an edge names an unknown node, if two
	/// nodes share an id, or if the viewport is degenerate.
	pub fn initialize(
		nodes: &[NodeConfig],
		edges: &[EdgeConfig],
		width: f64,
		height: f64,
	) -> Result<Self, ConfigurationError> {
		Self::build(nodes, edges, &[], width, height, SimulationParameters::default())
	}

	/// Builds an engine from a loaded configuration document.
	pub fn from_config(config: &DiagramConfig) -> Result<Self, ConfigurationError> {
		Self::build(
			&config.nodes,
			&config.edges,
			&config.categories,
			config.width,
			config.height,
			config.simulation,
		)
	}

	fn build(
		nodes: &[NodeConfig],
		edges: &[EdgeConfig],
		categories: &[CategoryConfig],
		width: f64,
		height: f64,
		params: SimulationParameters,
	) -> Result<Self, ConfigurationError> {
		if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
			return Err(ConfigurationError::InvalidViewport { width, height });
		}
		params.validate()?;
		let viewport = Viewport { width, height };

		let mut index = HashMap::with_capacity(nodes.len());
		for (i, node) in nodes.iter().enumerate() {
			if index.insert(node.id.clone(), i).is_some() {
				return Err(ConfigurationError::DuplicateNode {
					id: node.id.clone(),
				});
			}
		}

		let resolved_edges = edges
			.iter()
			.enumerate()
			.map(|(i, edge)| {
				let lookup = |id: &String| {
					index
						.get(id)
						.copied()
						.ok_or_else(|| ConfigurationError::UnknownNode {
							edge: i,
							from: edge.source.clone(),
							to: edge.target.clone(),
							missing: id.clone(),
						})
				};
				Ok((lookup(&edge.source)?, lookup(&edge.target)?))
			})
			.collect::<Result<Vec<_>, ConfigurationError>>()?;

		let mut categories: Vec<Category> = categories
			.iter()
			.map(|c| Category {
				name: c.name.clone(),
				color: c.color.clone(),
			})
			.collect();

		let radius = width.min(height) / 3.0;
		let center = viewport.center();
		let live_nodes = nodes
			.iter()
			.enumerate()
			.map(|(i, node)| {
				let category = match categories.iter().position(|c| c.name == node.category) {
					Some(c) => c,
					None => {
						categories.push(Category {
							name: node.category.clone(),
							color: COLORS[categories.len() % COLORS.len()].into(),
						});
						categories.len() - 1
					}
				};
				let position = node.position().unwrap_or_else(|| {
					let angle = (i as f64) * 2.0 * PI / nodes.len() as f64;
					center + Point::new(angle.cos(), angle.sin()) * radius
				});
				Node {
					id: node.id.clone(),
					name: node.name.clone(),
					category,
					position: viewport.clamp(position),
				}
			})
			.collect::<Vec<_>>();

		debug!(
			"Diagram initialized: {} nodes, {} edges, {} categories, {}x{}",
			live_nodes.len(),
			resolved_edges.len(),
			categories.len(),
			width,
			height
		);

		Ok(Self {
			neighbors: simulation::adjacency(live_nodes.len(), &resolved_edges),
			nodes: live_nodes,
			edges: resolved_edges,
			index,
			categories,
			params,
			viewport,
			drag: None,
			selected: None,
		})
	}

	/// Replaces the force tuning, failing on parameters `build` would reject.
	pub fn with_parameters(mut self, params: SimulationParameters) -> Result<Self, ConfigurationError> {
		params.validate()?;
		self.params = params;
		Ok(self)
	}

	/// Current force tuning.
	pub fn parameters(&self) -> &SimulationParameters {
		&self.params
	}

	/// Area every node is kept within.
	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	/// All nodes, in configuration order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// All edges as index pairs into [`nodes`](Self::nodes).
	pub fn edges(&self) -> &[(usize, usize)] {
		&self.edges
	}

	/// Resolved categories; [`Node::category`] indexes into this.
	pub fn categories(&self) -> &[Category] {
		&self.categories
	}

	/// Looks a node up by id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	/// Current position of node `id`.
	pub fn position(&self, id: &str) -> Option<Point> {
		self.node(id).map(|n| n.position)
	}

	/// Color for `node`'s category.
	pub fn color(&self, node: &Node) -> &str {
		&self.categories[node.category].color
	}

	/// Advances the simulation by one step and returns the new positions.
	///
	/// The dragged node keeps its position.
	pub fn tick(&mut self) -> &[Node] {
		let positions: Vec<Point> = self.nodes.iter().map(|n| n.position).collect();
		let next = simulation::step(
			&positions,
			&self.neighbors,
			&self.params,
			self.viewport,
			self.drag.map(|d| d.node),
		);
		for (node, position) in self.nodes.iter_mut().zip(next) {
			node.position = position;
		}
		&self.nodes
	}

	/// Starts dragging `id`. Ignored while another drag is active or when `id`
	/// is unknown.
	pub fn begin_drag(&mut self, id: &str, pointer: Point) {
		if self.drag.is_some() {
			return;
		}
		let Some(&node) = self.index.get(id) else {
			return;
		};
		trace!("Drag started on {id}");
		self.drag = Some(DragState { node, pointer });
	}

	/// Moves the dragged node onto the pointer, converted through `space` and
	/// clamped into the viewport. Ignored when no drag is active.
	pub fn update_drag(&mut self, pointer: Point, space: &impl CoordinateSpace) {
		let Some(drag) = self.drag.as_mut() else {
			return;
		};
		let target = self.viewport.clamp(space.to_diagram(pointer));
		drag.pointer = target;
		self.nodes[drag.node].position = target;
	}

	/// Ends the active drag, if any.
	pub fn end_drag(&mut self) {
		if let Some(drag) = self.drag.take() {
			trace!("Drag ended on {}", self.nodes[drag.node].id);
		}
	}

	/// The active drag.
	pub fn drag(&self) -> Option<DragState> {
		self.drag
	}

	/// Id of the node under drag.
	pub fn dragged(&self) -> Option<&str> {
		self.drag.map(|d| self.nodes[d.node].id.as_str())
	}

	/// Toggles selection of `id`: selecting the selected node clears the
	/// selection. Unknown ids are ignored.
	pub fn select(&mut self, id: &str) {
		let Some(&idx) = self.index.get(id) else {
			return;
		};
		self.selected = if self.selected == Some(idx) {
			None
		} else {
			Some(idx)
		};
		trace!("Selection now {:?}", self.selected());
	}

	/// Drops any selection.
	pub fn clear_selection(&mut self) {
		self.selected = None;
	}

	/// Id of the selected node.
	pub fn selected(&self) -> Option<&str> {
		self.selected.map(|i| self.nodes[i].id.as_str())
	}

	/// The selected node plus every node sharing an edge with it.
	///
	/// Empty for `None` and for ids not in the diagram.
	pub fn highlight_set(&self, selected: Option<&str>) -> BTreeSet<&str> {
		let Some(&idx) = selected.and_then(|id| self.index.get(id)) else {
			return BTreeSet::new();
		};
		self.neighborhood(idx)
			.into_iter()
			.map(|i| self.nodes[i].id.as_str())
			.collect()
	}

	/// Node indices emphasized by the current selection, or `None` when
	/// nothing is selected.
	pub fn highlighted(&self) -> Option<HashSet<usize>> {
		self.selected.map(|idx| self.neighborhood(idx))
	}

	/// Index of the current selection.
	pub fn selected_index(&self) -> Option<usize> {
		self.selected
	}

	fn neighborhood(&self, idx: usize) -> HashSet<usize> {
		let mut set = HashSet::from([idx]);
		for &(src, tgt) in &self.edges {
			if src == idx {
				set.insert(tgt);
			} else if tgt == idx {
				set.insert(src);
			}
		}
		set
	}

	/// Topmost node whose circle contains `p` (diagram space).
	pub fn node_at_position(&self, p: Point) -> Option<&str> {
		self.nodes
			.iter()
			.rev()
			.find(|node| (node.position - p).hypot() <= HIT_RADIUS)
			.map(|node| node.id.as_str())
	}
}
