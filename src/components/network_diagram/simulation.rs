//! Spring/repulsion/centering physics for one diagram.
//!
//! Every function here is pure: a step reads the previous positions and
//! returns fresh ones, so the caller decides when (and whether) time advances.
//! Repulsion is all-pairs, O(N²) per step, which is fine for diagrams of a few
//! dozen nodes.

use serde::{Deserialize, Serialize};

use super::error::ConfigurationError;
use super::types::Point;

/// Force tuning. Missing fields in a configuration document fall back to the
/// reference values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
	/// Separation at which a spring exerts no force.
	pub rest_length: f64,
	/// Spring stiffness.
	pub spring_constant: f64,
	/// Numerator of the inverse-square repulsion.
	pub repulsion_constant: f64,
	/// Gain of the pull toward the viewport center.
	pub centering_gain: f64,
	/// Per-axis cap on how far a node moves in one step.
	pub max_displacement: f64,
	/// Added to every distance so coincident nodes never divide by zero.
	pub distance_epsilon: f64,
}

impl Default for SimulationParameters {
	fn default() -> Self {
		Self {
			rest_length: 200.0,
			spring_constant: 0.01,
			repulsion_constant: 5000.0,
			centering_gain: 0.001,
			max_displacement: 10.0,
			distance_epsilon: 0.01,
		}
	}
}

impl SimulationParameters {
	/// Rejects values that would make [`step`] panic or diverge: anything
	/// non-finite, a negative `max_displacement`, or a non-positive
	/// `distance_epsilon`.
	pub fn validate(&self) -> Result<(), ConfigurationError> {
		let fields = [
			("rest_length", self.rest_length),
			("spring_constant", self.spring_constant),
			("repulsion_constant", self.repulsion_constant),
			("centering_gain", self.centering_gain),
			("max_displacement", self.max_displacement),
			("distance_epsilon", self.distance_epsilon),
		];
		let invalid = fields.into_iter().find(|&(name, value)| {
			!value.is_finite()
				|| (name == "max_displacement" && value < 0.0)
				|| (name == "distance_epsilon" && value <= 0.0)
		});
		match invalid {
			Some((name, value)) => Err(ConfigurationError::InvalidParameters { name, value }),
			None => Ok(()),
		}
	}
}

/// The visible area every position is clamped into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Width in diagram units.
	pub width: f64,
	/// Height in diagram units.
	pub height: f64,
}

impl Viewport {
	/// Midpoint of the viewport.
	pub fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}

	/// Clamps `p` into `[0, width] × [0, height]`.
	pub fn clamp(&self, p: Point) -> Point {
		p.clamp_to(self.width, self.height)
	}
}

/// Builds per-node neighbor lists from index pairs.
///
/// Parallel edges stay parallel (each one pulls); self loops are dropped since
/// they exert no force.
pub fn adjacency(node_count: usize, edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
	let mut neighbors = vec![Vec::new(); node_count];
	for &(a, b) in edges {
		if a == b {
			continue;
		}
		neighbors[a].push(b);
		neighbors[b].push(a);
	}
	neighbors
}

/// Net force acting on node `v`, before clamping.
pub fn net_force(
	v: usize,
	positions: &[Point],
	neighbors: &[Vec<usize>],
	params: &SimulationParameters,
	viewport: Viewport,
) -> Point {
	let p = positions[v];
	let mut force = Point::default();

	for &u in &neighbors[v] {
		let delta = positions[u] - p;
		let d = delta.hypot() + params.distance_epsilon;
		let magnitude = (d - params.rest_length) * params.spring_constant;
		force = force + delta * (magnitude / d);
	}

	for (w, &q) in positions.iter().enumerate() {
		if w == v {
			continue;
		}
		let delta = p - q;
		let d = delta.hypot() + params.distance_epsilon;
		let magnitude = params.repulsion_constant / (d * d);
		force = force + delta * (magnitude / d);
	}

	force + (viewport.center() - p) * params.centering_gain
}

/// Advances every node except `pinned` by one step.
pub fn step(
	positions: &[Point],
	neighbors: &[Vec<usize>],
	params: &SimulationParameters,
	viewport: Viewport,
	pinned: Option<usize>,
) -> Vec<Point> {
	let max = params.max_displacement;
	positions
		.iter()
		.enumerate()
		.map(|(v, &p)| {
			if pinned == Some(v) {
				return p;
			}
			let force = net_force(v, positions, neighbors, params, viewport);
			let moved = Point::new(
				p.x + force.x.clamp(-max, max),
				p.y + force.y.clamp(-max, max),
			);
			viewport.clamp(moved)
		})
		.collect()
}


#[cfg(test)]
mod proptest_tests {
	use proptest::prelude::*;

	use super::*;

	// ===================
	// Strategies
	// ===================

	fn layout_strategy() -> impl Strategy<Value = (Viewport, Vec<Point>, Vec<(usize, usize)>)> {
		(50.0f64..2000.0, 50.0f64..2000.0, 1usize..12).prop_flat_map(|(width, height, n)| {
			let points = prop::collection::vec(
				(0.0..=width, 0.0..=height).prop_map(|(x, y)| Point::new(x, y)),
				n,
			);
			let edges = prop::collection::vec((0..n, 0..n), 0..(n * 2));
			(Just(Viewport { width, height }), points, edges)
		})
	}

	// ===================
	// Property Test Functions
	// ===================

	fn check_step_bounds(
		viewport: Viewport,
		mut positions: Vec<Point>,
		edges: Vec<(usize, usize)>,
	) -> Result<(), TestCaseError> {
		let params = SimulationParameters::default();
		let neighbors = adjacency(positions.len(), &edges);
		for _ in 0..20 {
			let next = step(&positions, &neighbors, &params, viewport, None);
			for (before, after) in positions.iter().zip(&next) {
				prop_assert!((after.x - before.x).abs() <= params.max_displacement + 1e-9);
				prop_assert!((after.y - before.y).abs() <= params.max_displacement + 1e-9);
				prop_assert!((0.0..=viewport.width).contains(&after.x), "x out of bounds: {after:?}");
				prop_assert!((0.0..=viewport.height).contains(&after.y), "y out of bounds: {after:?}");
			}
			positions = next;
		}
		Ok(())
	}

	// ===================
	// Proptest Wrappers
	// ===================

	proptest! {
		#[test]
		fn step_is_clamped_and_contained((viewport, positions, edges) in layout_strategy()) {
			check_step_bounds(viewport, positions, edges)?;
		}
	}
}
