use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use super::error::ConfigurationError;
use super::simulation::SimulationParameters;

/// A position in diagram space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean length of the vector from the origin to this point.
	pub fn hypot(self) -> f64 {
		self.x.hypot(self.y)
	}

	/// Clamps both coordinates into `[0, width] × [0, height]`.
	pub fn clamp_to(self, width: f64, height: f64) -> Self {
		Self::new(self.x.clamp(0.0, width), self.y.clamp(0.0, height))
	}
}

impl Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl Mul<f64> for Point {
	type Output = Point;

	fn mul(self, rhs: f64) -> Point {
		Point::new(self.x * rhs, self.y * rhs)
	}
}

/// A node as it appears in the configuration document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
	pub id: String,
	pub name: String,
	/// Styling tag; resolved against [`DiagramConfig::categories`].
	pub category: String,
	/// Hand-placed horizontal position, if any.
	#[serde(default)]
	pub x: Option<f64>,
	/// Hand-placed vertical position, if any.
	#[serde(default)]
	pub y: Option<f64>,
}

impl NodeConfig {
	/// A node without a hand-placed position.
	pub fn new(id: impl Into<String>, name: impl Into<String>, category: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			category: category.into(),
			x: None,
			y: None,
		}
	}

	/// Sets the initial position.
	pub fn at(mut self, x: f64, y: f64) -> Self {
		self.x = Some(x);
		self.y = Some(y);
		self
	}

	/// The hand-placed position, only when both coordinates are present.
	pub fn position(&self) -> Option<Point> {
		Some(Point::new(self.x?, self.y?))
	}
}

/// An undirected link between two node ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeConfig {
	pub source: String,
	pub target: String,
}

impl EdgeConfig {
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
		}
	}
}

/// Display color for one category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
	/// Category tag referenced by [`NodeConfig::category`].
	pub name: String,
	pub color: String,
}

/// The loaded configuration document for one diagram.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiagramConfig {
	/// Viewport width in diagram units.
	pub width: f64,
	/// Viewport height in diagram units.
	pub height: f64,
	/// Simulation cadence in milliseconds.
	#[serde(default = "default_tick_interval_ms")]
	pub tick_interval_ms: u32,
	#[serde(default)]
	pub simulation: SimulationParameters,
	#[serde(default)]
	pub categories: Vec<CategoryConfig>,
	#[serde(default)]
	pub nodes: Vec<NodeConfig>,
	#[serde(default)]
	pub edges: Vec<EdgeConfig>,
}

fn default_tick_interval_ms() -> u32 {
	50
}

impl DiagramConfig {
	/// Empty diagram on a `width` × `height` viewport.
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			width,
			height,
			tick_interval_ms: default_tick_interval_ms(),
			simulation: SimulationParameters::default(),
			categories: Vec::new(),
			nodes: Vec::new(),
			edges: Vec::new(),
		}
	}

	/// Parses a JSON document.
	pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
		Ok(serde_json::from_str(json)?)
	}
}
