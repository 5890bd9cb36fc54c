use thiserror::Error;

/// Reasons a diagram configuration cannot be loaded.
///
/// Raised only while building a [`DiagramEngine`](super::DiagramEngine);
/// once an engine exists none of its operations fail.
#[derive(Debug, Error)]
pub enum ConfigurationError {
	/// An edge names a node id that is not in the node list.
	#[error("edge {edge} ({from} -> {to}) references unknown node '{missing}'")]
	UnknownNode {
		/// Position of the offending edge in the edge list.
		edge: usize,
		/// Edge source id.
		from: String,
		/// Edge target id.
		to: String,
		/// The id that could not be resolved.
		missing: String,
	},

	/// Two nodes share an id.
	#[error("duplicate node id '{id}'")]
	DuplicateNode {
		/// The repeated id.
		id: String,
	},

	/// Width or height is not a positive finite number.
	#[error("invalid viewport {width} x {height}")]
	InvalidViewport {
		/// Requested width.
		width: f64,
		/// Requested height.
		height: f64,
	},

	/// A force parameter would make the simulation misbehave.
	#[error("invalid simulation parameter {name} = {value}")]
	InvalidParameters {
		name: &'static str,
		value: f64,
	},

	/// The configuration document is not valid JSON for a diagram.
	#[error("malformed diagram document: {0}")]
	Parse(#[from] serde_json::Error),
}
