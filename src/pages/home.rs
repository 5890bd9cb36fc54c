use std::time::Duration;

use leptos::prelude::*;
use log::error;

use crate::components::network_diagram::{
	ConfigurationError, DiagramConfig, DiagramEngine, NetworkDiagram,
};

const DIAGRAM: &str = include_str!("../../assets/network_diagram.json");

/// Parses and validates the bundled diagram document.
fn load_diagram() -> Result<(DiagramEngine, Duration), ConfigurationError> {
	let config = DiagramConfig::from_json(DIAGRAM)?;
	let engine = DiagramEngine::from_config(&config)?;
	Ok((engine, Duration::from_millis(config.tick_interval_ms.into())))
}

/// Network diagram page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="network-diagram-page">
				{load_diagram()
					.inspect_err(|err| error!("Cannot load network diagram: {err}"))
					.map(|(engine, tick_interval)| view! { <NetworkDiagram engine=engine tick_interval=tick_interval /> })}
				<div class="graph-overlay">
					<h1>"Network Diagram"</h1>
					<p class="subtitle">"Drag nodes to reposition. Click a node to highlight its neighbors; click the background to clear."</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bundled_diagram_loads() {
		let (engine, tick_interval) = load_diagram().unwrap();
		assert_eq!(engine.nodes().len(), 40);
		assert_eq!(tick_interval, Duration::from_millis(50));
	}
}
