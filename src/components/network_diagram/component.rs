use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::render;
use super::scale::{CoordinateSpace, ScreenTransform};
use super::state::DiagramEngine;
use super::timer::{AnimationLoop, IntervalTimer};
use super::types::Point;

fn client_point(ev: &MouseEvent) -> Point {
	Point::new(ev.client_x() as f64, ev.client_y() as f64)
}

/// Canvas view of one diagram. Ticks the simulation every `tick_interval`,
/// repaints every animation frame and routes pointer input into the engine.
#[component]
pub fn NetworkDiagram(
	/// Engine to drive; the view owns it until unmounted.
	engine: DiagramEngine,
	/// Simulation cadence.
	#[prop(default = Duration::from_millis(50))]
	tick_interval: Duration,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let viewport = engine.viewport();
	let state = Rc::new(RefCell::new(engine));
	// Dropped with the view's owner, which stops both loops.
	let scheduler = StoredValue::new_local(None::<(IntervalTimer, AnimationLoop)>);

	let state_init = state.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(viewport.width as u32);
		canvas.set_height(viewport.height as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			error!("Canvas 2D context unavailable; diagram not started");
			return;
		};

		let state_tick = state_init.clone();
		let tick = IntervalTimer::start(tick_interval, move || {
			state_tick.borrow_mut().tick();
		});
		let state_frame = state_init.clone();
		let frames = AnimationLoop::start(move || render::render(&state_frame.borrow(), &ctx));

		// Replacing the pair drops, and so cancels, any earlier one.
		scheduler.set_value(tick.zip(frames));
	});

	let screen = move || -> Option<ScreenTransform> {
		let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
		let rect = canvas.get_bounding_client_rect();
		Some(ScreenTransform::from_client_rect(
			rect.left(),
			rect.top(),
			rect.width(),
			rect.height(),
			viewport.width,
			viewport.height,
		))
	};

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(space) = screen() else {
			return;
		};
		let p = space.to_diagram(client_point(&ev));
		let mut s = state_md.borrow_mut();
		if let Some(id) = s.node_at_position(p).map(str::to_owned) {
			s.begin_drag(&id, p);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let mut s = state_mm.borrow_mut();
		if s.drag().is_none() {
			return;
		}
		if let Some(space) = screen() {
			s.update_drag(client_point(&ev), &space);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| state_mu.borrow_mut().end_drag();

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| state_ml.borrow_mut().end_drag();

	let state_cl = state;
	let on_click = move |ev: MouseEvent| {
		let Some(space) = screen() else {
			return;
		};
		let p = space.to_diagram(client_point(&ev));
		let mut s = state_cl.borrow_mut();
		match s.node_at_position(p).map(str::to_owned) {
			Some(id) => s.select(&id),
			None => s.clear_selection(),
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="network-diagram-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:click=on_click
			style="display: block; cursor: pointer;"
		/>
	}
}
