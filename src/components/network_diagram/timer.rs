//! Browser scheduling handles owned by a diagram instance.
//!
//! Both handles stop their callback when dropped, so replacing one can never
//! leave a stale duplicate running.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use log::debug;
use wasm_bindgen::prelude::*;

/// Calls a closure every `period` via `setInterval`.
pub struct IntervalTimer {
	handle: i32,
	_callback: Closure<dyn FnMut()>,
}

impl IntervalTimer {
	/// Starts the interval. Returns `None` outside a browser window.
	pub fn start(period: Duration, on_tick: impl FnMut() + 'static) -> Option<Self> {
		let window = web_sys::window()?;
		let callback: Closure<dyn FnMut()> = Closure::new(on_tick);
		let millis = i32::try_from(period.as_millis()).unwrap_or(i32::MAX);
		let handle = window
			.set_interval_with_callback_and_timeout_and_arguments_0(
				callback.as_ref().unchecked_ref(),
				millis,
			)
			.ok()?;
		debug!("Simulation timer {handle} started ({millis} ms)");
		Some(Self {
			handle,
			_callback: callback,
		})
	}
}

impl Drop for IntervalTimer {
	fn drop(&mut self) {
		if let Some(window) = web_sys::window() {
			window.clear_interval_with_handle(self.handle);
		}
		debug!("Simulation timer {} stopped", self.handle);
	}
}

/// Calls a closure once per animation frame until dropped.
pub struct AnimationLoop {
	frame: Rc<Cell<Option<i32>>>,
	callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl AnimationLoop {
	/// Schedules the first frame. Returns `None` outside a browser window.
	pub fn start(mut on_frame: impl FnMut() + 'static) -> Option<Self> {
		let window = web_sys::window()?;
		let frame: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
		let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

		let (frame_inner, callback_inner) = (frame.clone(), callback.clone());
		*callback.borrow_mut() = Some(Closure::new(move || {
			on_frame();
			let next = match (web_sys::window(), callback_inner.borrow().as_ref()) {
				(Some(win), Some(cb)) => win.request_animation_frame(cb.as_ref().unchecked_ref()).ok(),
				_ => None,
			};
			frame_inner.set(next);
		}));

		if let Some(ref cb) = *callback.borrow() {
			frame.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
		Some(Self { frame, callback })
	}
}

impl Drop for AnimationLoop {
	fn drop(&mut self) {
		if let (Some(window), Some(id)) = (web_sys::window(), self.frame.take()) {
			let _ = window.cancel_animation_frame(id);
		}
		// Breaks the closure's reference cycle back to `callback`.
		self.callback.borrow_mut().take();
	}
}
