use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A `requestAnimationFrame` loop that reschedules itself until stopped.
pub struct FrameLoop {
	callback: FrameCallback,
	pending: Rc<Cell<Option<i32>>>,
}

fn request_frame(callback: &FrameCallback, pending: &Cell<Option<i32>>) {
	let Some(window) = web_sys::window() else {
		return;
	};
	if let Some(ref cb) = *callback.borrow() {
		pending.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
	}
}

impl FrameLoop {
	/// Calls `frame` once per animation frame, starting with the next one.
	pub fn start(mut frame: impl FnMut() + 'static) -> Self {
		let callback: FrameCallback = Rc::new(RefCell::new(None));
		let pending = Rc::new(Cell::new(None));

		let (callback_inner, pending_inner) = (callback.clone(), pending.clone());
		*callback.borrow_mut() = Some(Closure::new(move || {
			pending_inner.set(None);
			frame();
			request_frame(&callback_inner, &pending_inner);
		}));
		request_frame(&callback, &pending);

		Self { callback, pending }
	}

	pub fn is_running(&self) -> bool {
		self.callback.borrow().is_some()
	}

	/// Cancels the scheduled frame and releases the callback.
	pub fn stop(&self) {
		if let Some(id) = self.pending.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(id);
			}
		}
		// Dropping the closure breaks the callback -> closure -> callback cycle.
		self.callback.borrow_mut().take();
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		self.stop();
	}
}
