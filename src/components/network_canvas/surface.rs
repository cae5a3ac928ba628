use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, error, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, MouseEvent};

use super::config::NetworkConfig;
use super::frame_loop::FrameLoop;
use super::render;
use super::state::NetworkState;

/// Fallback size when the canvas has no parent to measure.
const DEFAULT_SIZE: (f64, f64) = (800.0, 600.0);

/// An event listener that unregisters itself when dropped.
struct Listener {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
	fn install(
		target: &EventTarget,
		event: &'static str,
		handler: impl FnMut(Event) + 'static,
	) -> Option<Self> {
		let callback = Closure::<dyn FnMut(Event)>::new(handler);
		target
			.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
			.ok()?;
		Some(Self {
			target: target.clone(),
			event,
			callback,
		})
	}
}

impl Drop for Listener {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}

fn container_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.unwrap_or(DEFAULT_SIZE)
}

fn surface_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// One particle network bound to one canvas.
///
/// Dropping the surface stops the animation and removes every listener it
/// installed, so the model is never touched after teardown.
pub struct NetworkSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	state: Rc<RefCell<NetworkState>>,
	frame_loop: Option<FrameLoop>,
	listeners: Vec<Listener>,
}

impl NetworkSurface {
	/// Binds a network to the canvas with the given element id.
	///
	/// Returns `None` when there is no such element, it is not a canvas, or it
	/// has no 2D context. A missing mount point is not an error.
	pub fn attach(id: &str, config: NetworkConfig, seed: u64) -> Option<Self> {
		let document = web_sys::window()?.document()?;
		let Some(element) = document.get_element_by_id(id) else {
			debug!("no element #{id}, network canvas not started");
			return None;
		};
		let Ok(canvas) = element.dyn_into::<HtmlCanvasElement>() else {
			debug!("#{id} is not a canvas, network canvas not started");
			return None;
		};
		let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;

		let (width, height) = container_size(&canvas);
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

		let state = Rc::new(RefCell::new(NetworkState::new(config, width, height, seed)));
		let mut surface = Self {
			canvas,
			ctx,
			state,
			frame_loop: None,
			listeners: Vec::new(),
		};
		surface.install_listeners();
		info!("network canvas #{id} attached at {width}x{height}");
		Some(surface)
	}

	fn install_listeners(&mut self) {
		let target: &EventTarget = self.canvas.as_ref();

		let (state, canvas) = (self.state.clone(), self.canvas.clone());
		let on_move = move |ev: Event| {
			if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
				let (x, y) = surface_point(&canvas, ev);
				state.borrow_mut().pointer_move(x, y);
			}
		};

		let state = self.state.clone();
		let on_leave = move |_: Event| state.borrow_mut().pointer_leave();

		let (state, canvas) = (self.state.clone(), self.canvas.clone());
		let on_click = move |ev: Event| {
			if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
				let (x, y) = surface_point(&canvas, ev);
				state.borrow_mut().click(x, y);
			}
		};

		let (state, canvas) = (self.state.clone(), self.canvas.clone());
		let on_resize = move |_: Event| {
			let (width, height) = container_size(&canvas);
			canvas.set_width(width as u32);
			canvas.set_height(height as u32);
			state.borrow_mut().resize(width, height);
		};

		self.listeners.extend(
			[
				Listener::install(target, "mousemove", on_move),
				Listener::install(target, "mouseleave", on_leave),
				Listener::install(target, "click", on_click),
			]
			.into_iter()
			.flatten(),
		);
		if let Some(window) = web_sys::window() {
			self.listeners
				.extend(Listener::install(window.as_ref(), "resize", on_resize));
		}
	}

	pub fn is_running(&self) -> bool {
		self.frame_loop.as_ref().is_some_and(FrameLoop::is_running)
	}

	/// Starts ticking and drawing once per animation frame.
	pub fn start(&mut self) {
		if self.is_running() {
			return;
		}
		let (state, ctx) = (self.state.clone(), self.ctx.clone());
		let mut reported = false;
		self.frame_loop = Some(FrameLoop::start(move || {
			let mut state = state.borrow_mut();
			state.tick();
			if let Err(err) = render::render(&state, &ctx) {
				if !reported {
					error!("network render failed: {err:?}");
					reported = true;
				}
			}
		}));
	}

	/// Stops the animation. The model keeps its state and can be restarted.
	pub fn stop(&mut self) {
		if let Some(frame_loop) = self.frame_loop.take() {
			frame_loop.stop();
		}
	}
}

impl Drop for NetworkSurface {
	fn drop(&mut self) {
		self.stop();
		self.listeners.clear();
		debug!("network canvas detached");
	}
}
