use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;

use super::config::NetworkConfig;
use super::surface::NetworkSurface;

/// Animated particle network filling its parent element.
///
/// The animation starts once the canvas is mounted and stops when the
/// component is disposed.
#[component]
pub fn NetworkCanvas(
	/// Element id of the canvas; the surface looks itself up by it.
	#[prop(into)]
	id: String,
	/// Tuning; invalid configs fall back to the default with a warning.
	#[prop(optional)]
	config: Option<NetworkConfig>,
	/// JSON overrides on top of the default config. Takes precedence over `config`.
	#[prop(optional, into)]
	config_json: Option<String>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let surface: Rc<RefCell<Option<NetworkSurface>>> = Rc::new(RefCell::new(None));

	let config = match NetworkConfig::resolve(config, config_json.as_deref()) {
		Ok(config) => config,
		Err(err) => {
			warn!("{err}; using the default network config");
			NetworkConfig::default()
		}
	};

	let mount_id = id.clone();
	Effect::new(move |_| {
		if canvas_ref.get().is_none() || surface.borrow().is_some() {
			return;
		}
		let seed = js_sys::Date::now() as u64;
		if let Some(mut attached) = NetworkSurface::attach(&mount_id, config.clone(), seed) {
			attached.start();
			*surface.borrow_mut() = Some(attached);
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			id=id
			class="network-canvas"
			style="display: block; width: 100%; height: 100%;"
		/>
	}
}
