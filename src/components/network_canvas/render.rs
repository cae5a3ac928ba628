use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::{CanvasGradient, CanvasRenderingContext2d};

use super::config::Backdrop;
use super::particles::ambient_field;
use super::state::NetworkState;
use super::types::Node;

/// Connections thinner than this endpoint scale are not drawn.
const EDGE_MIN_SCALE: f64 = 0.1;
const EDGE_MIN_OPACITY: f64 = 0.01;
const RING_ACTIVATION: f64 = 0.7;

fn hsla(hue: f64, saturation: u8, lightness: u8, alpha: f64) -> String {
	format!(
		"hsla({:.1}, {}%, {}%, {:.3})",
		hue.rem_euclid(360.0),
		saturation,
		lightness,
		alpha.clamp(0.0, 1.0)
	)
}

fn rgba(r: u8, g: u8, b: u8, alpha: f64) -> String {
	format!("rgba({}, {}, {}, {:.3})", r, g, b, alpha.clamp(0.0, 1.0))
}

fn circle(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64) -> Result<(), JsValue> {
	ctx.begin_path();
	ctx.arc(x, y, radius.max(0.0), 0.0, TAU)
}

fn fill_gradient(
	ctx: &CanvasRenderingContext2d,
	gradient: &CanvasGradient,
	x: f64,
	y: f64,
	radius: f64,
) -> Result<(), JsValue> {
	circle(ctx, x, y, radius)?;
	#[allow(deprecated)]
	ctx.set_fill_style(gradient);
	ctx.fill();
	Ok(())
}

/// Draws one frame. Reads the state, never changes it.
pub fn render(state: &NetworkState, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
	match state.config.backdrop {
		Backdrop::Clear => ctx.clear_rect(0.0, 0.0, state.width, state.height),
		Backdrop::Fade { alpha } => {
			ctx.set_fill_style_str(&rgba(0, 0, 0, alpha));
			ctx.fill_rect(0.0, 0.0, state.width, state.height);
		}
	}
	draw_pulse_waves(state, ctx)?;
	draw_connections(state, ctx)?;
	draw_nodes(state, ctx)?;
	draw_ambient(state, ctx)?;
	draw_trail(state, ctx)?;
	Ok(())
}

fn draw_pulse_waves(state: &NetworkState, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
	for wave in &state.pulse_waves {
		circle(ctx, wave.x, wave.y, wave.radius)?;
		let color = if state.config.color_cycling {
			hsla(180.0 + state.hue_shift, 100, 60, wave.life * 0.3)
		} else {
			rgba(0, 200, 255, wave.life * 0.3)
		};
		ctx.set_stroke_style_str(&color);
		ctx.set_line_width(2.0 * wave.life);
		ctx.stroke();
	}
	Ok(())
}

fn draw_connections(state: &NetworkState, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
	let index = state.node_index();
	let cycling = state.config.color_cycling;

	for c in &state.connections {
		let (Some(from), Some(to)) = (index.get(&c.from), index.get(&c.to)) else {
			continue;
		};
		if from.scale < EDGE_MIN_SCALE || to.scale < EDGE_MIN_SCALE || c.opacity < EDGE_MIN_OPACITY {
			continue;
		}
		let node_scale = from.scale.min(to.scale);
		let hue = 200.0 + state.hue_shift + c.signal * 60.0;

		if cycling {
			let boost = from.boost.max(to.boost);
			let alpha = c.opacity * node_scale * (0.4 + c.signal * 0.4 + boost * 0.2);
			let gradient = ctx.create_linear_gradient(from.x, from.y, to.x, to.y);
			gradient.add_color_stop(0.0, &hsla(hue, 80, 60, alpha))?;
			gradient.add_color_stop(0.5, &hsla(hue + 30.0, 90, 65, alpha * 1.2))?;
			gradient.add_color_stop(1.0, &hsla(hue, 80, 60, alpha))?;
			#[allow(deprecated)]
			ctx.set_stroke_style(&gradient);
			ctx.set_line_width((0.5 + c.signal + c.data_flow * 2.0) * node_scale * c.strength);
		} else {
			let alpha = c.opacity * node_scale * (0.5 + c.signal * 0.5);
			ctx.set_stroke_style_str(&rgba(0, 153, 255, alpha));
			ctx.set_line_width((1.0 + c.signal * 1.5 + c.data_flow * 2.0) * node_scale * c.strength);
		}

		ctx.begin_path();
		ctx.move_to(from.x, from.y);
		ctx.line_to(to.x, to.y);
		ctx.stroke();

		if c.data_flow > 0.1 {
			let progress = (state.time * 2.0).rem_euclid(1.0);
			let t = if c.flow_direction < 0.0 { 1.0 - progress } else { progress };
			let (x, y) = (from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
			circle(ctx, x, y, 2.0 * c.data_flow)?;
			ctx.set_fill_style_str(&if cycling {
				hsla(hue + 60.0, 100, 70, c.data_flow)
			} else {
				rgba(255, 255, 255, c.data_flow)
			});
			ctx.fill();
		}
	}
	Ok(())
}

fn node_hue(state: &NetworkState, node: &Node) -> f64 {
	if node.core {
		node.hue + state.hue_shift
	} else {
		200.0 + state.hue_shift + node.activation * 60.0
	}
}

fn draw_nodes(state: &NetworkState, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
	for node in state.nodes.iter().filter(|n| n.is_visible()) {
		let (x, y) = (node.x, node.y);
		let radius = node.radius * node.scale;
		let total = node.total_activation();

		if state.config.color_cycling {
			let hue = node_hue(state, node);
			let glow = (0.5 + total * 0.5) * node.scale;
			let halo = ctx.create_radial_gradient(x, y, 0.0, x, y, radius * 6.0)?;
			halo.add_color_stop(0.0, &hsla(hue, 90, 60, glow * 0.8))?;
			halo.add_color_stop(0.3, &hsla(hue, 80, 50, glow * 0.4))?;
			halo.add_color_stop(1.0, &hsla(hue, 70, 40, 0.0))?;
			fill_gradient(ctx, &halo, x, y, radius * 6.0)?;

			let core = ctx.create_radial_gradient(x, y, 0.0, x, y, radius)?;
			if node.core {
				core.add_color_stop(0.0, &hsla(hue, 100, 90, node.scale))?;
				core.add_color_stop(0.7, &hsla(hue, 90, 70, node.scale * 0.9))?;
				core.add_color_stop(1.0, &hsla(hue, 80, 60, node.scale * 0.8))?;
			} else {
				core.add_color_stop(0.0, &rgba(255, 255, 255, 0.95 * node.scale))?;
				core.add_color_stop(1.0, &hsla(hue, 50, 80, 0.8 * node.scale))?;
			}
			fill_gradient(ctx, &core, x, y, radius)?;

			if total > RING_ACTIVATION {
				circle(ctx, x, y, radius * 2.0)?;
				ctx.set_stroke_style_str(&hsla(hue + 60.0, 100, 70, (total - RING_ACTIVATION) * node.scale));
				ctx.set_line_width(1.0);
				ctx.stroke();
			}
		} else {
			let glow = (0.6 + total * 0.4) * node.scale;
			let halo = ctx.create_radial_gradient(x, y, 0.0, x, y, radius * 4.0)?;
			halo.add_color_stop(0.0, &rgba(0, 153, 255, glow))?;
			halo.add_color_stop(0.5, &rgba(0, 153, 255, glow * 0.5))?;
			halo.add_color_stop(1.0, &rgba(0, 153, 255, 0.0))?;
			fill_gradient(ctx, &halo, x, y, radius * 4.0)?;

			circle(ctx, x, y, radius)?;
			ctx.set_fill_style_str(&rgba(255, 255, 255, 0.9 * node.scale));
			ctx.fill();
		}
	}
	Ok(())
}

fn draw_ambient(state: &NetworkState, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
	let field = ambient_field(state.time, state.width, state.height, &state.config.ambient);
	for p in field {
		if state.config.color_cycling {
			let hue = state.hue_shift + p.hue_offset;
			circle(ctx, p.x, p.y, p.size)?;
			ctx.set_fill_style_str(&hsla(hue, 100, 60, p.opacity));
			ctx.fill();

			let halo = ctx.create_radial_gradient(p.x, p.y, 0.0, p.x, p.y, p.size * 3.0)?;
			halo.add_color_stop(0.0, &hsla(hue, 100, 60, p.opacity * 0.8))?;
			halo.add_color_stop(1.0, &hsla(hue, 100, 60, 0.0))?;
			fill_gradient(ctx, &halo, p.x, p.y, p.size * 3.0)?;
		} else {
			circle(ctx, p.x, p.y, p.size)?;
			ctx.set_fill_style_str(&rgba(0, 200, 255, p.opacity));
			ctx.fill();

			circle(ctx, p.x, p.y, p.size * 2.5)?;
			ctx.set_fill_style_str(&rgba(0, 200, 255, p.opacity * 0.6));
			ctx.fill();
		}
	}
	Ok(())
}

fn draw_trail(state: &NetworkState, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
	for point in &state.trail {
		circle(ctx, point.x, point.y, 3.0 * point.life)?;
		let color = if state.config.color_cycling {
			hsla(200.0 + state.hue_shift, 100, 70, point.life * 0.5)
		} else {
			rgba(0, 200, 255, point.life * 0.5)
		};
		ctx.set_fill_style_str(&color);
		ctx.fill();
	}
	Ok(())
}
