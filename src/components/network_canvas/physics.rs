//! Explicit-Euler spring-damper motion.
//!
//! Each node is pulled toward an anchor that orbits its base position, pushed
//! or pulled by the pointer, and kicked by shockwaves. Velocity is damped every
//! frame before the position update.

use std::f64::consts::PI;

use super::config::{NetworkConfig, PointerConfig, PointerField};
use super::types::{Node, Pointer};

/// Activation phase offset per unit of base x.
const ACTIVATION_SPREAD: f64 = 0.01;

/// Node activation at clock `time`. Depends only on the base x and the clock.
pub fn activation(base_x: f64, time: f64, speed: f64) -> f64 {
	((time * speed + base_x * ACTIVATION_SPREAD).sin() + 1.0) / 2.0
}

/// Floating anchor the node is currently pulled toward.
pub fn anchor(node: &Node, time: f64) -> (f64, f64) {
	let f = &node.float;
	(
		node.base_x + (time * f.speed_x + f.phase_x).sin() * f.range_x,
		node.base_y + (time * f.speed_y + f.phase_y).sin() * f.range_y,
	)
}

pub fn spring_force(node: &Node, time: f64, k: f64) -> (f64, f64) {
	let (ax, ay) = anchor(node, time);
	((ax - node.x) * k, (ay - node.y) * k)
}

/// Force from the pointer field, or `None` when the pointer takes no part.
///
/// The pointer is ignored while inactive, for hidden nodes, and outside the
/// interaction radius.
pub fn pointer_force(
	node: &Node,
	pointer: Option<Pointer>,
	config: &PointerConfig,
) -> Option<(f64, f64)> {
	let pointer = pointer?;
	if !node.is_visible() {
		return None;
	}
	let (dx, dy) = (node.x - pointer.x, node.y - pointer.y);
	let distance = dx.hypot(dy);
	if distance >= config.radius {
		return None;
	}
	let angle = dy.atan2(dx);

	let magnitude = match config.field {
		PointerField::Repel { strength } => (config.radius - distance) / config.radius * strength,
		PointerField::Banded {
			inner_fraction,
			amplitude,
			repel,
			attract,
		} => {
			let envelope = (distance / config.radius * PI).sin() * amplitude;
			if distance < config.radius * inner_fraction {
				envelope * repel
			} else {
				-envelope * attract
			}
		}
	};
	Some((angle.cos() * magnitude, angle.sin() * magnitude))
}

/// Outward impulse from a blast at `(x, y)`, falling off linearly to zero at `radius`.
pub fn blast_impulse(node: &Node, x: f64, y: f64, radius: f64, strength: f64) -> Option<(f64, f64)> {
	if !node.is_visible() {
		return None;
	}
	let (dx, dy) = (node.x - x, node.y - y);
	let distance = dx.hypot(dy);
	if distance >= radius {
		return None;
	}
	let force = (radius - distance) / radius * strength;
	let angle = dy.atan2(dx);
	Some((angle.cos() * force, angle.sin() * force))
}

/// Advances one node by one frame.
pub fn step(node: &mut Node, time: f64, pointer: Option<Pointer>, config: &NetworkConfig) {
	let (sx, sy) = spring_force(node, time, config.spring_constant);
	node.vx += sx;
	node.vy += sy;

	if let Some((px, py)) = pointer_force(node, pointer, &config.pointer) {
		node.vx += px;
		node.vy += py;
	}

	node.vx *= config.damping;
	node.vy *= config.damping;

	node.x += node.vx;
	node.y += node.vy;
}

#[cfg(test)]
mod tests {
	use super::super::types::{Float, NodeId, NodeKind};
	use super::*;

	fn node_at(x: f64, y: f64) -> Node {
		Node {
			id: NodeId(0),
			kind: NodeKind::Permanent,
			layer: None,
			x,
			y,
			base_x: x,
			base_y: y,
			vx: 0.0,
			vy: 0.0,
			radius: 4.0,
			activation: 0.0,
			boost: 0.0,
			scale: 1.0,
			target_scale: 1.0,
			float: Float {
				speed_x: 0.005,
				speed_y: -0.004,
				range_x: 10.0,
				range_y: 8.0,
				phase_x: 1.0,
				phase_y: 2.0,
			},
			hue: 0.0,
			core: false,
			remove_at: None,
		}
	}

	#[test]
	fn activation_stays_in_unit_range() {
		for i in 0..1000 {
			let a = activation(i as f64 * 7.3, i as f64 * 0.01, 1.5);
			assert!((0.0..=1.0).contains(&a));
		}
	}

	#[test]
	fn anchor_orbits_within_range() {
		let node = node_at(100.0, 100.0);
		for i in 0..5000 {
			let (ax, ay) = anchor(&node, i as f64 * 0.37);
			assert!((ax - 100.0).abs() <= 10.0 + 1e-9);
			assert!((ay - 100.0).abs() <= 8.0 + 1e-9);
		}
	}

	#[test]
	fn spring_pulls_toward_anchor() {
		let mut node = node_at(100.0, 100.0);
		node.x = 300.0;
		let (fx, _) = spring_force(&node, 0.0, 0.015);
		assert!(fx < 0.0);
	}

	#[test]
	fn inactive_pointer_contributes_nothing() {
		let node = node_at(100.0, 100.0);
		assert_eq!(pointer_force(&node, None, &PointerConfig::default()), None);
	}

	#[test]
	fn pointer_out_of_range_contributes_nothing() {
		let node = node_at(100.0, 100.0);
		let pointer = Some(Pointer { x: 400.0, y: 100.0 });
		assert_eq!(pointer_force(&node, pointer, &PointerConfig::default()), None);
	}

	#[test]
	fn banded_field_repels_close_and_attracts_far() {
		let config = PointerConfig::default();
		let pointer = Some(Pointer { x: 0.0, y: 0.0 });

		let close = node_at(50.0, 0.0);
		let (fx, _) = pointer_force(&close, pointer, &config).unwrap();
		assert!(fx > 0.0, "close node should be pushed away, got {fx}");

		let far = node_at(150.0, 0.0);
		let (fx, _) = pointer_force(&far, pointer, &config).unwrap();
		assert!(fx < 0.0, "far node should be pulled in, got {fx}");
	}

	#[test]
	fn repel_field_falls_off_linearly() {
		let config = PointerConfig {
			radius: 100.0,
			field: PointerField::Repel { strength: 2.0 },
		};
		let pointer = Some(Pointer { x: 0.0, y: 0.0 });
		let (fx, fy) = pointer_force(&node_at(0.0, 50.0), pointer, &config).unwrap();
		assert!(fx.abs() < 1e-9);
		assert!((fy - 1.0).abs() < 1e-9);
	}

	#[test]
	fn hidden_nodes_ignore_the_pointer() {
		let mut node = node_at(10.0, 0.0);
		node.scale = 0.0;
		let pointer = Some(Pointer { x: 0.0, y: 0.0 });
		assert_eq!(pointer_force(&node, pointer, &PointerConfig::default()), None);
	}

	#[test]
	fn blast_points_away_from_the_click() {
		let node = node_at(-30.0, 40.0);
		let (ix, iy) = blast_impulse(&node, 0.0, 0.0, 300.0, 20.0).unwrap();
		assert!(ix < 0.0 && iy > 0.0);
		let expected = (300.0 - 50.0) / 300.0 * 20.0;
		assert!((ix.hypot(iy) - expected).abs() < 1e-9);
		assert!(blast_impulse(&node, 0.0, 0.0, 40.0, 20.0).is_none());
	}

	#[test]
	fn damping_settles_a_displaced_node() {
		let config = NetworkConfig::default();
		let mut node = node_at(100.0, 100.0);
		node.vx = 40.0;
		node.vy = -25.0;
		let mut time = 0.0;
		for _ in 0..2000 {
			time += config.time_step;
			step(&mut node, time, None, &config);
		}
		let (ax, ay) = anchor(&node, time);
		assert!((node.x - ax).abs() < 1.0);
		assert!((node.y - ay).abs() < 1.0);
		assert!(node.vx.abs() < 0.1 && node.vy.abs() < 0.1);
	}
}
