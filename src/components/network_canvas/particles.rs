//! Ambient particles drifting across the surface.
//!
//! They are not part of the node graph: each particle is a pure function of its
//! index, the simulation clock and the surface size, so the pointer and
//! shockwaves never touch them.

use super::config::AmbientConfig;

#[derive(Clone, Debug, PartialEq)]
pub struct Ambient {
	pub x: f64,
	pub y: f64,
	pub size: f64,
	pub opacity: f64,
	/// Offset added to the global hue shift when colors cycle.
	pub hue_offset: f64,
}

/// Margin a particle travels off-surface before wrapping.
const WRAP_MARGIN: f64 = 50.0;

pub fn ambient(index: usize, time: f64, width: f64, height: f64, config: &AmbientConfig) -> Ambient {
	let i = index as f64;
	let lane = width + 2.0 * WRAP_MARGIN;
	Ambient {
		x: (time * config.drift + i * config.spacing).rem_euclid(lane) - WRAP_MARGIN,
		y: height / 2.0 + (time * config.swing_speed + i).sin() * config.amplitude,
		size: 1.5 + (time * 2.0 + i).sin() * 0.8,
		opacity: (time * 1.5 + i * 0.3).sin() * 0.3 + 0.7,
		hue_offset: i * 20.0,
	}
}

pub fn ambient_field(
	time: f64,
	width: f64,
	height: f64,
	config: &AmbientConfig,
) -> impl Iterator<Item = Ambient> + '_ {
	(0..config.count).map(move |i| ambient(i, time, width, height, config))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn particles_are_a_pure_function_of_index_and_time() {
		let config = AmbientConfig::default();
		let a: Vec<_> = ambient_field(3.21, 800.0, 600.0, &config).collect();
		let b: Vec<_> = ambient_field(3.21, 800.0, 600.0, &config).collect();
		assert_eq!(a.len(), config.count);
		assert_eq!(a, b);
	}

	#[test]
	fn particles_wrap_horizontally() {
		let config = AmbientConfig::default();
		for step in 0..2000 {
			let p = ambient(3, step as f64 * 0.01, 800.0, 600.0, &config);
			assert!(p.x >= -WRAP_MARGIN && p.x < 800.0 + WRAP_MARGIN);
			assert!((p.y - 300.0).abs() <= config.amplitude);
			assert!(p.opacity >= 0.4 - 1e-9 && p.opacity <= 1.0 + 1e-9);
			assert!(p.size > 0.0);
		}
	}
}
