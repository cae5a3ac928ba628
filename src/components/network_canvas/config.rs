//! Tuning for the particle network.
//!
//! Every visual variant of the network (free scatter, fixed layers, with or
//! without shockwaves, color cycling and pointer trails) is one engine driven
//! by a [`NetworkConfig`]. Presets cover the variants used on the site; JSON
//! overrides can be layered over the defaults with [`NetworkConfig::from_json`].

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while building or validating a [`NetworkConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The override document was not valid JSON for this schema.
	#[error("invalid network config: {0}")]
	Parse(#[from] serde_json::Error),

	/// The population band is empty or inverted.
	#[error("population band is invalid: min {min} must be at least 1 and below max {max}")]
	PopulationBand { min: usize, max: usize },

	/// Layered topology needs at least one non-empty layer.
	#[error("layered topology needs at least one non-empty layer")]
	EmptyLayers,

	/// A factor that must lie in a half-open unit range does not.
	#[error("{name} must be in (0, 1], got {value}")]
	UnitFactor { name: &'static str, value: f64 },

	/// A distance, radius or interval that must be positive is not.
	#[error("{name} must be positive, got {value}")]
	NonPositive { name: &'static str, value: f64 },
}

/// How nodes are arranged.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum Topology {
	/// Randomly scattered nodes whose population drifts within a band.
	Scatter,
	/// Fixed columns of nodes, edges only between adjacent columns.
	Layered {
		/// Node count per layer, left to right.
		layers: Vec<usize>,
	},
}

/// Bounds and rates for the dynamic population.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
	/// Permanent seed nodes created at startup; the population never drops below it.
	pub min: usize,
	/// Upper bound for the randomized target count.
	pub max: usize,
	/// Simulated seconds between target re-rolls.
	pub retarget_interval: f64,
	/// A uniform draw must exceed this for a node to be created on a frame.
	pub growth_threshold: f64,
	/// A uniform draw must exceed this for a node to be retired on a frame.
	pub shrink_threshold: f64,
	/// Clock units a retiring node keeps shrinking before it is deleted.
	pub removal_delay: f64,
}

impl Default for PopulationConfig {
	fn default() -> Self {
		Self {
			min: 20,
			max: 30,
			retarget_interval: 3.0,
			growth_threshold: 0.995,
			shrink_threshold: 0.997,
			removal_delay: 0.6,
		}
	}
}

/// Where new nodes may land.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
	/// Inset from every surface edge.
	pub margin: f64,
	/// Minimum spacing from existing nodes for permanent seeds.
	pub seed_spacing: f64,
	/// Minimum spacing from existing nodes for dynamic nodes.
	pub dynamic_spacing: f64,
	/// Resampling budget per creation.
	pub max_attempts: usize,
}

impl Default for PlacementConfig {
	fn default() -> Self {
		Self {
			margin: 125.0,
			seed_spacing: 80.0,
			dynamic_spacing: 100.0,
			max_attempts: 100,
		}
	}
}

/// Random geometric graph parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
	/// Pairs closer than this may be connected (scatter only).
	pub threshold: f64,
	/// Probability that an eligible pair is connected.
	pub inclusion: f64,
	/// Resting opacity of a live connection.
	pub target_opacity: f64,
	/// Angular speed of the signal pulse.
	pub signal_speed: f64,
}

impl Default for ConnectionConfig {
	fn default() -> Self {
		Self {
			threshold: 200.0,
			inclusion: 0.6,
			target_opacity: 0.6,
			signal_speed: 3.0,
		}
	}
}

/// Per-node floating orbit ranges. Each node draws its own values from these.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FloatConfig {
	/// Speed is drawn from `±speed_x / 2`.
	pub speed_x: f64,
	/// Speed is drawn from `±speed_y / 2`.
	pub speed_y: f64,
	/// Amplitude is drawn from `range_x .. 2 * range_x`.
	pub range_x: f64,
	/// Amplitude is drawn from `range_y .. 2 * range_y`.
	pub range_y: f64,
}

impl Default for FloatConfig {
	fn default() -> Self {
		Self {
			speed_x: 0.012,
			speed_y: 0.01,
			range_x: 15.0,
			range_y: 12.0,
		}
	}
}

/// How the pointer pushes and pulls nearby nodes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum PointerField {
	/// Linear falloff, always pushes away.
	Repel {
		/// Peak force at the pointer.
		strength: f64,
	},
	/// Sinusoidal falloff; repels in the inner band and attracts outside it.
	Banded {
		/// Fraction of the radius that repels.
		inner_fraction: f64,
		/// Peak of the `sin(pi * d / r)` envelope.
		amplitude: f64,
		/// Multiplier inside the inner band.
		repel: f64,
		/// Multiplier outside the inner band.
		attract: f64,
	},
}

/// Pointer interaction settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
	/// Nodes further than this from the pointer are unaffected.
	pub radius: f64,
	/// Force profile inside the radius.
	pub field: PointerField,
}

impl Default for PointerConfig {
	fn default() -> Self {
		Self {
			radius: 200.0,
			field: PointerField::Banded {
				inner_fraction: 0.5,
				amplitude: 3.0,
				repel: 2.0,
				attract: 0.5,
			},
		}
	}
}

/// Click shockwave settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShockwaveConfig {
	/// Blast radius.
	pub radius: f64,
	/// Peak impulse at the click point.
	pub strength: f64,
	/// Whether affected nodes and connections light up.
	pub boost: bool,
	/// Per-frame linear decay of boost activation and data flow.
	pub decay: f64,
	/// Expanding ring drawn from the click point.
	pub wave: Option<WaveConfig>,
}

impl Default for ShockwaveConfig {
	fn default() -> Self {
		Self {
			radius: 300.0,
			strength: 20.0,
			boost: true,
			decay: 0.02,
			wave: Some(WaveConfig::default()),
		}
	}
}

/// Expanding ring drawn by a shockwave.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
	/// Radius growth per frame.
	pub speed: f64,
	/// Life lost per frame, life starts at 1.
	pub decay: f64,
	/// The ring is dropped once it grows past this.
	pub max_radius: f64,
}

impl Default for WaveConfig {
	fn default() -> Self {
		Self {
			speed: 8.0,
			decay: 0.02,
			max_radius: 400.0,
		}
	}
}

/// Pointer trail settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
	/// Most recent points kept.
	pub capacity: usize,
	/// Life lost per frame, life starts at 1.
	pub decay: f64,
}

impl Default for TrailConfig {
	fn default() -> Self {
		Self {
			capacity: 20,
			decay: 0.05,
		}
	}
}

/// Decorative particles drifting across the surface.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
	/// Number of particles.
	pub count: usize,
	/// Horizontal drift per clock unit.
	pub drift: f64,
	/// Horizontal spacing between consecutive particles.
	pub spacing: f64,
	/// Vertical swing around the surface midline.
	pub amplitude: f64,
	/// Angular speed of the vertical swing.
	pub swing_speed: f64,
}

impl Default for AmbientConfig {
	fn default() -> Self {
		Self {
			count: 20,
			drift: 50.0,
			spacing: 100.0,
			amplitude: 100.0,
			swing_speed: 1.2,
		}
	}
}

/// How each frame starts.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum Backdrop {
	/// Wipe the surface.
	Clear,
	/// Paint a translucent black overlay, leaving motion trails.
	Fade {
		/// Overlay alpha.
		alpha: f64,
	},
}

/// Complete particle network configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
	/// Node arrangement.
	pub topology: Topology,
	/// Dynamic population (scatter only).
	pub population: PopulationConfig,
	/// Placement of scattered nodes.
	pub placement: PlacementConfig,
	/// Edge generation.
	pub connections: ConnectionConfig,
	/// Floating orbit ranges.
	pub float: FloatConfig,
	/// Node base radius is drawn from `node_radius .. node_radius + node_radius_spread`.
	pub node_radius: f64,
	/// See `node_radius`.
	pub node_radius_spread: f64,
	/// Pull toward the floating anchor.
	pub spring_constant: f64,
	/// Velocity multiplier applied every frame.
	pub damping: f64,
	/// Fraction of the remaining distance covered per frame by scale and opacity.
	pub fade_speed: f64,
	/// Angular speed of node activation.
	pub activation_speed: f64,
	/// Clock advance per frame.
	pub time_step: f64,
	/// Nominal seconds per frame, used by the population retarget timer.
	pub frame_seconds: f64,
	/// Pointer interaction.
	pub pointer: PointerConfig,
	/// Click shockwave, `None` disables clicks.
	pub shockwave: Option<ShockwaveConfig>,
	/// Pointer trail, `None` disables it.
	pub trail: Option<TrailConfig>,
	/// Cycle hues over time instead of the fixed blue palette.
	pub color_cycling: bool,
	/// Global hue advance per frame when cycling.
	pub hue_step: f64,
	/// Decorative particles.
	pub ambient: AmbientConfig,
	/// Frame clearing policy.
	pub backdrop: Backdrop,
}

impl Default for NetworkConfig {
	fn default() -> Self {
		Self::modern()
	}
}

impl NetworkConfig {
	/// Scattered network with hue cycling, shockwave rings and a pointer trail.
	pub fn modern() -> Self {
		Self {
			topology: Topology::Scatter,
			population: PopulationConfig::default(),
			placement: PlacementConfig::default(),
			connections: ConnectionConfig::default(),
			float: FloatConfig::default(),
			node_radius: 3.0,
			node_radius_spread: 4.0,
			spring_constant: 0.015,
			damping: 0.9,
			fade_speed: 0.06,
			activation_speed: 1.5,
			time_step: 0.01,
			frame_seconds: 0.016,
			pointer: PointerConfig::default(),
			shockwave: Some(ShockwaveConfig::default()),
			trail: Some(TrailConfig::default()),
			color_cycling: true,
			hue_step: 0.5,
			ambient: AmbientConfig::default(),
			backdrop: Backdrop::Fade { alpha: 0.05 },
		}
	}

	/// Scattered network in a fixed blue palette; clicks push without rings.
	pub fn classic() -> Self {
		Self {
			population: PopulationConfig {
				min: 15,
				max: 25,
				..PopulationConfig::default()
			},
			connections: ConnectionConfig {
				threshold: 180.0,
				inclusion: 0.5,
				target_opacity: 0.7,
				signal_speed: 2.0,
			},
			float: FloatConfig {
				speed_x: 0.01,
				speed_y: 0.008,
				range_x: 10.0,
				range_y: 8.0,
			},
			node_radius: 4.0,
			node_radius_spread: 3.0,
			spring_constant: 0.01,
			damping: 0.92,
			fade_speed: 0.04,
			activation_speed: 1.0,
			pointer: PointerConfig {
				radius: 150.0,
				field: PointerField::Repel { strength: 2.0 },
			},
			shockwave: Some(ShockwaveConfig {
				strength: 15.0,
				boost: false,
				wave: None,
				..ShockwaveConfig::default()
			}),
			trail: None,
			color_cycling: false,
			ambient: AmbientConfig {
				count: 15,
				drift: 30.0,
				spacing: 120.0,
				amplitude: 80.0,
				swing_speed: 0.8,
			},
			backdrop: Backdrop::Clear,
			..Self::modern()
		}
	}

	/// Feed-forward style columns that are rebuilt on resize.
	pub fn layered() -> Self {
		Self {
			topology: Topology::Layered {
				layers: vec![4, 6, 6, 3],
			},
			connections: ConnectionConfig {
				inclusion: 0.7,
				..Self::classic().connections
			},
			float: FloatConfig {
				speed_x: 0.005,
				speed_y: 0.004,
				range_x: 5.0,
				range_y: 4.0,
			},
			node_radius: 6.0,
			node_radius_spread: 2.0,
			ambient: AmbientConfig {
				drift: 20.0,
				amplitude: 60.0,
				swing_speed: 0.5,
				..Self::classic().ambient
			},
			..Self::classic()
		}
	}

	/// Parses a partial JSON override on top of [`NetworkConfig::default`] and validates it.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Picks the config a canvas runs with. A JSON override wins over a typed
	/// config; with neither, the default is used.
	pub fn resolve(config: Option<Self>, json: Option<&str>) -> Result<Self, ConfigError> {
		if let Some(json) = json {
			return Self::from_json(json);
		}
		let config = config.unwrap_or_default();
		config.validate()?;
		Ok(config)
	}

	/// Checks the invariants the simulation relies on.
	pub fn validate(&self) -> Result<(), ConfigError> {
		match &self.topology {
			Topology::Scatter => {
				let (min, max) = (self.population.min, self.population.max);
				if min == 0 || min >= max {
					return Err(ConfigError::PopulationBand { min, max });
				}
				positive("population.retarget_interval", self.population.retarget_interval)?;
				positive("connections.threshold", self.connections.threshold)?;
			}
			Topology::Layered { layers } => {
				if layers.iter().all(|&n| n == 0) {
					return Err(ConfigError::EmptyLayers);
				}
			}
		}

		unit("damping", self.damping)?;
		unit("fade_speed", self.fade_speed)?;
		unit("connections.inclusion", self.connections.inclusion)?;
		positive("time_step", self.time_step)?;
		positive("pointer.radius", self.pointer.radius)?;
		if let Some(shockwave) = &self.shockwave {
			positive("shockwave.radius", shockwave.radius)?;
			unit("shockwave.decay", shockwave.decay)?;
		}
		if let Some(trail) = &self.trail {
			unit("trail.decay", trail.decay)?;
		}
		Ok(())
	}
}

fn unit(name: &'static str, value: f64) -> Result<(), ConfigError> {
	if value > 0.0 && value <= 1.0 {
		Ok(())
	} else {
		Err(ConfigError::UnitFactor { name, value })
	}
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
	if value > 0.0 {
		Ok(())
	} else {
		Err(ConfigError::NonPositive { name, value })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn presets_are_valid() {
		for config in [
			NetworkConfig::modern(),
			NetworkConfig::classic(),
			NetworkConfig::layered(),
		] {
			config.validate().unwrap();
		}
	}

	#[test]
	fn json_overrides_keep_defaults() {
		let config = NetworkConfig::from_json(
			r#"{ "population": { "min": 15, "max": 25 }, "trail": null, "color_cycling": false }"#,
		)
		.unwrap();
		assert_eq!(config.population.min, 15);
		assert_eq!(config.population.max, 25);
		assert_eq!(config.population.retarget_interval, 3.0);
		assert!(config.trail.is_none());
		assert!(!config.color_cycling);
		assert_eq!(config.spring_constant, NetworkConfig::default().spring_constant);
	}

	#[test]
	fn json_selects_layered_topology() {
		let config =
			NetworkConfig::from_json(r#"{ "topology": { "kind": "layered", "layers": [2, 3] } }"#)
				.unwrap();
		assert_eq!(
			config.topology,
			Topology::Layered {
				layers: vec![2, 3]
			}
		);
	}

	#[test]
	fn inverted_band_is_rejected() {
		let err = NetworkConfig::from_json(r#"{ "population": { "min": 30, "max": 10 } }"#)
			.unwrap_err();
		assert!(matches!(
			err,
			ConfigError::PopulationBand { min: 30, max: 10 }
		));
	}

	#[test]
	fn damping_must_be_a_unit_factor() {
		let config = NetworkConfig {
			damping: 1.5,
			..NetworkConfig::default()
		};
		assert!(matches!(
			config.validate(),
			Err(ConfigError::UnitFactor { name: "damping", .. })
		));
	}

	#[test]
	fn json_override_wins_over_typed_config() {
		let config = NetworkConfig::resolve(
			Some(NetworkConfig::layered()),
			Some(r#"{ "color_cycling": false }"#),
		)
		.unwrap();
		assert_eq!(config.topology, Topology::Scatter);
		assert!(!config.color_cycling);

		let config = NetworkConfig::resolve(Some(NetworkConfig::classic()), None).unwrap();
		assert_eq!(config, NetworkConfig::classic());
		assert_eq!(NetworkConfig::resolve(None, None).unwrap(), NetworkConfig::default());
	}

	#[test]
	fn resolve_rejects_invalid_typed_config() {
		let config = NetworkConfig {
			fade_speed: 0.0,
			..NetworkConfig::default()
		};
		assert!(matches!(
			NetworkConfig::resolve(Some(config), None),
			Err(ConfigError::UnitFactor { name: "fade_speed", .. })
		));
	}

	#[test]
	fn malformed_json_is_a_parse_error() {
		assert!(matches!(
			NetworkConfig::from_json("{ not json"),
			Err(ConfigError::Parse(_))
		));
	}
}
