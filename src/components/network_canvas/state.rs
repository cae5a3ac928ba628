use std::collections::{HashMap, HashSet, VecDeque};

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::config::{NetworkConfig, Topology};
use super::physics;
use super::topology::{self, Placement};
use super::types::{Connection, Node, NodeId, NodeKind, Pointer, PulseWave, TrailPoint};

/// Phase offset of a connection's signal per unit of its source's base x.
const SIGNAL_SPREAD: f64 = 0.02;

/// All simulation state for one surface.
pub struct NetworkState {
	pub config: NetworkConfig,
	pub nodes: Vec<Node>,
	pub connections: Vec<Connection>,
	pub pulse_waves: Vec<PulseWave>,
	pub trail: VecDeque<TrailPoint>,
	pub pointer: Option<Pointer>,
	pub width: f64,
	pub height: f64,
	/// Simulation clock, advanced by `config.time_step` per frame.
	pub time: f64,
	/// Global hue offset in degrees.
	pub hue_shift: f64,
	target_count: usize,
	retarget_timer: f64,
	next_id: u64,
	rng: SmallRng,
}

impl NetworkState {
	pub fn new(config: NetworkConfig, width: f64, height: f64, seed: u64) -> Self {
		let target_count = (config.population.min + config.population.max) / 2;
		let mut state = Self {
			config,
			nodes: Vec::new(),
			connections: Vec::new(),
			pulse_waves: Vec::new(),
			trail: VecDeque::new(),
			pointer: None,
			width,
			height,
			time: 0.0,
			hue_shift: 0.0,
			target_count,
			retarget_timer: 0.0,
			next_id: 0,
			rng: SmallRng::seed_from_u64(seed),
		};
		match state.config.topology {
			Topology::Scatter => state.seed_population(),
			Topology::Layered { .. } => state.rebuild_layers(),
		}
		state
	}

	fn allocate_id(&mut self) -> NodeId {
		let id = NodeId(self.next_id);
		self.next_id += 1;
		id
	}

	/// Places the permanent seed nodes. Seeds are placed even when the spacing
	/// search runs out, so the population floor always holds.
	fn seed_population(&mut self) {
		for _ in 0..self.config.population.min {
			let (Placement::Free(x, y) | Placement::Crowded(x, y)) = topology::find_spot(
				&self.nodes,
				self.width,
				self.height,
				self.config.placement.seed_spacing,
				&self.config.placement,
				&mut self.rng,
			);
			let id = self.allocate_id();
			let node = topology::spawn_node(id, NodeKind::Permanent, x, y, &self.config, &mut self.rng);
			self.nodes.push(node);
		}
		self.regenerate_connections();
	}

	fn rebuild_layers(&mut self) {
		let Topology::Layered { layers } = &self.config.topology else {
			return;
		};
		self.nodes = topology::layered_nodes(
			layers,
			self.width,
			self.height,
			self.next_id,
			&self.config,
			&mut self.rng,
		);
		self.next_id += self.nodes.len() as u64;
		self.connections = topology::layered_connections(
			&self.nodes,
			&[],
			&self.config.connections,
			&mut self.rng,
		);
	}

	fn regenerate_connections(&mut self) {
		self.connections = match self.config.topology {
			Topology::Scatter => topology::scatter_connections(
				&self.nodes,
				&self.connections,
				&self.config.connections,
				&mut self.rng,
			),
			Topology::Layered { .. } => topology::layered_connections(
				&self.nodes,
				&self.connections,
				&self.config.connections,
				&mut self.rng,
			),
		};
	}

	/// Nodes that are not on their way out.
	pub fn live_count(&self) -> usize {
		self.nodes.iter().filter(|n| !n.is_retiring()).count()
	}

	pub fn node_index(&self) -> HashMap<NodeId, &Node> {
		self.nodes.iter().map(|n| (n.id, n)).collect()
	}

	/// Creates one dynamic node at a free spot and rebuilds the connections.
	/// Returns `None` when no spot keeps the required spacing.
	pub fn grow(&mut self) -> Option<NodeId> {
		let Placement::Free(x, y) = topology::find_spot(
			&self.nodes,
			self.width,
			self.height,
			self.config.placement.dynamic_spacing,
			&self.config.placement,
			&mut self.rng,
		) else {
			return None;
		};
		let id = self.allocate_id();
		let node = topology::spawn_node(id, NodeKind::Dynamic, x, y, &self.config, &mut self.rng);
		self.nodes.push(node);
		self.regenerate_connections();
		debug!("network grew to {} nodes (target {})", self.live_count(), self.target_count);
		Some(id)
	}

	/// Starts the shrink animation of a dynamic node and fades out its
	/// connections. The node is deleted once `population.removal_delay` has
	/// elapsed on the simulation clock.
	pub fn retire(&mut self, id: NodeId) -> bool {
		let remove_at = self.time + self.config.population.removal_delay;
		let Some(node) = self
			.nodes
			.iter_mut()
			.find(|n| n.id == id && n.kind == NodeKind::Dynamic && !n.is_retiring())
		else {
			return false;
		};
		node.target_scale = 0.0;
		node.remove_at = Some(remove_at);
		for connection in self.connections.iter_mut().filter(|c| c.touches(id)) {
			connection.target_opacity = 0.0;
		}
		true
	}

	/// Retires a uniformly chosen dynamic node.
	pub fn retire_random(&mut self) -> Option<NodeId> {
		let candidates: Vec<NodeId> = self
			.nodes
			.iter()
			.filter(|n| n.kind == NodeKind::Dynamic && !n.is_retiring())
			.map(|n| n.id)
			.collect();
		if candidates.is_empty() {
			return None;
		}
		let id = candidates[self.rng.random_range(0..candidates.len())];
		self.retire(id).then_some(id)
	}

	/// Deletes nodes whose removal time has passed, along with every
	/// connection that touches them.
	fn reap(&mut self) {
		let now = self.time;
		let before = self.nodes.len();
		self.nodes.retain(|n| n.remove_at.is_none_or(|at| at > now));
		if self.nodes.len() == before {
			return;
		}
		let alive: HashSet<NodeId> = self.nodes.iter().map(|n| n.id).collect();
		self.connections
			.retain(|c| alive.contains(&c.from) && alive.contains(&c.to));
		debug!("network shrank to {} nodes (target {})", self.nodes.len(), self.target_count);
	}

	fn update_population(&mut self) {
		let population = &self.config.population;
		self.retarget_timer += self.config.frame_seconds;
		if self.retarget_timer > population.retarget_interval {
			let span = (population.max - population.min) as f64;
			self.target_count = population.min + (self.rng.random::<f64>() * span) as usize;
			self.retarget_timer = 0.0;
		}

		let (growth, shrink) = (population.growth_threshold, population.shrink_threshold);
		let live = self.live_count();
		if live < self.target_count && self.rng.random::<f64>() > growth {
			self.grow();
		}
		if live > self.target_count && self.rng.random::<f64>() > shrink {
			self.retire_random();
		}
	}

	/// Advances the simulation by one frame.
	pub fn tick(&mut self) {
		self.time += self.config.time_step;
		if self.config.color_cycling {
			self.hue_shift = (self.hue_shift + self.config.hue_step) % 360.0;
		}
		if self.config.topology == Topology::Scatter {
			self.update_population();
		}
		self.reap();

		let (time, pointer, fade) = (self.time, self.pointer, self.config.fade_speed);
		let decay = self.config.shockwave.as_ref().map_or(0.0, |s| s.decay);

		for node in &mut self.nodes {
			node.activation = physics::activation(node.base_x, time, self.config.activation_speed);
			node.boost = (node.boost - decay).max(0.0);
			node.scale = (node.scale + (node.target_scale - node.scale) * fade).clamp(0.0, 1.0);
			physics::step(node, time, pointer, &self.config);
		}

		let phases: HashMap<NodeId, f64> = self.nodes.iter().map(|n| (n.id, n.base_x)).collect();
		let signal_speed = self.config.connections.signal_speed;
		for connection in &mut self.connections {
			connection.opacity += (connection.target_opacity - connection.opacity) * fade;
			let phase = phases.get(&connection.from).copied().unwrap_or_default();
			connection.signal = ((time * signal_speed + phase * SIGNAL_SPREAD).sin() + 1.0) / 2.0;
			connection.data_flow = (connection.data_flow - decay).max(0.0);
		}

		if let Some(wave) = self.config.shockwave.as_ref().and_then(|s| s.wave.as_ref()) {
			for pulse in &mut self.pulse_waves {
				pulse.radius += wave.speed;
				pulse.life -= wave.decay;
			}
			self.pulse_waves
				.retain(|p| p.life > 0.0 && p.radius <= wave.max_radius);
		}

		if let Some(trail) = &self.config.trail {
			for point in &mut self.trail {
				point.life -= trail.decay;
			}
			self.trail.retain(|p| p.life > 0.0);
		}
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if let Some(trail) = &self.config.trail {
			if self.pointer.is_some() {
				self.trail.push_back(TrailPoint { x, y, life: 1.0 });
				while self.trail.len() > trail.capacity {
					self.trail.pop_front();
				}
			}
		}
		self.pointer = Some(Pointer { x, y });
	}

	pub fn pointer_leave(&mut self) {
		self.pointer = None;
		self.trail.clear();
	}

	/// Shockwave from `(x, y)`: outward impulse, activation boost, data flow
	/// along nearby connections and an expanding ring.
	pub fn click(&mut self, x: f64, y: f64) {
		let Some(shockwave) = &self.config.shockwave else {
			return;
		};

		if shockwave.wave.is_some() {
			self.pulse_waves.push(PulseWave {
				x,
				y,
				radius: 0.0,
				life: 1.0,
			});
		}

		for node in &mut self.nodes {
			if let Some((ix, iy)) =
				physics::blast_impulse(node, x, y, shockwave.radius, shockwave.strength)
			{
				node.vx += ix;
				node.vy += iy;
				if shockwave.boost {
					node.boost = 1.0;
				}
			}
		}

		if !shockwave.boost {
			return;
		}
		let distances: HashMap<NodeId, f64> = self
			.nodes
			.iter()
			.map(|n| (n.id, n.distance_to(x, y)))
			.collect();
		for connection in &mut self.connections {
			let (Some(&from), Some(&to)) = (distances.get(&connection.from), distances.get(&connection.to))
			else {
				continue;
			};
			if from < shockwave.radius || to < shockwave.radius {
				connection.data_flow = 1.0;
				connection.flow_direction = if from < to { 1.0 } else { -1.0 };
			}
		}
	}

	/// Stores the new surface size. Layered networks are rebuilt to fit; scattered
	/// networks keep their anchors.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		if matches!(self.config.topology, Topology::Layered { .. }) {
			self.rebuild_layers();
		}
	}
}
