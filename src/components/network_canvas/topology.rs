//! Node placement and edge generation.

use std::collections::{HashMap, HashSet};
use std::f64::consts::TAU;

use rand::Rng;
use rand::rngs::SmallRng;

use super::config::{ConnectionConfig, NetworkConfig, PlacementConfig};
use super::types::{Connection, Float, Node, NodeId, NodeKind};

/// Share of scattered nodes drawn as "core" nodes with their own hue.
const CORE_SHARE: f64 = 0.3;

/// Outcome of a placement search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
	/// Far enough from every existing node.
	Free(f64, f64),
	/// Budget exhausted; the last sample is kept for callers that must place anyway.
	Crowded(f64, f64),
}

/// Samples positions inside the margin-inset surface until one keeps `spacing`
/// from every existing node, or the attempt budget runs out.
pub fn find_spot(
	nodes: &[Node],
	width: f64,
	height: f64,
	spacing: f64,
	config: &PlacementConfig,
	rng: &mut SmallRng,
) -> Placement {
	let span_x = (width - 2.0 * config.margin).max(0.0);
	let span_y = (height - 2.0 * config.margin).max(0.0);
	let mut spot = (config.margin, config.margin);

	for _ in 0..config.max_attempts.max(1) {
		spot = (
			rng.random::<f64>() * span_x + config.margin,
			rng.random::<f64>() * span_y + config.margin,
		);
		if nodes.iter().all(|n| n.distance_to(spot.0, spot.1) >= spacing) {
			return Placement::Free(spot.0, spot.1);
		}
	}
	Placement::Crowded(spot.0, spot.1)
}

/// Builds a node at `(x, y)` with randomized size, orbit and hue. It starts
/// invisible and grows to full scale.
pub fn spawn_node(
	id: NodeId,
	kind: NodeKind,
	x: f64,
	y: f64,
	config: &NetworkConfig,
	rng: &mut SmallRng,
) -> Node {
	let f = &config.float;
	Node {
		id,
		kind,
		layer: None,
		x,
		y,
		base_x: x,
		base_y: y,
		vx: 0.0,
		vy: 0.0,
		radius: config.node_radius + rng.random::<f64>() * config.node_radius_spread,
		activation: rng.random::<f64>(),
		boost: 0.0,
		scale: 0.0,
		target_scale: 1.0,
		float: Float {
			speed_x: (rng.random::<f64>() - 0.5) * f.speed_x,
			speed_y: (rng.random::<f64>() - 0.5) * f.speed_y,
			range_x: f.range_x + rng.random::<f64>() * f.range_x,
			range_y: f.range_y + rng.random::<f64>() * f.range_y,
			phase_x: rng.random::<f64>() * TAU,
			phase_y: rng.random::<f64>() * TAU,
		},
		hue: rng.random::<f64>() * 360.0,
		core: rng.random::<f64>() < CORE_SHARE,
		remove_at: None,
	}
}

/// Lays nodes out in evenly spaced columns, one per layer.
pub fn layered_nodes(
	layers: &[usize],
	width: f64,
	height: f64,
	first_id: u64,
	config: &NetworkConfig,
	rng: &mut SmallRng,
) -> Vec<Node> {
	let layer_spacing = width / (layers.len() + 1) as f64;
	let mut next_id = first_id;
	let mut nodes = Vec::with_capacity(layers.iter().sum());

	for (layer, &count) in layers.iter().enumerate() {
		let x = layer_spacing * (layer + 1) as f64;
		let y_spacing = height / (count + 1) as f64;
		for i in 0..count {
			let y = y_spacing * (i + 1) as f64;
			let mut node = spawn_node(NodeId(next_id), NodeKind::Permanent, x, y, config, rng);
			node.layer = Some(layer);
			node.core = false;
			// Layers appear at full scale; only scattered nodes animate in.
			node.scale = 1.0;
			nodes.push(node);
			next_id += 1;
		}
	}
	nodes
}

fn previous_opacity(previous: &[Connection]) -> HashMap<(NodeId, NodeId), f64> {
	previous
		.iter()
		.map(|c| ((c.from, c.to), c.opacity))
		.collect()
}

fn connect(
	from: NodeId,
	to: NodeId,
	strength: f64,
	carried: Option<f64>,
	config: &ConnectionConfig,
) -> Connection {
	Connection {
		from,
		to,
		opacity: carried.unwrap_or(0.0),
		target_opacity: config.target_opacity,
		signal: 0.0,
		data_flow: 0.0,
		flow_direction: 1.0,
		strength,
	}
}

/// Random geometric graph over the non-retiring nodes, rebuilt from scratch.
///
/// Pairs that were already connected keep their opacity if drawn again.
/// Edges of retiring nodes are kept as they are and keep fading out until
/// their node is deleted.
pub fn scatter_connections(
	nodes: &[Node],
	previous: &[Connection],
	config: &ConnectionConfig,
	rng: &mut SmallRng,
) -> Vec<Connection> {
	let carried = previous_opacity(previous);
	let retiring: HashSet<NodeId> = nodes.iter().filter(|n| n.is_retiring()).map(|n| n.id).collect();
	let live: Vec<&Node> = nodes.iter().filter(|n| !n.is_retiring()).collect();
	let mut connections: Vec<Connection> = previous
		.iter()
		.filter(|c| retiring.contains(&c.from) || retiring.contains(&c.to))
		.map(|c| Connection {
			target_opacity: 0.0,
			..c.clone()
		})
		.collect();

	for (i, a) in live.iter().enumerate() {
		for b in &live[i + 1..] {
			let distance = a.distance_to(b.x, b.y);
			if distance < config.threshold && rng.random::<f64>() < config.inclusion {
				connections.push(connect(
					a.id,
					b.id,
					1.0 - distance / config.threshold,
					carried.get(&(a.id, b.id)).copied(),
					config,
				));
			}
		}
	}
	connections
}

/// Edges between adjacent layers only.
pub fn layered_connections(
	nodes: &[Node],
	previous: &[Connection],
	config: &ConnectionConfig,
	rng: &mut SmallRng,
) -> Vec<Connection> {
	let carried = previous_opacity(previous);
	let mut connections = Vec::new();

	for a in nodes {
		let Some(layer) = a.layer else { continue };
		for b in nodes.iter().filter(|b| b.layer == Some(layer + 1)) {
			if rng.random::<f64>() < config.inclusion {
				connections.push(connect(
					a.id,
					b.id,
					1.0,
					carried.get(&(a.id, b.id)).copied(),
					config,
				));
			}
		}
	}
	connections
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;

	use super::*;

	fn rng() -> SmallRng {
		SmallRng::seed_from_u64(7)
	}

	#[test]
	fn placement_respects_margin_and_spacing() {
		let config = NetworkConfig::default();
		let mut rng = rng();
		let mut nodes = Vec::new();
		for id in 0..10 {
			if let Placement::Free(x, y) =
				find_spot(&nodes, 800.0, 600.0, 80.0, &config.placement, &mut rng)
			{
				assert!((125.0..=675.0).contains(&x));
				assert!((125.0..=475.0).contains(&y));
				assert!(nodes.iter().all(|n: &Node| n.distance_to(x, y) >= 80.0));
				nodes.push(spawn_node(NodeId(id), NodeKind::Dynamic, x, y, &config, &mut rng));
			}
		}
		assert!(!nodes.is_empty());
	}

	#[test]
	fn crowded_surface_exhausts_the_budget() {
		let config = NetworkConfig::default();
		let mut rng = rng();
		let blocker = spawn_node(NodeId(0), NodeKind::Permanent, 125.0, 125.0, &config, &mut rng);
		// A surface no larger than the margins collapses every sample onto one point.
		let spot = find_spot(&[blocker], 250.0, 250.0, 80.0, &config.placement, &mut rng);
		assert_eq!(spot, Placement::Crowded(125.0, 125.0));
	}

	#[test]
	fn degenerate_surface_does_not_panic() {
		let config = NetworkConfig::default();
		let spot = find_spot(&[], 0.0, 0.0, 80.0, &config.placement, &mut rng());
		assert_eq!(spot, Placement::Free(125.0, 125.0));
	}

	#[test]
	fn new_nodes_start_hidden_and_grow() {
		let config = NetworkConfig::default();
		let node = spawn_node(NodeId(3), NodeKind::Dynamic, 10.0, 20.0, &config, &mut rng());
		assert_eq!(node.scale, 0.0);
		assert_eq!(node.target_scale, 1.0);
		assert_eq!((node.base_x, node.base_y), (10.0, 20.0));
		assert!(node.radius >= 3.0 && node.radius < 7.0);
	}

	#[test]
	fn scatter_edges_are_short_and_unique() {
		let config = NetworkConfig::default();
		let mut rng = rng();
		let nodes: Vec<Node> = (0..30)
			.map(|i| {
				let (x, y) = ((i % 6) as f64 * 90.0, (i / 6) as f64 * 90.0);
				spawn_node(NodeId(i), NodeKind::Permanent, x, y, &config, &mut rng)
			})
			.collect();
		let edges = scatter_connections(&nodes, &[], &config.connections, &mut rng);
		assert!(!edges.is_empty());
		for edge in &edges {
			assert!(edge.from < edge.to);
			let a = nodes.iter().find(|n| n.id == edge.from).unwrap();
			let b = nodes.iter().find(|n| n.id == edge.to).unwrap();
			assert!(a.distance_to(b.x, b.y) < config.connections.threshold);
			assert!(edge.strength > 0.0 && edge.strength <= 1.0);
		}
	}

	#[test]
	fn retiring_nodes_get_no_new_edges() {
		let config = NetworkConfig {
			connections: ConnectionConfig {
				inclusion: 1.0,
				..ConnectionConfig::default()
			},
			..NetworkConfig::default()
		};
		let mut rng = rng();
		let mut a = spawn_node(NodeId(0), NodeKind::Dynamic, 0.0, 0.0, &config, &mut rng);
		let b = spawn_node(NodeId(1), NodeKind::Dynamic, 10.0, 0.0, &config, &mut rng);
		a.remove_at = Some(1.0);
		assert!(scatter_connections(&[a, b], &[], &config.connections, &mut rng).is_empty());
	}

	#[test]
	fn fading_edges_survive_regeneration() {
		let config = NetworkConfig {
			connections: ConnectionConfig {
				inclusion: 1.0,
				..ConnectionConfig::default()
			},
			..NetworkConfig::default()
		};
		let mut rng = rng();
		let mut nodes = vec![
			spawn_node(NodeId(0), NodeKind::Dynamic, 0.0, 0.0, &config, &mut rng),
			spawn_node(NodeId(1), NodeKind::Permanent, 50.0, 0.0, &config, &mut rng),
			spawn_node(NodeId(2), NodeKind::Permanent, 0.0, 50.0, &config, &mut rng),
		];
		let mut first = scatter_connections(&nodes, &[], &config.connections, &mut rng);
		assert_eq!(first.len(), 3);
		for edge in &mut first {
			edge.opacity = 0.3;
		}
		nodes[0].remove_at = Some(1.0);

		let second = scatter_connections(&nodes, &first, &config.connections, &mut rng);
		let fading: Vec<&Connection> = second.iter().filter(|c| c.touches(NodeId(0))).collect();
		assert_eq!(fading.len(), 2);
		assert!(fading.iter().all(|c| c.opacity == 0.3 && c.target_opacity == 0.0));
		let live = second.iter().find(|c| !c.touches(NodeId(0))).unwrap();
		assert_eq!((live.from, live.to), (NodeId(1), NodeId(2)));
		assert_eq!(live.target_opacity, config.connections.target_opacity);
	}

	#[test]
	fn surviving_edges_keep_their_opacity() {
		let config = NetworkConfig {
			connections: ConnectionConfig {
				inclusion: 1.0,
				..ConnectionConfig::default()
			},
			..NetworkConfig::default()
		};
		let mut rng = rng();
		let nodes = vec![
			spawn_node(NodeId(0), NodeKind::Permanent, 0.0, 0.0, &config, &mut rng),
			spawn_node(NodeId(1), NodeKind::Permanent, 50.0, 0.0, &config, &mut rng),
		];
		let mut first = scatter_connections(&nodes, &[], &config.connections, &mut rng);
		first[0].opacity = 0.42;
		let second = scatter_connections(&nodes, &first, &config.connections, &mut rng);
		assert_eq!(second[0].opacity, 0.42);
	}

	#[test]
	fn layered_edges_join_adjacent_layers_only() {
		let config = NetworkConfig::layered();
		let mut rng = rng();
		let nodes = layered_nodes(&[4, 6, 6, 3], 800.0, 600.0, 0, &config, &mut rng);
		assert_eq!(nodes.len(), 19);
		for (layer, x) in [(0, 160.0), (3, 640.0)] {
			assert!(
				nodes
					.iter()
					.filter(|n| n.layer == Some(layer))
					.all(|n| (n.base_x - x).abs() < 1e-9)
			);
		}

		let edges = layered_connections(&nodes, &[], &config.connections, &mut rng);
		assert!(!edges.is_empty());
		for edge in &edges {
			let from = nodes.iter().find(|n| n.id == edge.from).unwrap();
			let to = nodes.iter().find(|n| n.id == edge.to).unwrap();
			assert_eq!(to.layer.unwrap(), from.layer.unwrap() + 1);
		}
	}
}
