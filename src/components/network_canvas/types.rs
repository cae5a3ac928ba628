/// Scale below which a node is neither drawn nor pushed around.
pub const VISIBLE_SCALE: f64 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
	/// Seed node that keeps the population floor; never retired.
	Permanent,
	/// Eligible for automatic retirement.
	Dynamic,
}

/// Per-node orbit around its base position.
#[derive(Clone, Debug, Default)]
pub struct Float {
	pub speed_x: f64,
	pub speed_y: f64,
	pub range_x: f64,
	pub range_y: f64,
	pub phase_x: f64,
	pub phase_y: f64,
}

#[derive(Clone, Debug)]
pub struct Node {
	pub id: NodeId,
	pub kind: NodeKind,
	pub layer: Option<usize>,
	pub x: f64,
	pub y: f64,
	pub base_x: f64,
	pub base_y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
	pub activation: f64,
	pub boost: f64,
	pub scale: f64,
	pub target_scale: f64,
	pub float: Float,
	pub hue: f64,
	/// Core nodes keep their own hue when colors cycle.
	pub core: bool,
	/// Clock time at which a retiring node is deleted.
	pub remove_at: Option<f64>,
}

impl Node {
	pub fn is_visible(&self) -> bool {
		self.scale >= VISIBLE_SCALE
	}

	pub fn is_retiring(&self) -> bool {
		self.remove_at.is_some()
	}

	pub fn total_activation(&self) -> f64 {
		(self.activation + self.boost).clamp(0.0, 1.0)
	}

	pub fn distance_to(&self, x: f64, y: f64) -> f64 {
		(self.x - x).hypot(self.y - y)
	}
}

#[derive(Clone, Debug)]
pub struct Connection {
	pub from: NodeId,
	pub to: NodeId,
	pub opacity: f64,
	pub target_opacity: f64,
	pub signal: f64,
	pub data_flow: f64,
	/// `1.0` flows from `from` to `to`, `-1.0` the other way.
	pub flow_direction: f64,
	pub strength: f64,
}

impl Connection {
	pub fn touches(&self, id: NodeId) -> bool {
		self.from == id || self.to == id
	}
}

/// Expanding ring left by a shockwave.
#[derive(Clone, Debug)]
pub struct PulseWave {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub life: f64,
}

#[derive(Clone, Debug)]
pub struct TrailPoint {
	pub x: f64,
	pub y: f64,
	pub life: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
	pub x: f64,
	pub y: f64,
}
