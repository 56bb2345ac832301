use std::ops::Range;

use log::{debug, trace};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::errors::RouteError;
use crate::geometry::manhattan_distance;
use super::graph::{Edge, EdgeKind, Graph};
use super::node::{Node, NodeId};


/// Reference point for congestion; fixed regardless of grid size
pub const CITY_CENTER: (i64, i64) = (4, 4);
pub const BASE_WEIGHT: f64 = 1.0;
/// Congestion multiplier at the center, dropping by `TRAFFIC_FALLOFF` per block
pub const PEAK_TRAFFIC: f64 = 3.0;
pub const TRAFFIC_FALLOFF: f64 = 0.3;
pub const MAIN_ROAD_MULTIPLIER: f64 = 0.7;
pub const RANDOM_TRAFFIC_RANGE: Range<f64> = 0.8..1.2;
pub const SIGNAL_DELAY: f64 = 0.3;
pub const DEFAULT_GRID_SIZE: usize = 8;


/// Builds square city grids with traffic-dependent edge weights
#[derive(Clone, Copy, Debug)]
pub struct GraphGenerator {
    grid_size: u32,
}

impl GraphGenerator {

    pub fn new(grid_size: usize) -> Result<Self, RouteError> {
        match u32::try_from(grid_size) {
            Ok(size) if size > 0 => Ok(Self { grid_size: size }),
            _ => Err(RouteError::InvalidGridSize(grid_size)),
        }
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Generate the grid graph and its node catalog.
    ///
    /// Nodes are listed column by column (`x` outer, `y` inner). Each node is joined to
    /// its right and bottom neighbor, drawing exactly one random multiplier from `rng`
    /// per edge in that order, so a seeded generator always yields the same graph.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<(Graph, Vec<Node>), RouteError> {
        let size = self.grid_size;
        let mut graph = Graph::new();
        let mut nodes = Vec::with_capacity((size as usize).pow(2));

        for x in 0..size {
            for y in 0..size {
                let node = Node::new(x, y);
                graph.add_node(node.id);
                nodes.push(node);
            }
        }

        for x in 0..size {
            for y in 0..size {
                let here = NodeId::new(x, y);

                if x + 1 < size {
                    let right = NodeId::new(x + 1, y);
                    self.connect(&mut graph, here, right, EdgeKind::Horizontal, rng)?;
                }
                if y + 1 < size {
                    let below = NodeId::new(x, y + 1);
                    self.connect(&mut graph, here, below, EdgeKind::Vertical, rng)?;
                }
            }
        }

        debug!(
            "generated {size}x{size} city grid with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok((graph, nodes))
    }

    fn connect<R: Rng>(&self, graph: &mut Graph, a: NodeId, b: NodeId, kind: EdgeKind, rng: &mut R) -> Result<(), RouteError> {
        let random_traffic = rng.random_range(RANDOM_TRAFFIC_RANGE);
        let weight = road_weight(a, b, random_traffic);
        trace!("{a} <-> {b}: weight {weight} (random factor {random_traffic:.3})");
        graph.add_edge(a, b, Edge { weight, kind })
    }
}


/// Travel time of the street between two adjacent intersections, rounded to 0.1.
///
/// `random_traffic` is the per-edge random multiplier, normally drawn from `RANDOM_TRAFFIC_RANGE`.
pub fn road_weight(a: NodeId, b: NodeId, random_traffic: f64) -> f64 {
    let (cx, cy) = CITY_CENTER;
    let from_center = manhattan_distance(i64::from(a.x), i64::from(a.y), cx, cy)
        + manhattan_distance(i64::from(b.x), i64::from(b.y), cx, cy);
    let traffic = (PEAK_TRAFFIC - from_center as f64 * TRAFFIC_FALLOFF).max(1.0);

    // every second street is a main road
    let is_main_road = (a.x % 2 == 0 && b.x % 2 == 0) || (a.y % 2 == 0 && b.y % 2 == 0);
    let road_type = if is_main_road { MAIN_ROAD_MULTIPLIER } else { 1.0 };

    let signal_delay = if a.is_signalized() || b.is_signalized() { SIGNAL_DELAY } else { 0.0 };

    let weight = BASE_WEIGHT * traffic * road_type * random_traffic + signal_delay;
    (weight * 10.0).round() / 10.0
}


/// Generation parameters, loadable from JSON
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub grid_size: usize,
    /// Fixed seed for reproducible graphs; a fresh thread-local source is used when absent
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            seed: None,
        }
    }
}

impl GeneratorConfig {

    pub fn from_json(json: &str) -> Result<Self, RouteError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(&self) -> Result<(Graph, Vec<Node>), RouteError> {
        let generator = GraphGenerator::new(self.grid_size)?;
        match self.seed {
            Some(seed) => generator.generate(&mut StdRng::seed_from_u64(seed)),
            None => generator.generate(&mut rand::rng()),
        }
    }
}
