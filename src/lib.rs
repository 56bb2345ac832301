//! Lowest-cost routing over weighted city grids.
//!
//! ```no_run
//! use city_router::{find_route, generate_graph, route_statistics};
//!
//! let (graph, _nodes) = generate_graph(8, 7).unwrap();
//! let result = find_route(&graph, "1-1".parse().unwrap(), "4-3".parse().unwrap()).unwrap();
//! if let Some(route) = result.route() {
//!     let stats = route_statistics(route, &graph).unwrap();
//!     println!("{:?}", stats);
//! }
//! ```

pub mod errors;
pub mod geometry;
pub mod graph_algos;
pub mod city;
mod collections;

use rand::{SeedableRng, rngs::StdRng};

pub use city::{Graph, Node, NodeId, Route, RouteResult, RouteStats};
pub use errors::RouteError;


/// Generate a `grid_size` x `grid_size` city from a seed
pub fn generate_graph(grid_size: usize, seed: u64) -> Result<(Graph, Vec<Node>), RouteError> {
    city::GraphGenerator::new(grid_size)?.generate(&mut StdRng::seed_from_u64(seed))
}

/// Cheapest route from `start` to `end`; `RouteResult::NoPath` when `end` is unreachable
pub fn find_route(graph: &Graph, start: NodeId, end: NodeId) -> Result<RouteResult, RouteError> {
    city::ShortestPathSolver::new(graph).solve(start, end)
}

/// Summary of `route`; `Ok(None)` when the route has fewer than two nodes
pub fn route_statistics(route: &Route, graph: &Graph) -> Result<Option<RouteStats>, RouteError> {
    RouteStats::compute(route, graph)
}
