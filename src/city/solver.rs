use std::collections::BTreeSet;

use log::debug;
use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::errors::RouteError;
use crate::graph_algos::{dijkstra_search, shortest_path};
use super::graph::Graph;
use super::node::NodeId;


/// A solved route, owned by whoever asked for it
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Node ids from start to end, both included
    pub path: Vec<NodeId>,
    /// Sum of the edge weights along `path`
    pub distance: f64,
    /// Every node that got a finite tentative distance during the search
    pub visited_nodes: BTreeSet<NodeId>,
}

impl Route {
    /// Number of street segments traversed
    pub fn blocks(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}


/// Outcome of a route query; an unreachable target is a normal answer, not an error
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteResult {
    Found(Route),
    NoPath,
}

impl RouteResult {
    pub fn is_found(&self) -> bool {
        matches!(self, RouteResult::Found(_))
    }

    pub fn route(&self) -> Option<&Route> {
        match self {
            RouteResult::Found(route) => Some(route),
            RouteResult::NoPath => None,
        }
    }

    pub fn into_route(self) -> Option<Route> {
        match self {
            RouteResult::Found(route) => Some(route),
            RouteResult::NoPath => None,
        }
    }
}


/// Dijkstra over a city graph.
///
/// The solver only borrows the graph; each `solve` call owns its own distance and
/// predecessor state, so any number of solvers can share one graph across threads.
/// The queue is a binary heap with lazy deletion, giving O((V + E) log V).
#[derive(Clone, Copy, Debug)]
pub struct ShortestPathSolver<'g> {
    graph: &'g Graph,
}

impl<'g> ShortestPathSolver<'g> {

    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    pub fn solve(&self, start: NodeId, end: NodeId) -> Result<RouteResult, RouteError> {
        for id in [start, end] {
            if !self.graph.contains(id) {
                return Err(RouteError::InvalidNode(id));
            }
        }

        let graph = self.graph;
        let (node_map, goal_index) = dijkstra_search(
            start,
            move |node: &NodeId| {
                graph.neighbors(*node).map(|(to, edge)| (to, OrderedFloat(edge.weight)))
            },
            |node| *node == end,
        )?;

        let visited_nodes: BTreeSet<NodeId> = node_map.keys().copied().collect();

        let Some(goal_index) = goal_index else {
            debug!("no path {start} -> {end} ({} nodes reached)", visited_nodes.len());
            return Ok(RouteResult::NoPath);
        };

        let distance = match node_map.get_index(goal_index) {
            Some((_, &(_, cost))) => cost.into_inner(),
            None => return Err(RouteError::MalformedGraph(format!("goal slot {goal_index} missing"))),
        };
        let path = shortest_path(&node_map, goal_index)?;

        debug!(
            "route {start} -> {end}: {} blocks, distance {distance:.1}, {} nodes reached",
            path.len() - 1,
            visited_nodes.len()
        );

        Ok(RouteResult::Found(Route { path, distance, visited_nodes }))
    }
}
