use serde::Serialize;

use crate::collections::FxIndexMap;
use crate::errors::RouteError;
use crate::graph_algos::dijkstra_nodes_full;
use super::node::NodeId;

use ordered_float::OrderedFloat;


/// Orientation of a street segment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Horizontal,
    Vertical,
}

/// Street segment between two adjacent intersections
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Edge {
    /// Expected traversal time, always > 0
    pub weight: f64,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
}


/// Undirected weighted graph stored as mirrored adjacency maps.
///
/// Every node is added before any edge that touches it, every edge (u, v) has a
/// mirror (v, u) with the same weight and kind, and there are no self-loops.
/// Once built, a graph is only read, so it can be shared between threads freely.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct Graph {
    adjacency: FxIndexMap<NodeId, FxIndexMap<NodeId, Edge>>,
}

impl Graph {

    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node; adding it twice is a no-op
    pub fn add_node(&mut self, id: NodeId) {
        self.adjacency.entry(id).or_default();
    }

    /// Insert the edge pair (a, b) and (b, a)
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, edge: Edge) -> Result<(), RouteError> {
        if a == b {
            return Err(RouteError::MalformedGraph(format!("self-loop on {a}")));
        }
        let positive = edge.weight.is_finite() && edge.weight > 0.0;
        if !positive {
            return Err(RouteError::MalformedGraph(format!("edge {a} -> {b} has weight {}", edge.weight)));
        }
        for id in [a, b] {
            if !self.contains(id) {
                return Err(RouteError::MalformedGraph(format!("edge {a} -> {b} references unknown node {id}")));
            }
        }
        if self.edge(a, b).is_some() {
            return Err(RouteError::MalformedGraph(format!("duplicate edge {a} -> {b}")));
        }

        for (from, to) in [(a, b), (b, a)] {
            if let Some(neighbors) = self.adjacency.get_mut(&from) {
                neighbors.insert(to, edge);
            }
        }
        Ok(())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.adjacency.contains_key(&id)
    }

    pub fn edge(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        self.adjacency.get(&from)?.get(&to)
    }

    /// Outgoing edges of `id`, empty for unknown nodes
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &Edge)> + '_ {
        self.adjacency
            .get(&id)
            .into_iter()
            .flat_map(|neighbors| neighbors.iter().map(|(to, edge)| (*to, edge)))
    }

    /// Node ids in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges (each mirrored pair counts once)
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|neighbors| neighbors.len()).sum::<usize>() / 2
    }

    /// Every node reachable from `start`, including `start` itself
    pub fn reachable_from(&self, start: NodeId) -> Result<Vec<NodeId>, RouteError> {
        if !self.contains(start) {
            return Err(RouteError::InvalidNode(start));
        }
        let graph = self;
        let node_map = dijkstra_nodes_full(start, move |node: &NodeId| {
            graph.neighbors(*node).map(|(to, edge)| (to, OrderedFloat(edge.weight)))
        })?;
        Ok(node_map.keys().copied().collect())
    }

    /// Check the mirror and self-loop invariants over the whole graph
    pub fn validate(&self) -> Result<(), RouteError> {
        for (from, neighbors) in &self.adjacency {
            for (to, edge) in neighbors {
                if from == to {
                    return Err(RouteError::MalformedGraph(format!("self-loop on {from}")));
                }
                match self.edge(*to, *from) {
                    Some(mirror) if mirror == edge => {}
                    Some(_) => {
                        return Err(RouteError::MalformedGraph(format!("edge {from} -> {to} differs from its mirror")));
                    }
                    None => {
                        return Err(RouteError::MalformedGraph(format!("edge {from} -> {to} has no mirror")));
                    }
                }
            }
        }
        Ok(())
    }
}
