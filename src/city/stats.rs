use std::fmt;

use log::warn;
use serde::Serialize;

use crate::errors::RouteError;
use super::graph::Graph;
use super::solver::Route;


/// Road classification inferred from an edge's travel time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadClass {
    Main,
    Secondary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Congestion {
    Normal,
    Heavy,
    Blocked,
}

/// Bucket an edge weight into exactly one road class and one congestion level
pub fn classify(weight: f64) -> (RoadClass, Congestion) {
    if weight < 1.0 {
        (RoadClass::Main, Congestion::Normal)
    } else if weight < 2.0 {
        (RoadClass::Secondary, Congestion::Normal)
    } else if weight < 3.0 {
        (RoadClass::Secondary, Congestion::Heavy)
    } else {
        (RoadClass::Secondary, Congestion::Blocked)
    }
}


#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RoadTypeCounts {
    pub main: usize,
    pub secondary: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TrafficCounts {
    pub normal: usize,
    pub heavy: usize,
    pub blocked: usize,
}


/// Summary of a solved route
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStats {
    pub road_types: RoadTypeCounts,
    pub traffic_conditions: TrafficCounts,
    /// Number of edges walked
    pub total_blocks: usize,
    /// Raw sum of edge weights
    pub total_time: f64,
    /// `total_time` rounded to 2 decimals
    pub estimated_time: f64,
    /// Node count divided by total time, rounded to 2 decimals.
    ///
    /// Mixes a node count with an edge-time sum and is not bounded to [0, 1];
    /// kept as is for compatibility with existing displays.
    pub efficiency: f64,
}

impl RouteStats {

    /// Walk the route's consecutive node pairs through `graph`.
    ///
    /// Returns `Ok(None)` for routes with fewer than two nodes. A pair with no edge in
    /// `graph` means the route was solved against some other graph; that is reported as
    /// `MalformedGraph` and must not be ignored.
    pub fn compute(route: &Route, graph: &Graph) -> Result<Option<Self>, RouteError> {
        if route.path.len() < 2 {
            return Ok(None);
        }

        let mut road_types = RoadTypeCounts::default();
        let mut traffic_conditions = TrafficCounts::default();
        let mut total_time = 0.0;
        let mut total_blocks = 0;

        for pair in route.path.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let Some(edge) = graph.edge(from, to) else {
                warn!("route step {from} -> {to} has no edge in the graph");
                return Err(RouteError::MalformedGraph(format!("route uses missing edge {from} -> {to}")));
            };

            total_time += edge.weight;
            total_blocks += 1;

            let (road_class, congestion) = classify(edge.weight);
            match road_class {
                RoadClass::Main => road_types.main += 1,
                RoadClass::Secondary => road_types.secondary += 1,
            }
            match congestion {
                Congestion::Normal => traffic_conditions.normal += 1,
                Congestion::Heavy => traffic_conditions.heavy += 1,
                Congestion::Blocked => traffic_conditions.blocked += 1,
            }
        }

        Ok(Some(Self {
            road_types,
            traffic_conditions,
            total_blocks,
            total_time,
            estimated_time: round_to_hundredths(total_time),
            efficiency: round_to_hundredths(route.path.len() as f64 / total_time),
        }))
    }

    pub fn rating(&self) -> EfficiencyRating {
        EfficiencyRating::from_efficiency(self.efficiency)
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}


#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EfficiencyRating {
    Excellent,
    Good,
    Average,
    Poor,
}

impl EfficiencyRating {
    pub fn from_efficiency(efficiency: f64) -> Self {
        if efficiency > 0.8 {
            EfficiencyRating::Excellent
        } else if efficiency > 0.6 {
            EfficiencyRating::Good
        } else if efficiency > 0.4 {
            EfficiencyRating::Average
        } else {
            EfficiencyRating::Poor
        }
    }
}

impl fmt::Display for EfficiencyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EfficiencyRating::Excellent => "Excellent",
            EfficiencyRating::Good => "Good",
            EfficiencyRating::Average => "Average",
            EfficiencyRating::Poor => "Poor",
        };
        f.write_str(label)
    }
}


/// Render a travel time given in minutes as `"{m}m {s}s"`
pub fn format_travel_time(minutes: f64) -> String {
    let minutes = minutes.max(0.0);
    let mut whole = minutes.floor() as u64;
    let mut seconds = ((minutes - minutes.floor()) * 60.0).round() as u64;
    if seconds == 60 {
        whole += 1;
        seconds = 0;
    }
    format!("{whole}m {seconds}s")
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use crate::city::graph::{Edge, EdgeKind};
    use crate::city::node::NodeId;

    /// Straight street 0-0 .. n-0 with the given weights
    fn street(weights: &[f64]) -> (Graph, Route) {
        let mut graph = Graph::new();
        let path: Vec<NodeId> = (0..=weights.len() as u32).map(|x| NodeId::new(x, 0)).collect();
        for id in &path {
            graph.add_node(*id);
        }
        for (pair, weight) in path.windows(2).zip(weights) {
            graph.add_edge(pair[0], pair[1], Edge { weight: *weight, kind: EdgeKind::Horizontal }).unwrap();
        }
        let route = Route {
            distance: weights.iter().sum(),
            visited_nodes: path.iter().copied().collect(),
            path,
        };
        (graph, route)
    }

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(classify(0.9), (RoadClass::Main, Congestion::Normal));
        assert_eq!(classify(1.0), (RoadClass::Secondary, Congestion::Normal));
        assert_eq!(classify(1.5), (RoadClass::Secondary, Congestion::Normal));
        assert_eq!(classify(2.0), (RoadClass::Secondary, Congestion::Heavy));
        assert_eq!(classify(2.5), (RoadClass::Secondary, Congestion::Heavy));
        assert_eq!(classify(3.0), (RoadClass::Secondary, Congestion::Blocked));
        assert_eq!(classify(3.5), (RoadClass::Secondary, Congestion::Blocked));
    }

    #[test]
    fn test_stats_over_mixed_street() {
        let (graph, route) = street(&[0.9, 1.5, 2.5, 3.5]);
        let stats = RouteStats::compute(&route, &graph).unwrap().unwrap();

        assert_eq!(stats.road_types, RoadTypeCounts { main: 1, secondary: 3 });
        assert_eq!(stats.traffic_conditions, TrafficCounts { normal: 2, heavy: 1, blocked: 1 });
        assert_eq!(stats.total_blocks, 4);
        assert!((stats.total_time - 8.4).abs() < 1e-9);
        assert_eq!(stats.estimated_time, 8.4);
        // 5 nodes / 8.4 time units
        assert_eq!(stats.efficiency, 0.6);
        assert_eq!(stats.rating(), EfficiencyRating::Average);
    }

    #[test]
    fn test_bucket_counts_sum_to_blocks() {
        let (graph, route) = street(&[0.6, 0.7, 1.1, 2.2, 2.9, 3.1, 0.8]);
        let stats = RouteStats::compute(&route, &graph).unwrap().unwrap();

        let blocks = route.path.len() - 1;
        assert_eq!(stats.road_types.main + stats.road_types.secondary, blocks);
        let traffic = stats.traffic_conditions;
        assert_eq!(traffic.normal + traffic.heavy + traffic.blocked, blocks);
    }

    #[test]
    fn test_efficiency_is_not_bounded_by_one() {
        let (graph, route) = street(&[0.6]);
        let stats = RouteStats::compute(&route, &graph).unwrap().unwrap();
        assert_eq!(stats.efficiency, 3.33);
        assert_eq!(stats.rating(), EfficiencyRating::Excellent);
    }

    #[test]
    fn test_single_node_route_has_no_stats() {
        let (graph, _) = street(&[1.0]);
        let route = Route {
            path: vec![NodeId::new(0, 0)],
            distance: 0.0,
            visited_nodes: BTreeSet::from([NodeId::new(0, 0)]),
        };
        assert_eq!(RouteStats::compute(&route, &graph), Ok(None));
    }

    #[test]
    fn test_route_from_another_graph_is_malformed() {
        let (graph, _) = street(&[1.0, 1.0]);
        let route = Route {
            path: vec![NodeId::new(0, 0), NodeId::new(2, 0)],
            distance: 2.0,
            visited_nodes: BTreeSet::new(),
        };
        assert!(matches!(RouteStats::compute(&route, &graph), Err(RouteError::MalformedGraph(_))));
    }

    #[test]
    fn test_compute_is_idempotent() {
        let (graph, route) = street(&[1.3, 0.7, 2.1]);
        let first = RouteStats::compute(&route, &graph).unwrap().unwrap();
        let second = RouteStats::compute(&route, &graph).unwrap().unwrap();

        assert_eq!(first, second);
        assert_eq!(first.total_time.to_bits(), second.total_time.to_bits());
        assert_eq!(first.efficiency.to_bits(), second.efficiency.to_bits());
    }

    #[test]
    fn test_efficiency_rating_bands() {
        assert_eq!(EfficiencyRating::from_efficiency(0.81), EfficiencyRating::Excellent);
        assert_eq!(EfficiencyRating::from_efficiency(0.8), EfficiencyRating::Good);
        assert_eq!(EfficiencyRating::from_efficiency(0.61), EfficiencyRating::Good);
        assert_eq!(EfficiencyRating::from_efficiency(0.6), EfficiencyRating::Average);
        assert_eq!(EfficiencyRating::from_efficiency(0.4), EfficiencyRating::Poor);
        assert_eq!(EfficiencyRating::Good.to_string(), "Good");
    }

    #[test]
    fn test_format_travel_time() {
        assert_eq!(format_travel_time(0.0), "0m 0s");
        assert_eq!(format_travel_time(3.5), "3m 30s");
        assert_eq!(format_travel_time(12.25), "12m 15s");
        assert_eq!(format_travel_time(4.999), "5m 0s");
        assert_eq!(format_travel_time(-1.0), "0m 0s");
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let (graph, route) = street(&[2.4]);
        let stats = RouteStats::compute(&route, &graph).unwrap().unwrap();
        let json = serde_json::to_value(&stats).unwrap();

        assert_eq!(json["roadTypes"]["secondary"], 1);
        assert_eq!(json["trafficConditions"]["heavy"], 1);
        assert_eq!(json["totalBlocks"], 1);
        assert_eq!(json["efficiency"], 0.83);
    }
}
