//! City grid model: intersections, streets, graph generation, routing and route summaries.

pub mod node;
pub mod graph;
pub mod generator;
pub mod solver;
pub mod stats;
pub mod emergency;

pub use node::{Node, NodeId};
pub use graph::{Edge, EdgeKind, Graph};
pub use generator::{GeneratorConfig, GraphGenerator, road_weight};
pub use solver::{Route, RouteResult, ShortestPathSolver};
pub use stats::{Congestion, EfficiencyRating, RoadClass, RoadTypeCounts, RouteStats, TrafficCounts, classify, format_travel_time};
pub use emergency::{CenterKind, Dispatch, EmergencyCenter, EmergencyData, Incident, IncidentKind, Severity, plan_response};
