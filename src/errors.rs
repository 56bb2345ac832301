use thiserror::Error;

use crate::city::NodeId;


#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    /// Start or end node is not part of the graph
    #[error("Node {0} is not in the graph")]
    InvalidNode(NodeId),
    /// Internal inconsistency between edges and the node catalog.
    /// Never produced by a generated graph; treat as a bug, not a user error.
    #[error("Malformed graph: {0}")]
    MalformedGraph(String),
    #[error("Invalid node id {0:?}, expected \"x-y\"")]
    InvalidNodeId(String),
    #[error("Grid size must be at least 1, got {0}")]
    InvalidGridSize(usize),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for RouteError {
    fn from(error: serde_json::Error) -> Self {
        RouteError::Config(error.to_string())
    }
}
