use log::info;
use serde::Serialize;

use crate::errors::RouteError;
use super::graph::Graph;
use super::node::NodeId;
use super::solver::{RouteResult, ShortestPathSolver};
use super::stats::RouteStats;


#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CenterKind {
    Hospital,
    Fire,
    Police,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentKind {
    Accident,
    Fire,
    Medical,
    Crime,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}


/// Station that dispatches vehicles
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmergencyCenter {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CenterKind,
    pub node: NodeId,
}

/// Location that needs a response
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Incident {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: IncidentKind,
    pub node: NodeId,
    pub severity: Severity,
}


#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyData {
    pub emergency_centers: Vec<EmergencyCenter>,
    pub incidents: Vec<Incident>,
}

impl EmergencyData {

    /// The stock scenario, laid out for the default 8x8 grid
    pub fn standard() -> Self {
        let center = |id: &str, name: &str, kind, x, y| EmergencyCenter {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            node: NodeId::new(x, y),
        };
        let incident = |id: &str, name: &str, kind, x, y, severity| Incident {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            node: NodeId::new(x, y),
            severity,
        };

        Self {
            emergency_centers: vec![
                center("hospital-1", "City General Hospital", CenterKind::Hospital, 1, 1),
                center("fire-1", "Fire Station Alpha", CenterKind::Fire, 6, 2),
                center("police-1", "Police HQ", CenterKind::Police, 2, 6),
                center("fire-2", "Fire Station Beta", CenterKind::Fire, 5, 5),
            ],
            incidents: vec![
                incident("incident-1", "Car Accident", IncidentKind::Accident, 4, 3, Severity::High),
                incident("incident-2", "Building Fire", IncidentKind::Fire, 7, 1, Severity::Critical),
                incident("incident-3", "Medical Emergency", IncidentKind::Medical, 1, 4, Severity::Medium),
                incident("incident-4", "Robbery in Progress", IncidentKind::Crime, 6, 6, Severity::High),
            ],
        }
    }

    /// Every center and incident must sit on a node of `graph`
    pub fn validate(&self, graph: &Graph) -> Result<(), RouteError> {
        let locations = self.emergency_centers.iter().map(|c| c.node)
            .chain(self.incidents.iter().map(|i| i.node));
        for node in locations {
            if !graph.contains(node) {
                return Err(RouteError::InvalidNode(node));
            }
        }
        Ok(())
    }

    pub fn center(&self, id: &str) -> Option<&EmergencyCenter> {
        self.emergency_centers.iter().find(|c| c.id == id)
    }

    pub fn incident(&self, id: &str) -> Option<&Incident> {
        self.incidents.iter().find(|i| i.id == id)
    }
}


/// A planned response from one center to one incident
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Dispatch {
    pub center: EmergencyCenter,
    pub incident: Incident,
    pub route: RouteResult,
    /// Absent when there is no path, or when the center sits on the incident
    pub stats: Option<RouteStats>,
}

/// Route a vehicle from `center` to `incident` and summarize the trip
pub fn plan_response(graph: &Graph, center: &EmergencyCenter, incident: &Incident) -> Result<Dispatch, RouteError> {
    let route = ShortestPathSolver::new(graph).solve(center.node, incident.node)?;
    let stats = match route.route() {
        Some(found) => RouteStats::compute(found, graph)?,
        None => None,
    };

    match &route {
        RouteResult::Found(found) => info!(
            "dispatch {} -> {}: {} blocks, distance {:.1}",
            center.id, incident.id, found.blocks(), found.distance
        ),
        RouteResult::NoPath => info!("dispatch {} -> {}: unreachable", center.id, incident.id),
    }

    Ok(Dispatch {
        center: center.clone(),
        incident: incident.clone(),
        route,
        stats,
    })
}
