use serde::{Deserialize, Serialize};

use crate::pathfinding::ComponentSummary;

/// Full result of one analysis run over a built graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: GraphSummary,
    pub rankings: Rankings,
    /// Main component statistics; `None` when the graph has no edges.
    pub component: Option<ComponentSummary>,
    /// Diameter path of the main component, resolved to display names.
    pub diameter_steps: Vec<PathStep>,
    /// Total number of bridges in the graph.
    pub bridge_count: usize,
    /// Heaviest bridges, by weight.
    pub bridges: Vec<BridgeEntry>,
    pub communities: CommunitySummary,
    pub pagerank_converged: bool,
    pub pagerank_iterations: usize,
    pub duration_ms: u64,
}

/// Size and shape of the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub nodes: usize,
    pub edges: usize,
    pub average_degree: f64,
    pub density: f64,
    pub total_weight: f64,
    pub component_count: usize,
    pub largest_component: usize,
}

/// One row of a top-K table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntity {
    /// 1-based
    pub rank: usize,
    pub node: usize,
    pub name: String,
    pub value: f64,
}

/// Top-K tables for every node metric.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rankings {
    pub degree: Vec<RankedEntity>,
    pub strength: Vec<RankedEntity>,
    /// `degree / (n-1)`
    pub degree_centrality: Vec<RankedEntity>,
    pub betweenness: Vec<RankedEntity>,
    pub closeness: Vec<RankedEntity>,
    pub pagerank: Vec<RankedEntity>,
    pub bridge_incidence: Vec<RankedEntity>,
}

/// One node along the diameter path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStep {
    pub name: String,
    /// Weight of the edge arriving at this node; `None` for the first step.
    pub weight: Option<f64>,
    /// Items behind the arriving edge, when provenance was supplied.
    pub via: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeEntry {
    pub a: String,
    pub b: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommunitySummary {
    pub count: usize,
    pub modularity: f64,
    pub levels: usize,
    /// Largest communities first.
    pub top: Vec<CommunityEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityEntry {
    /// 1-based
    pub rank: usize,
    pub size: usize,
    /// First members in node order.
    pub sample: Vec<String>,
}
