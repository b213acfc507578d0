//! Metrics engine: runs every analysis over a built graph and assembles
//! the name-resolved [`AnalysisReport`].

use std::time::Instant;

use ludo_graph::{EdgeProvenance, Graph};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::bridges::find_bridges;
use crate::centrality::{
    betweenness_centrality, closeness_centrality, degree_centrality, BetweennessConfig,
};
use crate::community::{louvain, LouvainConfig};
use crate::components::connected_components;
use crate::metrics::{average_degree, degrees, density, strengths, top_k};
use crate::pagerank::{pagerank, PageRankConfig};
use crate::pathfinding::{component_summary, PathHop};
use crate::report::*;

/// Configuration for one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Rows per ranking table.
    pub top_k: usize,
    /// Communities listed in the report.
    pub community_top: usize,
    /// Sample members listed per community.
    pub community_sample: usize,
    pub pagerank: PageRankConfig,
    pub louvain: LouvainConfig,
    pub betweenness: BetweennessConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            community_top: 5,
            community_sample: 5,
            pagerank: PageRankConfig::default(),
            louvain: LouvainConfig::default(),
            betweenness: BetweennessConfig::default(),
        }
    }
}

/// The Metrics Engine.
pub struct MetricsEngine {
    pub config: AnalysisConfig,
}

impl MetricsEngine {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Analyze `graph`. Provenance, when given, annotates the diameter path.
    ///
    /// Degenerate graphs (no edges) still produce a report: zero summary
    /// statistics, no component section and an empty path.
    pub fn compute(&self, graph: &Graph, provenance: Option<&EdgeProvenance>) -> AnalysisReport {
        let start = Instant::now();
        let k = self.config.top_k;

        // ── Summary ──
        let components = connected_components(graph);
        let summary = GraphSummary {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            average_degree: average_degree(graph),
            density: density(graph),
            total_weight: graph.total_weight(),
            component_count: components.component_count(),
            largest_component: components.largest_component_size(),
        };
        info!(
            nodes = summary.nodes,
            edges = summary.edges,
            components = summary.component_count,
            "analyzing graph"
        );

        // ── Centrality ──
        let betweenness = betweenness_centrality(graph, &self.config.betweenness);
        let pr = pagerank(graph, &self.config.pagerank);
        let bridges = find_bridges(graph);
        let incidence: Vec<f64> = bridges.incidence.iter().map(|&c| c as f64).collect();

        let rankings = Rankings {
            degree: ranked(graph, &degrees(graph), k),
            strength: ranked(graph, &strengths(graph), k),
            degree_centrality: ranked(graph, &degree_centrality(graph), k),
            betweenness: ranked(graph, &betweenness.scores, k),
            closeness: ranked(graph, &closeness_centrality(graph), k),
            pagerank: ranked(graph, &pr.scores, k),
            bridge_incidence: ranked(graph, &incidence, k),
        };

        // ── Main component ──
        let component = match component_summary(graph, provenance) {
            Ok(s) => Some(s),
            Err(e) => {
                warn!(error = %e, "skipping diameter analysis");
                None
            }
        };
        let diameter_steps = component
            .as_ref()
            .map(|c| path_steps(graph, &c.path.nodes, &c.path.hops))
            .unwrap_or_default();

        // ── Bridges ──
        let mut bridge_list: Vec<BridgeEntry> = bridges
            .bridges
            .iter()
            .map(|&(a, b)| BridgeEntry {
                a: graph.entity(a).name.clone(),
                b: graph.entity(b).name.clone(),
                weight: graph.edge_between(a, b).map_or(0.0, |e| e.weight),
            })
            .collect();
        // stable: equal weights stay in edge order
        bridge_list.sort_by(|x, y| y.weight.partial_cmp(&x.weight).unwrap_or(std::cmp::Ordering::Equal));
        bridge_list.truncate(k);

        // ── Communities ──
        let community = louvain(graph, &self.config.louvain);
        let communities = CommunitySummary {
            count: community.community_count(),
            modularity: community.modularity,
            levels: community.levels,
            top: community
                .communities
                .iter()
                .take(self.config.community_top)
                .enumerate()
                .map(|(i, members)| CommunityEntry {
                    rank: i + 1,
                    size: members.len(),
                    sample: members
                        .iter()
                        .take(self.config.community_sample)
                        .map(|&m| graph.entity(m).name.clone())
                        .collect(),
                })
                .collect(),
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            duration_ms,
            betweenness_ms = betweenness.duration_ms,
            pagerank_ms = pr.duration_ms,
            louvain_ms = community.duration_ms,
            "analysis complete"
        );

        AnalysisReport {
            summary,
            rankings,
            component,
            diameter_steps,
            bridge_count: bridges.bridges.len(),
            bridges: bridge_list,
            communities,
            pagerank_converged: pr.converged,
            pagerank_iterations: pr.iterations,
            duration_ms,
        }
    }
}

fn ranked(graph: &Graph, scores: &[f64], k: usize) -> Vec<RankedEntity> {
    top_k(scores, k)
        .into_iter()
        .enumerate()
        .map(|(i, (node, value))| RankedEntity {
            rank: i + 1,
            node,
            name: graph.entity(node).name.clone(),
            value,
        })
        .collect()
}

/// Resolve a node path and its hops to display names.
pub fn path_steps(graph: &Graph, nodes: &[usize], hops: &[PathHop]) -> Vec<PathStep> {
    nodes
        .iter()
        .enumerate()
        .map(|(i, &node)| {
            let arriving = i.checked_sub(1).and_then(|h| hops.get(h));
            PathStep {
                name: graph.entity(node).name.clone(),
                weight: arriving.map(|h| h.weight),
                via: arriving.and_then(|h| h.provenance.clone()),
            }
        })
        .collect()
}
