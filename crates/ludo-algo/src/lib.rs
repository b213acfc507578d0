//! Graph analytics for ludo co-occurrence graphs.
//!
//! - **Metrics**: degree, strength, average degree, density, top-K ranking
//! - **Centrality**: Betweenness (Brandes), Closeness, Degree, PageRank
//! - **Components**: Connected (Union-Find), Bridges (Tarjan)
//! - **Pathfinding**: BFS shortest paths, diameter path of the main component
//! - **Community**: Louvain modularity
//!
//! [`MetricsEngine`] runs all of them and produces an [`AnalysisReport`].

pub mod bridges;
pub mod centrality;
pub mod community;
pub mod components;
pub mod engine;
pub mod metrics;
pub mod pagerank;
pub mod pathfinding;
pub mod report;

pub use bridges::{find_bridges, BridgeResult};
pub use centrality::{
    betweenness_centrality, closeness_centrality, degree_centrality, BetweennessConfig,
    BetweennessResult,
};
pub use community::{louvain, modularity, CommunityResult, LouvainConfig};
pub use components::{connected_components, ComponentResult};
pub use engine::{path_steps, AnalysisConfig, MetricsEngine};
pub use metrics::{average_degree, degrees, density, strengths, top_k};
pub use pagerank::{pagerank, PageRankConfig, PageRankResult};
pub use pathfinding::{
    annotate_hops, average_shortest_path_length, bfs, component_summary, diameter_path,
    eccentricity, path_between, shortest_path, BfsTree, ComponentSummary, DiameterPath, PathHop,
};
pub use report::{
    AnalysisReport, BridgeEntry, CommunityEntry, CommunitySummary, GraphSummary, PathStep,
    RankedEntity, Rankings,
};
