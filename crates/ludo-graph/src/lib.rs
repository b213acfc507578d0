//! # ludo-graph
//!
//! Co-occurrence graph model for board-game datasets.
//!
//! - [`vectorize`]: presence rows → [`FeatureVector`]s over a sorted [`Vocabulary`]
//! - [`graph::Graph`]: weighted, undirected, simple graph with insertion-ordered adjacency
//! - [`builder`]: designer collaboration graphs (with [`EdgeProvenance`]) and
//!   game similarity graphs (cosine by default)
//! - [`parse`]: safe parser for stringified name lists

pub mod builder;
pub mod error;
pub mod graph;
pub mod model;
pub mod parse;
pub mod provenance;
pub mod similarity;
pub mod vectorize;

pub use builder::{
    build_collaboration_graph, build_similarity_graph, build_similarity_graph_with,
    select_top_games, CollaborationGraph, CollaborationRow, GameRow, Participants,
    SimilarityConfig, SimilarityGraph,
};
pub use error::GraphError;
pub use graph::{AdjEntry, Graph};
pub use model::{Entity, EntityId, WeightedEdge};
pub use parse::{parse_name_list, ListSyntaxError};
pub use provenance::EdgeProvenance;
pub use similarity::{cosine_similarity, jaccard_similarity};
pub use vectorize::{vectorize_flags, vectorize_names, FeatureVector, Vocabulary};
