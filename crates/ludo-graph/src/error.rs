use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("degenerate graph: {nodes} node(s), {edges} edge(s)")]
    DegenerateGraph { nodes: usize, edges: usize },

    #[error("unknown entity: {0}")]
    UnknownEntity(String),
}
