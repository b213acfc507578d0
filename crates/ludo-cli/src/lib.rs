//! # ludo-cli
//!
//! Loads the BoardGameGeek CSV exports, builds the designer collaboration
//! graph or the game mechanic-similarity graph, and reports on it.
//!
//! - [`config`]: env-driven [`AppConfig`](config::AppConfig)
//! - [`loader`]: quote-aware CSV reader and dataset loaders
//! - [`pipeline`]: load → build → analyze
//! - [`render`]: console tables and JSON

pub mod config;
pub mod loader;
pub mod pipeline;
pub mod render;

pub use config::AppConfig;
pub use loader::LoadError;
pub use pipeline::{analyze_designers, analyze_games, designer_connection, DataPaths, Similarity};
pub use render::{render_connection, render_json, render_text, Subject};
