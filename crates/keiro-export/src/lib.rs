//! keiro-export: pure serializers for engine traces (sans-IO)
//!
//! Converts recorded runs into interchange formats. Currently supports
//! JSON trace documents (consumed by the playback layer) and Graphviz
//! DOT (for quick visual inspection).

pub mod dot;
pub mod json;

pub use dot::to_dot;
pub use json::{TraceDocument, to_trace_json};

/// Errors that can occur while serializing engine output.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// JSON serialization failed.
    #[error("failed to serialize trace document: {0}")]
    Json(#[from] serde_json::Error),
}
