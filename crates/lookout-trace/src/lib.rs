//! lookout-trace - persisted observation traces and rendering.
//!
//! Consumers of the observation taxonomy: an append-only JSONL store that
//! validates kind tags at the read boundary, and a renderer built on the
//! exhaustive dispatch table.

pub mod render;
pub mod store;

pub use render::ObservationRenderer;
pub use store::{TraceError, TraceIssue, TraceRecord, TraceReport, TraceStore};
