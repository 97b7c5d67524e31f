//! Contributors engine.
//!
//! The read path (target resolution, row fetch, selection) and the two write
//! paths driven by host events: edit ingestion and visibility repair. Handlers
//! stay thin and call into these functions with the pool.

pub mod ingest;
pub mod listing;
pub mod repair;
