//! Batch maintenance jobs for the contributors tally table.
//!
//! Exposed as a library so integration tests can drive the jobs directly;
//! the `quill-backfill` binary is a thin CLI over [`backfill::rebuild_all`].

pub mod backfill;
