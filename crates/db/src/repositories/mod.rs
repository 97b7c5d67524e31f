//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument.

pub mod contributor_repo;
pub mod page_repo;
pub mod revision_repo;

pub use contributor_repo::ContributorRepo;
pub use page_repo::PageRepo;
pub use revision_repo::RevisionRepo;
