//! Domain logic for the page contributors service.
//!
//! Everything in this crate is pure: no database, no HTTP. The `db`, `api`
//! and `worker` crates feed it rows and options and render what it returns.

pub mod contributors;
pub mod error;
pub mod options;
pub mod pagination;
pub mod title;
pub mod types;
pub mod visibility;
