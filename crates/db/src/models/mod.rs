//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching the
//! database row, plus any input DTOs the repositories accept.

pub mod contributor;
pub mod page;
pub mod revision;
