use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// The requested page name does not parse into a valid title.
    #[error("Bad title: {0}")]
    InvalidTitle(String),

    /// The title parses but no such page exists in the host.
    #[error("No such page: {0}")]
    NoSuchPage(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}
