//! Engine-wide error type.
//!
//! Sub-crates define their own error enums and wrap `NavError` as one variant
//! where they need to surface a core failure.

use thiserror::Error;

use crate::{EntityId, GridPos};

/// Input the engine refuses to act on.
///
/// Only malformed input is an error.  Unreachable goals, exhausted re-paths
/// and locked doors are ordinary outcomes reported through movement status,
/// never through `Err`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavError {
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    #[error("entity {0} already registered")]
    DuplicateEntity(EntityId),

    #[error("position {0} is outside the known grid")]
    UnknownPosition(GridPos),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `nav-core`.
pub type NavResult<T> = Result<T, NavError>;
