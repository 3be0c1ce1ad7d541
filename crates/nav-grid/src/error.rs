//! Grid-subsystem error type.

use thiserror::Error;

use nav_core::EntityId;

/// Errors produced by `nav-grid`.
///
/// Only the loaders fail; every mutation and query on a live
/// [`GridModel`](crate::GridModel) is infallible.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid parse error: {0}")]
    Parse(String),

    #[error("layout row {row}, column {column}: unknown glyph {glyph:?}")]
    Layout { row: usize, column: usize, glyph: char },

    #[error("unknown obstacle kind {0:?}: expected \"wall\", \"door\" or \"body\"")]
    UnknownObstacleKind(String),

    #[error("unknown door state {0:?}: expected \"open\", \"closed\" or \"locked\"")]
    UnknownDoorState(String),

    #[error("obstacle id {0} appears more than once")]
    DuplicateObstacle(EntityId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GridResult<T> = Result<T, GridError>;
