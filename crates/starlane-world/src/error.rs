//! Error types for the `starlane-world` crate.

use starlane_types::LocationId;

/// Errors that can occur while building a world registry.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A location with the same id is already registered.
    #[error("duplicate location id: {0}")]
    DuplicateLocation(LocationId),
}
