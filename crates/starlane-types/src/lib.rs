//! Shared type definitions for the Starlane world simulation.
//!
//! This crate is the single source of truth for the identifiers and records
//! that flow between the world graph, the command handlers, and the host.
//!
//! # Modules
//!
//! - [`ids`] -- Integer identifier newtypes (locations, factions, callers)
//! - [`enums`] -- Location classification enums
//! - [`structs`] -- Location records and route query results

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{LocationCategory, SecurityLevel};
pub use ids::{CallerId, FactionId, LocationId};
pub use structs::{Location, RouteResult};
