//! Geography for the Starlane world simulation.
//!
//! This crate models the physical world: locations as nodes of an
//! undirected gate network, a registry that owns location records
//! alongside the network, and a deterministic procedural generator.
//!
//! # Modules
//!
//! - [`error`] -- Error types for registry operations.
//! - [`fixtures`] -- The hand-built four-location development world.
//! - [`generator`] -- Seeded procedural world generation.
//! - [`graph`] -- [`LocationGraph`]: adjacency, BFS routing, reachability.
//! - [`registry`] -- [`WorldRegistry`]: location records plus their graph.
//!
//! [`LocationGraph`]: graph::LocationGraph
//! [`WorldRegistry`]: registry::WorldRegistry

pub mod error;
pub mod fixtures;
pub mod generator;
pub mod graph;
pub mod registry;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use fixtures::{DevLocationIds, dev_world};
pub use generator::{ConnectivityMode, GeneratorOptions, generate, generate_with};
pub use graph::LocationGraph;
pub use registry::WorldRegistry;
