//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during engine startup and the console loop.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: starlane_core::config::ConfigError,
    },

    /// Game clock initialization failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: starlane_core::clock::ClockError,
    },

    /// World construction failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: starlane_world::WorldError,
    },

    /// A built-in verb could not be registered.
    #[error("command registration error: {source}")]
    Registration {
        /// The underlying registration error.
        #[from]
        source: starlane_commands::RegistrationError,
    },

    /// Reading commands or writing results failed.
    #[error("console I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// A result could not be encoded as JSON.
    #[error("JSON encoding error: {source}")]
    Json {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// The clock driver task ended abnormally.
    #[error("clock driver failed: {message}")]
    Driver {
        /// Description of the failure.
        message: String,
    },
}
