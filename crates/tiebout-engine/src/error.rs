//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode during startup, the run, and
//! report output.

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
        source: tiebout_core::ConfigError,
    },

    /// Model construction failed.
    #[error("model error: {source}")]
    Model {
        /// The underlying model error.
        #[from]
        source: tiebout_core::ModelError,
    },

    /// Initial vectors could not be generated from the config.
    #[error("spawner error: {message}")]
    Spawner {
        /// Description of the spawner failure.
        message: String,
    },

    /// Writing the run report failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Encoding the run report failed.
    #[error("serialization error: {source}")]
    Serialize {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
