//! Error types for the `tessera-inspect` binary.

/// Top-level error for `tessera-inspect`.
#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: crate::config::ConfigError,
    },

    /// The type schema could not be loaded.
    #[error("schema error: {source}")]
    Schema {
        /// The underlying schema error.
        #[from]
        source: tessera_reflect::SchemaError,
    },

    /// A query argument was not a valid type expression.
    #[error("query error: {source}")]
    Query {
        /// The underlying parse or lookup error.
        #[from]
        source: tessera_reflect::ReflectError,
    },

    /// The command line did not match the expected usage.
    #[error("usage: tessera-inspect <type> [<interface>]")]
    Usage,
}
