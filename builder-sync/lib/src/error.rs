//! Error types for builder statistics and registry maintenance.

use thiserror::Error;

/// Errors raised while fetching, aggregating or persisting builder statistics.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request for a single day failed, or its body could not be decoded.
    #[error("HTTP request for {date} failed: {source}")]
    Http {
        date: String,
        #[source]
        source: reqwest::Error,
    },

    /// The stats service answered with a non-2xx status.
    #[error("Stats service returned {status} for {date}")]
    Status {
        date: String,
        status: reqwest::StatusCode,
    },

    /// The request for a single day exceeded the configured timeout.
    #[error("Timed out fetching stats for {date}")]
    Timeout { date: String },

    /// A date argument was not in `YYYY-MM-DD` form.
    #[error("Invalid date '{value}' (expected YYYY-MM-DD): {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Every day in the requested range failed (or the range was empty).
    #[error("No data retrieved for any day in the requested range")]
    NoData,

    /// A counts file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A counts file could not be written.
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A counts file did not contain a `{ key: count }` JSON object.
    #[error("Invalid JSON in '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while reading, checking or regenerating the builder registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A registry file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The regenerated listing could not be written.
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The JSON registry did not match the expected entry shape.
    #[error("Invalid registry JSON in '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The existing listing is not valid Rust.
    #[error("Listing '{path}' is not valid Rust: {message}")]
    Syntax { path: String, message: String },

    /// The listing contained no `Builder { .. }` entries.
    #[error("No builder entries found in '{path}'; refusing to write an empty registry")]
    NoEntries { path: String },

    /// The aggregated counts table was empty.
    #[error("Aggregated counts in '{path}' are empty; refusing to demote every builder")]
    EmptyCounts { path: String },

    /// A parsed entry is missing one or more required fields.
    #[error("Builder entry #{index} ({name}) is missing required fields: {missing}")]
    IncompleteEntry {
        index: usize,
        name: String,
        missing: String,
    },

    /// A `signing` value did not name a known variant.
    #[error("Builder entry #{index} has unknown signing variant '{value}'")]
    InvalidSigning { index: usize, value: String },

    /// The rendered listing failed its post-generation checks.
    #[error("Generated listing is invalid: {message}")]
    GeneratedInvalid { message: String },

    /// Loading a counts file failed.
    #[error(transparent)]
    Counts(#[from] StatsError),
}
