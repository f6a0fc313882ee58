//! Error types for the particle field.

/// Error returned when a field configuration cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration text is not valid JSON for the expected shape.
    #[error("failed to parse field config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field holds a value the simulation cannot run with.
    #[error("invalid field config: {field} {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}
