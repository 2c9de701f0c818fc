use thiserror::Error;

/// Errors surfaced before or around world generation.
///
/// Out-of-bounds grid access is never an error: accessors return `None` or
/// silently ignore the write.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A noise scale that would make sampling ill-defined (zero, negative or non-finite).
    #[error("degenerate noise input: {what} = {value}")]
    DegenerateNoiseInput { what: String, value: f64 },

    #[error("failed to access world config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to (de)serialize world config: {0}")]
    Serialization(#[from] serde_json::Error),
}
