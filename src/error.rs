//! Simulation error types

/// Errors produced by the simulation core.
///
/// The core performs no I/O; these signal precondition violations
/// (degenerate numeric input) or bad configuration.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A direction vector had zero length where a unit vector is required.
    #[error("degenerate (zero-length) vector in {context}")]
    DegenerateVector { context: &'static str },

    /// Frame delta was negative, NaN or infinite.
    #[error("invalid frame delta {0}: must be finite and non-negative")]
    InvalidDelta(f32),

    /// Tuning values violate an invariant the simulation relies on.
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    /// Tuning JSON could not be parsed.
    #[error("failed to parse tuning: {0}")]
    TuningParse(#[from] serde_json::Error),
}
