//! Crate-wide error type.
//!
//! Most failure modes in a canonical motion layer are degradations, not
//! hard errors: an arc that can't hold tolerance collapses to a straight
//! segment, a biarc with a negative discriminant collapses to a straight
//! segment, and so on (each such path is logged via `tracing`, never
//! surfaced here). [`CanonError`] covers only the handful of boundary
//! failures that have no sensible silent fallback.

/// Top-level error returned by the canonical motion layer's public API.
#[derive(Debug, thiserror::Error)]
pub enum CanonError {
    /// The supplied machine configuration is malformed or internally
    /// inconsistent (missing axis limits, non-positive unit ratio, ...).
    #[error("config error: {0}")]
    Config(String),

    /// A caller referenced an axis outside the nine recognized Pose9 members.
    #[error("invalid axis: {0}")]
    InvalidAxis(String),
}
