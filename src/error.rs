//! Validation errors.
//!
//! Every variant here is an argument-contract violation: raised
//! synchronously, before any simulation state is mutated, and never
//! retried. The simulation itself has no I/O and no external resources,
//! so after validation nothing can fail.

/// Argument-validation error.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Error {
    /// `arm_count` was zero.
    #[error("arm_count must be positive")]
    NoArms,

    /// A real-valued parameter fell outside its documented range.
    #[error("{name} must be in {range}, got {value}")]
    OutOfRange {
        /// Parameter name as it appears on the config struct.
        name: &'static str,
        /// Human-readable range, e.g. `"[0, 1]"`.
        range: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// `step(action)` was called with an index at or past `arm_count`.
    #[error("action {action} out of range for {arm_count} arms")]
    ActionOutOfRange { action: usize, arm_count: usize },

    /// `runs` or `time_steps` was zero.
    #[error("{name} must be positive")]
    EmptyExperiment { name: &'static str },
}
