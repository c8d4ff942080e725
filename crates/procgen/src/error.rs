//! Configuration errors for world generation.

use thiserror::Error;

/// Raised at startup when spawner or lifecycle settings cannot work.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpawnError {
    #[error("no spawnable body kinds configured")]
    NoBodyKinds,
    #[error("{name} must be a finite, non-negative distance (got {value})")]
    InvalidDistance { name: &'static str, value: f32 },
    #[error("spawn radius range is empty: min {min} > max {max}")]
    InvalidRadius { min: f32, max: f32 },
    #[error("scale range is invalid: min {min}, max {max}")]
    InvalidScale { min: f32, max: f32 },
    #[error("max_spawn_attempts must be at least 1")]
    NoAttempts,
    #[error("cleanup distance {cleanup} must exceed activation distance {activation}")]
    InvalidLifecycle { activation: f32, cleanup: f32 },
}

pub(crate) fn check_distance(name: &'static str, value: f32) -> Result<(), SpawnError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SpawnError::InvalidDistance { name, value })
    }
}
