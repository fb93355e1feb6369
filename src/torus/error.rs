//! Error taxonomy for grid construction and stepping.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifeError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },
    #[error("generation count must be non-negative, got {0}")]
    NegativeGenerations(i64),
    #[error("thread count must be at least 1")]
    ZeroThreads,
    #[error("max thread cap must be at least 1")]
    ZeroMaxThreads,
    #[error("expected {expected} cells, got {actual}")]
    CellCountMismatch { expected: usize, actual: usize },
    #[error("bad pattern: {0}")]
    BadPattern(String),
    #[error("cannot allocate a {rows}x{cols} grid")]
    Allocation { rows: usize, cols: usize },
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Convert a signed generation count from an outer caller.
pub fn generations_from_i64(gens: i64) -> Result<u64, LifeError> {
    u64::try_from(gens).map_err(|_| LifeError::NegativeGenerations(gens))
}

#[cfg(test)]
mod tests {
    use super::{LifeError, generations_from_i64};

    #[test]
    fn negative_generations_are_rejected() {
        assert_eq!(generations_from_i64(0).unwrap(), 0);
        assert_eq!(generations_from_i64(17).unwrap(), 17);
        assert!(matches!(
            generations_from_i64(-1),
            Err(LifeError::NegativeGenerations(-1))
        ));
    }

    #[test]
    fn messages_name_the_offending_values() {
        let err = LifeError::EmptyGrid { rows: 0, cols: 5 };
        assert_eq!(err.to_string(), "grid dimensions must be positive, got 0x5");
        let err = LifeError::CellCountMismatch {
            expected: 9,
            actual: 8,
        };
        assert_eq!(err.to_string(), "expected 9 cells, got 8");
    }
}
