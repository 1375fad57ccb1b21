//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building regression fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// Grid construction failed
    #[error("fixture error: {0}")]
    Fixture(#[from] pixseg_core::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
