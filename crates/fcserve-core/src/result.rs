//! Convenience result type alias for fcserve.

use crate::error::AppError;

/// A specialized `Result` type for fcserve operations.
pub type AppResult<T> = Result<T, AppError>;
