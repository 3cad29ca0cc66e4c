//! Result type alias for Tally

use super::errors::TallyError;

/// Result type alias for Tally operations
///
/// Convenience alias using `TallyError` as the error type. Use this
/// throughout the codebase for fallible operations.
pub type Result<T> = std::result::Result<T, TallyError>;
