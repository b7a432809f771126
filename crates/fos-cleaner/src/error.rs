//! Error types for fos-cleaner.
//!
//! Tree mutations absorb malformed input instead of failing; the only
//! fallible entry point is compiling user-supplied attribute patterns.

/// Error type for tree construction helpers.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// An attribute name or value pattern failed to compile.
    #[error("invalid {which} pattern: {source}")]
    InvalidPattern {
        /// Which half of the pattern pair was rejected ("name" or "value").
        which: &'static str,
        #[source]
        source: regex::Error,
    },
}

/// Result type alias for fallible tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;
