//! Error types for scheduler-core operations.
//!
//! This module provides [`SchedError`], the error type returned by the
//! predicate evaluation and caching layers.

/// Error type for predicate evaluation and caching.
///
/// This error type is designed to:
/// - Cover all failure modes without using panics
/// - Distinguish malformed input from failed predicate computation
/// - Support error chaining via the `source` field
///
/// # Example
///
/// ```rust
/// use sched_core::{NodeSnapshot, SchedError};
///
/// fn require_node(snapshot: &NodeSnapshot) -> Result<(), SchedError> {
///     if snapshot.node().is_none() {
///         return Err(SchedError::InvalidNodeInfo {
///             reason: "snapshot has no node reference".to_string(),
///         });
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum SchedError {
    /// The node snapshot is missing or does not reference a valid node.
    ///
    /// Fatal to the scheduling attempt in progress, not to the process. No
    /// predicate is invoked and the cache is never touched on this path.
    #[error("invalid node info: {reason}")]
    InvalidNodeInfo {
        /// Why the snapshot was rejected.
        reason: String,
    },

    /// A predicate computation failed.
    ///
    /// Propagated verbatim to the caller; a failed computation is never
    /// written to the cache.
    #[error("predicate {predicate} failed: {message}")]
    PredicateFailure {
        /// Key of the predicate that failed.
        predicate: String,
        /// Description of the failure.
        message: String,
        /// Optional underlying error.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl SchedError {
    /// Create an invalid-node-info error.
    pub fn invalid_node_info(reason: impl Into<String>) -> Self {
        Self::InvalidNodeInfo {
            reason: reason.into(),
        }
    }

    /// Create a predicate-failure error without an underlying source.
    pub fn predicate(predicate: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PredicateFailure {
            predicate: predicate.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a predicate-failure error from any error type.
    pub fn predicate_with_source<E>(
        predicate: impl Into<String>,
        message: impl Into<String>,
        source: E,
    ) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::PredicateFailure {
            predicate: predicate.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
