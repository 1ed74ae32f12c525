//! Predicate identifiers, failure reasons, and result records.
//!
//! This module provides the opaque string identifiers the scheduler uses
//! to name admission predicates and their failure explanations, plus
//! [`PredicateResult`], the record a predicate produces for one
//! (unit, node) pair.

use std::fmt;

/// Identifier for a named admission predicate family.
///
/// Predicate identifiers are opaque to the caching layer; it treats them
/// as uninterpreted keys. The associated constants name the built-in
/// families consulted by the unit-add invalidation policy.
///
/// # Example
///
/// ```rust
/// use sched_core::PredicateId;
///
/// let general = PredicateId::general_fit();
/// assert_eq!(general.as_str(), "GeneralFit");
///
/// let custom = PredicateId::new("NoDiskConflict");
/// assert_ne!(general, custom);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PredicateId(String);

impl PredicateId {
    /// Name of the general-fit predicate family. Always invalidated on a
    /// node when a unit is bound there.
    pub const GENERAL_FIT: &'static str = "GeneralFit";

    /// Name of the networked block-storage volume-count predicate family.
    pub const MAX_BLOCK_STORE_VOLUMES: &'static str = "MaxBlockStoreVolumeCount";

    /// Name of the regional persistent-disk volume-count predicate family.
    pub const MAX_REGIONAL_DISK_VOLUMES: &'static str = "MaxRegionalDiskVolumeCount";

    /// Name of the managed-disk volume-count predicate family.
    pub const MAX_MANAGED_DISK_VOLUMES: &'static str = "MaxManagedDiskVolumeCount";

    /// Name of the inter-unit affinity/anti-affinity predicate family.
    /// Never invalidated on unit add; the caller invalidates it on unit
    /// removal instead.
    pub const UNIT_AFFINITY: &'static str = "UnitAffinity";

    /// Create a new predicate identifier from a string.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The built-in general-fit predicate.
    #[must_use]
    pub fn general_fit() -> Self {
        Self::new(Self::GENERAL_FIT)
    }

    /// The built-in networked block-storage volume-count predicate.
    #[must_use]
    pub fn max_block_store_volumes() -> Self {
        Self::new(Self::MAX_BLOCK_STORE_VOLUMES)
    }

    /// The built-in regional persistent-disk volume-count predicate.
    #[must_use]
    pub fn max_regional_disk_volumes() -> Self {
        Self::new(Self::MAX_REGIONAL_DISK_VOLUMES)
    }

    /// The built-in managed-disk volume-count predicate.
    #[must_use]
    pub fn max_managed_disk_volumes() -> Self {
        Self::new(Self::MAX_MANAGED_DISK_VOLUMES)
    }

    /// The built-in inter-unit affinity predicate.
    #[must_use]
    pub fn unit_affinity() -> Self {
        Self::new(Self::UNIT_AFFINITY)
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PredicateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PredicateId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PredicateId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for PredicateId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Opaque token explaining why a predicate rejected a placement.
///
/// Failure reasons are produced by predicates and carried through the
/// cache untouched; ordering within a result is preserved.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FailureReason(String);

impl FailureReason {
    /// Create a new failure reason from a string.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    /// Get the reason as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for FailureReason {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for FailureReason {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The outcome of running one predicate for one (unit, node) pair.
///
/// Immutable once produced; the caching layer replaces whole records
/// rather than mutating them in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredicateResult {
    /// Whether the unit fits on the node according to this predicate.
    pub fit: bool,
    /// Ordered failure explanations when `fit` is false.
    pub reasons: Vec<FailureReason>,
}

impl PredicateResult {
    /// A passing result with no failure reasons.
    #[must_use]
    pub fn fits() -> Self {
        Self {
            fit: true,
            reasons: Vec::new(),
        }
    }

    /// A failing result with the given reasons.
    #[must_use]
    pub fn does_not_fit(reasons: impl IntoIterator<Item = FailureReason>) -> Self {
        Self {
            fit: false,
            reasons: reasons.into_iter().collect(),
        }
    }
}
