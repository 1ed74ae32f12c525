//! Candidate nodes and the state store's view of them.
//!
//! This module provides [`Node`], [`NodeSnapshot`], and the
//! [`FreshnessOracle`] collaborator contract. The snapshot is the
//! predicate's input; the oracle answers whether a snapshot still matches
//! authoritative cluster state at cache-write time.

use std::collections::BTreeMap;
use std::sync::Arc;

/// A candidate machine that can host units, identified by name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    name: String,
    labels: BTreeMap<String, String>,
}

impl Node {
    /// Create a node with no labels.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            labels: BTreeMap::new(),
        }
    }

    /// Add one label.
    #[must_use]
    pub fn label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Node name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Node labels.
    #[inline]
    #[must_use]
    pub fn labels(&self) -> &BTreeMap<String, String> {
        &self.labels
    }
}

/// The state store's view of one node at a point in time.
///
/// A snapshot may lack its node reference (for example, a placeholder
/// created before the node object arrived); consumers must treat such a
/// snapshot as invalid input.
#[derive(Clone, Debug, Default)]
pub struct NodeSnapshot {
    node: Option<Arc<Node>>,
    generation: u64,
}

impl NodeSnapshot {
    /// Create a snapshot of the given node at the given state-store
    /// generation.
    #[must_use]
    pub fn new(node: Arc<Node>, generation: u64) -> Self {
        Self {
            node: Some(node),
            generation,
        }
    }

    /// Create a snapshot with no node reference.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            node: None,
            generation: 0,
        }
    }

    /// The node this snapshot describes, if present.
    #[inline]
    #[must_use]
    pub fn node(&self) -> Option<&Node> {
        self.node.as_deref()
    }

    /// State-store generation the snapshot was taken at.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Answers whether a node snapshot still reflects authoritative cluster
/// state.
///
/// The caching layer consults the oracle at write time; a result computed
/// against a stale snapshot is returned to the caller but never cached.
pub trait FreshnessOracle: Send + Sync {
    /// Whether `snapshot` still matches the current state of its node.
    fn is_up_to_date(&self, snapshot: &NodeSnapshot) -> bool;
}
