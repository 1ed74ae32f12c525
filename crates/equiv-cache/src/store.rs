//! The guarded three-level predicate-result table.
//!
//! Results are keyed by node name, then predicate, then equivalence hash.
//! The node level is a `DashMap`, so lookups take a shard read lock only
//! and removing a node drops its whole sub-table in one operation. The
//! two inner levels are plain maps owned by the node's slot and are only
//! touched while that slot's shard lock is held.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use fnv::FnvHashMap;
use sched_core::{FreshnessOracle, NodeSnapshot, PredicateId, PredicateResult};

/// Per-node results: predicate -> equivalence hash -> result.
type PredicateMap = HashMap<PredicateId, FnvHashMap<u64, Arc<PredicateResult>>>;

/// Concurrent store of cached predicate results.
///
/// Values are immutable once written; a later write for the same key
/// replaces the whole `Arc`, last writer wins. The nested tables are never
/// handed out by reference, so all observable mutation goes through the
/// methods here.
#[derive(Debug, Default)]
pub struct ResultStore {
    nodes: DashMap<String, PredicateMap>,
}

impl ResultStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached result. Never mutates state, never computes.
    #[must_use]
    pub fn get(
        &self,
        node_name: &str,
        predicate: &PredicateId,
        equivalence_hash: u64,
    ) -> Option<Arc<PredicateResult>> {
        // The shard read lock is released as soon as the Ref drops; only
        // the Arc leaves the store.
        self.nodes.get(node_name).and_then(|predicates| {
            predicates
                .get(predicate)
                .and_then(|results| results.get(&equivalence_hash).cloned())
        })
    }

    /// Insert a result computed against `snapshot`, unless the oracle
    /// reports the snapshot stale. Returns whether the entry was written.
    ///
    /// The freshness check runs while the node's shard write lock is held,
    /// so the write serializes against invalidation for that node: a
    /// result computed from an outdated snapshot is silently dropped
    /// rather than cached as authoritative.
    pub fn put(
        &self,
        snapshot: &NodeSnapshot,
        predicate: &PredicateId,
        equivalence_hash: u64,
        result: PredicateResult,
        oracle: &dyn FreshnessOracle,
    ) -> bool {
        let Some(node) = snapshot.node() else {
            return false;
        };
        match self.nodes.entry(node.name().to_string()) {
            Entry::Occupied(mut slot) => {
                if !oracle.is_up_to_date(snapshot) {
                    return false;
                }
                slot.get_mut()
                    .entry(predicate.clone())
                    .or_default()
                    .insert(equivalence_hash, Arc::new(result));
                true
            }
            Entry::Vacant(slot) => {
                if !oracle.is_up_to_date(snapshot) {
                    return false;
                }
                let mut results = FnvHashMap::default();
                results.insert(equivalence_hash, Arc::new(result));
                let mut predicates = PredicateMap::new();
                predicates.insert(predicate.clone(), results);
                slot.insert(predicates);
                true
            }
        }
    }

    /// Remove the given predicates' entries on every node. A no-op
    /// without taking any lock when the set is empty.
    pub fn remove_predicates(&self, predicates: &HashSet<PredicateId>) {
        if predicates.is_empty() {
            return;
        }
        for mut slot in self.nodes.iter_mut() {
            for predicate in predicates {
                slot.value_mut().remove(predicate);
            }
        }
    }

    /// Remove the given predicates' entries on one node, leaving other
    /// predicates on that node untouched. A no-op without taking any lock
    /// when the set is empty.
    pub fn remove_predicates_on_node(&self, node_name: &str, predicates: &HashSet<PredicateId>) {
        if predicates.is_empty() {
            return;
        }
        if let Some(mut slot) = self.nodes.get_mut(node_name) {
            for predicate in predicates {
                slot.value_mut().remove(predicate);
            }
        }
    }

    /// Remove every entry for one node, all predicates and hashes at once.
    /// Returns whether the node had any entries.
    pub fn remove_node(&self, node_name: &str) -> bool {
        self.nodes.remove(node_name).is_some()
    }

    /// Whether an entry exists for the given key.
    #[must_use]
    pub fn contains(&self, node_name: &str, predicate: &PredicateId, equivalence_hash: u64) -> bool {
        self.get(node_name, predicate, equivalence_hash).is_some()
    }

    /// Number of nodes with at least one sub-table.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the store holds no node sub-tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
