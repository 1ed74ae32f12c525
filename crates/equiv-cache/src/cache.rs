//! The equivalence cache façade.
//!
//! [`EquivalenceCache`] saves and reuses the output of admission
//! predicates. Use [`EquivalenceCache::run_predicate`] to get or update
//! cached results; call an appropriate `invalidate_*` method when some
//! results are no longer valid.
//!
//! Internally, results are keyed by node name, predicate, and the unit's
//! [`EquivalenceClass`]. Saved results are reused until invalidated.

use std::collections::HashSet;

use sched_core::{
    FreshnessOracle, NodeSnapshot, PredicateId, PredicateResult, Result, SchedError, UnitSpec,
    VolumeSource,
};
use tracing::{debug, trace};

use crate::class::EquivalenceClass;
use crate::stats::CacheStats;
use crate::store::ResultStore;

/// Memoization cache for predicate results.
///
/// Constructed explicitly once per scheduler instance and shared by
/// reference with the scheduling loop; collaborators (the predicate, the
/// freshness oracle, unit and node data) are passed to each operation, so
/// tests can instantiate the cache with fakes.
///
/// ## Thread Safety
///
/// All operations are thread-safe. Lookups take shard read locks only;
/// writes and invalidations take the affected node's shard write lock for
/// the duration of the map mutation. No predicate runs while a lock is
/// held. Concurrent misses on the same key may both compute and both
/// write; because predicates are pure, the duplicate write is idempotent
/// and last-writer-wins is safe.
#[derive(Debug, Default)]
pub struct EquivalenceCache {
    store: ResultStore,
    stats: CacheStats,
}

impl EquivalenceCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get cache statistics.
    #[inline]
    #[must_use]
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Whether a result is cached for the given key. Intended for
    /// introspection and tests; `run_predicate` is the lookup path.
    #[must_use]
    pub fn contains(
        &self,
        node_name: &str,
        predicate: &PredicateId,
        class: EquivalenceClass,
    ) -> bool {
        self.store.contains(node_name, predicate, class.as_u64())
    }

    /// Return a cached predicate result, or run the predicate and cache
    /// its result for the next call.
    ///
    /// The lookup key is the node under consideration (from `snapshot`),
    /// `predicate_key`, and `class`; the unit's own requested node name
    /// plays no part. On a miss the predicate runs with no lock held. A
    /// predicate error is propagated verbatim and never cached. The fresh
    /// result is written back only when `oracle` is `Some` and still
    /// reports `snapshot` up to date at write time; passing `None` opts
    /// out of caching entirely.
    ///
    /// # Errors
    ///
    /// [`SchedError::InvalidNodeInfo`] when `snapshot` has no node
    /// reference, before any cache interaction; otherwise whatever the
    /// predicate itself returns.
    #[allow(clippy::too_many_arguments)]
    pub fn run_predicate<M, F>(
        &self,
        predicate: F,
        predicate_key: &PredicateId,
        unit: &UnitSpec,
        metadata: &M,
        snapshot: &NodeSnapshot,
        class: EquivalenceClass,
        oracle: Option<&dyn FreshnessOracle>,
    ) -> Result<PredicateResult>
    where
        F: Fn(&UnitSpec, &M, &NodeSnapshot) -> Result<PredicateResult>,
    {
        let Some(node) = snapshot.node() else {
            // Mostly seen with hand-built snapshots in test harnesses.
            return Err(SchedError::invalid_node_info(
                "node snapshot is missing its node reference",
            ));
        };

        if let Some(cached) = self.store.get(node.name(), predicate_key, class.as_u64()) {
            self.stats.record_hit();
            trace!(
                unit = %unit.name(),
                node = %node.name(),
                predicate = %predicate_key,
                class = %class,
                "predicate cache hit"
            );
            return Ok((*cached).clone());
        }
        self.stats.record_miss();
        trace!(
            unit = %unit.name(),
            node = %node.name(),
            predicate = %predicate_key,
            class = %class,
            "predicate cache miss"
        );

        let result = predicate(unit, metadata, snapshot)?;

        if let Some(oracle) = oracle {
            if self
                .store
                .put(snapshot, predicate_key, class.as_u64(), result.clone(), oracle)
            {
                self.stats.record_update();
                debug!(
                    unit = %unit.name(),
                    node = %node.name(),
                    predicate = %predicate_key,
                    fit = result.fit,
                    "cached predicate result"
                );
            } else {
                self.stats.record_stale_skip();
                debug!(
                    unit = %unit.name(),
                    node = %node.name(),
                    predicate = %predicate_key,
                    "node snapshot went stale, result not cached"
                );
            }
        }
        Ok(result)
    }

    /// Clear all cached results for the given predicates on every node.
    pub fn invalidate_predicates(&self, predicates: &HashSet<PredicateId>) {
        if predicates.is_empty() {
            return;
        }
        self.store.remove_predicates(predicates);
        self.stats.record_invalidation();
        debug!(?predicates, "invalidated predicates on all nodes");
    }

    /// Clear cached results for the given predicates on one node.
    pub fn invalidate_predicates_on_node(
        &self,
        node_name: &str,
        predicates: &HashSet<PredicateId>,
    ) {
        if predicates.is_empty() {
            return;
        }
        self.store.remove_predicates_on_node(node_name, predicates);
        self.stats.record_invalidation();
        debug!(node = %node_name, ?predicates, "invalidated predicates on node");
    }

    /// Clear all cached results for one node.
    pub fn invalidate_all_predicates_on_node(&self, node_name: &str) {
        if self.store.remove_node(node_name) {
            self.stats.record_invalidation();
        }
        debug!(node = %node_name, "invalidated all predicates on node");
    }

    /// Invalidate the predicate families a newly bound unit makes unsafe
    /// to reuse on its node.
    ///
    /// General fit is always invalidated: placing a unit changes the
    /// node's available resources unconditionally. Volume-count families
    /// are invalidated per backend: a claim-backed volume does not resolve
    /// its backend at this layer, so it conservatively invalidates all
    /// three, while a direct backend reference invalidates only its own
    /// family.
    ///
    /// Inter-unit affinity is deliberately left alone: the scheduler
    /// guarantees a newly bound unit cannot itself break existing affinity
    /// constraints. Unit *removal* can, and the caller owns invalidating
    /// affinity there.
    pub fn invalidate_for_unit_add(&self, unit: &UnitSpec, node_name: &str) {
        let mut invalid = HashSet::from([PredicateId::general_fit()]);
        for volume in unit.volumes() {
            match &volume.source {
                VolumeSource::PersistentVolumeClaim { .. } => {
                    invalid.insert(PredicateId::max_block_store_volumes());
                    invalid.insert(PredicateId::max_regional_disk_volumes());
                    invalid.insert(PredicateId::max_managed_disk_volumes());
                }
                VolumeSource::NetworkedBlockStore { .. } => {
                    invalid.insert(PredicateId::max_block_store_volumes());
                }
                VolumeSource::RegionalDisk { .. } => {
                    invalid.insert(PredicateId::max_regional_disk_volumes());
                }
                VolumeSource::ManagedDisk { .. } => {
                    invalid.insert(PredicateId::max_managed_disk_volumes());
                }
                VolumeSource::EmptyDir => {}
            }
        }
        self.invalidate_predicates_on_node(node_name, &invalid);
    }
}
