//! Compute-or-fetch and invalidation behavior through the public API.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use equiv_cache::{EquivalenceCache, EquivalenceClass};
use sched_core::{
    FailureReason, PredicateId, PredicateResult, UnitSpec, Volume, VolumeSource,
};

use crate::support::{snapshot, Oracle};

fn web_unit(name: &str) -> UnitSpec {
    UnitSpec::builder(name)
        .namespace("prod")
        .label("app", "web")
        .build()
}

/// Seed one cached result per (node, predicate) pair via the miss path.
fn seed(
    cache: &EquivalenceCache,
    nodes: &[&str],
    predicates: &[PredicateId],
    unit: &UnitSpec,
    class: EquivalenceClass,
) {
    let oracle = Oracle::fresh();
    for node in nodes {
        for predicate in predicates {
            cache
                .run_predicate(
                    |_: &UnitSpec, _: &(), _: &sched_core::NodeSnapshot| {
                        Ok(PredicateResult::fits())
                    },
                    predicate,
                    unit,
                    &(),
                    &snapshot(node),
                    class,
                    Some(&oracle),
                )
                .expect("seed");
        }
    }
}

#[test]
fn cache_aside_returns_cached_result_without_reinvoking() {
    let cache = EquivalenceCache::new();
    let oracle = Oracle::fresh();
    let unit = web_unit("web-0");
    let class = EquivalenceClass::of(&unit);
    let calls = AtomicUsize::new(0);
    let reasons = vec![FailureReason::new("NodeUnderDiskPressure")];

    let run = || {
        cache.run_predicate(
            |_: &UnitSpec, _: &(), _: &sched_core::NodeSnapshot| {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(PredicateResult::does_not_fit(reasons.clone()))
            },
            &PredicateId::general_fit(),
            &unit,
            &(),
            &snapshot("node-1"),
            class,
            Some(&oracle),
        )
    };

    let first = run().expect("first run");
    let second = run().expect("second run");

    assert_eq!(first, second);
    assert!(!second.fit);
    assert_eq!(second.reasons, reasons);
    assert_eq!(calls.load(Ordering::SeqCst), 1, "predicate ran twice");
}

#[test]
fn replicas_of_one_template_share_cached_results() {
    let cache = EquivalenceCache::new();
    let oracle = Oracle::fresh();
    let calls = AtomicUsize::new(0);

    for name in ["web-0", "web-1", "web-2"] {
        let unit = web_unit(name);
        let class = EquivalenceClass::of(&unit);
        cache
            .run_predicate(
                |_: &UnitSpec, _: &(), _: &sched_core::NodeSnapshot| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(PredicateResult::fits())
                },
                &PredicateId::general_fit(),
                &unit,
                &(),
                &snapshot("node-1"),
                class,
                Some(&oracle),
            )
            .expect("run");
    }

    // One computation serves all replicas.
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.stats().hits(), 2);
}

#[test]
fn stale_snapshot_suppresses_the_write() {
    let cache = EquivalenceCache::new();
    let oracle = Oracle::stale();
    let unit = web_unit("web-0");
    let class = EquivalenceClass::of(&unit);

    let result = cache
        .run_predicate(
            |_: &UnitSpec, _: &(), _: &sched_core::NodeSnapshot| Ok(PredicateResult::fits()),
            &PredicateId::general_fit(),
            &unit,
            &(),
            &snapshot("node-1"),
            class,
            Some(&oracle),
        )
        .expect("run");

    // Correct result, just not cached.
    assert!(result.fit);
    assert!(!cache.contains("node-1", &PredicateId::general_fit(), class));

    // Once the snapshot is fresh again the write goes through.
    oracle.set_fresh(true);
    cache
        .run_predicate(
            |_: &UnitSpec, _: &(), _: &sched_core::NodeSnapshot| Ok(PredicateResult::fits()),
            &PredicateId::general_fit(),
            &unit,
            &(),
            &snapshot("node-1"),
            class,
            Some(&oracle),
        )
        .expect("run");
    assert!(cache.contains("node-1", &PredicateId::general_fit(), class));
}

#[test]
fn targeted_invalidation_leaves_other_keys_intact() {
    let cache = EquivalenceCache::new();
    let unit = web_unit("web-0");
    let class = EquivalenceClass::of(&unit);
    let p1 = PredicateId::general_fit();
    let p2 = PredicateId::unit_affinity();
    seed(&cache, &["node-1", "node-2"], &[p1.clone(), p2.clone()], &unit, class);

    cache.invalidate_predicates_on_node("node-1", &HashSet::from([p1.clone()]));

    assert!(!cache.contains("node-1", &p1, class));
    assert!(cache.contains("node-1", &p2, class));
    assert!(cache.contains("node-2", &p1, class));
    assert!(cache.contains("node-2", &p2, class));
}

#[test]
fn cluster_wide_invalidation_spans_all_nodes() {
    let cache = EquivalenceCache::new();
    let unit = web_unit("web-0");
    let class = EquivalenceClass::of(&unit);
    let p1 = PredicateId::general_fit();
    let p2 = PredicateId::unit_affinity();
    seed(&cache, &["node-1", "node-2"], &[p1.clone(), p2.clone()], &unit, class);

    cache.invalidate_predicates(&HashSet::from([p1.clone()]));

    for node in ["node-1", "node-2"] {
        assert!(!cache.contains(node, &p1, class));
        assert!(cache.contains(node, &p2, class));
    }
}

#[test]
fn full_node_invalidation_leaves_other_nodes_untouched() {
    let cache = EquivalenceCache::new();
    let unit = web_unit("web-0");
    let class = EquivalenceClass::of(&unit);
    let predicates = [PredicateId::general_fit(), PredicateId::unit_affinity()];
    seed(&cache, &["node-1", "node-2"], &predicates, &unit, class);

    cache.invalidate_all_predicates_on_node("node-1");

    for predicate in &predicates {
        assert!(!cache.contains("node-1", predicate, class));
        assert!(cache.contains("node-2", predicate, class));
    }
}

#[test]
fn unit_add_policy_targets_only_implicated_families() {
    let cache = EquivalenceCache::new();
    let bound = UnitSpec::builder("db-0")
        .volume(Volume::new(
            "data",
            VolumeSource::NetworkedBlockStore {
                volume_id: "vol-1".to_string(),
            },
        ))
        .build();
    let probe = web_unit("web-0");
    let class = EquivalenceClass::of(&probe);
    let families = [
        PredicateId::general_fit(),
        PredicateId::max_block_store_volumes(),
        PredicateId::max_regional_disk_volumes(),
        PredicateId::max_managed_disk_volumes(),
        PredicateId::unit_affinity(),
    ];
    seed(&cache, &["node-1", "node-2"], &families, &probe, class);

    cache.invalidate_for_unit_add(&bound, "node-1");

    // General fit and the block-store family go; everything else stays.
    assert!(!cache.contains("node-1", &PredicateId::general_fit(), class));
    assert!(!cache.contains("node-1", &PredicateId::max_block_store_volumes(), class));
    assert!(cache.contains("node-1", &PredicateId::max_regional_disk_volumes(), class));
    assert!(cache.contains("node-1", &PredicateId::max_managed_disk_volumes(), class));
    assert!(cache.contains("node-1", &PredicateId::unit_affinity(), class));

    // The other node is untouched entirely.
    for family in &families {
        assert!(cache.contains("node-2", family, class));
    }
}
