//! # equiv-cache
//!
//! Predicate-result equivalence cache for the strato scheduler.
//!
//! Admission predicates are expensive, and many pending units are
//! structurally identical from the predicates' point of view (replicas of
//! one template). This crate memoizes predicate outcomes keyed by
//! (node, predicate, equivalence class) so repeat evaluations are served
//! from memory:
//!
//! - [`EquivalenceClass`] - Deterministic fingerprint of a unit's
//!   scheduling-relevant fields
//! - [`EquivalenceCache`] - Compute-or-fetch façade with targeted
//!   invalidation
//! - [`ResultStore`] - The guarded three-level result table
//! - [`CacheStats`] - Atomic hit/miss/invalidation counters
//!
//! ## Key Design Decisions
//!
//! - The per-node level of the store is a `DashMap`, so readers take shard
//!   read locks only and bulk node deletion stays O(1) in entries
//! - Cached results are `Arc`-wrapped immutable records, atomically
//!   replaced rather than mutated in place
//! - Freshness is re-checked while the node's shard lock is held, so a
//!   write can never race past an invalidation for the same node
//! - No predicate runs while any lock is held
//! - Concurrent misses on one key may both compute and both write; the
//!   predicate purity contract makes the duplicate write idempotent
//!
//! Entries live until explicitly invalidated. There is no TTL, capacity
//! bound, or eviction policy; the cache is derived state, safe to discard
//! and rebuild at any time.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use equiv_cache::{EquivalenceCache, EquivalenceClass};
//! use sched_core::{FreshnessOracle, Node, NodeSnapshot, PredicateId, PredicateResult, UnitSpec};
//!
//! struct AlwaysFresh;
//! impl FreshnessOracle for AlwaysFresh {
//!     fn is_up_to_date(&self, _snapshot: &NodeSnapshot) -> bool {
//!         true
//!     }
//! }
//!
//! let cache = EquivalenceCache::new();
//! let unit = UnitSpec::builder("web-0").namespace("prod").build();
//! let class = EquivalenceClass::of(&unit);
//! let snapshot = NodeSnapshot::new(Arc::new(Node::new("node-1")), 1);
//!
//! let result = cache
//!     .run_predicate(
//!         |_unit: &UnitSpec, _meta: &(), _snapshot: &NodeSnapshot| Ok(PredicateResult::fits()),
//!         &PredicateId::general_fit(),
//!         &unit,
//!         &(),
//!         &snapshot,
//!         class,
//!         Some(&AlwaysFresh),
//!     )
//!     .unwrap();
//! assert!(result.fit);
//! assert_eq!(cache.stats().misses(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod cache;
mod class;
mod stats;
mod store;

pub use cache::EquivalenceCache;
pub use class::EquivalenceClass;
pub use stats::CacheStats;
pub use store::ResultStore;
