//! Equivalence-class derivation for units.
//!
//! Two units are interchangeable from the predicates' perspective when the
//! scheduling-relevant subset of their specs matches. This module projects
//! that subset into a normalized view and hashes it with FNV-1a into an
//! [`EquivalenceClass`], the third component of the cache key.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use fnv::FnvHasher;
use sched_core::{Affinity, Container, Toleration, UnitSpec, Volume};

/// Fingerprint identifying interchangeable units.
///
/// Derivation is pure and deterministic across processes: two units with
/// identical normalized views always land in the same class. Collisions
/// between non-equivalent units are possible in principle and accepted;
/// at 64 bits they are negligible in practice.
///
/// # Example
///
/// ```rust
/// use equiv_cache::EquivalenceClass;
/// use sched_core::UnitSpec;
///
/// let a = UnitSpec::builder("web-0").namespace("prod").label("app", "web").build();
/// let b = UnitSpec::builder("web-1").namespace("prod").label("app", "web").build();
///
/// // Replicas of one template differ only by name, which is excluded.
/// assert_eq!(EquivalenceClass::of(&a), EquivalenceClass::of(&b));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EquivalenceClass(u64);

impl EquivalenceClass {
    /// Derive the equivalence class of a unit.
    #[must_use]
    pub fn of(unit: &UnitSpec) -> Self {
        let mut hasher = FnvHasher::default();
        EquivalenceView::of(unit).hash(&mut hasher);
        Self(hasher.finish())
    }

    /// Get the raw hash value.
    #[must_use]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EquivalenceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// The set of unit attributes that must match for two units to be
/// considered equivalent. For correctness this must include every field
/// any predicate inspects; the unit's own name is deliberately excluded.
///
/// Empty collections are normalized to `None` so that units built by
/// different code paths (empty vs. absent) still collide. List ordering
/// stays significant: the vast majority of equivalent units come from a
/// single template and share ordering, so the view is not sorted.
#[derive(Hash)]
struct EquivalenceView<'a> {
    namespace: &'a str,
    labels: Option<&'a BTreeMap<String, String>>,
    affinity: Option<&'a Affinity>,
    containers: Option<&'a [Container]>,
    init_containers: Option<&'a [Container]>,
    node_name: &'a str,
    node_selector: Option<&'a BTreeMap<String, String>>,
    tolerations: Option<&'a [Toleration]>,
    volumes: Option<&'a [Volume]>,
}

impl<'a> EquivalenceView<'a> {
    fn of(unit: &'a UnitSpec) -> Self {
        Self {
            namespace: unit.namespace(),
            labels: non_empty_map(unit.labels()),
            affinity: unit.affinity(),
            containers: non_empty_slice(unit.containers()),
            init_containers: non_empty_slice(unit.init_containers()),
            node_name: unit.node_name(),
            node_selector: non_empty_map(unit.node_selector()),
            tolerations: non_empty_slice(unit.tolerations()),
            volumes: non_empty_slice(unit.volumes()),
        }
    }
}

fn non_empty_slice<T>(slice: &[T]) -> Option<&[T]> {
    if slice.is_empty() {
        None
    } else {
        Some(slice)
    }
}

fn non_empty_map<'a>(
    map: &'a BTreeMap<String, String>,
) -> Option<&'a BTreeMap<String, String>> {
    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}
