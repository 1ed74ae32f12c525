//! The schedulable unit model.
//!
//! [`UnitSpec`] exposes exactly the fields an admission predicate may
//! inspect. Every type here derives `Hash` structurally so the caching
//! layer can fingerprint the scheduling-relevant subset of a unit.
//!
//! Map-typed fields use `BTreeMap` so iteration order, and therefore the
//! fingerprint, is deterministic across processes.

use std::collections::BTreeMap;

/// A selector term used by affinity rules.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AffinityTerm {
    /// Label selector matched against other units or nodes.
    pub label_selector: BTreeMap<String, String>,
    /// Topology domain the term applies within (e.g. a zone label key).
    pub topology_key: String,
    /// Namespaces the selector applies to; empty means the unit's own.
    pub namespaces: Vec<String>,
}

/// Affinity and anti-affinity rules for a unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Affinity {
    /// Node affinity terms.
    pub node_affinity: Option<Vec<AffinityTerm>>,
    /// Inter-unit affinity terms.
    pub unit_affinity: Option<Vec<AffinityTerm>>,
    /// Inter-unit anti-affinity terms.
    pub unit_anti_affinity: Option<Vec<AffinityTerm>>,
}

/// A container within a unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Container {
    /// Container name, unique within the unit.
    pub name: String,
    /// Image reference.
    pub image: String,
    /// Requested resources, quantity strings keyed by resource name.
    pub requests: BTreeMap<String, String>,
}

impl Container {
    /// Create a container with no resource requests.
    #[must_use]
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            requests: BTreeMap::new(),
        }
    }

    /// Add a resource request.
    #[must_use]
    pub fn request(mut self, resource: impl Into<String>, quantity: impl Into<String>) -> Self {
        self.requests.insert(resource.into(), quantity.into());
        self
    }
}

/// Operator for matching a toleration against a taint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TolerationOp {
    /// The toleration value must equal the taint value.
    #[default]
    Equal,
    /// The taint key merely has to exist.
    Exists,
}

/// Effect of the taint a toleration matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaintEffect {
    /// New units are not scheduled onto the node.
    NoSchedule,
    /// The scheduler tries to avoid the node but may still use it.
    PreferNoSchedule,
    /// Running units are evicted from the node.
    NoExecute,
}

/// A toleration carried by a unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Toleration {
    /// Taint key the toleration applies to; empty matches all keys.
    pub key: String,
    /// How the value is matched.
    pub operator: TolerationOp,
    /// Taint value matched when the operator is [`TolerationOp::Equal`].
    pub value: String,
    /// Taint effect matched; `None` matches all effects.
    pub effect: Option<TaintEffect>,
}

/// The storage backend a volume is served from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum VolumeSource {
    /// Claim against a persistent volume; the concrete backend is resolved
    /// elsewhere, so consumers must assume any backend.
    PersistentVolumeClaim {
        /// Name of the claim.
        claim_name: String,
    },
    /// Direct reference to a networked block-storage volume.
    NetworkedBlockStore {
        /// Backend volume identifier.
        volume_id: String,
    },
    /// Direct reference to a regional persistent disk.
    RegionalDisk {
        /// Backend disk name.
        disk_name: String,
    },
    /// Direct reference to a managed disk.
    ManagedDisk {
        /// Backend disk URI.
        disk_uri: String,
    },
    /// Node-local scratch space; no backend involved.
    EmptyDir,
}

/// A volume attached to a unit.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Volume {
    /// Volume name, unique within the unit.
    pub name: String,
    /// Where the volume's data lives.
    pub source: VolumeSource,
}

impl Volume {
    /// Create a volume.
    #[must_use]
    pub fn new(name: impl Into<String>, source: VolumeSource) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }
}

/// A schedulable workload unit requesting placement on a node.
///
/// The fields here are the complete set any admission predicate may
/// consult; the equivalence fingerprint is derived from them (minus the
/// unit's own name).
///
/// # Example
///
/// ```rust
/// use sched_core::{UnitSpec, Volume, VolumeSource};
///
/// let unit = UnitSpec::builder("db-0")
///     .namespace("prod")
///     .label("app", "db")
///     .volume(Volume::new(
///         "data",
///         VolumeSource::NetworkedBlockStore { volume_id: "vol-1".into() },
///     ))
///     .build();
///
/// assert_eq!(unit.volumes().len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct UnitSpec {
    name: String,
    namespace: String,
    labels: BTreeMap<String, String>,
    affinity: Option<Affinity>,
    containers: Vec<Container>,
    init_containers: Vec<Container>,
    node_name: String,
    node_selector: BTreeMap<String, String>,
    tolerations: Vec<Toleration>,
    volumes: Vec<Volume>,
}

impl UnitSpec {
    /// Create a builder for a unit with the given name.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> UnitSpecBuilder {
        UnitSpecBuilder {
            spec: UnitSpec {
                name: name.into(),
                ..UnitSpec::default()
            },
        }
    }

    /// Unit name. Not part of the equivalence fingerprint.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace the unit lives in.
    #[inline]
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Unit labels.
    #[inline]
    #[must_use]
    pub fn labels(&self) -> &BTreeMap<String, String> {
        &self.labels
    }

    /// Affinity rules, if any.
    #[inline]
    #[must_use]
    pub fn affinity(&self) -> Option<&Affinity> {
        self.affinity.as_ref()
    }

    /// Containers in the unit.
    #[inline]
    #[must_use]
    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    /// Init containers in the unit.
    #[inline]
    #[must_use]
    pub fn init_containers(&self) -> &[Container] {
        &self.init_containers
    }

    /// Requested target node name; empty when the scheduler chooses.
    #[inline]
    #[must_use]
    pub fn node_name(&self) -> &str {
        &self.node_name
    }

    /// Node-selector constraints.
    #[inline]
    #[must_use]
    pub fn node_selector(&self) -> &BTreeMap<String, String> {
        &self.node_selector
    }

    /// Tolerations carried by the unit.
    #[inline]
    #[must_use]
    pub fn tolerations(&self) -> &[Toleration] {
        &self.tolerations
    }

    /// Volumes attached to the unit.
    #[inline]
    #[must_use]
    pub fn volumes(&self) -> &[Volume] {
        &self.volumes
    }
}

/// Builder for [`UnitSpec`].
#[derive(Debug, Default)]
pub struct UnitSpecBuilder {
    spec: UnitSpec,
}

impl UnitSpecBuilder {
    /// Set the namespace.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.spec.namespace = namespace.into();
        self
    }

    /// Add one label.
    #[must_use]
    pub fn label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.spec.labels.insert(key.into(), value.into());
        self
    }

    /// Replace the label map.
    #[must_use]
    pub fn labels(mut self, labels: BTreeMap<String, String>) -> Self {
        self.spec.labels = labels;
        self
    }

    /// Set the affinity rules.
    #[must_use]
    pub fn affinity(mut self, affinity: Affinity) -> Self {
        self.spec.affinity = Some(affinity);
        self
    }

    /// Add a container.
    #[must_use]
    pub fn container(mut self, container: Container) -> Self {
        self.spec.containers.push(container);
        self
    }

    /// Add an init container.
    #[must_use]
    pub fn init_container(mut self, container: Container) -> Self {
        self.spec.init_containers.push(container);
        self
    }

    /// Set the requested target node.
    #[must_use]
    pub fn node_name(mut self, node_name: impl Into<String>) -> Self {
        self.spec.node_name = node_name.into();
        self
    }

    /// Add one node-selector constraint.
    #[must_use]
    pub fn node_selector(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.spec.node_selector.insert(key.into(), value.into());
        self
    }

    /// Add a toleration.
    #[must_use]
    pub fn toleration(mut self, toleration: Toleration) -> Self {
        self.spec.tolerations.push(toleration);
        self
    }

    /// Add a volume.
    #[must_use]
    pub fn volume(mut self, volume: Volume) -> Self {
        self.spec.volumes.push(volume);
        self
    }

    /// Build the unit.
    #[must_use]
    pub fn build(self) -> UnitSpec {
        self.spec
    }
}
