//! Equivalence-class behavior through the public API.

use std::collections::BTreeMap;

use equiv_cache::EquivalenceClass;
use sched_core::{
    Affinity, AffinityTerm, Container, TaintEffect, Toleration, TolerationOp, UnitSpec, Volume,
    VolumeSource,
};

/// A fully loaded unit touching every equivalence-view field.
fn full_unit(name: &str) -> UnitSpec {
    UnitSpec::builder(name)
        .namespace("prod")
        .label("app", "db")
        .label("tier", "storage")
        .affinity(Affinity {
            node_affinity: None,
            unit_affinity: None,
            unit_anti_affinity: Some(vec![AffinityTerm {
                label_selector: BTreeMap::from([("app".to_string(), "db".to_string())]),
                topology_key: "zone".to_string(),
                namespaces: vec![],
            }]),
        })
        .container(
            Container::new("db", "db:9.6")
                .request("cpu", "2")
                .request("memory", "4Gi"),
        )
        .init_container(Container::new("init-perms", "busybox:1.36"))
        .node_name("node-7")
        .node_selector("disktype", "ssd")
        .toleration(Toleration {
            key: "dedicated".to_string(),
            operator: TolerationOp::Equal,
            value: "db".to_string(),
            effect: Some(TaintEffect::NoSchedule),
        })
        .volume(Volume::new(
            "data",
            VolumeSource::RegionalDisk {
                disk_name: "db-disk".to_string(),
            },
        ))
        .build()
}

#[test]
fn identical_views_hash_identically() {
    assert_eq!(
        EquivalenceClass::of(&full_unit("db-0")),
        EquivalenceClass::of(&full_unit("db-1"))
    );
}

#[test]
fn hash_is_stable_across_derivations() {
    let unit = full_unit("db-0");
    let first = EquivalenceClass::of(&unit);
    for _ in 0..100 {
        assert_eq!(EquivalenceClass::of(&unit), first);
    }
}

#[test]
fn empty_and_absent_label_maps_collide() {
    let absent = UnitSpec::builder("a").namespace("prod").build();
    let empty = UnitSpec::builder("b")
        .namespace("prod")
        .labels(BTreeMap::new())
        .build();
    assert_eq!(EquivalenceClass::of(&absent), EquivalenceClass::of(&empty));
}

#[test]
fn differing_requests_land_in_different_classes() {
    let small = UnitSpec::builder("db-0")
        .namespace("prod")
        .container(Container::new("db", "db:9.6").request("cpu", "1"))
        .build();
    let large = UnitSpec::builder("db-0")
        .namespace("prod")
        .container(Container::new("db", "db:9.6").request("cpu", "2"))
        .build();
    assert_ne!(EquivalenceClass::of(&small), EquivalenceClass::of(&large));
}

#[test]
fn node_selector_and_target_node_are_significant() {
    let selector = UnitSpec::builder("u")
        .namespace("prod")
        .node_selector("disktype", "ssd")
        .build();
    let no_selector = UnitSpec::builder("u").namespace("prod").build();
    assert_ne!(
        EquivalenceClass::of(&selector),
        EquivalenceClass::of(&no_selector)
    );

    let pinned = UnitSpec::builder("u").namespace("prod").node_name("node-7").build();
    assert_ne!(EquivalenceClass::of(&pinned), EquivalenceClass::of(&no_selector));
}

#[test]
fn container_order_is_significant() {
    let a = Container::new("db", "db:9.6");
    let b = Container::new("sidecar", "proxy:2.0");
    let ab = UnitSpec::builder("u").container(a.clone()).container(b.clone()).build();
    let ba = UnitSpec::builder("u").container(b).container(a).build();
    assert_ne!(EquivalenceClass::of(&ab), EquivalenceClass::of(&ba));
}
