//! Integration tests exercising sched-core and equiv-cache together.

#[cfg(test)]
mod cache_tests;
#[cfg(test)]
mod class_tests;

#[cfg(test)]
mod support {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use sched_core::{FreshnessOracle, Node, NodeSnapshot};

    /// Oracle whose answer can be flipped mid-test.
    pub struct Oracle {
        fresh: AtomicBool,
    }

    impl Oracle {
        pub fn fresh() -> Self {
            Self {
                fresh: AtomicBool::new(true),
            }
        }

        pub fn stale() -> Self {
            Self {
                fresh: AtomicBool::new(false),
            }
        }

        pub fn set_fresh(&self, fresh: bool) {
            self.fresh.store(fresh, Ordering::SeqCst);
        }
    }

    impl FreshnessOracle for Oracle {
        fn is_up_to_date(&self, _snapshot: &NodeSnapshot) -> bool {
            self.fresh.load(Ordering::SeqCst)
        }
    }

    pub fn snapshot(node_name: &str) -> NodeSnapshot {
        NodeSnapshot::new(Arc::new(Node::new(node_name)), 1)
    }
}
