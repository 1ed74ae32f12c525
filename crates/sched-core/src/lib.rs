//! # sched-core
//!
//! Core types shared across the strato scheduler crates.
//!
//! This crate provides the foundational vocabulary used by the predicate
//! evaluation and caching layers:
//!
//! - [`SchedError`] - Error type covering all scheduler-core failure modes
//! - [`UnitSpec`] - The schedulable workload unit and its nested model types
//! - [`Node`] / [`NodeSnapshot`] - Candidate machines and the state store's
//!   view of them
//! - [`PredicateId`] / [`FailureReason`] - Opaque identifiers for admission
//!   predicates and their failure explanations
//! - [`FreshnessOracle`] - The collaborator contract for snapshot freshness
//!
//! ## Example
//!
//! ```rust
//! use sched_core::{PredicateId, UnitSpec};
//!
//! let unit = UnitSpec::builder("web-0")
//!     .namespace("prod")
//!     .label("app", "web")
//!     .build();
//!
//! assert_eq!(unit.namespace(), "prod");
//! assert_eq!(PredicateId::general_fit().as_str(), "GeneralFit");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod node;
mod predicate;
mod unit;

pub use error::SchedError;
pub use node::{FreshnessOracle, Node, NodeSnapshot};
pub use predicate::{FailureReason, PredicateId, PredicateResult};
pub use unit::{
    Affinity, AffinityTerm, Container, TaintEffect, Toleration, TolerationOp, UnitSpec,
    UnitSpecBuilder, Volume, VolumeSource,
};

/// Result type alias using [`SchedError`].
pub type Result<T> = std::result::Result<T, SchedError>;
