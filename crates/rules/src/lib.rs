//! Concurrency-safe rule registry for adaptive admission control.
//!
//! The store holds the active set of protection rules keyed by system
//! metric type and replaces it atomically on every load, so the
//! admission-check path never sees a partially updated configuration.
//! Metric collection and the admission decision itself live elsewhere;
//! this crate is the source of truth they consult.

pub mod error;
pub mod index;
pub mod publisher;
pub mod registrar;
pub mod rule;
pub mod store;

pub use error::RuleError;
pub use index::RuleIndex;
pub use publisher::{RulePublisher, SwapPublisher};
pub use registrar::{ChainRegistrar, NoopRegistrar, RecordingRegistrar, ADAPTIVE_SLOT_NAME};
pub use rule::{validate, AdaptiveStrategy, MetricType, Rule, TOTAL_INBOUND_RESOURCE};
pub use store::RuleStore;
