use std::sync::{Arc, RwLock};

use crate::error::RuleError;
use crate::index::RuleIndex;
use crate::publisher::{IndexSlot, RulePublisher, SwapPublisher};
use crate::registrar::{ChainRegistrar, NoopRegistrar};
use crate::rule::{MetricType, Rule};

/// Holds the active rule index and replaces it wholesale on every
/// successful load. Owned and injected by the host; the loader and the
/// evaluation engine both receive a handle to the same store.
///
/// Readers take the read lock only long enough to clone the `Arc`, so
/// read latency is independent of rule-set size and a load in progress
/// never exposes a half-built set.
pub struct RuleStore {
    current: IndexSlot,
    publisher: RwLock<Arc<dyn RulePublisher>>,
    registrar: Arc<dyn ChainRegistrar>,
}

impl Default for RuleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleStore {
    pub fn new() -> Self {
        Self::with_registrar(Arc::new(NoopRegistrar))
    }

    pub fn with_registrar(registrar: Arc<dyn ChainRegistrar>) -> Self {
        let current: IndexSlot = Arc::new(RwLock::new(Arc::new(RuleIndex::default())));
        let publisher: Arc<dyn RulePublisher> = Arc::new(SwapPublisher::new(current.clone()));
        Self {
            current,
            publisher: RwLock::new(publisher),
            registrar,
        }
    }

    /// Replaces all active rules with the valid subset of `rules`.
    /// Invalid candidates are skipped and logged, never fatal. If the
    /// active publisher rejects the new index the previous rules stay in
    /// place and the error is returned.
    pub fn load_rules(&self, rules: &[Rule]) -> Result<(), RuleError> {
        let index = RuleIndex::build(rules, self.registrar.as_ref());

        // A load past this point completes with the publisher it captured,
        // even if set_publisher races with it.
        let publisher = self
            .publisher
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();

        if let Err(e) = publisher.publish(index) {
            tracing::error!(error = %e, rules = ?rules, "failed to load rules");
            return Err(e);
        }
        Ok(())
    }

    /// Installs an empty index. Existing check-slot registrations are
    /// left in place; with zero active rules they are no-ops.
    pub fn clear_rules(&self) -> Result<(), RuleError> {
        self.load_rules(&[])
    }

    /// All active rules, by copy. Changes to the returned rules never
    /// affect the store.
    pub fn snapshot(&self) -> Vec<Rule> {
        self.current_index().iter().cloned().collect()
    }

    /// The live index, shared. For the evaluation hot path: no copying,
    /// and the snapshot stays coherent for as long as the caller holds
    /// the `Arc` even while newer indexes are installed.
    pub fn current_index(&self) -> Arc<RuleIndex> {
        self.current.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Active rules for one metric type, by copy.
    pub fn rules_of(&self, metric_type: MetricType) -> Vec<Rule> {
        self.current_index().rules_of(metric_type).to_vec()
    }

    /// Replaces the active publisher. Last writer wins; loads already in
    /// flight finish with the publisher they captured.
    pub fn set_publisher(&self, publisher: Arc<dyn RulePublisher>) {
        *self.publisher.write().unwrap_or_else(|e| e.into_inner()) = publisher;
    }

    /// A publisher that performs this store's install step. Custom
    /// publishers wrap it to keep the actual swap while adding their own
    /// behavior around it.
    pub fn swap_publisher(&self) -> SwapPublisher {
        SwapPublisher::new(self.current.clone())
    }
}
