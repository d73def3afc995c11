use std::collections::HashMap;

use crate::registrar::{ChainRegistrar, ADAPTIVE_SLOT_NAME};
use crate::rule::{validate, MetricType, Rule};

/// The active rule set, grouped by metric type. Built fresh on every load
/// and never mutated afterwards: readers share it as an immutable
/// snapshot while the store swaps in replacements.
#[derive(Debug, Default, Clone)]
pub struct RuleIndex {
    buckets: HashMap<MetricType, Vec<Rule>>,
}

impl RuleIndex {
    /// Validates candidates in input order and groups the survivors by
    /// metric type, preserving acceptance order within each bucket.
    /// Invalid rules are skipped with a warning; one bad rule never
    /// aborts the load. Each accepted rule is registered with the
    /// check-slot chain exactly once.
    pub fn build(candidates: &[Rule], registrar: &dyn ChainRegistrar) -> Self {
        let mut buckets: HashMap<MetricType, Vec<Rule>> = HashMap::new();

        for rule in candidates {
            if let Err(e) = validate(rule) {
                tracing::warn!(rule = ?rule, error = %e, "ignoring invalid rule");
                continue;
            }
            buckets
                .entry(rule.metric_type)
                .or_default()
                .push(rule.clone());

            registrar.register_check_slot(rule.resource_name(), ADAPTIVE_SLOT_NAME);
        }

        Self { buckets }
    }

    /// Rules for one metric type, in acceptance order.
    pub fn rules_of(&self, metric_type: MetricType) -> &[Rule] {
        self.buckets
            .get(&metric_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All rules across all metric types. Iteration order across types is
    /// unspecified; order within one type is acceptance order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.buckets.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
