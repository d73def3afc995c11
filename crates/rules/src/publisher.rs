use std::sync::{Arc, RwLock};
use std::time::Instant;

use crate::error::RuleError;
use crate::index::RuleIndex;

pub(crate) type IndexSlot = Arc<RwLock<Arc<RuleIndex>>>;

/// Installs a freshly built index as the active one. The store calls the
/// publisher it holds at load time; hosts that need to intercept every
/// install (fan-out to other processes, persistence) implement this and
/// delegate the final swap to the store's [`SwapPublisher`].
pub trait RulePublisher: Send + Sync {
    fn publish(&self, index: RuleIndex) -> Result<(), RuleError>;
}

/// Default publisher: swaps the shared index reference under the write
/// lock. The exclusive section is a pointer swap; validation and index
/// construction already happened off-lock.
pub struct SwapPublisher {
    slot: IndexSlot,
}

impl SwapPublisher {
    pub(crate) fn new(slot: IndexSlot) -> Self {
        Self { slot }
    }
}

impl RulePublisher for SwapPublisher {
    fn publish(&self, index: RuleIndex) -> Result<(), RuleError> {
        let count = index.len();
        let start = Instant::now();
        {
            let mut current = self.slot.write().unwrap_or_else(|e| e.into_inner());
            *current = Arc::new(index);
        }
        let elapsed = start.elapsed();

        tracing::debug!(elapsed_ns = elapsed.as_nanos() as u64, "index swapped");
        if count > 0 {
            tracing::info!(rules = count, "rules loaded");
        } else {
            tracing::info!("rules cleared");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{MetricType, Rule};

    #[test]
    fn publish_replaces_slot_contents() {
        let slot: IndexSlot = Arc::new(RwLock::new(Arc::new(RuleIndex::default())));
        let publisher = SwapPublisher::new(slot.clone());

        let idx = RuleIndex::build(
            &[Rule::new(MetricType::Load, 8.0)],
            &crate::registrar::NoopRegistrar,
        );
        publisher.publish(idx).unwrap();

        let current = slot.read().unwrap().clone();
        assert_eq!(current.len(), 1);
    }

    #[test]
    fn publish_empty_clears() {
        let slot: IndexSlot = Arc::new(RwLock::new(Arc::new(RuleIndex::default())));
        let publisher = SwapPublisher::new(slot.clone());

        publisher.publish(RuleIndex::default()).unwrap();
        assert!(slot.read().unwrap().is_empty());
    }
}
