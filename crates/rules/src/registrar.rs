use std::sync::Mutex;

/// Slot the evaluation pipeline runs for resources guarded by these rules.
pub const ADAPTIVE_SLOT_NAME: &str = "adaptive-system-check-slot";

/// Wires the evaluation pipeline for a resource referenced by an accepted
/// rule. Called once per accepted rule during index construction; the
/// call is advisory and must tolerate duplicate registrations. A failing
/// implementation logs internally; registration never un-accepts a rule.
pub trait ChainRegistrar: Send + Sync {
    fn register_check_slot(&self, resource: &str, slot_name: &str);
}

/// Default registrar for hosts that wire the chain elsewhere.
#[derive(Debug, Default)]
pub struct NoopRegistrar;

impl ChainRegistrar for NoopRegistrar {
    fn register_check_slot(&self, _resource: &str, _slot_name: &str) {}
}

/// Records every registration; for tests and diagnostics.
#[derive(Debug, Default)]
pub struct RecordingRegistrar {
    calls: Mutex<Vec<(String, String)>>,
}

impl RecordingRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl ChainRegistrar for RecordingRegistrar {
    fn register_check_slot(&self, resource: &str, slot_name: &str) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((resource.to_string(), slot_name.to_string()));
    }
}
