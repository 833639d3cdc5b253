use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared termination signal for one simulation run.
///
/// Cloned into every worker and the balancer. The completion sink triggers it
/// exactly once, when the last job has been recorded. All loops monitor it
/// and wind down; it never interrupts an in-flight job.
#[derive(Debug, Clone, Default)]
pub struct Shutdown(Arc<AtomicBool>);

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
