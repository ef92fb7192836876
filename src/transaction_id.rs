use std::sync::atomic::{AtomicU64, Ordering};

pub type SequenceId = u64;

/// Hands out transaction sequence ids, starting at 1.
///
/// Every transaction attempt takes one, accepted or declined, so ids are
/// never reused and never skipped.
#[derive(Debug)]
pub struct TransactionIdGenerator {
    next: AtomicU64,
}

impl Default for TransactionIdGenerator {
    fn default() -> Self {
        TransactionIdGenerator {
            next: AtomicU64::new(1),
        }
    }
}

impl TransactionIdGenerator {
    pub fn next(&self) -> SequenceId {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}
