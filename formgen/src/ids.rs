//! Unique identifier allocation.
//!
//! Identifiers link labels, help hints and controls together. They only need
//! to be unique for the lifetime of the process: the shared counter starts at
//! zero and is never reset or persisted, so identifiers are not reproducible
//! across runs.
//!
//! Rendering takes an [`IdAllocator`] so tests (or hosts that want scoped
//! numbering) can substitute [`SequentialIds`] for the process-wide
//! [`ProcessIds`].

use std::sync::atomic::{AtomicU64, Ordering};

/// Prefix of every allocated identifier.
pub const ID_PREFIX: &str = "__ID";

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Allocate a fresh identifier from the process-wide counter.
///
/// # Example
/// ```rust
/// let a = formgen::ids::next_id();
/// let b = formgen::ids::next_id();
/// assert!(a.starts_with("__ID"));
/// assert_ne!(a, b);
/// ```
pub fn next_id() -> String {
    format!("{}{}", ID_PREFIX, COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// A source of unique identifiers.
pub trait IdAllocator: Send + Sync {
    /// Return an identifier that has not been returned before.
    fn next_id(&self) -> String;
}

/// Allocator backed by the process-wide counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessIds;

impl IdAllocator for ProcessIds {
    fn next_id(&self) -> String {
        next_id()
    }
}

/// Allocator with its own counter, for deterministic numbering.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIds {
    /// Create an allocator producing `{prefix}0`, `{prefix}1`, ...
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }

    /// Restart numbering from zero.
    pub fn reset(&self) {
        self.counter.store(0, Ordering::Relaxed);
    }

    /// Number of identifiers handed out since creation or the last reset.
    pub fn issued(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new(ID_PREFIX)
    }
}

impl IdAllocator for SequentialIds {
    fn next_id(&self) -> String {
        format!(
            "{}{}",
            self.prefix,
            self.counter.fetch_add(1, Ordering::Relaxed)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_sequential_ids_count_up_from_zero() {
        let ids = SequentialIds::new("f");
        assert_eq!(ids.next_id(), "f0");
        assert_eq!(ids.next_id(), "f1");
        assert_eq!(ids.issued(), 2);

        ids.reset();
        assert_eq!(ids.next_id(), "f0");
    }

    #[test]
    fn test_process_ids_are_strictly_increasing() {
        let parse = |id: String| id[ID_PREFIX.len()..].parse::<u64>().unwrap();
        let first = parse(ProcessIds.next_id());
        let second = parse(ProcessIds.next_id());
        assert!(second > first);
    }

    #[test]
    fn test_process_ids_unique_across_threads() {
        let seen = Arc::new(std::sync::Mutex::new(HashSet::new()));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let seen = Arc::clone(&seen);
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        let id = next_id();
                        assert!(seen.lock().unwrap().insert(id));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(seen.lock().unwrap().len(), 1000);
    }
}
