//! Deduplication across input lines
//!
//! Each word's variants are already unique, but two input words can share
//! variants ("Pass" and "pass" expand to the same set). A deduplicator drops
//! anything already written for an earlier word.

use ahash::RandomState;
use hashbrown::HashSet;

/// Trait for deduplication implementations
pub trait Deduplicator {
    /// Check if item is unique and add it if so
    /// Returns true if the item is unique (not seen before)
    fn insert(&mut self, item: &str) -> bool;

    /// Get the number of unique items
    fn len(&self) -> usize;

    /// Check if empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get approximate memory usage in bytes
    fn memory_usage(&self) -> usize;
}

/// In-memory HashSet-based deduplicator
pub struct MemoryDeduplicator {
    set: HashSet<String, RandomState>,
}

impl MemoryDeduplicator {
    pub fn new() -> Self {
        Self {
            set: HashSet::with_hasher(RandomState::new()),
        }
    }
}

impl Default for MemoryDeduplicator {
    fn default() -> Self {
        Self::new()
    }
}

impl Deduplicator for MemoryDeduplicator {
    fn insert(&mut self, item: &str) -> bool {
        if self.set.contains(item) {
            return false;
        }
        self.set.insert(item.to_string())
    }

    fn len(&self) -> usize {
        self.set.len()
    }

    fn memory_usage(&self) -> usize {
        // Approximate: each entry is roughly String overhead + content + HashSet overhead
        self.set.len() * 64 + self.set.capacity() * 8
    }
}

/// Pass-through deduplicator for when duplicates are acceptable
#[derive(Default)]
pub struct NoOpDeduplicator {
    count: usize,
}

impl NoOpDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Deduplicator for NoOpDeduplicator {
    fn insert(&mut self, _item: &str) -> bool {
        self.count += 1;
        true
    }

    fn len(&self) -> usize {
        self.count
    }

    fn memory_usage(&self) -> usize {
        0
    }
}

/// Create a deduplicator, or a pass-through one when disabled
pub fn create_deduplicator(enabled: bool) -> Box<dyn Deduplicator> {
    if enabled {
        Box::new(MemoryDeduplicator::new())
    } else {
        Box::new(NoOpDeduplicator::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_dedup() {
        let mut dedup = MemoryDeduplicator::new();

        assert!(dedup.insert("password"));
        assert!(dedup.insert("Password"));
        assert!(!dedup.insert("password"));

        assert_eq!(dedup.len(), 2);
        assert!(dedup.insert("PASSWORD"));
        assert!(!dedup.insert("Password"));
    }

    #[test]
    fn test_noop_dedup() {
        let mut dedup = NoOpDeduplicator::new();

        assert!(dedup.insert("a"));
        assert!(dedup.insert("a"));
        assert_eq!(dedup.len(), 2);
    }

    #[test]
    fn test_create_deduplicator() {
        let mut enabled = create_deduplicator(true);
        assert!(enabled.insert("x"));
        assert!(!enabled.insert("x"));

        let mut disabled = create_deduplicator(false);
        assert!(disabled.insert("x"));
        assert!(disabled.insert("x"));
        assert!(!disabled.is_empty());
    }
}
