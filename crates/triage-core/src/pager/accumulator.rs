//! Ordered, duplicate-free item accumulation.

use std::collections::HashSet;

use crate::traits::Keyed;

/// An ordered list of items keyed by id.
///
/// [`Accumulator::merge`] appends only items whose key has not been seen, so
/// merging the same page twice leaves the list unchanged.
#[derive(Debug, Clone)]
pub struct Accumulator<T> {
    items: Vec<T>,
    seen: HashSet<String>,
}

impl<T> Default for Accumulator<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
        }
    }
}

impl<T: Keyed> Accumulator<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every item.
    pub fn clear(&mut self) {
        self.items.clear();
        self.seen.clear();
    }

    /// Replace the contents with `items`, dropping repeated keys.
    pub fn reset(&mut self, items: impl IntoIterator<Item = T>) {
        self.clear();
        self.merge(items);
    }

    /// Append unseen items in order. Returns how many were added.
    pub fn merge(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        let before = self.items.len();
        for item in items {
            if self.seen.insert(item.key().to_string()) {
                self.items.push(item);
            }
        }
        self.items.len() - before
    }

    /// Returns true if an item with `key` has been accumulated.
    pub fn contains(&self, key: &str) -> bool {
        self.seen.contains(key)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}
