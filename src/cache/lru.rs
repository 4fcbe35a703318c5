//! Access Order Module
//!
//! Recency bookkeeping used to pick eviction victims.

use std::collections::VecDeque;

// == Access Order ==
/// Keys ordered by last touch.
///
/// - Front = least recently used (next eviction victim)
/// - Back = most recently used
///
/// A key appears at most once.
#[derive(Debug, Default)]
pub struct AccessOrder {
    order: VecDeque<String>,
}

impl AccessOrder {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Touch ==
    /// Marks a key as most recently used, moving it to the back.
    pub fn touch(&mut self, key: &str) {
        if self.order.back().is_some_and(|k| k == key) {
            return;
        }
        self.remove(key);
        self.order.push_back(key.to_string());
    }

    // == Remove ==
    /// Drops a key from the order. Returns whether it was tracked.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.order.iter().position(|k| k == key) {
            Some(index) => {
                self.order.remove(index);
                true
            }
            None => false,
        }
    }

    // == Pop Oldest ==
    /// Removes and returns the least recently used key.
    pub fn pop_oldest(&mut self) -> Option<String> {
        self.order.pop_front()
    }

    #[cfg(test)]
    pub fn peek_oldest(&self) -> Option<&str> {
        self.order.front().map(String::as_str)
    }

    #[cfg(test)]
    pub fn peek_newest(&self) -> Option<&str> {
        self.order.back().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[cfg(test)]
    pub fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }

    /// Keys from least to most recently used.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}
