// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat set partitioner with linear scans. Small and simple; good for tiny sets.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::partitioner::Partitioner;
use crate::types::Bounds;

/// Partitioner with one flat set of members.
///
/// Every member is reported as a candidate for every query, so it can never
/// miss a collision, at the cost of O(n) work per query. Members are visited
/// in insertion order.
#[derive(Clone)]
pub struct SimplePartitioner<K> {
    members: Vec<K>,
}

impl<K> SimplePartitioner<K> {
    /// Create an empty partitioner.
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Number of registered members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether no members are registered.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<K> Default for SimplePartitioner<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Debug for SimplePartitioner<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SimplePartitioner")
            .field("members", &self.members.len())
            .finish_non_exhaustive()
    }
}

impl<K: Copy + PartialEq> Partitioner<K> for SimplePartitioner<K> {
    fn add(&mut self, key: K, _bounds: Bounds) {
        if !self.members.contains(&key) {
            self.members.push(key);
        }
    }

    fn remove(&mut self, key: K) {
        self.members.retain(|k| *k != key);
    }

    fn notify_moved(&mut self, _key: K, _bounds: Bounds) {}

    fn clear(&mut self) {
        self.members.clear();
    }

    fn for_each_candidate(&self, _key: K, _bounds: Bounds, visitor: &mut dyn FnMut(K)) {
        for &k in &self.members {
            visitor(k);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everyone_is_a_candidate() {
        let mut p = SimplePartitioner::new();
        p.add(1_u32, Bounds::new(0, 0, 1, 1));
        p.add(2, Bounds::new(1000, 1000, 1, 1));
        p.add(3, Bounds::ZERO);
        assert_eq!(p.candidates(1, Bounds::new(0, 0, 1, 1)), [1, 2, 3]);
    }

    #[test]
    fn set_semantics() {
        let mut p = SimplePartitioner::new();
        p.add(7_u32, Bounds::ZERO);
        p.add(7, Bounds::ZERO);
        assert_eq!(p.len(), 1);
        p.remove(7);
        p.remove(7);
        assert!(p.is_empty());
    }

    #[test]
    fn clear_forgets_members() {
        let mut p = SimplePartitioner::new();
        p.add(1_u32, Bounds::ZERO);
        p.add(2, Bounds::ZERO);
        p.clear();
        assert!(p.candidates(1, Bounds::ZERO).is_empty());
    }
}
