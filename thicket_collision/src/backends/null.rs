// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partitioner that opts out of automatic collision detection.

use crate::partitioner::Partitioner;
use crate::types::Bounds;

/// Partitioner that never reports candidates.
///
/// This is the default for new nodes: their children do not collide with
/// each other unless a real partitioner is installed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NullPartitioner;

impl<K> Partitioner<K> for NullPartitioner {
    fn add(&mut self, _key: K, _bounds: Bounds) {}

    fn remove(&mut self, _key: K) {}

    fn notify_moved(&mut self, _key: K, _bounds: Bounds) {}

    fn clear(&mut self) {}

    fn for_each_candidate(&self, _key: K, _bounds: Bounds, _visitor: &mut dyn FnMut(K)) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_nothing() {
        let mut p = NullPartitioner;
        Partitioner::<u32>::add(&mut p, 1, Bounds::new(0, 0, 10, 10));
        Partitioner::<u32>::add(&mut p, 2, Bounds::new(0, 0, 10, 10));
        assert!(p.candidates(1_u32, Bounds::new(0, 0, 10, 10)).is_empty());
    }
}
