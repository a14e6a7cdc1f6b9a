// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Broad-phase abstraction.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::types::Bounds;

/// Broad-phase candidate lookup over a set of keyed rectangles.
///
/// A scene node owns one partitioner for its children. Children are added and
/// removed as they are attached and detached, and reported with their new
/// bounds whenever those bounds change.
///
/// # Contract
///
/// [`for_each_candidate`](Partitioner::for_each_candidate) must report every
/// member whose bounds could strictly overlap the query bounds (no false
/// negatives). Reporting extra members is allowed, and the queried key itself
/// may be reported; callers filter it out.
///
/// The trait is object safe so a node can hold a `Box<dyn Partitioner<K>>`
/// and have it replaced at runtime.
pub trait Partitioner<K>: Debug {
    /// Register `key` with its current bounds.
    fn add(&mut self, key: K, bounds: Bounds);

    /// Unregister `key`. Unknown keys are ignored.
    fn remove(&mut self, key: K);

    /// Report that `key` now occupies `bounds`. Unknown keys are ignored.
    fn notify_moved(&mut self, key: K, bounds: Bounds);

    /// Unregister everything.
    fn clear(&mut self);

    /// Visit every member that might collide with `key` occupying `bounds`.
    fn for_each_candidate(&self, key: K, bounds: Bounds, visitor: &mut dyn FnMut(K));

    /// Collect the candidates for `key` occupying `bounds`.
    ///
    /// The default implementation collects [`for_each_candidate`](Partitioner::for_each_candidate).
    fn candidates(&self, key: K, bounds: Bounds) -> Vec<K> {
        let mut out = Vec::new();
        self.for_each_candidate(key, bounds, &mut |k| out.push(k));
        out
    }
}
