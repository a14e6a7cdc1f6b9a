// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Active tag sets with a dirty latch.

use bitflags::Flags;

/// The set of tags currently active on a node.
///
/// `F` is any `bitflags` type; each named flag is one tag. Every call to
/// [`set_active`](Self::set_active) or [`set_inactive`](Self::set_inactive)
/// raises the dirty latch, whether or not the set actually changed, and
/// [`consume_dirty`](Self::consume_dirty) reads and clears it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TagSet<F> {
    active: F,
    dirty: bool,
}

impl<F: Flags + Copy> Default for TagSet<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Flags + Copy> TagSet<F> {
    /// An empty, clean tag set.
    pub fn new() -> Self {
        Self {
            active: F::empty(),
            dirty: false,
        }
    }

    /// Mark `tags` active.
    pub fn set_active(&mut self, tags: F) {
        self.active.insert(tags);
        self.dirty = true;
    }

    /// Mark `tags` inactive.
    pub fn set_inactive(&mut self, tags: F) {
        self.active.remove(tags);
        self.dirty = true;
    }

    /// Mark `tags` active or inactive.
    pub fn set(&mut self, tags: F, active: bool) {
        if active {
            self.set_active(tags);
        } else {
            self.set_inactive(tags);
        }
    }

    /// Whether every tag in `tags` is active.
    pub fn is_active(&self, tags: F) -> bool {
        self.active.contains(tags)
    }

    /// Whether any single active tag satisfies `pred`.
    pub fn is_any_active(&self, pred: impl FnMut(F) -> bool) -> bool {
        self.active.iter().any(pred)
    }

    /// All active tags.
    pub fn active(&self) -> F {
        self.active
    }

    /// Whether the set was modified since the last [`consume_dirty`](Self::consume_dirty).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return the dirty latch and clear it.
    pub fn consume_dirty(&mut self) -> bool {
        core::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    bitflags::bitflags! {
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub(crate) struct Mood: u8 {
            const HAPPY = 1 << 0;
            const SLEEPY = 1 << 1;
            const HUNGRY = 1 << 2;
        }
    }

    #[test]
    fn starts_empty_and_clean() {
        let mut tags = TagSet::<Mood>::new();
        assert!(tags.active().is_empty());
        assert!(!tags.consume_dirty());
    }

    #[test]
    fn dirty_latch_reads_once() {
        let mut tags = TagSet::new();
        tags.set_active(Mood::HAPPY);
        assert!(tags.is_active(Mood::HAPPY));
        assert!(tags.consume_dirty());
        assert!(!tags.consume_dirty());
    }

    #[test]
    fn redundant_changes_still_mark_dirty() {
        let mut tags = TagSet::new();
        tags.set_inactive(Mood::SLEEPY);
        assert!(tags.consume_dirty());
        tags.set_active(Mood::SLEEPY);
        tags.consume_dirty();
        tags.set_active(Mood::SLEEPY);
        assert!(tags.is_dirty());
    }

    #[test]
    fn is_active_requires_all() {
        let mut tags = TagSet::new();
        tags.set(Mood::HAPPY, true);
        assert!(!tags.is_active(Mood::HAPPY | Mood::HUNGRY));
        tags.set(Mood::HUNGRY, true);
        assert!(tags.is_active(Mood::HAPPY | Mood::HUNGRY));
        tags.set(Mood::HAPPY, false);
        assert!(!tags.is_active(Mood::HAPPY));
    }

    #[test]
    fn predicate_sees_individual_tags() {
        let mut tags = TagSet::new();
        tags.set_active(Mood::HAPPY | Mood::HUNGRY);
        assert!(tags.is_any_active(|t| t == Mood::HUNGRY));
        assert!(!tags.is_any_active(|t| t == Mood::SLEEPY));
        assert!(!tags.is_any_active(|t| t == (Mood::HAPPY | Mood::HUNGRY)));
    }
}
