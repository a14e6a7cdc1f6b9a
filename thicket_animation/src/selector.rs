// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tag-driven clip selection.

use core::fmt::Debug;
use std::sync::Arc;

use bitflags::Flags;

use crate::clip::AnimationClip;
use crate::error::AnimationError;
use crate::tags::TagSet;

struct Rule<F> {
    required: F,
    clip: Arc<AnimationClip>,
}

/// Maps combinations of active tags to clips.
///
/// Rules are checked in the order they were declared; the first rule whose
/// required tags are all active wins. When no rule matches, the default clip
/// is selected.
pub struct ClipSelector<F> {
    rules: Vec<Rule<F>>,
    default: Arc<AnimationClip>,
}

impl<F: Debug> Debug for ClipSelector<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ClipSelector")
            .field(
                "rules",
                &self.rules.iter().map(|r| &r.required).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl<F: Flags + Copy> ClipSelector<F> {
    /// Start a selector that falls back to `default`.
    pub fn builder(default: Arc<AnimationClip>) -> SelectorBuilder<F> {
        SelectorBuilder {
            rules: Vec::new(),
            default,
        }
    }

    /// A selector with no rules, which always selects `default`.
    pub fn single(default: Arc<AnimationClip>) -> Self {
        Self {
            rules: Vec::new(),
            default,
        }
    }

    /// Select the clip for the tags in `tags`.
    pub fn select(&self, tags: &TagSet<F>) -> &Arc<AnimationClip> {
        self.select_for(tags.active())
    }

    /// Select the clip for the active tag set `active`.
    pub fn select_for(&self, active: F) -> &Arc<AnimationClip> {
        self.rules
            .iter()
            .find(|rule| active.contains(rule.required))
            .map_or(&self.default, |rule| &rule.clip)
    }

    /// The clip selected when no rule matches.
    pub fn default_clip(&self) -> &Arc<AnimationClip> {
        &self.default
    }

    /// Number of rules, not counting the default.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

/// Builder for [`ClipSelector`].
pub struct SelectorBuilder<F> {
    rules: Vec<Rule<F>>,
    default: Arc<AnimationClip>,
}

impl<F: Debug> Debug for SelectorBuilder<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SelectorBuilder")
            .field("rules", &self.rules.len())
            .finish_non_exhaustive()
    }
}

impl<F: Flags + Copy> SelectorBuilder<F> {
    /// Select `clip` when every tag in `required` is active.
    ///
    /// Rules declared earlier take priority.
    pub fn rule(mut self, required: F, clip: Arc<AnimationClip>) -> Self {
        self.rules.push(Rule { required, clip });
        self
    }

    /// Validate and build the selector.
    ///
    /// A rule that requires no tags would shadow every later rule and the
    /// default, so it is rejected.
    pub fn build(self) -> Result<ClipSelector<F>, AnimationError> {
        if let Some(index) = self.rules.iter().position(|r| r.required.is_empty()) {
            return Err(AnimationError::EmptyRule { index });
        }
        Ok(ClipSelector {
            rules: self.rules,
            default: self.default,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::ImageId;

    bitflags::bitflags! {
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub(crate) struct State: u8 {
            const A = 1 << 0;
            const B = 1 << 1;
            const C = 1 << 2;
        }
    }

    fn clip(id: u32) -> Arc<AnimationClip> {
        AnimationClip::builder()
            .frame(ImageId(id), 100)
            .build()
            .unwrap()
    }

    #[test]
    fn first_matching_rule_wins() {
        let (ab, a, idle) = (clip(1), clip(2), clip(0));
        let selector = ClipSelector::builder(Arc::clone(&idle))
            .rule(State::A | State::B, Arc::clone(&ab))
            .rule(State::A, Arc::clone(&a))
            .build()
            .unwrap();

        let mut tags = TagSet::new();
        tags.set_active(State::A | State::B);
        assert!(Arc::ptr_eq(selector.select(&tags), &ab));

        tags.set_inactive(State::B);
        assert!(Arc::ptr_eq(selector.select(&tags), &a));

        tags.set_inactive(State::A);
        assert!(Arc::ptr_eq(selector.select(&tags), &idle));
    }

    #[test]
    fn declaration_order_beats_specificity() {
        let (a, ab) = (clip(1), clip(2));
        let selector = ClipSelector::builder(clip(0))
            .rule(State::A, Arc::clone(&a))
            .rule(State::A | State::B, Arc::clone(&ab))
            .build()
            .unwrap();
        assert!(Arc::ptr_eq(selector.select_for(State::A), &a));
        assert!(Arc::ptr_eq(selector.select_for(State::A | State::B), &a));
    }

    #[test]
    fn unrelated_tags_fall_back_to_default() {
        let idle = clip(0);
        let selector = ClipSelector::builder(Arc::clone(&idle))
            .rule(State::A, clip(1))
            .build()
            .unwrap();
        assert!(Arc::ptr_eq(selector.select_for(State::C), &idle));
        assert_eq!(selector.rule_count(), 1);
    }

    #[test]
    fn empty_rule_is_rejected() {
        let err = ClipSelector::builder(clip(0))
            .rule(State::A, clip(1))
            .rule(State::empty(), clip(2))
            .build()
            .unwrap_err();
        assert_eq!(err, AnimationError::EmptyRule { index: 1 });
    }

    #[test]
    fn single_always_selects_default() {
        let idle = clip(0);
        let selector = ClipSelector::<State>::single(Arc::clone(&idle));
        assert!(Arc::ptr_eq(selector.select_for(State::all()), &idle));
    }
}
