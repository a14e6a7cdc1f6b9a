// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use thiserror::Error;

/// Invalid arguments when building clips or selectors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AnimationError {
    /// A clip was built without frames.
    #[error("an animation clip needs at least one frame")]
    NoFrames,
    /// A frame was given a zero duration.
    #[error("frame {index} has a zero duration")]
    ZeroDuration {
        /// Index of the offending frame.
        index: usize,
    },
    /// A looping clip's loop-back index does not name one of its frames.
    #[error("loop-back index {index} is outside the clip's {frame_count} frames")]
    LoopBackOutOfRange {
        /// The requested loop-back index.
        index: usize,
        /// Number of frames in the clip.
        frame_count: usize,
    },
    /// The frame durations add up to more than `u64::MAX` milliseconds.
    #[error("the clip's total duration overflows")]
    DurationOverflow,
    /// A selector rule requires no tags, so it would always match.
    #[error("selector rule {index} requires no tags")]
    EmptyRule {
        /// Position of the rule in declaration order.
        index: usize,
    },
}
