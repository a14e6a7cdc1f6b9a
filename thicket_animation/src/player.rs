// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-driven playback of a clip.

use std::sync::Arc;

use crate::canvas::Canvas;
use crate::clip::{AnimationClip, AnimationFrame};

/// Playback position within a shared [`AnimationClip`].
///
/// The player owns no frames, only a frame index and the time already spent
/// on that frame. Advancing carries leftover time into the following frames,
/// so a large `dt` may skip several frames or whole loop cycles in one call.
#[derive(Clone, Debug)]
pub struct AnimationPlayer {
    clip: Arc<AnimationClip>,
    frame: usize,
    elapsed_ms: u64,
}

impl AnimationPlayer {
    /// Start playing `clip` from its first frame.
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        Self {
            clip,
            frame: 0,
            elapsed_ms: 0,
        }
    }

    /// The clip being played.
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    /// Index of the frame currently shown.
    pub fn current_frame_index(&self) -> usize {
        self.frame
    }

    /// The frame currently shown.
    pub fn current_frame(&self) -> &AnimationFrame {
        &self.clip.frames()[self.frame]
    }

    /// Time already spent on the current frame, in milliseconds.
    pub fn elapsed_in_frame_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Whether a non-looping clip has used up its last frame.
    ///
    /// A frozen player ignores further [`advance`](Self::advance) calls.
    pub fn is_frozen(&self) -> bool {
        !self.clip.is_looping()
            && self.frame == self.clip.last_index()
            && self.elapsed_ms >= self.current_frame().duration_ms()
    }

    /// Advance playback by `dt_ms` milliseconds.
    pub fn advance(&mut self, dt_ms: u64) {
        if self.is_frozen() {
            return;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
        loop {
            let duration = self.current_frame().duration_ms();
            if self.elapsed_ms < duration {
                return;
            }
            if self.frame < self.clip.last_index() {
                self.elapsed_ms -= duration;
                self.frame += 1;
                continue;
            }
            let Some(loop_back) = self.clip.loop_back_index() else {
                // Hold the last frame.
                self.elapsed_ms = duration;
                return;
            };
            self.elapsed_ms -= duration;
            self.frame = loop_back;
            // Every cycle from the loop-back frame takes the same time; drop whole ones.
            self.elapsed_ms %= self.clip.loop_duration_ms();
        }
    }

    /// Switch to `clip`, restarting at its first frame.
    ///
    /// This always resets, even when `clip` is the clip already playing;
    /// callers decide whether the clip actually changed.
    pub fn rebind(&mut self, clip: Arc<AnimationClip>) {
        self.clip = clip;
        self.frame = 0;
        self.elapsed_ms = 0;
    }

    /// Restart the current clip from its first frame.
    pub fn restart(&mut self) {
        self.frame = 0;
        self.elapsed_ms = 0;
    }

    /// Draw the current frame with its top-left corner at `(x, y)`.
    pub fn draw(&self, canvas: &mut dyn Canvas, x: i32, y: i32) {
        self.current_frame().draw(canvas, x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::ImageId;

    fn intro_then_loop() -> Arc<AnimationClip> {
        AnimationClip::builder()
            .frame(ImageId(0), 1000)
            .frame(ImageId(1), 250)
            .frame(ImageId(2), 250)
            .loop_back_to(1)
            .build()
            .unwrap()
    }

    #[test]
    fn loops_back_past_the_intro() {
        let mut p = AnimationPlayer::new(intro_then_loop());
        assert_eq!(p.current_frame_index(), 0);
        p.advance(1000);
        assert_eq!(p.current_frame_index(), 1);
        p.advance(250);
        assert_eq!(p.current_frame_index(), 2);
        p.advance(250);
        assert_eq!(p.current_frame_index(), 1);
        assert_eq!(p.elapsed_in_frame_ms(), 0);
    }

    #[test]
    fn leftover_time_carries_over() {
        let mut p = AnimationPlayer::new(intro_then_loop());
        p.advance(999);
        assert_eq!(p.current_frame_index(), 0);
        p.advance(200);
        assert_eq!(p.current_frame_index(), 1);
        assert_eq!(p.elapsed_in_frame_ms(), 199);
        p.advance(100);
        assert_eq!(p.current_frame_index(), 2);
        assert_eq!(p.elapsed_in_frame_ms(), 49);
    }

    #[test]
    fn long_steps_skip_whole_cycles() {
        let mut p = AnimationPlayer::new(intro_then_loop());
        // Intro (1000) + 2000 full cycles of 500 + 260 into the loop.
        p.advance(1000 + 2000 * 500 + 260);
        assert_eq!(p.current_frame_index(), 2);
        assert_eq!(p.elapsed_in_frame_ms(), 10);
    }

    #[test]
    fn single_frame_one_shot_freezes() {
        let clip = AnimationClip::builder()
            .frame(ImageId(5), 1000)
            .looping(false)
            .build()
            .unwrap();
        let mut p = AnimationPlayer::new(clip);
        assert!(!p.is_frozen());
        p.advance(5000);
        assert!(p.is_frozen());
        assert_eq!(p.current_frame_index(), 0);
        p.advance(u64::MAX);
        assert_eq!(p.current_frame_index(), 0);
        assert_eq!(p.current_frame().image(), ImageId(5));
    }

    #[test]
    fn one_shot_stops_on_last_frame() {
        let clip = AnimationClip::builder()
            .frame(ImageId(0), 100)
            .frame(ImageId(1), 100)
            .frame(ImageId(2), 100)
            .looping(false)
            .build()
            .unwrap();
        let mut p = AnimationPlayer::new(clip);
        p.advance(150);
        assert_eq!(p.current_frame_index(), 1);
        assert!(!p.is_frozen());
        p.advance(10_000);
        assert_eq!(p.current_frame_index(), 2);
        assert!(p.is_frozen());
    }

    #[test]
    fn rebind_resets_even_for_same_clip() {
        let clip = intro_then_loop();
        let mut p = AnimationPlayer::new(Arc::clone(&clip));
        p.advance(1100);
        assert_eq!(p.current_frame_index(), 1);
        p.rebind(Arc::clone(&clip));
        assert_eq!(p.current_frame_index(), 0);
        assert_eq!(p.elapsed_in_frame_ms(), 0);
        assert!(Arc::ptr_eq(p.clip(), &clip));
    }
}
