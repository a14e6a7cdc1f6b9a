// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable animation clips and their builder.

use std::sync::Arc;

use crate::canvas::{Canvas, FrameSource, ImageFactory, ImageId};
use crate::error::AnimationError;

/// One image shown for a fixed number of milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AnimationFrame {
    image: ImageId,
    duration_ms: u64,
}

impl AnimationFrame {
    /// Create a frame. Durations are validated when the frame joins a clip.
    pub const fn new(image: ImageId, duration_ms: u64) -> Self {
        Self { image, duration_ms }
    }

    /// The image shown by this frame.
    pub const fn image(&self) -> ImageId {
        self.image
    }

    /// How long this frame is shown, in milliseconds.
    pub const fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Draw the frame's image with its top-left corner at `(x, y)`.
    pub fn draw(&self, canvas: &mut dyn Canvas, x: i32, y: i32) {
        canvas.draw_image(self.image, x, y);
    }
}

/// An immutable sequence of frames.
///
/// Clips are shared between any number of players through `Arc`, and a node
/// decides whether a clip changed by pointer identity (`Arc::ptr_eq`), not by
/// comparing frames.
///
/// A looping clip restarts at its loop-back frame after the last frame, which
/// lets frames `0..loop_back` act as an intro that only plays once. A
/// non-looping clip stays on its last frame once that frame's time is used up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationClip {
    frames: Vec<AnimationFrame>,
    looping: bool,
    loop_back: usize,
}

impl AnimationClip {
    /// Start building a clip. Clips loop back to the first frame by default.
    pub fn builder() -> ClipBuilder {
        ClipBuilder::new()
    }

    /// Create a clip from frames.
    ///
    /// `loop_back` is only checked when `looping` is set; non-looping clips
    /// ignore it.
    pub fn new(
        frames: Vec<AnimationFrame>,
        looping: bool,
        loop_back: usize,
    ) -> Result<Self, AnimationError> {
        if frames.is_empty() {
            return Err(AnimationError::NoFrames);
        }
        if let Some(index) = frames.iter().position(|f| f.duration_ms == 0) {
            return Err(AnimationError::ZeroDuration { index });
        }
        if frames
            .iter()
            .try_fold(0_u64, |total, f| total.checked_add(f.duration_ms))
            .is_none()
        {
            return Err(AnimationError::DurationOverflow);
        }
        if looping && loop_back >= frames.len() {
            return Err(AnimationError::LoopBackOutOfRange {
                index: loop_back,
                frame_count: frames.len(),
            });
        }
        Ok(Self {
            frames,
            looping,
            loop_back: if looping { loop_back } else { 0 },
        })
    }

    /// All frames in play order.
    pub fn frames(&self) -> &[AnimationFrame] {
        &self.frames
    }

    /// Number of frames; always at least one.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// The frame at `index`, if any.
    pub fn frame(&self, index: usize) -> Option<&AnimationFrame> {
        self.frames.get(index)
    }

    /// Index of the last frame.
    pub fn last_index(&self) -> usize {
        self.frames.len() - 1
    }

    /// Whether the clip restarts after its last frame.
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// The frame a looping clip restarts at, or `None` for non-looping clips.
    pub fn loop_back_index(&self) -> Option<usize> {
        self.looping.then_some(self.loop_back)
    }

    /// Total duration of one pass over every frame.
    ///
    /// Construction rejects clips whose durations overflow, so this cannot.
    pub fn total_duration_ms(&self) -> u64 {
        self.frames.iter().map(|f| f.duration_ms).sum()
    }

    /// Duration of the repeating part, from the loop-back frame to the end.
    ///
    /// For a non-looping clip this is the same as [`total_duration_ms`](Self::total_duration_ms).
    pub fn loop_duration_ms(&self) -> u64 {
        self.frames[self.loop_back..]
            .iter()
            .map(|f| f.duration_ms)
            .sum()
    }
}

/// Builder for [`AnimationClip`].
#[derive(Clone, Debug)]
pub struct ClipBuilder {
    frames: Vec<AnimationFrame>,
    looping: bool,
    loop_back: usize,
}

impl Default for ClipBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipBuilder {
    /// A looping, empty clip that loops back to frame 0.
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            looping: true,
            loop_back: 0,
        }
    }

    /// Append a frame.
    pub fn frame(mut self, image: ImageId, duration_ms: u64) -> Self {
        self.frames.push(AnimationFrame::new(image, duration_ms));
        self
    }

    /// Append several frames.
    pub fn frames(mut self, frames: impl IntoIterator<Item = AnimationFrame>) -> Self {
        self.frames.extend(frames);
        self
    }

    /// Rasterize each source through `factory` and append the resulting frames.
    pub fn rasterize(mut self, factory: &mut dyn ImageFactory, sources: &[&dyn FrameSource]) -> Self {
        for source in sources {
            let image = factory.rasterize(*source);
            self.frames
                .push(AnimationFrame::new(image, source.duration_ms()));
        }
        self
    }

    /// Whether the clip restarts after its last frame.
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Make the clip loop, restarting at `index` after the last frame.
    pub fn loop_back_to(mut self, index: usize) -> Self {
        self.looping = true;
        self.loop_back = index;
        self
    }

    /// Validate and build a shareable clip.
    pub fn build(self) -> Result<Arc<AnimationClip>, AnimationError> {
        AnimationClip::new(self.frames, self.looping, self.loop_back).map(Arc::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Line, Point, Rect};
    use peniko::Color;

    #[test]
    fn empty_clip_is_rejected() {
        assert_eq!(
            AnimationClip::builder().build().unwrap_err(),
            AnimationError::NoFrames
        );
    }

    #[test]
    fn zero_duration_is_rejected() {
        let err = AnimationClip::builder()
            .frame(ImageId(0), 10)
            .frame(ImageId(1), 0)
            .build()
            .unwrap_err();
        assert_eq!(err, AnimationError::ZeroDuration { index: 1 });
    }

    #[test]
    fn loop_back_must_name_a_frame() {
        let err = AnimationClip::builder()
            .frame(ImageId(0), 10)
            .frame(ImageId(1), 10)
            .loop_back_to(2)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            AnimationError::LoopBackOutOfRange {
                index: 2,
                frame_count: 2
            }
        );
    }

    #[test]
    fn overflowing_durations_are_rejected() {
        let err = AnimationClip::builder()
            .frame(ImageId(0), u64::MAX)
            .frame(ImageId(1), 1)
            .build()
            .unwrap_err();
        assert_eq!(err, AnimationError::DurationOverflow);

        let clip = AnimationClip::builder()
            .frame(ImageId(0), u64::MAX - 1)
            .frame(ImageId(1), 1)
            .build()
            .unwrap();
        assert_eq!(clip.total_duration_ms(), u64::MAX);
    }

    #[test]
    fn non_looping_ignores_loop_back() {
        let clip = AnimationClip::new(vec![AnimationFrame::new(ImageId(3), 40)], false, 7).unwrap();
        assert_eq!(clip.loop_back_index(), None);
        assert_eq!(clip.loop_duration_ms(), 40);
    }

    #[test]
    fn durations() {
        let clip = AnimationClip::builder()
            .frame(ImageId(0), 1000)
            .frame(ImageId(1), 250)
            .frame(ImageId(2), 250)
            .loop_back_to(1)
            .build()
            .unwrap();
        assert_eq!(clip.total_duration_ms(), 1500);
        assert_eq!(clip.loop_duration_ms(), 500);
        assert_eq!(clip.loop_back_index(), Some(1));
        assert_eq!(clip.last_index(), 2);
    }

    struct Dot {
        size: u32,
        duration_ms: u64,
    }

    impl FrameSource for Dot {
        fn width(&self) -> u32 {
            self.size
        }
        fn height(&self) -> u32 {
            self.size
        }
        fn duration_ms(&self) -> u64 {
            self.duration_ms
        }
        fn paint(&self, canvas: &mut dyn Canvas) {
            let s = f64::from(self.size);
            canvas.fill_rect(Rect::new(0.0, 0.0, s, s), Color::WHITE);
        }
    }

    #[derive(Default)]
    struct CountingFactory {
        painted: Vec<(u32, u32, usize)>,
    }

    struct Tally(usize);

    impl Canvas for Tally {
        fn draw_image(&mut self, _: ImageId, _: i32, _: i32) {
            self.0 += 1;
        }
        fn fill_rect(&mut self, _: Rect, _: Color) {
            self.0 += 1;
        }
        fn stroke_rect(&mut self, _: Rect, _: Color) {
            self.0 += 1;
        }
        fn stroke_line(&mut self, _: Line, _: Color) {
            self.0 += 1;
        }
        fn draw_text(&mut self, _: &str, _: Point, _: Color) {
            self.0 += 1;
        }
    }

    impl ImageFactory for CountingFactory {
        fn rasterize(&mut self, source: &dyn FrameSource) -> ImageId {
            let mut tally = Tally(0);
            source.paint(&mut tally);
            self.painted.push((source.width(), source.height(), tally.0));
            ImageId(u32::try_from(self.painted.len()).unwrap() + 99)
        }
    }

    #[test]
    fn rasterized_frames_keep_their_durations() {
        let mut factory = CountingFactory::default();
        let small = Dot {
            size: 4,
            duration_ms: 30,
        };
        let big = Dot {
            size: 9,
            duration_ms: 70,
        };
        let clip = AnimationClip::builder()
            .rasterize(&mut factory, &[&small, &big])
            .build()
            .unwrap();

        assert_eq!(factory.painted, [(4, 4, 1), (9, 9, 1)]);
        assert_eq!(
            clip.frames(),
            [
                AnimationFrame::new(ImageId(100), 30),
                AnimationFrame::new(ImageId(101), 70)
            ]
        );
    }
}
