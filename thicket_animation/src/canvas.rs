// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing surface and image resource abstractions.

use kurbo::{Line, Point, Rect};
use peniko::Color;

/// Opaque handle to an image owned by the rendering backend.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u32);

/// A drawing surface.
///
/// The scene issues draw calls against a `Canvas` but never owns it; the
/// embedding application decides what a call means (a window, an offscreen
/// buffer, or a recorded command list in tests).
///
/// Image coordinates are whole pixels. Shapes use `kurbo` geometry in the same
/// pixel space and are mostly used by debug overlays.
pub trait Canvas {
    /// Blit `image` with its top-left corner at `(x, y)`.
    fn draw_image(&mut self, image: ImageId, x: i32, y: i32);

    /// Fill `rect` with `color`.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Outline `rect` with `color`.
    fn stroke_rect(&mut self, rect: Rect, color: Color);

    /// Draw a line segment.
    fn stroke_line(&mut self, line: Line, color: Color);

    /// Draw `text` with its baseline origin at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, color: Color);
}

/// Something that can paint one animation frame of a declared size.
///
/// This is how procedurally drawn frames become images: an [`ImageFactory`]
/// allocates a `width` x `height` surface, hands it to [`paint`](FrameSource::paint),
/// and returns the resulting [`ImageId`].
pub trait FrameSource {
    /// Width of the frame in pixels.
    fn width(&self) -> u32;

    /// Height of the frame in pixels.
    fn height(&self) -> u32;

    /// How long the frame is shown, in milliseconds.
    fn duration_ms(&self) -> u64;

    /// Paint the frame with its top-left corner at the canvas origin.
    fn paint(&self, canvas: &mut dyn Canvas);
}

/// Creates images on behalf of animation clips.
pub trait ImageFactory {
    /// Rasterize `source` into a new image of its declared size.
    fn rasterize(&mut self, source: &dyn FrameSource) -> ImageId;
}
