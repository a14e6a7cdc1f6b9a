// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Animation: timed frame clips and tag-driven clip selection.
//!
//! - [`AnimationClip`]: an immutable, shareable sequence of `(image, duration)` frames with
//!   optional looping back to any frame, which allows a one-shot intro before the loop.
//! - [`AnimationPlayer`]: a cursor over a clip, advanced by elapsed milliseconds.
//! - [`TagSet`]: the active boolean tags of a node, over any `bitflags` type, with a dirty latch.
//! - [`ClipSelector`]: an ordered rule list mapping tag combinations to clips; the first rule
//!   whose tags are all active wins.
//! - [`Canvas`]: the drawing surface abstraction shared with the scene crate.
//!
//! Images are opaque [`ImageId`] handles. Creating them (decoding files or rasterizing a
//! [`FrameSource`]) is the job of an external [`ImageFactory`].
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use thicket_animation::{AnimationClip, AnimationPlayer, ClipSelector, ImageId, TagSet};
//!
//! bitflags::bitflags! {
//!     #[derive(Clone, Copy, Debug, PartialEq, Eq)]
//!     struct Pose: u8 {
//!         const RUNNING = 1;
//!         const HURT = 2;
//!     }
//! }
//!
//! let idle = AnimationClip::builder().frame(ImageId(0), 500).build()?;
//! let run = AnimationClip::builder()
//!     .frame(ImageId(1), 100)
//!     .frame(ImageId(2), 100)
//!     .build()?;
//! let selector = ClipSelector::builder(Arc::clone(&idle))
//!     .rule(Pose::RUNNING, Arc::clone(&run))
//!     .build()?;
//!
//! let mut tags = TagSet::<Pose>::new();
//! let mut player = AnimationPlayer::new(Arc::clone(selector.select(&tags)));
//! assert!(Arc::ptr_eq(player.clip(), &idle));
//!
//! tags.set_active(Pose::RUNNING);
//! if tags.consume_dirty() {
//!     player.rebind(Arc::clone(selector.select(&tags)));
//! }
//! player.advance(150);
//! assert_eq!(player.current_frame_index(), 1);
//! # Ok::<(), thicket_animation::AnimationError>(())
//! ```

mod canvas;
mod clip;
mod error;
mod player;
mod selector;
mod tags;

pub use canvas::{Canvas, FrameSource, ImageFactory, ImageId};
pub use clip::{AnimationClip, AnimationFrame, ClipBuilder};
pub use error::AnimationError;
pub use player::AnimationPlayer;
pub use selector::{ClipSelector, SelectorBuilder};
pub use tags::TagSet;
