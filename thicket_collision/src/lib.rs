// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Collision: rectangle collision classification and broad-phase partitioning.
//!
//! Thicket Collision is the geometry layer underneath the Thicket scene graph.
//!
//! - [`detect_collision`] decides whether two integer rectangles overlap and, if they do,
//!   from which side of the first rectangle the second one arrived.
//! - [`Partitioner`] abstracts broad-phase candidate lookup so a scene can swap its spatial
//!   strategy without touching collision handlers.
//!
//! It does not depend on any geometry crate. Higher layers (like a scene tree) compute
//! rounded rectangles from their own coordinates and feed them here.
//!
//! ## Features
//!
//! - `grid` *(default)*: enables [`backends::GridPartitioner`], a uniform grid backed by
//!   `hashbrown` and `smallvec`. Disable this feature to avoid both dependencies.
//!
//! # Example
//!
//! ```rust
//! use thicket_collision::{Bounds, CollisionDirection, detect_collision};
//!
//! // Corner overlap with equal shared extents on both axes resolves horizontally.
//! let a = Bounds::new(0, 0, 10, 10);
//! let b = Bounds::new(5, 5, 10, 10);
//! assert_eq!(detect_collision(a, b), Some(CollisionDirection::FromRight));
//!
//! // Touching edges are not a collision.
//! let c = Bounds::new(10, 0, 10, 10);
//! assert_eq!(detect_collision(a, c), None);
//! ```
//!
//! Partitioners are keyed by any small copyable handle:
//!
//! ```rust
//! use thicket_collision::{Bounds, Partitioner, backends::SimplePartitioner};
//!
//! let mut part = SimplePartitioner::<u32>::new();
//! part.add(1, Bounds::new(0, 0, 10, 10));
//! part.add(2, Bounds::new(100, 100, 10, 10));
//!
//! // The simple partitioner reports every member, including the queried key itself.
//! let candidates = part.candidates(1, Bounds::new(0, 0, 10, 10));
//! assert_eq!(candidates, [1, 2]);
//! ```
//!
//! ## Choosing a partitioner
//!
//! - `NullPartitioner`: never reports candidates. Used by nodes whose children should not
//!   auto-collide.
//! - `SimplePartitioner`: one flat set, every member is a candidate for every query. Correct
//!   and tiny, but O(n) per query.
//! - `GridPartitioner` *(feature `grid`)*: uniform grid with configurable cell size. A good fit
//!   when children are spread across the parent and much smaller than it.

#![no_std]

extern crate alloc;

pub mod backends;
mod detect;
mod direction;
mod partitioner;
mod types;

pub use detect::{detect_collision, shared_extent};
pub use direction::{Axis, CollisionDirection};
pub use partitioner::Partitioner;
pub use types::Bounds;
