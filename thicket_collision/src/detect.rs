// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Narrow-phase rectangle collision classification.

use crate::direction::CollisionDirection;
use crate::types::Bounds;

/// Determine whether `a` and `b` collide and, if so, from which side of `a`.
///
/// Returns `None` if either rectangle is empty or if they do not strictly
/// overlap (rectangles sharing only an edge do not collide).
///
/// When they overlap, the overlap extent along each axis decides the
/// classification: if the shared x extent is strictly larger than the shared
/// y extent the collision is vertical ([`FromBottom`] when `a` is above `b`,
/// [`FromTop`] otherwise). All other cases, ties included, are horizontal
/// ([`FromRight`] when `a` is left of `b`, [`FromLeft`] otherwise).
///
/// [`FromBottom`]: CollisionDirection::FromBottom
/// [`FromTop`]: CollisionDirection::FromTop
/// [`FromRight`]: CollisionDirection::FromRight
/// [`FromLeft`]: CollisionDirection::FromLeft
pub fn detect_collision(a: Bounds, b: Bounds) -> Option<CollisionDirection> {
    if !a.overlaps(&b) {
        return None;
    }

    let shared_x = shared_extent(a.x, a.width, b.x, b.width);
    let shared_y = shared_extent(a.y, a.height, b.y, b.height);

    if shared_x > shared_y {
        Some(if a.y < b.y {
            CollisionDirection::FromBottom
        } else {
            CollisionDirection::FromTop
        })
    } else if a.x < b.x {
        Some(CollisionDirection::FromRight)
    } else {
        Some(CollisionDirection::FromLeft)
    }
}

/// Length of the overlap of two 1D spans `start..start + len`.
///
/// Never exceeds the shorter span and is `0` for disjoint spans.
#[inline]
pub fn shared_extent(start_a: i32, len_a: i32, start_b: i32, len_b: i32) -> i32 {
    let end = start_a
        .saturating_add(len_a)
        .min(start_b.saturating_add(len_b));
    let start = start_a.max(start_b);
    end.saturating_sub(start).max(0)
}
