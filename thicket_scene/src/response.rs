// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collision response helpers for [`Behavior::handle_collision`](crate::Behavior::handle_collision).
//!
//! These are arcade heuristics, not physics. Each function only touches the
//! body it is given; the other node resolves its own side of the collision
//! when its handler runs with the opposite direction.

use thicket_collision::{Axis, CollisionDirection};

use crate::types::Body;

/// Place `body` flush against the side of `other`'s snapshot indicated by `direction`.
///
/// For example, [`CollisionDirection::FromRight`] moves `body` so its right
/// edge lies on `other`'s old left edge. Only the axis of `direction` changes.
pub fn move_off_collision(body: &mut Body, other: &Body, direction: CollisionDirection) {
    let theirs = other.old_position();
    match direction {
        CollisionDirection::FromRight => {
            body.position.x = theirs.x - f64::from(body.width());
        }
        CollisionDirection::FromLeft => {
            body.position.x = theirs.x + f64::from(other.width());
        }
        CollisionDirection::FromBottom => {
            body.position.y = theirs.y - f64::from(body.height());
        }
        CollisionDirection::FromTop => {
            body.position.y = theirs.y + f64::from(other.height());
        }
    }
}

/// Reverse `body`'s velocity on the collision axis when it ran into `other`.
///
/// The current velocity component is negated if `body` was chasing `other`
/// (both moving the same way with `other` ahead) or if the two were not
/// moving the same way on that axis. Otherwise nothing changes. At most one
/// axis is touched.
pub fn change_velocities_simple(body: &mut Body, other: &Body, direction: CollisionDirection) {
    let axis = direction.axis();
    if chased(body, other, direction) || opposed(body, other, axis) {
        match axis {
            Axis::Horizontal => body.velocity.x = -body.velocity.x,
            Axis::Vertical => body.velocity.y = -body.velocity.y,
        }
    }
}

/// Resolve `body`'s velocity on the collision axis, passing momentum along.
///
/// Using only the snapshot velocities of both bodies:
/// - if `body` was the chaser, it bounces back at half its old speed;
/// - if `body` was being chased, it gains half of `other`'s old velocity;
/// - otherwise, if the two were not moving the same way, it reverses.
///
/// Because only snapshots are read, the result does not depend on which of
/// the two nodes handles the collision first.
pub fn change_velocities_with_momentum_transfer(
    body: &mut Body,
    other: &Body,
    direction: CollisionDirection,
) {
    let axis = direction.axis();
    let mine = component(body, axis);
    let theirs = component(other, axis);
    let next = if chased(body, other, direction) {
        -(mine / 2.0)
    } else if chased(other, body, direction.opposite()) {
        mine + theirs / 2.0
    } else if opposed(body, other, axis) {
        -mine
    } else {
        return;
    };
    match axis {
        Axis::Horizontal => body.velocity.x = next,
        Axis::Vertical => body.velocity.y = next,
    }
}

fn component(body: &Body, axis: Axis) -> f64 {
    match axis {
        Axis::Horizontal => body.old_velocity().x,
        Axis::Vertical => body.old_velocity().y,
    }
}

/// Whether `chaser` ran into `target` from behind, both moving the same way.
fn chased(chaser: &Body, target: &Body, direction: CollisionDirection) -> bool {
    let a = component(chaser, direction.axis());
    let b = component(target, direction.axis());
    match direction {
        CollisionDirection::FromRight | CollisionDirection::FromBottom => a > 0.0 && b > 0.0,
        CollisionDirection::FromLeft | CollisionDirection::FromTop => a < 0.0 && b < 0.0,
    }
}

/// Whether the two snapshot velocities do not point the same way on `axis`.
fn opposed(a: &Body, b: &Body, axis: Axis) -> bool {
    let (va, vb) = (component(a, axis), component(b, axis));
    (va >= 0.0 && vb <= 0.0) || (va <= 0.0 && vb >= 0.0)
}
