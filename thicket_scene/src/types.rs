// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: node identifiers and kinematic state.

use kurbo::{Point, Vec2};
use rand::Rng;
use thicket_collision::{Bounds, CollisionDirection, detect_collision};

/// Identifier for a node in the scene (generational).
///
/// A handle stays valid until its node is despawned. After that the slot may
/// be reused, but with a higher generation, so the stale handle never aliases
/// the new node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Round half up to a whole pixel, saturating at the `i32` range.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Pixel coordinates are intentionally i32; `as` saturates out-of-range values."
)]
#[inline]
pub(crate) fn round_px(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

#[inline]
pub(crate) fn px(len: u32) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

/// Position, velocity, and size of a node.
///
/// Positions are relative to the parent's drawing position and velocities
/// are in pixels per millisecond.
///
/// The "old" position and velocity are a snapshot taken once per tick, after
/// the node and its children have been updated. Collision geometry only ever
/// reads the snapshot, so the outcome of a collision pass does not depend on
/// which sibling was handled first.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Body {
    /// Current top-left position.
    pub position: Point,
    /// Current velocity.
    pub velocity: Vec2,
    old_position: Point,
    old_velocity: Vec2,
    width: u32,
    height: u32,
}

impl Body {
    /// A motionless body of the given size at the parent's origin.
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point::ORIGIN,
            velocity: Vec2::ZERO,
            old_position: Point::ORIGIN,
            old_velocity: Vec2::ZERO,
            width,
            height,
        }
    }

    /// Place the body at `position`, as both current and snapshot state.
    pub const fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self.old_position = position;
        self
    }

    /// Give the body `velocity`, as both current and snapshot state.
    pub const fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self.old_velocity = velocity;
        self
    }

    /// Width in pixels.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Position as of the end of the last update.
    pub const fn old_position(&self) -> Point {
        self.old_position
    }

    /// Velocity as of the end of the last update.
    pub const fn old_velocity(&self) -> Vec2 {
        self.old_velocity
    }

    /// Current position rounded to whole pixels.
    pub fn rounded_position(&self) -> (i32, i32) {
        (round_px(self.position.x), round_px(self.position.y))
    }

    /// Snapshot position rounded to whole pixels.
    pub fn rounded_old_position(&self) -> (i32, i32) {
        (round_px(self.old_position.x), round_px(self.old_position.y))
    }

    /// Current bounds in the parent's coordinate space.
    pub fn bounds(&self) -> Bounds {
        let (x, y) = self.rounded_position();
        Bounds::new(x, y, px(self.width), px(self.height))
    }

    /// Snapshot bounds in the parent's coordinate space.
    pub fn old_bounds(&self) -> Bounds {
        let (x, y) = self.rounded_old_position();
        Bounds::new(x, y, px(self.width), px(self.height))
    }

    /// Classify a collision with a sibling using both snapshots.
    pub fn collides_with(&self, other: &Self) -> Option<CollisionDirection> {
        detect_collision(self.old_bounds(), other.old_bounds())
    }

    /// Assign a random velocity on each axis.
    ///
    /// Each component is drawn uniformly from `[-max, max]`. A draw closer to
    /// zero than `max * dead_zone` is doubled, which pushes slow draws away
    /// from a standstill.
    pub fn randomize_velocity(&mut self, rng: &mut impl Rng, range: VelocityRange) {
        self.velocity = Vec2::new(range.sample(rng), range.sample(rng));
    }

    pub(crate) fn integrate(&mut self, dt_ms: u64) {
        #[allow(
            clippy::cast_precision_loss,
            reason = "Tick lengths are far below 2^52 milliseconds."
        )]
        let dt = dt_ms as f64;
        self.position += self.velocity * dt;
    }

    pub(crate) fn snapshot(&mut self) {
        self.old_position = self.position;
        self.old_velocity = self.velocity;
    }

    pub(crate) fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

/// Parameters for [`Body::randomize_velocity`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VelocityRange {
    /// Largest speed on each axis.
    pub max: f64,
    /// Fraction of `max` around zero that draws are pushed out of.
    pub dead_zone: f64,
}

impl VelocityRange {
    /// Create a range.
    pub const fn new(max: f64, dead_zone: f64) -> Self {
        Self { max, dead_zone }
    }

    fn sample(&self, rng: &mut impl Rng) -> f64 {
        let v = self.max - rng.r#gen::<f64>() * (self.max * 2.0);
        let slow = self.max * self.dead_zone;
        if v > -slow && v < slow { v * 2.0 } else { v }
    }
}
