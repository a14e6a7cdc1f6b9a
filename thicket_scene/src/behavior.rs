// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node hooks and the contexts they run in.

use core::any::Any;

use kurbo::Rect;
use peniko::Color;
use thicket_animation::Canvas;
use thicket_collision::{Bounds, CollisionDirection};

use crate::types::{Body, NodeId, px};

/// Colour of the default debug outline.
pub const DEBUG_OUTLINE: Color = Color::from_rgb8(255, 0, 0);

/// Facts about a node's parent, fixed for the duration of one hook call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct ParentInfo {
    pub(crate) width: u32,
    pub(crate) height: u32,
    /// Drawing position of the parent itself.
    pub(crate) origin: (i32, i32),
}

impl ParentInfo {
    /// The info a node's children see.
    pub(crate) fn of(body: &Body, own_parent: Option<Self>) -> Self {
        let (bx, by) = body.rounded_position();
        let (ox, oy) = own_parent.map_or((0, 0), |p| p.origin);
        Self {
            width: body.width(),
            height: body.height(),
            origin: (ox.saturating_add(bx), oy.saturating_add(by)),
        }
    }
}

/// What a node is told about a sibling it collided with.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Contact {
    /// The sibling.
    pub other: NodeId,
    /// The sibling's body at the time of the collision pass.
    ///
    /// Its snapshot state is what the collision was detected against.
    pub other_body: Body,
    /// Side of this node the sibling arrived from.
    pub direction: CollisionDirection,
}

/// Context for update-phase hooks.
///
/// Gives mutable access to the node's own [`Body`] and read-only facts about
/// its parent. Hooks cannot reach other nodes, so the tree structure never
/// changes during a traversal.
#[derive(Debug)]
pub struct UpdateCx<'a> {
    id: NodeId,
    body: &'a mut Body,
    parent: Option<ParentInfo>,
}

impl<'a> UpdateCx<'a> {
    pub(crate) fn new(id: NodeId, body: &'a mut Body, parent: Option<ParentInfo>) -> Self {
        Self { id, body, parent }
    }

    /// The node being updated.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node's body.
    pub fn body(&self) -> &Body {
        self.body
    }

    /// The node's body, mutably.
    pub fn body_mut(&mut self) -> &mut Body {
        self.body
    }

    /// Size of the parent, or `None` for a root.
    pub fn parent_size(&self) -> Option<(u32, u32)> {
        self.parent.map(|p| (p.width, p.height))
    }

    /// Absolute drawing position of this node.
    pub fn drawing_position(&self) -> (i32, i32) {
        drawing_position(self.body, self.parent)
    }

    /// Whether the node's snapshot rectangle overlaps its parent's extent.
    ///
    /// Roots are never visible on a parent.
    pub fn is_visible_on_parent(&self) -> bool {
        is_visible_on_parent(self.body, self.parent)
    }

    /// Keep the node inside its parent by reflecting off the edges.
    ///
    /// If the snapshot left or top edge is negative, or the right or bottom
    /// edge lies past the parent's extent, the position is clamped to that
    /// edge and the velocity on that axis becomes the negated snapshot
    /// velocity. Each axis is handled independently. Roots are left alone.
    pub fn reposition_and_reverse_velocities_if_veering_off_parent(&mut self) {
        let Some(parent) = self.parent else {
            return;
        };
        let body = &mut *self.body;
        let old = body.old_position();
        let old_velocity = body.old_velocity();
        let (pw, ph) = (f64::from(parent.width), f64::from(parent.height));
        let (w, h) = (f64::from(body.width()), f64::from(body.height()));

        if old.x < 0.0 {
            body.velocity.x = -old_velocity.x;
            body.position.x = 0.0;
        } else if old.x + w > pw {
            body.velocity.x = -old_velocity.x;
            body.position.x = pw - w;
        }

        if old.y < 0.0 {
            body.velocity.y = -old_velocity.y;
            body.position.y = 0.0;
        } else if old.y + h > ph {
            body.velocity.y = -old_velocity.y;
            body.position.y = ph - h;
        }
    }
}

/// Context for draw-phase hooks.
#[derive(Debug)]
pub struct DrawCx<'a> {
    id: NodeId,
    body: &'a Body,
    parent: Option<ParentInfo>,
}

impl<'a> DrawCx<'a> {
    pub(crate) fn new(id: NodeId, body: &'a Body, parent: Option<ParentInfo>) -> Self {
        Self { id, body, parent }
    }

    /// The node being drawn.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node's body.
    pub fn body(&self) -> &Body {
        self.body
    }

    /// Absolute drawing position of this node.
    pub fn drawing_position(&self) -> (i32, i32) {
        drawing_position(self.body, self.parent)
    }

    /// The node's rectangle in absolute drawing coordinates.
    pub fn drawing_rect(&self) -> Rect {
        let (x, y) = self.drawing_position();
        let (x, y) = (f64::from(x), f64::from(y));
        Rect::new(
            x,
            y,
            x + f64::from(self.body.width()),
            y + f64::from(self.body.height()),
        )
    }

    /// Whether the node's snapshot rectangle overlaps its parent's extent.
    pub fn is_visible_on_parent(&self) -> bool {
        is_visible_on_parent(self.body, self.parent)
    }
}

fn drawing_position(body: &Body, parent: Option<ParentInfo>) -> (i32, i32) {
    let (x, y) = body.rounded_position();
    let (ox, oy) = parent.map_or((0, 0), |p| p.origin);
    (ox.saturating_add(x), oy.saturating_add(y))
}

pub(crate) fn is_visible_on_parent(body: &Body, parent: Option<ParentInfo>) -> bool {
    parent.is_some_and(|p| {
        body.old_bounds()
            .overlaps(&Bounds::new(0, 0, px(p.width), px(p.height)))
    })
}

/// Outline the node's rectangle in [`DEBUG_OUTLINE`].
pub fn outline_bounds(cx: &DrawCx<'_>, canvas: &mut dyn Canvas) {
    canvas.stroke_rect(cx.drawing_rect(), DEBUG_OUTLINE);
}

/// Hooks that give a node its behaviour.
///
/// Every hook has a default, so an implementation only overrides what it
/// needs. The unit type `()` is the behaviour of a plain node that only moves
/// and holds children.
///
/// Update order for one node within [`Scene::update_all`](crate::Scene::update_all):
/// integrate the position, run [`update_before_children`](Self::update_before_children),
/// update every child, run [`update_after_children`](Self::update_after_children),
/// snapshot, then resolve collisions among the children. Collision hooks are
/// therefore called on the children during their parent's update.
pub trait Behavior: Any + Send {
    /// Called after the position was integrated and before any child is updated.
    fn update_before_children(&mut self, cx: &mut UpdateCx<'_>, dt_ms: u64) {
        let _ = (cx, dt_ms);
    }

    /// Called after every child was updated and before the snapshot.
    fn update_after_children(&mut self, cx: &mut UpdateCx<'_>, dt_ms: u64) {
        let _ = (cx, dt_ms);
    }

    /// Decide whether this node collides with a sibling candidate.
    ///
    /// The default compares the snapshot rectangles of both bodies.
    fn potential_collision(&self, me: &Body, other: &Body) -> Option<CollisionDirection> {
        me.collides_with(other)
    }

    /// React to a collision found by [`potential_collision`](Self::potential_collision).
    fn handle_collision(&mut self, cx: &mut UpdateCx<'_>, contact: &Contact) {
        let _ = (cx, contact);
    }

    /// Draw graphics that appear beneath the children.
    fn draw_under_children(&self, cx: &DrawCx<'_>, canvas: &mut dyn Canvas) {
        let _ = (cx, canvas);
    }

    /// Draw graphics that appear above the children.
    fn draw_over_children(&self, cx: &DrawCx<'_>, canvas: &mut dyn Canvas) {
        let _ = (cx, canvas);
    }

    /// Draw debug graphics; only called while the node's debug flag is set.
    ///
    /// Runs after [`draw_under_children`](Self::draw_under_children) and before
    /// the children. The default outlines the node's rectangle.
    fn debug_draw(&self, cx: &DrawCx<'_>, canvas: &mut dyn Canvas) {
        outline_bounds(cx, canvas);
    }

    /// Called after [`Scene::resize`](crate::Scene::resize) changed the body's size.
    fn on_resize(&mut self, cx: &mut UpdateCx<'_>, old_width: u32, old_height: u32) {
        let _ = (cx, old_width, old_height);
    }
}

impl Behavior for () {}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Vec2};

    fn parent(width: u32, height: u32) -> Option<ParentInfo> {
        Some(ParentInfo {
            width,
            height,
            origin: (100, 200),
        })
    }

    #[test]
    fn drawing_position_adds_parent_origin() {
        let mut body = Body::new(5, 5).with_position(Point::new(10.4, 20.6));
        let cx = UpdateCx::new(NodeId::new(0, 1), &mut body, parent(50, 50));
        assert_eq!(cx.drawing_position(), (110, 221));
    }

    #[test]
    fn root_is_never_visible_on_parent() {
        let mut body = Body::new(5, 5);
        let cx = UpdateCx::new(NodeId::new(0, 1), &mut body, None);
        assert!(!cx.is_visible_on_parent());
    }

    #[test]
    fn visibility_uses_parent_extent() {
        let mut inside = Body::new(10, 10).with_position(Point::new(45.0, 45.0));
        assert!(UpdateCx::new(NodeId::new(0, 1), &mut inside, parent(50, 50)).is_visible_on_parent());

        let mut touching = Body::new(10, 10).with_position(Point::new(50.0, 0.0));
        assert!(
            !UpdateCx::new(NodeId::new(0, 1), &mut touching, parent(50, 50)).is_visible_on_parent()
        );
    }

    #[test]
    fn reflects_off_right_and_top_edges() {
        let mut body = Body::new(10, 10)
            .with_position(Point::new(45.0, -3.0))
            .with_velocity(Vec2::new(0.2, -0.1));
        let mut cx = UpdateCx::new(NodeId::new(0, 1), &mut body, parent(50, 50));
        cx.reposition_and_reverse_velocities_if_veering_off_parent();

        assert_eq!(body.position, Point::new(40.0, 0.0));
        assert_eq!(body.velocity, Vec2::new(-0.2, 0.1));
    }

    #[test]
    fn inside_parent_is_untouched() {
        let start = Body::new(10, 10)
            .with_position(Point::new(20.0, 20.0))
            .with_velocity(Vec2::new(0.2, 0.2));
        let mut body = start;
        UpdateCx::new(NodeId::new(0, 1), &mut body, parent(50, 50))
            .reposition_and_reverse_velocities_if_veering_off_parent();
        assert_eq!(body, start);
    }

    #[test]
    fn root_is_not_repositioned() {
        let start = Body::new(10, 10).with_position(Point::new(-20.0, -20.0));
        let mut body = start;
        UpdateCx::new(NodeId::new(0, 1), &mut body, None)
            .reposition_and_reverse_velocities_if_veering_off_parent();
        assert_eq!(body, start);
    }

    #[test]
    fn child_info_accumulates_origin() {
        let body = Body::new(30, 40).with_position(Point::new(7.0, 8.0));
        let info = ParentInfo::of(&body, parent(1, 1));
        assert_eq!(info.origin, (107, 208));
        assert_eq!((info.width, info.height), (30, 40));
        assert_eq!(ParentInfo::of(&body, None).origin, (7, 8));
    }
}
