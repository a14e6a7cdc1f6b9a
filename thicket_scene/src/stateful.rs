// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nodes whose animation follows a set of active tags.

use std::sync::Arc;

use bitflags::Flags;
use log::trace;
use thicket_animation::{AnimationPlayer, Canvas, ClipSelector, TagSet};
use thicket_collision::CollisionDirection;

use crate::behavior::{Behavior, Contact, DrawCx, UpdateCx, outline_bounds};
use crate::types::{Body, NodeId};

/// Hooks for the logic inside a [`Stateful`] node.
///
/// These mirror [`Behavior`], with access to the node's tags. Changing tags
/// during a tick (typically from [`handle_collision`](Self::handle_collision))
/// takes effect on the animation at the start of the next tick.
pub trait StatefulBehavior<F>: Send + 'static {
    /// Called after the clip was refreshed and advanced.
    fn update_before_children(&mut self, cx: &mut UpdateCx<'_>, tags: &mut TagSet<F>, dt_ms: u64) {
        let _ = (cx, tags, dt_ms);
    }

    /// Called after every child was updated and before the snapshot.
    fn update_after_children(&mut self, cx: &mut UpdateCx<'_>, tags: &mut TagSet<F>, dt_ms: u64) {
        let _ = (cx, tags, dt_ms);
    }

    /// Decide whether this node collides with a sibling candidate.
    fn potential_collision(&self, me: &Body, other: &Body) -> Option<CollisionDirection> {
        me.collides_with(other)
    }

    /// React to a collision.
    fn handle_collision(&mut self, cx: &mut UpdateCx<'_>, tags: &mut TagSet<F>, contact: &Contact) {
        let _ = (cx, tags, contact);
    }

    /// Draw beneath the current animation frame and the children.
    fn draw_under_children(&self, cx: &DrawCx<'_>, tags: &TagSet<F>, canvas: &mut dyn Canvas) {
        let _ = (cx, tags, canvas);
    }

    /// Draw above the children.
    fn draw_over_children(&self, cx: &DrawCx<'_>, tags: &TagSet<F>, canvas: &mut dyn Canvas) {
        let _ = (cx, tags, canvas);
    }

    /// Draw debug graphics. The default outlines the node's rectangle.
    fn debug_draw(&self, cx: &DrawCx<'_>, tags: &TagSet<F>, canvas: &mut dyn Canvas) {
        let _ = tags;
        outline_bounds(cx, canvas);
    }

    /// Called after the node was resized.
    fn on_resize(&mut self, cx: &mut UpdateCx<'_>, tags: &mut TagSet<F>, old_width: u32, old_height: u32) {
        let _ = (cx, tags, old_width, old_height);
    }
}

/// A stateful node with no logic of its own; it only plays its clips.
impl<F: 'static> StatefulBehavior<F> for () {}

/// A node that plays the clip its [`ClipSelector`] picks for its active tags.
///
/// At the start of every update, if the tags changed since the last check the
/// selector runs again, and a different clip (by identity) restarts the
/// player on that clip. The player then advances by the tick length whether
/// or not the clip changed. The current frame is drawn at the node's drawing
/// position, after the inner behaviour's under-children graphics.
///
/// ```rust
/// use std::sync::Arc;
/// use thicket_animation::{AnimationClip, ClipSelector, ImageId};
/// use thicket_scene::{Body, Scene, Stateful};
///
/// bitflags::bitflags! {
///     #[derive(Clone, Copy, Debug, PartialEq, Eq)]
///     struct Shape: u8 {
///         const CIRCLE = 1;
///     }
/// }
///
/// let square = AnimationClip::builder().frame(ImageId(0), 100).build()?;
/// let circle = AnimationClip::builder().frame(ImageId(1), 100).build()?;
/// let selector = Arc::new(
///     ClipSelector::builder(square)
///         .rule(Shape::CIRCLE, Arc::clone(&circle))
///         .build()?,
/// );
///
/// let mut scene = Scene::new();
/// let node = scene.insert(Body::new(32, 32), Stateful::new(selector, ()));
/// scene
///     .behavior_mut::<Stateful<Shape>>(node)
///     .unwrap()
///     .tags_mut()
///     .set_active(Shape::CIRCLE);
/// scene.update_all(node, 16);
///
/// let stateful = scene.behavior::<Stateful<Shape>>(node).unwrap();
/// assert!(Arc::ptr_eq(stateful.player().clip(), &circle));
/// # Ok::<(), thicket_animation::AnimationError>(())
/// ```
pub struct Stateful<F, B = ()> {
    tags: TagSet<F>,
    selector: Arc<ClipSelector<F>>,
    player: AnimationPlayer,
    inner: B,
}

impl<F: core::fmt::Debug, B: core::fmt::Debug> core::fmt::Debug for Stateful<F, B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Stateful")
            .field("tags", &self.tags)
            .field("frame", &self.player.current_frame_index())
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl<F: Flags + Copy, B> Stateful<F, B> {
    /// Create a node playing the clip `selector` picks for no active tags.
    pub fn new(selector: Arc<ClipSelector<F>>, inner: B) -> Self {
        let tags = TagSet::new();
        let player = AnimationPlayer::new(Arc::clone(selector.select(&tags)));
        Self {
            tags,
            selector,
            player,
            inner,
        }
    }

    /// The active tags.
    pub fn tags(&self) -> &TagSet<F> {
        &self.tags
    }

    /// The active tags, mutably. Changes apply to the animation on the next update.
    pub fn tags_mut(&mut self) -> &mut TagSet<F> {
        &mut self.tags
    }

    /// The animation player.
    pub fn player(&self) -> &AnimationPlayer {
        &self.player
    }

    /// The clip selector.
    pub fn selector(&self) -> &Arc<ClipSelector<F>> {
        &self.selector
    }

    /// The inner behaviour.
    pub fn inner(&self) -> &B {
        &self.inner
    }

    /// The inner behaviour, mutably.
    pub fn inner_mut(&mut self) -> &mut B {
        &mut self.inner
    }

    fn refresh_clip(&mut self, id: NodeId) {
        if !self.tags.consume_dirty() {
            return;
        }
        let next = self.selector.select(&self.tags);
        if !Arc::ptr_eq(next, self.player.clip()) {
            trace!("{id:?} switched clips after a tag change");
            self.player.rebind(Arc::clone(next));
        }
    }
}

impl<F, B> Behavior for Stateful<F, B>
where
    F: Flags + Copy + Send + Sync + 'static,
    B: StatefulBehavior<F>,
{
    fn update_before_children(&mut self, cx: &mut UpdateCx<'_>, dt_ms: u64) {
        self.refresh_clip(cx.id());
        self.player.advance(dt_ms);
        self.inner.update_before_children(cx, &mut self.tags, dt_ms);
    }

    fn update_after_children(&mut self, cx: &mut UpdateCx<'_>, dt_ms: u64) {
        self.inner.update_after_children(cx, &mut self.tags, dt_ms);
    }

    fn potential_collision(&self, me: &Body, other: &Body) -> Option<CollisionDirection> {
        self.inner.potential_collision(me, other)
    }

    fn handle_collision(&mut self, cx: &mut UpdateCx<'_>, contact: &Contact) {
        self.inner.handle_collision(cx, &mut self.tags, contact);
    }

    fn draw_under_children(&self, cx: &DrawCx<'_>, canvas: &mut dyn Canvas) {
        self.inner.draw_under_children(cx, &self.tags, canvas);
        let (x, y) = cx.drawing_position();
        self.player.draw(canvas, x, y);
    }

    fn draw_over_children(&self, cx: &DrawCx<'_>, canvas: &mut dyn Canvas) {
        self.inner.draw_over_children(cx, &self.tags, canvas);
    }

    fn debug_draw(&self, cx: &DrawCx<'_>, canvas: &mut dyn Canvas) {
        self.inner.debug_draw(cx, &self.tags, canvas);
    }

    fn on_resize(&mut self, cx: &mut UpdateCx<'_>, old_width: u32, old_height: u32) {
        self.inner.on_resize(cx, &mut self.tags, old_width, old_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thicket_animation::{AnimationClip, ImageId};

    bitflags::bitflags! {
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub(crate) struct Pose: u8 {
            const WALK = 1 << 0;
            const HURT = 1 << 1;
        }
    }

    fn clip(id: u32, ms: u64) -> Arc<AnimationClip> {
        AnimationClip::builder()
            .frame(ImageId(id), ms)
            .frame(ImageId(id + 100), ms)
            .build()
            .unwrap()
    }

    fn stateful() -> (Stateful<Pose>, Arc<AnimationClip>, Arc<AnimationClip>) {
        let (idle, walk) = (clip(0, 100), clip(1, 100));
        let selector = ClipSelector::builder(Arc::clone(&idle))
            .rule(Pose::WALK, Arc::clone(&walk))
            .build()
            .unwrap();
        (Stateful::new(Arc::new(selector), ()), idle, walk)
    }

    fn tick(node: &mut Stateful<Pose>, dt_ms: u64) {
        let mut body = Body::new(1, 1);
        let mut cx = UpdateCx::new(NodeId::new(0, 1), &mut body, None);
        node.update_before_children(&mut cx, dt_ms);
    }

    #[test]
    fn starts_on_default_clip() {
        let (node, idle, _) = stateful();
        assert!(Arc::ptr_eq(node.player().clip(), &idle));
    }

    #[test]
    fn switches_clip_and_advances_same_tick() {
        let (mut node, _, walk) = stateful();
        node.tags_mut().set_active(Pose::WALK);
        tick(&mut node, 150);
        assert!(Arc::ptr_eq(node.player().clip(), &walk));
        assert_eq!(node.player().current_frame_index(), 1);
    }

    #[test]
    fn unrelated_tag_change_does_not_restart() {
        let (mut node, idle, _) = stateful();
        tick(&mut node, 150);
        assert_eq!(node.player().current_frame_index(), 1);

        // HURT has no rule, so the default stays selected and keeps playing.
        node.tags_mut().set_active(Pose::HURT);
        tick(&mut node, 10);
        assert!(Arc::ptr_eq(node.player().clip(), &idle));
        assert_eq!(node.player().current_frame_index(), 1);
        assert_eq!(node.player().elapsed_in_frame_ms(), 60);
    }

    #[test]
    fn tags_are_consumed_once() {
        let (mut node, _, _) = stateful();
        node.tags_mut().set_active(Pose::WALK);
        tick(&mut node, 0);
        assert!(!node.tags().is_dirty());
    }
}
