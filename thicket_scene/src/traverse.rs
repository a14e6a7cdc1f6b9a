// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Update and draw traversals.

use log::{trace, warn};
use thicket_animation::Canvas;

use crate::behavior::{Contact, DrawCx, ParentInfo, UpdateCx};
use crate::scene::Scene;
use crate::types::NodeId;

impl Scene {
    /// Advance the subtree rooted at `root` by `dt_ms` milliseconds.
    ///
    /// For each node, depth first:
    /// 1. integrate `position += velocity * dt`;
    /// 2. run [`Behavior::update_before_children`](crate::Behavior::update_before_children);
    /// 3. update each child in insertion order, telling the partitioner about
    ///    every child whose snapshot bounds changed;
    /// 4. run [`Behavior::update_after_children`](crate::Behavior::update_after_children);
    /// 5. snapshot the old position and velocity;
    /// 6. for each child, ask the partitioner for candidates and call
    ///    [`Behavior::handle_collision`](crate::Behavior::handle_collision) for
    ///    every candidate [`Behavior::potential_collision`](crate::Behavior::potential_collision)
    ///    reports.
    ///
    /// A stale `root` is logged and ignored.
    pub fn update_all(&mut self, root: NodeId, dt_ms: u64) {
        if !self.is_alive(root) {
            warn!("update_all called with stale {root:?}");
            return;
        }
        let parent = self.parent_info(root);
        self.update_node(root, parent, dt_ms);
    }

    /// Draw the subtree rooted at `root`.
    ///
    /// Each node draws its under-children graphics, then its debug overlay if
    /// enabled, then its children in reverse insertion order (so earlier
    /// children end up on top), then its over-children graphics.
    ///
    /// A stale `root` is logged and ignored.
    pub fn draw_all(&self, root: NodeId, canvas: &mut dyn Canvas) {
        if !self.is_alive(root) {
            warn!("draw_all called with stale {root:?}");
            return;
        }
        self.draw_node(root, self.parent_info(root), canvas);
    }

    fn update_node(&mut self, id: NodeId, parent: Option<ParentInfo>, dt_ms: u64) {
        let node = self.node_mut(id);
        node.body.integrate(dt_ms);
        node.behavior
            .update_before_children(&mut UpdateCx::new(id, &mut node.body, parent), dt_ms);

        let info = ParentInfo::of(&node.body, parent);
        // Hooks cannot change structure, so the child list is stable here.
        for i in 0..self.node(id).children.len() {
            let child = self.node(id).children[i];
            let before = self.node(child).body.old_bounds();
            self.update_node(child, Some(info), dt_ms);
            let after = self.node(child).body.old_bounds();
            if before != after {
                self.node_mut(id).partitioner.notify_moved(child, after);
            }
        }

        let node = self.node_mut(id);
        node.behavior
            .update_after_children(&mut UpdateCx::new(id, &mut node.body, parent), dt_ms);
        node.body.snapshot();

        let info = ParentInfo::of(&node.body, parent);
        self.handle_child_collisions(id, info);
    }

    fn handle_child_collisions(&mut self, id: NodeId, info: ParentInfo) {
        let mut candidates = Vec::new();
        for i in 0..self.node(id).children.len() {
            let child = self.node(id).children[i];
            let bounds = self.node(child).body.old_bounds();
            candidates.clear();
            self.node(id)
                .partitioner
                .for_each_candidate(child, bounds, &mut |k| candidates.push(k));

            for &other in &candidates {
                if other == child || !self.is_alive(other) {
                    continue;
                }
                let other_body = self.node(other).body;
                let node = self.node_mut(child);
                let Some(direction) = node.behavior.potential_collision(&node.body, &other_body)
                else {
                    continue;
                };
                trace!("{child:?} hit by {other:?} {direction:?}");
                let contact = Contact {
                    other,
                    other_body,
                    direction,
                };
                node.behavior
                    .handle_collision(&mut UpdateCx::new(child, &mut node.body, Some(info)), &contact);
            }
        }
    }

    fn draw_node(&self, id: NodeId, parent: Option<ParentInfo>, canvas: &mut dyn Canvas) {
        let node = self.node(id);
        let cx = DrawCx::new(id, &node.body, parent);
        node.behavior.draw_under_children(&cx, canvas);
        if node.debug_draw {
            node.behavior.debug_draw(&cx, canvas);
        }

        let info = ParentInfo::of(&node.body, parent);
        for &child in node.children.iter().rev() {
            self.draw_node(child, Some(info), canvas);
        }

        node.behavior.draw_over_children(&cx, canvas);
    }
}
