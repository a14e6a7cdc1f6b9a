// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core scene implementation: structure, kinematic access, queries.

use core::any::Any;

use kurbo::{Point, Vec2};
use log::debug;
use thicket_collision::Partitioner;
use thicket_collision::backends::NullPartitioner;

use crate::behavior::{self, Behavior, ParentInfo, UpdateCx};
use crate::error::SceneError;
use crate::types::{Body, NodeId};

/// The broad phase a node uses for its children.
pub type BoxedPartitioner = Box<dyn Partitioner<NodeId> + Send>;

/// Arena of scene nodes.
///
/// Every node has at most one parent and an ordered list of children. A node
/// without a parent is a root; any number of roots may exist, and
/// [`update_all`](Scene::update_all) and [`draw_all`](Scene::draw_all) can be
/// started from any node.
///
/// The scene itself is single-writer: updating takes `&mut Scene` and drawing
/// takes `&Scene`. Use [`SharedScene`](crate::SharedScene) to drive a scene
/// from an update thread while another thread draws it.
///
/// ## Example
///
/// ```rust
/// use kurbo::Point;
/// use thicket_scene::{Body, Scene};
///
/// let mut scene = Scene::new();
/// let root = scene.insert(Body::new(200, 200).with_position(Point::new(10.0, 15.0)), ());
/// let child = scene.insert(Body::new(20, 20).with_position(Point::new(50.0, 60.0)), ());
/// scene.add_child(root, child)?;
///
/// assert_eq!(scene.parent_of(child), Some(root));
/// assert_eq!(scene.drawing_position(child), Some((60, 75)));
/// # Ok::<(), thicket_scene::SceneError>(())
/// ```
pub struct Scene {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

pub(crate) struct Node {
    generation: u32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) body: Body,
    pub(crate) debug_draw: bool,
    pub(crate) partitioner: BoxedPartitioner,
    pub(crate) behavior: Box<dyn Behavior>,
}

impl Node {
    fn new(generation: u32, body: Body, behavior: Box<dyn Behavior>) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            body,
            debug_draw: false,
            partitioner: Box::new(NullPartitioner),
            behavior,
        }
    }
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.len();
        let roots = self
            .nodes
            .iter()
            .flatten()
            .filter(|n| n.parent.is_none())
            .count();
        f.debug_struct("Scene")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("roots", &roots)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a detached node with the given body and behaviour.
    ///
    /// The node starts as a root with a [`NullPartitioner`], so its children
    /// do not collide until [`set_partitioner`](Self::set_partitioner) is called.
    pub fn insert(&mut self, body: Body, behavior: impl Behavior) -> NodeId {
        self.insert_boxed(body, Box::new(behavior))
    }

    /// Insert a detached node with an already boxed behaviour.
    pub fn insert_boxed(&mut self, body: Body, behavior: Box<dyn Behavior>) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, body, behavior));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, body, behavior)));
            self.generations.push(generation);
            (self.nodes.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        NodeId::new(idx as u32, generation)
    }

    /// Remove a node and its whole subtree from the scene.
    ///
    /// The node is first detached from its parent and the parent's
    /// partitioner. Every handle into the subtree becomes stale. Stale ids are
    /// ignored.
    pub fn despawn(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let mut stack = vec![id];
        let mut freed = 0_usize;
        while let Some(n) = stack.pop() {
            if let Some(node) = self.nodes[n.idx()].take() {
                stack.extend(node.children);
                self.free_list.push(n.idx());
                freed += 1;
            }
        }
        debug!("despawned {id:?} and {} descendants", freed - 1);
    }

    /// Append `child` to the children of `parent`.
    ///
    /// The child inherits the parent's debug-draw flag (through its whole
    /// subtree) and is registered with the parent's partitioner. A child that
    /// currently belongs to another parent is moved.
    ///
    /// # Errors
    ///
    /// - [`SceneError::StaleNode`] if either handle is stale.
    /// - [`SceneError::DuplicateChild`] if `child` is already a child of `parent`.
    /// - [`SceneError::WouldCycle`] if `child` is `parent` or one of its ancestors.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.check_alive(parent)?;
        self.check_alive(child)?;
        if self.node(parent).children.contains(&child) {
            return Err(SceneError::DuplicateChild { parent, child });
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(SceneError::WouldCycle { parent, child });
        }
        if let Some(previous) = self.node(child).parent {
            debug!("moving {child:?} from {previous:?} to {parent:?}");
            self.unlink_parent(child, previous);
        }

        let debug_draw = self.node(parent).debug_draw;
        self.set_debug_draw_recursive(child, debug_draw);

        let bounds = self.node(child).body.old_bounds();
        let p = self.node_mut(parent);
        p.children.push(child);
        p.partitioner.add(child, bounds);
        self.node_mut(child).parent = Some(parent);
        debug!("attached {child:?} to {parent:?}");
        Ok(())
    }

    /// Detach `child` from `parent`, making it a root.
    ///
    /// # Errors
    ///
    /// - [`SceneError::StaleNode`] if `parent` is stale.
    /// - [`SceneError::ChildNotFound`] if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.check_alive(parent)?;
        if !self.node(parent).children.contains(&child) {
            return Err(SceneError::ChildNotFound { parent, child });
        }
        self.unlink_parent(child, parent);
        debug!("detached {child:?} from {parent:?}");
        Ok(())
    }

    /// Detach every node in `children` that is a child of `parent`.
    ///
    /// Nodes that are not children of `parent` are left untouched. An empty
    /// batch succeeds without doing anything.
    ///
    /// # Errors
    ///
    /// - [`SceneError::StaleNode`] if `parent` is stale.
    /// - [`SceneError::NoChildrenFound`] if the batch is non-empty and none of its
    ///   members are children of `parent`.
    pub fn remove_children(&mut self, parent: NodeId, children: &[NodeId]) -> Result<(), SceneError> {
        self.check_alive(parent)?;
        let mut removed = 0_usize;
        for &child in children {
            if self.node(parent).children.contains(&child) {
                self.unlink_parent(child, parent);
                removed += 1;
            }
        }
        if !children.is_empty() && removed == 0 {
            return Err(SceneError::NoChildrenFound { parent });
        }
        debug!("detached {removed} of {} nodes from {parent:?}", children.len());
        Ok(())
    }

    /// Replace the partitioner `id` uses for its children.
    ///
    /// Every current child is registered with the new partitioner using its
    /// snapshot bounds. Stale ids are ignored.
    pub fn set_partitioner(&mut self, id: NodeId, partitioner: impl Partitioner<NodeId> + Send + 'static) {
        self.set_partitioner_boxed(id, Box::new(partitioner));
    }

    /// Replace the partitioner `id` uses for its children, already boxed.
    pub fn set_partitioner_boxed(&mut self, id: NodeId, mut partitioner: BoxedPartitioner) {
        if !self.is_alive(id) {
            return;
        }
        partitioner.clear();
        for &child in &self.node(id).children {
            partitioner.add(child, self.node(child).body.old_bounds());
        }
        debug!("replaced partitioner of {id:?} with {partitioner:?}");
        self.node_mut(id).partitioner = partitioner;
    }

    /// The partitioner `id` uses for its children.
    pub fn partitioner(&self, id: NodeId) -> Option<&dyn Partitioner<NodeId>> {
        self.node_opt(id).map(|n| &*n.partitioner as &dyn Partitioner<NodeId>)
    }

    /// Change the size of a node.
    ///
    /// Calls [`Behavior::on_resize`] with the previous size and tells the
    /// parent's partitioner about the new bounds. Stale ids are ignored.
    pub fn resize(&mut self, id: NodeId, width: u32, height: u32) {
        if !self.is_alive(id) {
            return;
        }
        let parent_info = self.parent_info(id);
        let node = self.node_mut(id);
        let (old_width, old_height) = (node.body.width(), node.body.height());
        node.body.set_size(width, height);
        let Node { body, behavior, .. } = node;
        behavior.on_resize(&mut UpdateCx::new(id, body, parent_info), old_width, old_height);

        let bounds = self.node(id).body.old_bounds();
        if let Some(parent) = self.node(id).parent {
            self.node_mut(parent).partitioner.notify_moved(id, bounds);
        }
    }

    /// Set the debug-draw flag of a single node.
    pub fn set_debug_draw(&mut self, id: NodeId, enabled: bool) {
        if let Some(n) = self.node_opt_mut(id) {
            n.debug_draw = enabled;
        }
    }

    /// Set the debug-draw flag of a node and its whole subtree.
    pub fn set_debug_draw_recursive(&mut self, id: NodeId, enabled: bool) {
        if !self.is_alive(id) {
            return;
        }
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            let node = self.node_mut(n);
            node.debug_draw = enabled;
            stack.extend_from_slice(&node.children);
        }
    }

    /// Flip the debug-draw flag of `id` and force its subtree to the new value.
    pub fn toggle_debug_draw_recursive(&mut self, id: NodeId) {
        if let Some(enabled) = self.is_debug_draw(id) {
            self.set_debug_draw_recursive(id, !enabled);
        }
    }

    /// Whether `id` draws debug graphics.
    pub fn is_debug_draw(&self, id: NodeId) -> Option<bool> {
        self.node_opt(id).map(|n| n.debug_draw)
    }

    /// The body of a live node.
    pub fn body(&self, id: NodeId) -> Option<&Body> {
        self.node_opt(id).map(|n| &n.body)
    }

    /// The body of a live node, mutably.
    ///
    /// Size is not reachable from here; use [`resize`](Self::resize) so the
    /// node and its parent's partitioner hear about it.
    pub fn body_mut(&mut self, id: NodeId) -> Option<&mut Body> {
        self.node_opt_mut(id).map(|n| &mut n.body)
    }

    /// Set the current position of a node.
    pub fn set_position(&mut self, id: NodeId, position: Point) {
        if let Some(body) = self.body_mut(id) {
            body.position = position;
        }
    }

    /// Set the current velocity of a node.
    pub fn set_velocity(&mut self, id: NodeId, velocity: Vec2) {
        if let Some(body) = self.body_mut(id) {
            body.velocity = velocity;
        }
    }

    /// The behaviour of a live node, if it has type `T`.
    pub fn behavior<T: Behavior>(&self, id: NodeId) -> Option<&T> {
        let behavior: &dyn Any = &*self.node_opt(id)?.behavior;
        behavior.downcast_ref()
    }

    /// The behaviour of a live node, mutably, if it has type `T`.
    pub fn behavior_mut<T: Behavior>(&mut self, id: NodeId) -> Option<&mut T> {
        let behavior: &mut dyn Any = &mut *self.node_opt_mut(id)?.behavior;
        behavior.downcast_mut()
    }

    /// Absolute drawing position: the sum of the rounded positions of the node
    /// and all its ancestors.
    pub fn drawing_position(&self, id: NodeId) -> Option<(i32, i32)> {
        self.accumulate(id, Body::rounded_position)
    }

    /// Like [`drawing_position`](Self::drawing_position), over snapshot positions.
    pub fn old_drawing_position(&self, id: NodeId) -> Option<(i32, i32)> {
        self.accumulate(id, Body::rounded_old_position)
    }

    /// Whether the node's snapshot rectangle overlaps its parent's extent.
    ///
    /// Roots and stale ids are not visible.
    pub fn is_visible_on_parent(&self, id: NodeId) -> bool {
        self.node_opt(id)
            .is_some_and(|n| behavior::is_visible_on_parent(&n.body, self.parent_info(id)))
    }

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    /// Whether the scene has no live nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the parent of a node if live, or `None` for roots or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Get the children of a node in insertion order, or empty slice if node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map_or(&[], |n| &n.children)
    }

    /// Number of children of a node; zero for stale ids.
    pub fn child_count(&self, id: NodeId) -> usize {
        self.children_of(id).len()
    }

    // --- internals ---

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()]
            .as_ref()
            .expect("scene invariant violated: dangling NodeId")
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()]
            .as_mut()
            .expect("scene invariant violated: dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn check_alive(&self, id: NodeId) -> Result<(), SceneError> {
        if self.is_alive(id) {
            Ok(())
        } else {
            Err(SceneError::StaleNode(id))
        }
    }

    /// Whether `ancestor` is `id` or lies on the path from `id` to its root.
    fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.node(n).parent;
        }
        false
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        p.partitioner.remove(id);
        self.node_mut(id).parent = None;
    }

    fn accumulate(&self, id: NodeId, pick: fn(&Body) -> (i32, i32)) -> Option<(i32, i32)> {
        let mut node = self.node_opt(id)?;
        let (mut x, mut y) = pick(&node.body);
        while let Some(parent) = node.parent {
            node = self.node(parent);
            let (px, py) = pick(&node.body);
            x = x.saturating_add(px);
            y = y.saturating_add(py);
        }
        Some((x, y))
    }

    /// What `id` knows about its parent, or `None` for roots.
    pub(crate) fn parent_info(&self, id: NodeId) -> Option<ParentInfo> {
        let parent = self.node(id).parent?;
        let p = self.node(parent);
        let origin = self
            .drawing_position(parent)
            .expect("scene invariant violated: parent of a live node is stale");
        Some(ParentInfo {
            width: p.body.width(),
            height: p.body.height(),
            origin,
        })
    }
}
