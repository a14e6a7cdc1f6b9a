// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Scene: a retained-mode 2D scene tree of animated, collidable nodes.
//!
//! A [`Scene`] is an arena of nodes. Each node has a [`Body`] (position,
//! velocity, size, and a once-per-tick snapshot of the old position and
//! velocity), an ordered list of children, a broad-phase
//! [`Partitioner`](thicket_collision::Partitioner) for those children, and a
//! [`Behavior`] supplying its hooks.
//!
//! An external timer drives the scene by calling [`Scene::update_all`] with
//! the elapsed milliseconds, and a renderer calls [`Scene::draw_all`] with a
//! [`Canvas`](thicket_animation::Canvas).
//!
//! - Positions are relative to the parent. A node's drawing position is the
//!   sum of the rounded positions of the node and its ancestors.
//! - Collision detection between siblings runs after their parent was
//!   updated, against the snapshot state of both nodes, so its outcome does
//!   not depend on the order siblings were visited in.
//! - [`response`] holds the move-off and velocity policies that collision
//!   handlers typically call.
//! - [`Stateful`] nodes play the animation clip selected by their active tags.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use thicket_collision::backends::SimplePartitioner;
//! use thicket_scene::{Behavior, Body, Contact, Scene, UpdateCx, response};
//!
//! struct Ball;
//!
//! impl Behavior for Ball {
//!     fn handle_collision(&mut self, cx: &mut UpdateCx<'_>, contact: &Contact) {
//!         let body = cx.body_mut();
//!         response::move_off_collision(body, &contact.other_body, contact.direction);
//!         response::change_velocities_simple(body, &contact.other_body, contact.direction);
//!     }
//! }
//!
//! let mut scene = Scene::new();
//! let table = scene.insert(Body::new(400, 300), ());
//! scene.set_partitioner(table, SimplePartitioner::new());
//!
//! let left = scene.insert(
//!     Body::new(10, 10)
//!         .with_position(Point::new(0.0, 0.0))
//!         .with_velocity(Vec2::new(0.5, 0.0)),
//!     Ball,
//! );
//! let right = scene.insert(
//!     Body::new(10, 10)
//!         .with_position(Point::new(15.0, 0.0))
//!         .with_velocity(Vec2::new(-0.5, 0.0)),
//!     Ball,
//! );
//! scene.add_child(table, left)?;
//! scene.add_child(table, right)?;
//!
//! scene.update_all(table, 6);
//!
//! // Both balls overlapped after the tick and bounced apart.
//! assert_eq!(scene.body(left).unwrap().velocity, Vec2::new(-0.5, 0.0));
//! assert_eq!(scene.body(right).unwrap().velocity, Vec2::new(0.5, 0.0));
//! # Ok::<(), thicket_scene::SceneError>(())
//! ```

mod behavior;
mod error;
pub mod response;
mod scene;
mod shared;
mod stateful;
mod traverse;
mod types;

pub use behavior::{Behavior, Contact, DEBUG_OUTLINE, DrawCx, UpdateCx, outline_bounds};
pub use error::SceneError;
pub use scene::{BoxedPartitioner, Scene};
pub use shared::SharedScene;
pub use stateful::{Stateful, StatefulBehavior};
pub use types::{Body, NodeId, VelocityRange};
