// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scene shared across threads.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thicket_animation::Canvas;

use crate::scene::Scene;
use crate::types::NodeId;

/// A [`Scene`] shared between an update thread and a drawing thread.
///
/// Each [`update`](Self::update) or [`draw`](Self::draw) call holds the lock
/// for one whole traversal, so a draw never observes a half-updated tree.
/// Clones share the same scene.
///
/// A panic inside a behaviour poisons nothing: the lock is recovered and the
/// scene is used as the panicking call left it.
#[derive(Clone, Debug, Default)]
pub struct SharedScene {
    inner: Arc<Mutex<Scene>>,
}

impl SharedScene {
    /// Share `scene`.
    pub fn new(scene: Scene) -> Self {
        Self {
            inner: Arc::new(Mutex::new(scene)),
        }
    }

    /// Run [`Scene::update_all`] under the lock.
    pub fn update(&self, root: NodeId, dt_ms: u64) {
        self.lock().update_all(root, dt_ms);
    }

    /// Run [`Scene::draw_all`] under the lock.
    pub fn draw(&self, root: NodeId, canvas: &mut dyn Canvas) {
        self.lock().draw_all(root, canvas);
    }

    /// Run `f` with exclusive access to the scene.
    pub fn with<R>(&self, f: impl FnOnce(&mut Scene) -> R) -> R {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Scene> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
