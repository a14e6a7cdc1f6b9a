// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use thiserror::Error;

use crate::types::NodeId;

/// Invalid structural changes to a [`Scene`](crate::Scene).
///
/// A failing call leaves the scene exactly as it was.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum SceneError {
    /// The node is already a child of this parent.
    #[error("{child:?} is already a child of {parent:?}")]
    DuplicateChild {
        /// The parent.
        parent: NodeId,
        /// The node that was being added.
        child: NodeId,
    },
    /// The node is not a child of this parent.
    #[error("{child:?} is not a child of {parent:?}")]
    ChildNotFound {
        /// The parent.
        parent: NodeId,
        /// The node that was being removed.
        child: NodeId,
    },
    /// None of a non-empty batch of nodes are children of this parent.
    #[error("none of the given nodes are children of {parent:?}")]
    NoChildrenFound {
        /// The parent.
        parent: NodeId,
    },
    /// The handle refers to a despawned node.
    #[error("{0:?} does not refer to a live node")]
    StaleNode(NodeId),
    /// The node would become its own ancestor.
    #[error("adding {child:?} under {parent:?} would create a cycle")]
    WouldCycle {
        /// The intended parent.
        parent: NodeId,
        /// The intended child, which is the parent itself or one of its ancestors.
        child: NodeId,
    },
}
