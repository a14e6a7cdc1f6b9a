// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partitioner implementations for different spatial strategies.
//!
//! - `null`: reports no candidates and ignores all bookkeeping.
//! - `simple`: one flat set; every member is a candidate for every query.
//! - `grid` (feature `grid`): uniform grid with configurable cell size.

mod null;
mod simple;

#[cfg(feature = "grid")]
mod grid;

#[cfg(feature = "grid")]
pub use grid::GridPartitioner;
pub use null::NullPartitioner;
pub use simple::SimplePartitioner;
