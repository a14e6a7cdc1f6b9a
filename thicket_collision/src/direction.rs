// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collision direction classification.

/// One of the two axes of the plane.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The x axis (left/right).
    Horizontal,
    /// The y axis (top/bottom).
    Vertical,
}

/// Side of a rectangle that another rectangle ran into.
///
/// The direction is always described from the point of view of the first
/// rectangle of a pair: `FromRight` means the other rectangle hit this one's
/// right side, i.e. this rectangle sits to the left of the other.
///
/// "No collision" is expressed as `Option::<CollisionDirection>::None`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CollisionDirection {
    /// The other rectangle hit this one's left side.
    FromLeft,
    /// The other rectangle hit this one's right side.
    FromRight,
    /// The other rectangle hit this one's top side.
    FromTop,
    /// The other rectangle hit this one's bottom side.
    FromBottom,
}

impl CollisionDirection {
    /// The direction as seen from the other rectangle of the pair.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::FromLeft => Self::FromRight,
            Self::FromRight => Self::FromLeft,
            Self::FromTop => Self::FromBottom,
            Self::FromBottom => Self::FromTop,
        }
    }

    /// The axis this direction lies on.
    #[inline]
    pub const fn axis(self) -> Axis {
        match self {
            Self::FromLeft | Self::FromRight => Axis::Horizontal,
            Self::FromTop | Self::FromBottom => Axis::Vertical,
        }
    }

    /// Whether this is `FromLeft` or `FromRight`.
    #[inline]
    pub const fn is_horizontal(self) -> bool {
        matches!(self.axis(), Axis::Horizontal)
    }

    /// Whether this is `FromTop` or `FromBottom`.
    #[inline]
    pub const fn is_vertical(self) -> bool {
        matches!(self.axis(), Axis::Vertical)
    }
}

#[cfg(test)]
mod tests {
    use super::{Axis, CollisionDirection};

    #[test]
    fn opposite_is_an_involution() {
        for d in [
            CollisionDirection::FromLeft,
            CollisionDirection::FromRight,
            CollisionDirection::FromTop,
            CollisionDirection::FromBottom,
        ] {
            assert_ne!(d.opposite(), d);
            assert_eq!(d.opposite().opposite(), d);
            assert_eq!(d.opposite().axis(), d.axis());
        }
    }

    #[test]
    fn axes() {
        assert_eq!(CollisionDirection::FromLeft.axis(), Axis::Horizontal);
        assert!(CollisionDirection::FromRight.is_horizontal());
        assert!(CollisionDirection::FromTop.is_vertical());
        assert!(!CollisionDirection::FromBottom.is_horizontal());
    }
}
