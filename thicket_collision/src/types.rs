// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types.

/// Axis-aligned integer rectangle given by its top-left corner and extent.
///
/// Coordinates are whole pixels. The rectangle covers the half-open ranges
/// `x..x + width` and `y..y + height`, so a rectangle with a non-positive
/// width or height covers nothing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bounds {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl Bounds {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create a rectangle from its top-left corner and extent.
    #[inline(always)]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Return true if the rectangle has no area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Determines whether this rectangle strictly overlaps another.
    ///
    /// Unlike a closed-box test, rectangles that only share an edge do **not**
    /// overlap. Empty rectangles never overlap anything.
    ///
    /// # Examples
    ///
    /// ```
    /// use thicket_collision::Bounds;
    ///
    /// let a = Bounds::new(0, 0, 10, 10);
    /// assert!(a.overlaps(&Bounds::new(9, 9, 10, 10)));
    /// assert!(!a.overlaps(&Bounds::new(10, 0, 10, 10)));
    /// ```
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Return the same rectangle moved by `(dx, dy)`.
    #[inline]
    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Bounds;

    #[test]
    fn edges() {
        let b = Bounds::new(-5, 3, 10, 4);
        assert_eq!(b.right(), 5);
        assert_eq!(b.bottom(), 7);
        assert!(!b.is_empty());
        assert!(Bounds::ZERO.is_empty());
        assert!(Bounds::new(0, 0, 10, -1).is_empty());
    }

    #[test]
    fn empty_never_overlaps() {
        let a = Bounds::new(0, 0, 0, 10);
        let b = Bounds::new(-5, -5, 20, 20);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn containment_overlaps() {
        let outer = Bounds::new(0, 0, 100, 100);
        let inner = Bounds::new(10, 10, 5, 5);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn translate_moves_corner_only() {
        let b = Bounds::new(1, 2, 3, 4).translate(10, -2);
        assert_eq!(b, Bounds::new(11, 0, 3, 4));
    }
}
