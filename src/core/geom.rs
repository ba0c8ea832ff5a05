//! Integer Pixel Geometry
//!
//! 2D vector and axis-aligned rectangle in whole pixels.
//! All operations are integer-only so the simulation stays deterministic.

use std::fmt;
use std::ops::{Add, Sub, Neg};
use serde::{Serialize, Deserialize};

/// Pixel coordinate type.
pub type Px = i32;

/// 2D vector with integer pixel components.
///
/// Screen convention: `x` grows to the right, `y` grows downward.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component
    pub x: Px,
    /// Y component
    pub y: Px,
}

impl Vec2 {
    /// Zero vector
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new vector.
    #[inline]
    pub const fn new(x: Px, y: Px) -> Self {
        Self { x, y }
    }

    /// Add another vector.
    #[inline]
    pub fn add(self, other: Self) -> Self {
        Self {
            x: self.x.wrapping_add(other.x),
            y: self.y.wrapping_add(other.y),
        }
    }

    /// Subtract another vector.
    #[inline]
    pub fn sub(self, other: Self) -> Self {
        Self {
            x: self.x.wrapping_sub(other.x),
            y: self.y.wrapping_sub(other.y),
        }
    }

    /// Scale by an integer scalar.
    #[inline]
    pub fn scale(self, scalar: Px) -> Self {
        Self {
            x: self.x.wrapping_mul(scalar),
            y: self.y.wrapping_mul(scalar),
        }
    }

    /// Negate both components.
    #[inline]
    pub fn negate(self) -> Self {
        Self {
            x: self.x.wrapping_neg(),
            y: self.y.wrapping_neg(),
        }
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Vec2::add(self, rhs)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Vec2::sub(self, rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.negate()
    }
}

impl fmt::Debug for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vec2({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// =============================================================================
// RECT
// =============================================================================

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub origin: Vec2,
    /// Width in pixels
    pub width: Px,
    /// Height in pixels
    pub height: Px,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    #[inline]
    pub const fn new(origin: Vec2, width: Px, height: Px) -> Self {
        Self { origin, width, height }
    }

    /// Left edge.
    #[inline]
    pub fn left(&self) -> Px {
        self.origin.x
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> Px {
        self.origin.x + self.width
    }

    /// Top edge.
    #[inline]
    pub fn top(&self) -> Px {
        self.origin.y
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> Px {
        self.origin.y + self.height
    }

    /// Center point, rounded toward the top-left on odd sizes.
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.origin.x + self.width / 2, self.origin.y + self.height / 2)
    }

    /// Point containment with inclusive edges on all four sides.
    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// True if `inner` lies entirely inside this rectangle.
    #[inline]
    pub fn contains_rect(&self, inner: &Rect) -> bool {
        inner.left() >= self.left()
            && inner.right() <= self.right()
            && inner.top() >= self.top()
            && inner.bottom() <= self.bottom()
    }

    /// Grow by `amount` pixels on every side.
    #[inline]
    pub fn inflate(&self, amount: Px) -> Self {
        Self {
            origin: Vec2::new(self.origin.x - amount, self.origin.y - amount),
            width: self.width + amount * 2,
            height: self.height + amount * 2,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
