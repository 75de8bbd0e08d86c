use std::{
    fmt,
    ops::{Add, AddAssign, Div, Sub},
};

use nalgebra::Vector2;

/// An integer pixel coordinate.
///
/// X points to the right, Y points down.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the Euclidean distance between `self` and `other`.
    pub fn distance(self, other: Point) -> f64 {
        (self.to_vector() - other.to_vector()).norm()
    }

    /// Returns the point halfway between `self` and `other`, rounded towards zero.
    pub fn midpoint(self, other: Point) -> Point {
        (self + other) / 2
    }

    #[inline]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(f64::from(self.x), f64::from(self.y))
    }

    /// Converts a floating-point vector to the nearest pixel coordinate.
    pub fn from_vector_rounded(v: Vector2<f64>) -> Self {
        Self {
            x: v.x.round() as i32,
            y: v.y.round() as i32,
        }
    }

    /// Encodes an optional point using `(0, 0)` for "no point".
    ///
    /// Only meant for consumers that require this legacy encoding. Note that it is lossy, since
    /// `Some(Point::ORIGIN)` is mapped to the same value as `None`.
    pub fn or_sentinel(point: Option<Point>) -> Point {
        point.unwrap_or(Self::ORIGIN)
    }

    /// Decodes a point that uses `(0, 0)` for "no point".
    pub fn from_sentinel(point: Point) -> Option<Point> {
        if point == Self::ORIGIN {
            None
        } else {
            Some(point)
        }
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Component-wise integer division, rounding towards zero.
impl Div<i32> for Point {
    type Output = Point;

    #[inline]
    fn div(self, rhs: i32) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
