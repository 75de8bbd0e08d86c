use embedded_graphics::{
    geometry::Point as EgPoint,
    primitives::{Circle, ContainsPoint, PointsIter},
};

use crate::Point;

/// A filled circle of pixels.
///
/// The disc has a diameter of `2 * radius + 1` pixels, so that `center` is its exact middle pixel.
/// A disc of radius 0 contains only its center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disc {
    center: Point,
    radius: u32,
}

impl Disc {
    pub fn new(center: Point, radius: u32) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    #[inline]
    pub fn diameter(&self) -> u32 {
        2 * self.radius + 1
    }

    fn circle(&self) -> Circle {
        Circle::with_center(EgPoint::new(self.center.x, self.center.y), self.diameter())
    }

    /// Returns an iterator over every pixel of the disc.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        self.circle().points().map(|p| Point::new(p.x, p.y))
    }

    pub fn contains(&self, point: Point) -> bool {
        self.circle().contains(EgPoint::new(point.x, point.y))
    }

    /// Returns the number of pixels in the disc.
    pub fn area(&self) -> usize {
        self.circle().points().count()
    }
}
