use std::fmt;

use embedded_graphics::{
    geometry::{Point as EgPoint, Size},
    primitives::Rectangle,
};
use itertools::Itertools;

use crate::Point;

/// An axis-aligned rectangle.
///
/// This rectangle type uses (signed) integer coordinates and describes a set of pixels: the
/// top-left pixel is included, and the rectangle spans `width` columns and `height` rows.
///
/// Rectangles are allowed to have zero height and/or width.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub(crate) rect: Rectangle,
}

impl Rect {
    /// Creates a rectangle extending outwards from a center point.
    ///
    /// For odd sizes, the center pixel lies exactly in the middle of the rectangle. The top-left
    /// corner saturates at the edge of the coordinate space.
    pub fn from_center(x_center: i32, y_center: i32, width: u32, height: u32) -> Self {
        Self::from_top_left(
            x_center.saturating_sub_unsigned(width / 2),
            y_center.saturating_sub_unsigned(height / 2),
            width,
            height,
        )
    }

    /// Creates a rectangle extending downwards and right from a point.
    #[inline]
    pub fn from_top_left(top_left_x: i32, top_left_y: i32, width: u32, height: u32) -> Self {
        Self {
            rect: Rectangle {
                top_left: EgPoint {
                    x: top_left_x,
                    y: top_left_y,
                },
                size: Size { width, height },
            },
        }
    }

    /// Creates a rectangle from two opposing corner points, both of which are included.
    ///
    /// # Panics
    ///
    /// This method will panic if `top_left` lies to the right of or below `bottom_right`.
    pub fn from_corners(top_left: Point, bottom_right: Point) -> Self {
        Self::span_inner(top_left.x, top_left.y, bottom_right.x, bottom_right.y)
    }

    fn span_inner(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Self {
        assert!(x_min <= x_max, "x_min={}, x_max={}", x_min, x_max);
        assert!(y_min <= y_max, "y_min={}, y_max={}", y_min, y_max);
        Self::from_top_left(
            x_min,
            y_min,
            (x_max - x_min + 1) as u32,
            (y_max - y_min + 1) as u32,
        )
    }

    /// Grows every side of this rectangle by `margin` pixels.
    ///
    /// Both the position and the size saturate instead of overflowing.
    #[must_use]
    pub fn grow(&self, margin: u32) -> Self {
        let extra = margin.saturating_mul(2);
        Self::from_top_left(
            self.x().saturating_sub_unsigned(margin),
            self.y().saturating_sub_unsigned(margin),
            self.width().saturating_add(extra),
            self.height().saturating_add(extra),
        )
    }

    /// Returns the X coordinate of the left side of the rectangle.
    #[inline]
    pub fn x(&self) -> i32 {
        self.rect.top_left.x
    }

    /// Returns the Y coordinate of the top side of the rectangle.
    #[inline]
    pub fn y(&self) -> i32 {
        self.rect.top_left.y
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.rect.size.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.rect.size.height
    }

    #[inline]
    pub fn top_left(&self) -> Point {
        Point::new(self.x(), self.y())
    }

    /// Returns the number of pixels contained in `self`.
    #[inline]
    pub fn area(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.x() + (self.width() / 2) as i32,
            self.y() + (self.height() / 2) as i32,
        )
    }

    /// Returns whether the pixel at `point` lies inside of `self`.
    pub fn contains_point(&self, point: Point) -> bool {
        i64::from(self.x()) <= i64::from(point.x)
            && i64::from(self.y()) <= i64::from(point.y)
            && i64::from(point.x) < i64::from(self.x()) + i64::from(self.width())
            && i64::from(point.y) < i64::from(self.y()) + i64::from(self.height())
    }

    /// Computes the intersection of `self` and `other`.
    ///
    /// Returns `None` when the intersection is empty (ie. the rectangles do not overlap).
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x_min = self.x().max(other.x());
        let y_min = self.y().max(other.y());
        let x_max = (i64::from(self.x()) + i64::from(self.width()))
            .min(i64::from(other.x()) + i64::from(other.width())) as i32
            - 1;
        let y_max = (i64::from(self.y()) + i64::from(self.height()))
            .min(i64::from(other.y()) + i64::from(other.height())) as i32
            - 1;
        if x_min > x_max || y_min > y_max {
            return None;
        }
        Some(Rect::span_inner(x_min, y_min, x_max, y_max))
    }

    /// Returns an iterator over all pixel coordinates contained in this `Rect`, row by row.
    pub fn iter_points(&self) -> impl Iterator<Item = Point> {
        let (x, y) = (self.x(), self.y());
        let (w, h) = (self.width() as i32, self.height() as i32);

        (y..y + h)
            .cartesian_product(x..x + w)
            .map(|(y, x)| Point::new(x, y))
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = self.rect.top_left.x;
        let y = self.rect.top_left.y;
        let w = self.rect.size.width;
        let h = self.rect.size.height;
        let bx = i64::from(x) + i64::from(w);
        let by = i64::from(y) + i64::from(h);
        write!(f, "Rect @ ({x},{y})-({bx},{by})/{w}x{h}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_from_center() {
        let rect = Rect::from_center(10, 10, 5, 5);
        assert_eq!(rect, Rect::from_top_left(8, 8, 5, 5));
        assert_eq!(rect.center(), p(10, 10));

        let far = Rect::from_center(i32::MIN + 1, 0, 9, 9);
        assert_eq!(far.top_left(), p(i32::MIN, -4));
    }

    #[test]
    fn test_contains_point() {
        let rect = Rect::from_top_left(-2, -2, 4, 4);
        assert!(rect.contains_point(p(-2, -2)));
        assert!(rect.contains_point(p(1, 1)));
        assert!(!rect.contains_point(p(2, 1)));
        assert!(!rect.contains_point(p(1, 2)));
        assert!(!Rect::from_top_left(0, 0, 0, 0).contains_point(p(0, 0)));
    }

    #[test]
    fn test_intersection() {
        assert_eq!(
            Rect::from_corners(p(0, 0), p(10, 10)).intersection(&Rect::from_corners(p(5, 5), p(5, 5))),
            Some(Rect::from_corners(p(5, 5), p(5, 5)))
        );
        assert_eq!(
            Rect::from_corners(p(5, 5), p(5, 5)).intersection(&Rect::from_corners(p(0, 0), p(10, 10))),
            Some(Rect::from_corners(p(5, 5), p(5, 5)))
        );
        assert_eq!(
            Rect::from_corners(p(5, 5), p(5, 5)).intersection(&Rect::from_corners(p(6, 0), p(10, 10))),
            None,
        );
        assert_eq!(
            Rect::from_top_left(-10, -10, 20, 20).intersection(&Rect::from_top_left(0, 0, 100, 100)),
            Some(Rect::from_top_left(0, 0, 10, 10)),
        );
    }

    #[test]
    fn test_grow() {
        let rect = Rect::from_center(0, 0, 1, 1).grow(3);
        assert_eq!(rect, Rect::from_top_left(-3, -3, 7, 7));
        assert_eq!(rect.center(), p(0, 0));

        let huge = Rect::from_top_left(-10, 0, 4, 4).grow(u32::MAX);
        assert_eq!(huge.top_left(), p(i32::MIN, i32::MIN));
        assert_eq!(huge.width(), u32::MAX);
    }

    #[test]
    fn test_iter_points() {
        let points = Rect::from_top_left(1, 2, 2, 2).iter_points().collect::<Vec<_>>();
        assert_eq!(points, [p(1, 2), p(2, 2), p(1, 3), p(2, 3)]);
    }
}
