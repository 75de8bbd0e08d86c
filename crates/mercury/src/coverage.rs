//! Disc coverage measurement.
//!
//! The *coverage* of a point is the fraction of a filled disc around it whose pixels are on in a
//! [`Mask`]. Every search and quality check of the tracker is built on this measure.

use mercury_image::{Disc, Mask, MaskView, Point, Rect};

/// Computes the fraction of the disc of `radius` around `center` that is on in `view`.
///
/// `center` is given in the view's local coordinates. Pixels outside of the view (or outside of
/// its mask) count as off, so a disc that lies entirely outside yields 0. The result is normalized
/// by the number of pixels in the disc and lies in `[0, 1]`.
pub fn coverage(view: &MaskView<'_>, center: Point, radius: u32) -> f64 {
    let (mut on, mut total) = (0u32, 0u32);
    for p in Disc::new(center, radius).points() {
        total += 1;
        if view.get(p.x, p.y) {
            on += 1;
        }
    }

    if total == 0 {
        return 0.0;
    }
    f64::from(on) / f64::from(total)
}

/// Evaluates the coverage of `point` (in mask coordinates) in a search space sized `2 * radius`
/// around it.
pub fn point_quality(mask: &Mask, point: Point, radius: u32) -> f64 {
    let space = SearchSpace::around(mask, point, 2 * radius);
    space.coverage(point, radius)
}

/// A bounded window of a [`Mask`] that searches and quality checks are evaluated in.
///
/// The window is centered on a point and extends `margin` pixels in every direction. Parts that
/// stick out of the mask read as off.
#[derive(Debug, Clone, Copy)]
pub struct SearchSpace<'a> {
    view: MaskView<'a>,
}

impl<'a> SearchSpace<'a> {
    pub fn around(mask: &'a Mask, center: Point, margin: u32) -> Self {
        let size = margin.saturating_mul(2).saturating_add(1);
        Self {
            view: mask.view(Rect::from_center(center.x, center.y, size, size)),
        }
    }

    #[inline]
    pub fn view(&self) -> &MaskView<'a> {
        &self.view
    }

    /// Returns the window in mask coordinates.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.view.mask_rect()
    }

    /// Translates a point from mask coordinates to the coordinates of this search space.
    #[inline]
    pub fn to_local(&self, point: Point) -> Point {
        self.view.to_local(point)
    }

    /// Translates a point from search space coordinates back to mask coordinates.
    #[inline]
    pub fn to_mask(&self, point: Point) -> Point {
        self.view.to_mask(point)
    }

    /// Computes the coverage of a disc around `point`, given in mask coordinates.
    ///
    /// Pixels outside of the search space count as off even if the mask has them turned on.
    pub fn coverage(&self, point: Point, radius: u32) -> f64 {
        coverage(&self.view, self.to_local(point), radius)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn empty_mask_has_no_coverage() {
        let mask = Mask::new(60, 40);
        for (point, radius) in [
            (Point::new(30, 20), 10),
            (Point::new(0, 0), 0),
            (Point::new(-50, 10), 5),
            (Point::new(59, 39), 100),
        ] {
            assert_eq!(point_quality(&mask, point, radius), 0.0);
            assert_eq!(coverage(&mask.as_view(), point, radius), 0.0);
        }
    }

    #[test]
    fn full_mask_inside_bounds() {
        let mask = Mask::filled(100, 100);
        for radius in [0, 1, 5, 25, 49] {
            assert_relative_eq!(point_quality(&mask, Point::new(50, 50), radius), 1.0);
        }
    }

    #[test]
    fn clipped_by_mask_border() {
        let mask = Mask::filled(100, 100);

        // Centered on a corner, roughly a quarter of the disc lies inside.
        let corner = point_quality(&mask, Point::new(0, 0), 20);
        assert!(corner > 0.2 && corner < 0.3, "corner={corner}");

        // Centered on an edge, roughly half.
        let edge = point_quality(&mask, Point::new(50, 0), 20);
        assert!(edge > 0.45 && edge < 0.55, "edge={edge}");

        assert_eq!(point_quality(&mask, Point::new(-100, 50), 20), 0.0);
        assert_eq!(point_quality(&mask, Point::new(50, 200), 20), 0.0);
    }

    #[test]
    fn partial_disc() {
        // Left half of the image is on.
        let mask = Mask::from_fn(100, 100, |x, _| x < 50);
        let quality = point_quality(&mask, Point::new(50, 50), 20);
        assert!(quality > 0.45 && quality < 0.55, "quality={quality}");
        assert!(point_quality(&mask, Point::new(40, 50), 20) > quality);
        assert!(point_quality(&mask, Point::new(60, 50), 20) < quality);
    }

    #[test]
    fn search_space_clips_to_window() {
        let mask = Mask::filled(100, 100);
        let space = SearchSpace::around(&mask, Point::new(50, 50), 10);
        assert_eq!(space.rect(), Rect::from_top_left(40, 40, 21, 21));
        assert_eq!(space.to_mask(space.to_local(Point::new(3, 4))), Point::new(3, 4));
        assert_relative_eq!(space.coverage(Point::new(50, 50), 10), 1.0);
        // A disc larger than the window only sees the window's pixels.
        assert!(space.coverage(Point::new(50, 50), 20) < 1.0);
    }
}
