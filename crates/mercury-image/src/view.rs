//! Mask sub-views.

use std::fmt;

use crate::{Mask, Point, Rect};

/// Sub-view construction.
impl Mask {
    /// Creates an immutable view into an area of this mask, specified by `rect`.
    ///
    /// If `rect` lies partially or entirely outside of `self`, the pixels that are outside of
    /// `self` read as off. The returned view always has the size of `rect`.
    pub fn view(&self, rect: Rect) -> MaskView<'_> {
        MaskView { mask: self, rect }
    }

    /// Creates a view covering the whole mask.
    pub fn as_view(&self) -> MaskView<'_> {
        self.view(self.rect())
    }
}

/// A borrowed rectangular window into a [`Mask`].
///
/// Coordinates passed to a view's methods are *local*: `(0, 0)` is the top-left pixel of the view.
/// Every pixel outside the view's rectangle or outside of the underlying mask reads as off.
#[derive(Clone, Copy)]
pub struct MaskView<'a> {
    mask: &'a Mask,
    /// Rectangle in the root mask's coordinates.
    rect: Rect,
}

impl<'a> MaskView<'a> {
    /// Returns the mask this view borrows from.
    #[inline]
    pub fn mask(&self) -> &'a Mask {
        self.mask
    }

    /// Returns the view's rectangle in local coordinates (positioned at `(0, 0)`).
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_top_left(0, 0, self.rect.width(), self.rect.height())
    }

    /// Returns the view's rectangle in the coordinates of the underlying mask.
    #[inline]
    pub fn mask_rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.rect.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.rect.height()
    }

    /// Translates a point from mask coordinates to local coordinates of this view.
    #[inline]
    pub fn to_local(&self, point: Point) -> Point {
        point - self.rect.top_left()
    }

    /// Translates a point from local coordinates of this view to mask coordinates.
    #[inline]
    pub fn to_mask(&self, point: Point) -> Point {
        point + self.rect.top_left()
    }

    /// Returns whether the pixel at local coordinates `(x, y)` is on.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return false;
        }
        match (x.checked_add(self.rect.x()), y.checked_add(self.rect.y())) {
            (Some(x), Some(y)) => self.mask.get(x, y),
            // Past the end of the coordinate space, so also past the end of the mask.
            _ => false,
        }
    }

    /// Returns the number of pixels in this view that are on.
    pub fn count_on(&self) -> u64 {
        self.rect()
            .iter_points()
            .filter(|p| self.get(p.x, p.y))
            .count() as u64
    }
}

impl fmt::Debug for MaskView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MaskView({:?} of {:?})", self.rect, self.mask)
    }
}
