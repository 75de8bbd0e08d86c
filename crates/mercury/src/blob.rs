//! Skin blobs reported by the blob extractor, and what they imply for the hand search.

use mercury_image::{Point, Rect};

use crate::{params::HandParams, search::SearchMode};

/// Blobs shorter than this (in cm) are assumed to be just a hand.
const ARM_MIN_HEIGHT_CM: f64 = 15.0;

/// Medium blobs taller than this (in cm) are assumed to be a hanging arm.
const MEDIUM_ARM_HEIGHT_CM: f64 = 40.0;

/// Coarse vertical classification of a blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobKind {
    /// The blob lies low in the image, eg. a hand resting in the lap.
    Low,
    Medium,
    /// The blob lies high in the image, eg. a raised arm or the face.
    High,
    /// The extractor could not classify the blob.
    Unclassified,
}

/// Qualitative condition of the scene that accompanies a position estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Normal,
    /// Only a head region is visible, no arm is connected to it.
    OnlyHead,
}

/// A connected region of skin pixels, described by its extreme points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobInformation {
    /// Leftmost pixel (smallest X).
    pub left: Point,
    /// Rightmost pixel (largest X).
    pub right: Point,
    /// Topmost pixel (smallest Y).
    pub top: Point,
    /// Bottommost pixel (largest Y).
    pub bottom: Point,
    pub kind: BlobKind,
}

impl BlobInformation {
    /// Creates a blob whose extreme points are the centers of the sides of `rect`.
    pub fn from_rect(rect: Rect, kind: BlobKind) -> Self {
        let center = rect.center();
        let right = rect.x() + rect.width().saturating_sub(1) as i32;
        let bottom = rect.y() + rect.height().saturating_sub(1) as i32;
        Self {
            left: Point::new(rect.x(), center.y),
            right: Point::new(right, center.y),
            top: Point::new(center.x, rect.y()),
            bottom: Point::new(center.x, bottom),
            kind,
        }
    }

    /// Height of the blob in pixels.
    pub fn height(&self) -> i32 {
        self.bottom.y - self.top.y
    }

    pub fn width(&self) -> i32 {
        self.right.x - self.left.x
    }

    /// Returns whether `point` lies within the bounding box of the blob's extreme points
    /// (inclusive).
    pub fn contains(&self, point: Point) -> bool {
        self.left.x <= point.x
            && point.x <= self.right.x
            && self.top.y <= point.y
            && point.y <= self.bottom.y
    }

    /// Returns the bounding box of the blob's extreme points, or `None` if the extremes are
    /// inconsistent.
    pub fn bounding_rect(&self) -> Option<Rect> {
        if self.width() < 0 || self.height() < 0 {
            return None;
        }
        Some(Rect::from_corners(
            Point::new(self.left.x, self.top.y),
            Point::new(self.right.x, self.bottom.y),
        ))
    }
}

/// Picks a search mode for refining `position` based on the blob it lies in.
///
/// Tall blobs usually mean an extended arm, so the search is nudged along the arm towards where
/// the hand is expected to be. Only the first blob (in list order) containing `position` is
/// considered.
pub fn search_mode_for(blobs: &[BlobInformation], position: Point, params: &HandParams) -> SearchMode {
    let Some(blob) = blobs.iter().find(|blob| blob.contains(position)) else {
        return SearchMode::Free;
    };

    let height = f64::from(blob.height());
    if height < ARM_MIN_HEIGHT_CM * params.cm_in_pixels() {
        return SearchMode::Free;
    }

    match blob.kind {
        BlobKind::Low => SearchMode::Down,
        BlobKind::Medium if height > MEDIUM_ARM_HEIGHT_CM * params.cm_in_pixels() => {
            SearchMode::Down
        }
        BlobKind::Medium => SearchMode::Free,
        BlobKind::High => SearchMode::Up,
        BlobKind::Unclassified => SearchMode::Free,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(height: u32, kind: BlobKind) -> BlobInformation {
        BlobInformation::from_rect(Rect::from_top_left(100, 100, 50, height + 1), kind)
    }

    #[test]
    fn blob_geometry() {
        let b = blob(80, BlobKind::Low);
        assert_eq!(b.height(), 80);
        assert_eq!(b.width(), 49);
        assert!(b.contains(Point::new(100, 100)));
        assert!(b.contains(Point::new(149, 180)));
        assert!(!b.contains(Point::new(150, 180)));
        assert!(!b.contains(Point::new(120, 99)));
        assert_eq!(
            b.bounding_rect(),
            Some(Rect::from_top_left(100, 100, 50, 81))
        );
    }

    #[test]
    fn mode_from_blob() {
        // 5 px per cm: 15 cm = 75 px, 40 cm = 200 px.
        let params = HandParams::default();
        let inside = Point::new(120, 150);

        let cases = [
            (60, BlobKind::Low, SearchMode::Free),
            (60, BlobKind::High, SearchMode::Free),
            (80, BlobKind::Low, SearchMode::Down),
            (80, BlobKind::Medium, SearchMode::Free),
            (250, BlobKind::Medium, SearchMode::Down),
            // Boundaries: exactly 15 cm is tall enough, exactly 40 cm is not "very tall".
            (74, BlobKind::Low, SearchMode::Free),
            (75, BlobKind::Low, SearchMode::Down),
            (75, BlobKind::High, SearchMode::Up),
            (200, BlobKind::Medium, SearchMode::Free),
            (201, BlobKind::Medium, SearchMode::Down),
            (80, BlobKind::High, SearchMode::Up),
            (80, BlobKind::Unclassified, SearchMode::Free),
        ];
        for (height, kind, expected) in cases {
            assert_eq!(
                search_mode_for(&[blob(height, kind)], inside, &params),
                expected,
                "height={height} kind={kind:?}"
            );
        }
    }

    #[test]
    fn first_containing_blob_wins() {
        let params = HandParams::default();
        let outside = BlobInformation::from_rect(Rect::from_top_left(0, 0, 10, 300), BlobKind::High);
        let blobs = [outside, blob(80, BlobKind::Low), blob(80, BlobKind::High)];
        assert_eq!(
            search_mode_for(&blobs, Point::new(120, 150), &params),
            SearchMode::Down
        );
        assert_eq!(
            search_mode_for(&blobs, Point::new(500, 500), &params),
            SearchMode::Free
        );
        assert_eq!(search_mode_for(&[], Point::new(1, 1), &params), SearchMode::Free);
    }
}
