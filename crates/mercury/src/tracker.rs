//! Two-hand tracking.

use mercury_image::{Mask, Point};

use crate::{
    blob::BlobInformation,
    hand::{Hand, Intersection, Side},
    params::HandParams,
};

/// The per-frame inputs of a [`HandTracker`].
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Binary skin mask.
    pub skin: &'a Mask,
    /// Skin blobs found in `skin`.
    pub blobs: &'a [BlobInformation],
    /// Binary motion-difference mask, with the same resolution as `skin`.
    pub movement: &'a Mask,
}

/// Tracks both hands of a person and keeps them from collapsing onto the same blob.
pub struct HandTracker {
    left: Hand,
    right: Hand,
}

impl HandTracker {
    /// Creates a tracker for two hands using the same parameters.
    ///
    /// Returns an error if `params` fail [`HandParams::validate`].
    pub fn new(params: HandParams) -> anyhow::Result<Self> {
        params.validate()?;
        Ok(Self {
            left: Hand::new(Side::Left, params),
            right: Hand::new(Side::Right, params),
        })
    }

    pub fn hand(&self, side: Side) -> &Hand {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Gives access to a hand, eg. to inject estimates with [`Hand::set_estimate`].
    pub fn hand_mut(&mut self, side: Side) -> &mut Hand {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Returns both hands, left first.
    pub fn hands(&self) -> [&Hand; 2] {
        [&self.left, &self.right]
    }

    /// Returns the positions of both hands, left first.
    pub fn positions(&self) -> [Option<Point>; 2] {
        [self.left.position(), self.right.position()]
    }

    /// Resolves both hands on `frame`.
    ///
    /// Both hands are solved first, then each hand checks for an intersection with the other
    /// hand's freshly solved position.
    pub fn track(&mut self, frame: &Frame<'_>) -> anyhow::Result<[Intersection; 2]> {
        self.left.solve(frame.skin, frame.blobs, frame.movement)?;
        self.right.solve(frame.skin, frame.blobs, frame.movement)?;

        let [left, right] = self.positions();
        let intersections = [
            self.left.handle_intersection(right, frame.skin),
            self.right.handle_intersection(left, frame.skin),
        ];
        log::trace!(
            "tracked: left={:?} right={:?} ({:?})",
            self.left.position(),
            self.right.position(),
            intersections
        );
        Ok(intersections)
    }

    /// Resets both hands, see [`Hand::reset`].
    pub fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
    }
}
