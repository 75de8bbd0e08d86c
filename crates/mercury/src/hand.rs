//! Per-hand position resolution.

use std::fmt;

use anyhow::ensure;
use mercury_image::{Mask, Point};

use crate::{
    blob::{search_mode_for, BlobInformation, BlobKind, Condition},
    coverage::point_quality,
    history::History,
    observer::{SolveEvent, SolveObserver},
    params::HandParams,
    predict::{self, Prediction},
    search::{look_around, SearchMode, SearchParams},
    smooth::{correct_previous, smooth},
};

/// Radius of the disc used to rate the quality of a point.
const QUALITY_RADIUS_CM: f64 = 5.0;

/// Areas with less coverage than this are considered empty.
const MIN_AREA_QUALITY: f64 = 0.2;

const AREA_SEARCH_RADIUS_CM: f64 = 8.5;
const AREA_SEARCH_ITERATIONS: u32 = 10;
const AREA_SEARCH_STEP: u32 = 4;

const REFINE_ITERATIONS: u32 = 5;
const REFINE_STEP: u32 = 3;

/// Hands closer than this are considered to overlap.
const MIN_HAND_DISTANCE_CM: f64 = 8.0;
const PUSH_ITERATIONS: u32 = 20;
const NUDGE_ITERATIONS: u32 = 5;

/// Which hand of the person is tracked.
///
/// Named from the person's point of view. A person facing the camera has their left hand on the
/// right side of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];

    pub fn other(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// The search mode that moves this hand away from the other one.
    pub fn push_away_mode(self) -> SearchMode {
        match self {
            Side::Left => SearchMode::Left,
            Side::Right => SearchMode::Right,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// How close two hands were found to be by [`Hand::handle_intersection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intersection {
    /// The hands are far apart, or one of them has no position.
    None,
    /// The hands are close; the position was nudged away from the other hand.
    Near,
    /// The hands overlap; the position was pushed away from the other hand.
    Overlapping,
}

enum AreaSearch {
    /// A fresh estimate close to the searched point was kept.
    Trusted,
    Found,
    Empty,
}

/// Resolves the image position of one hand, frame by frame.
///
/// Every frame, an external classifier may inject a position estimate with
/// [`Hand::set_estimate`], after which [`Hand::solve`] computes the final position from the skin
/// and motion masks. When two hands are tracked, [`Hand::handle_intersection`] keeps them apart
/// (see [`HandTracker`][crate::HandTracker], which does all of this in the right order).
pub struct Hand {
    side: Side,
    params: HandParams,
    position: Option<Point>,
    history: History<Point>,
    blob_estimate: Option<Point>,
    blob_history: History<BlobInformation>,
    estimate_updated: bool,
    intersecting: bool,
    ignore_intersect: bool,
    face_coverage_threshold: Option<i32>,
    observer: Option<Box<dyn SolveObserver + Send>>,
}

impl Hand {
    /// Creates a hand without a position.
    ///
    /// # Panics
    ///
    /// This method will panic if `params` specifies a history size of 0.
    pub fn new(side: Side, params: HandParams) -> Self {
        Self {
            side,
            params,
            position: None,
            history: History::new(params.history_size()),
            blob_estimate: None,
            blob_history: History::new(params.history_size()),
            estimate_updated: false,
            intersecting: false,
            ignore_intersect: false,
            face_coverage_threshold: None,
            observer: None,
        }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn params(&self) -> &HandParams {
        &self.params
    }

    /// Returns the current position, or `None` if the hand has not been found yet.
    #[inline]
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Returns the resolved positions of the previous frames.
    ///
    /// The second most recent entry is corrected after each frame, so it may differ from what
    /// [`Hand::position`] returned at the time.
    #[inline]
    pub fn history(&self) -> &History<Point> {
        &self.history
    }

    /// Returns the blobs that accompanied accepted estimates.
    #[inline]
    pub fn blob_history(&self) -> &History<BlobInformation> {
        &self.blob_history
    }

    /// Returns the most recently accepted estimate.
    #[inline]
    pub fn blob_estimate(&self) -> Option<Point> {
        self.blob_estimate
    }

    /// Returns whether the hand overlapped with the other hand during the last intersection check.
    ///
    /// While intersecting, [`Hand::solve`] does not search around the previous position, since
    /// that area belongs to both hands.
    #[inline]
    pub fn is_intersecting(&self) -> bool {
        self.intersecting
    }

    /// Returns whether an estimate was accepted that the next [`Hand::solve`] will use.
    #[inline]
    pub fn estimate_pending(&self) -> bool {
        self.estimate_updated
    }

    #[inline]
    pub fn face_coverage_threshold(&self) -> Option<i32> {
        self.face_coverage_threshold
    }

    /// Sets the lowest image row (largest Y) at which a hand can still cover the face.
    ///
    /// This is used to decide whether an estimate with [`Condition::OnlyHead`] is plausible. It is
    /// typically updated every frame by a face detector.
    pub fn set_face_coverage_threshold(&mut self, threshold: Option<i32>) {
        self.face_coverage_threshold = threshold;
    }

    /// Registers an observer that is notified of every step taken by this hand.
    pub fn set_observer<O: SolveObserver + Send + 'static>(&mut self, observer: O) {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Continues tracking from a known trajectory.
    ///
    /// Pushes `positions` (oldest first) into the position history and moves the hand to the last
    /// one.
    pub fn seed_history<I: IntoIterator<Item = Point>>(&mut self, positions: I) {
        for p in positions {
            self.history.push(p);
        }
        if let Some(&latest) = self.history.latest() {
            self.position = Some(latest);
        }
    }

    /// Resets the hand to its freshly created state.
    ///
    /// The observer and face coverage threshold are kept.
    pub fn reset(&mut self) {
        self.position = None;
        self.history.clear();
        self.blob_estimate = None;
        self.blob_history.clear();
        self.estimate_updated = false;
        self.intersecting = false;
        self.ignore_intersect = false;
    }

    /// Provides a position estimate for the next [`Hand::solve`].
    ///
    /// `blob` is the blob the estimate was derived from. If it lies high in the image, or if
    /// `ignore_intersection` is set, the next intersection check will not mark this hand as
    /// intersecting, even if the estimate is rejected.
    ///
    /// Estimates made while only a head is visible are rejected unless the hand already has a
    /// position above the face coverage threshold.
    ///
    /// Returns whether the estimate was accepted.
    pub fn set_estimate(
        &mut self,
        estimate: Point,
        blob: &BlobInformation,
        ignore_intersection: bool,
        condition: Condition,
    ) -> bool {
        if blob.kind == BlobKind::High || ignore_intersection {
            self.ignore_intersect = true;
        }

        if condition == Condition::OnlyHead {
            let plausible = match (self.position, self.face_coverage_threshold) {
                (None, _) => false,
                (Some(pos), Some(threshold)) => pos.y <= threshold,
                (Some(_), None) => true,
            };
            if !plausible {
                log::debug!(
                    "{} hand: rejecting head-only estimate {} (position {:?}, threshold {:?})",
                    self.side,
                    estimate,
                    self.position,
                    self.face_coverage_threshold,
                );
                return false;
            }
        }

        self.blob_estimate = Some(estimate);
        self.blob_history.push(*blob);
        self.estimate_updated = true;
        true
    }

    /// Resolves the hand position for the current frame.
    ///
    /// `skin` and `movement` must have the same resolution. Failing to find the hand is not an
    /// error: the position simply stays where it was (or `None`).
    ///
    /// Returns an error if the masks differ in resolution, or if the pending estimate or the
    /// current position lies further outside of `skin` than any search could reach. A rejected
    /// estimate is discarded.
    pub fn solve(
        &mut self,
        skin: &Mask,
        blobs: &[BlobInformation],
        movement: &Mask,
    ) -> anyhow::Result<()> {
        ensure!(
            skin.resolution() == movement.resolution(),
            "motion mask resolution {} does not match skin mask resolution {}",
            movement.resolution(),
            skin.resolution(),
        );

        if let (true, Some(estimate)) = (self.estimate_updated, self.blob_estimate) {
            if let Err(e) = self.ensure_in_reach(skin, estimate) {
                self.estimate_updated = false;
                return Err(e.context(format!("{} hand: rejecting estimate", self.side)));
            }
            self.position = Some(estimate);
        }
        for point in self.position.into_iter().chain(self.history.latest().copied()) {
            self.ensure_in_reach(skin, point)?;
        }

        let last = self.history.latest().copied();
        if let (Some(last), false) = (last, self.intersecting) {
            if let AreaSearch::Empty = self.area_search(skin, last) {
                if let Some(predicted) = self.predict(skin) {
                    self.area_search(skin, predicted);
                }
            }
        }

        if let Some(position) = self.position {
            let mode = search_mode_for(blobs, position, &self.params);
            let refined = self.refine(skin, position, mode, REFINE_ITERATIONS);

            let resolved = match smooth(refined, &self.history, movement) {
                Some(smoothed) => {
                    self.emit(SolveEvent::Smoothed {
                        raw: refined,
                        average: smoothed.average,
                        movement_coverage: smoothed.movement_coverage,
                        result: smoothed.result,
                    });
                    smoothed.result
                }
                None => refined,
            };

            self.position = Some(resolved);
            self.history.push(resolved);
            correct_previous(&mut self.history);
        }

        self.estimate_updated = false;
        self.emit(SolveEvent::Resolved {
            position: self.position,
        });
        Ok(())
    }

    /// Moves this hand away from the other hand if they are too close.
    ///
    /// `other` is the other hand's position after it resolved the current frame. If either hand
    /// has no position, nothing happens.
    pub fn handle_intersection(&mut self, other: Option<Point>, skin: &Mask) -> Intersection {
        let (Some(position), Some(other)) = (self.position, other) else {
            return Intersection::None;
        };

        self.intersecting = false;
        let distance = position.distance(other).max(1.0);
        let min_distance = f64::from(self.params.cm(MIN_HAND_DISTANCE_CM));
        let mode = self.side.push_away_mode();

        let kind = if distance < min_distance {
            self.intersecting = true;
            self.position = Some(self.refine(skin, position, mode, PUSH_ITERATIONS));
            Intersection::Overlapping
        } else if distance < 2.0 * min_distance {
            self.position = Some(self.refine(skin, position, mode, NUDGE_ITERATIONS));
            Intersection::Near
        } else {
            Intersection::None
        };

        if self.ignore_intersect {
            self.intersecting = false;
        }
        self.ignore_intersect = false;

        if kind != Intersection::None {
            log::debug!(
                "{} hand: {:?} at distance {:.1}, moved {} -> {:?}",
                self.side,
                kind,
                distance,
                position,
                self.position,
            );
        }
        self.emit(SolveEvent::Intersection { distance, kind });
        kind
    }

    /// Fails if `point` lies so far outside of `skin` that no search started there could find it.
    fn ensure_in_reach(&self, skin: &Mask, point: Point) -> anyhow::Result<()> {
        let search_reach = self.area_search_params().reach().max(
            self.refine_params()
                .with_max_iterations(PUSH_ITERATIONS)
                .reach(),
        );
        let margin = (self.params.max_jump() as u32).saturating_add(search_reach);
        ensure!(
            skin.rect().grow(margin).contains_point(point),
            "position {} is more than {} px outside of the {} mask",
            point,
            margin,
            skin.resolution(),
        );
        Ok(())
    }

    fn area_search_params(&self) -> SearchParams {
        SearchParams {
            max_iterations: AREA_SEARCH_ITERATIONS,
            step_size: AREA_SEARCH_STEP,
            radius: self.params.cm(AREA_SEARCH_RADIUS_CM),
            mode: SearchMode::Free,
        }
    }

    fn refine_params(&self) -> SearchParams {
        SearchParams {
            max_iterations: REFINE_ITERATIONS,
            step_size: REFINE_STEP,
            radius: self.params.cm(QUALITY_RADIUS_CM),
            mode: SearchMode::Free,
        }
    }

    /// Searches for skin around `start`, moving the hand to the best spot found.
    fn area_search(&mut self, skin: &Mask, start: Point) -> AreaSearch {
        if let (true, Some(position)) = (self.estimate_updated, self.position) {
            if start.distance(position) <= self.params.max_jump() {
                return AreaSearch::Trusted;
            }
        }

        let quality = point_quality(skin, start, self.params.cm(QUALITY_RADIUS_CM));
        if quality <= MIN_AREA_QUALITY {
            log::debug!(
                "{} hand: area around {} is empty (quality {:.3})",
                self.side,
                start,
                quality
            );
            self.emit(SolveEvent::AreaSearch {
                start,
                quality,
                found: None,
            });
            return AreaSearch::Empty;
        }

        let outcome = look_around(skin, start, &self.area_search_params());
        self.position = Some(outcome.position);
        self.emit(SolveEvent::AreaSearch {
            start,
            quality,
            found: Some(outcome.position),
        });
        AreaSearch::Found
    }

    fn predict(&mut self, skin: &Mask) -> Option<Point> {
        let prediction = Prediction::from_history(&self.history)?;
        let evaluated = predict::evaluate(prediction, skin, self.params.cm(QUALITY_RADIUS_CM));
        log::debug!(
            "{} hand: predicted {} ({:.3}) / {} ({:.3}), using {:?}",
            self.side,
            prediction.constant_velocity,
            evaluated.constant_velocity_quality,
            prediction.averaged,
            evaluated.averaged_quality,
            evaluated.chosen,
        );
        self.emit(SolveEvent::Prediction {
            constant_velocity: prediction.constant_velocity,
            averaged: prediction.averaged,
            chosen: evaluated.chosen,
        });
        evaluated.chosen
    }

    /// Walks over the blob at `start` to center the hand on it.
    fn refine(&mut self, skin: &Mask, start: Point, mode: SearchMode, iterations: u32) -> Point {
        let params = self
            .refine_params()
            .with_mode(mode)
            .with_max_iterations(iterations);
        let outcome = look_around(skin, start, &params);
        self.emit(SolveEvent::Search {
            mode,
            start,
            outcome: &outcome,
        });
        outcome.position
    }

    fn emit(&mut self, event: SolveEvent<'_>) {
        if let Some(observer) = &mut self.observer {
            observer.observe(self.side, &event);
        }
    }
}

impl fmt::Debug for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hand")
            .field("side", &self.side)
            .field("position", &self.position)
            .field("history", &self.history)
            .field("blob_estimate", &self.blob_estimate)
            .field("estimate_updated", &self.estimate_updated)
            .field("intersecting", &self.intersecting)
            .field("ignore_intersect", &self.ignore_intersect)
            .field("face_coverage_threshold", &self.face_coverage_threshold)
            .finish_non_exhaustive()
    }
}
