//! Motion-based position prediction.
//!
//! When the area around a hand's last position is empty, the hand most likely moved too fast for
//! the local search to follow. Extrapolating its recent trajectory gives a second place to look.

use mercury_image::{Mask, Point};

use crate::{coverage::point_quality, history::History};

/// Minimum coverage a predicted point needs for the prediction to be used.
pub const MIN_PREDICTION_QUALITY: f64 = 0.2;

/// Linear extrapolations of the last three positions of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prediction {
    /// Assumes the velocity between the last two positions stays constant.
    pub constant_velocity: Point,
    /// Assumes the velocity averaged over the last two frames stays constant.
    pub averaged: Point,
}

impl Prediction {
    /// Extrapolates the next position from the three most recent history entries.
    ///
    /// Returns `None` if the history holds fewer than three positions.
    pub fn from_history(history: &History<Point>) -> Option<Self> {
        let p1 = *history.nth_latest(0)?;
        let p2 = *history.nth_latest(1)?;
        let p3 = *history.nth_latest(2)?;

        let v1 = p1 - p2;
        let v2 = p2 - p3;
        Some(Self {
            constant_velocity: p1 + v1,
            averaged: p1 + (v1 + v2) / 2,
        })
    }
}

/// The outcome of evaluating a [`Prediction`] against a mask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluated {
    pub prediction: Prediction,
    pub constant_velocity_quality: f64,
    pub averaged_quality: f64,
    /// The better of both hypotheses, if it is good enough to use.
    pub chosen: Option<Point>,
}

/// Evaluates both hypotheses of `prediction` on `mask`.
///
/// The hypothesis with the higher quality (coverage within `radius`) wins; the constant velocity
/// hypothesis wins ties. The winner is only chosen if its quality exceeds
/// [`MIN_PREDICTION_QUALITY`].
pub fn evaluate(prediction: Prediction, mask: &Mask, radius: u32) -> Evaluated {
    let constant_velocity_quality = point_quality(mask, prediction.constant_velocity, radius);
    let averaged_quality = point_quality(mask, prediction.averaged, radius);

    let (point, quality) = if averaged_quality > constant_velocity_quality {
        (prediction.averaged, averaged_quality)
    } else {
        (prediction.constant_velocity, constant_velocity_quality)
    };

    Evaluated {
        prediction,
        constant_velocity_quality,
        averaged_quality,
        chosen: (quality > MIN_PREDICTION_QUALITY).then_some(point),
    }
}

/// Predicts where the hand moved to, using its position history.
///
/// Returns `None` if the history is too short or no hypothesis has enough coverage on `mask`.
pub fn predict(history: &History<Point>, mask: &Mask, radius: u32) -> Option<Point> {
    let prediction = Prediction::from_history(history)?;
    evaluate(prediction, mask, radius).chosen
}
