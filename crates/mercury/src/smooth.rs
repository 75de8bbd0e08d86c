//! Temporal smoothing of resolved positions.
//!
//! A hand that barely moves jitters around its true position from frame to frame. The smoother
//! pulls the resolved position towards the average of the last few positions, weighted by how
//! much motion the motion-difference mask shows around the hand.

use mercury_image::{Mask, Point};
use nalgebra::Vector2;

use crate::{coverage::point_quality, history::History};

/// Number of history entries that are averaged.
pub const SMOOTHING_WINDOW: usize = 5;

/// Radius (in pixels) used to measure movement around the current position.
pub const MOVEMENT_RADIUS: u32 = 30;

/// Returns the mean of the [`SMOOTHING_WINDOW`] most recent positions.
///
/// Returns `None` if the history does not hold that many positions yet.
pub fn history_average(history: &History<Point>) -> Option<Vector2<f64>> {
    if history.len() < SMOOTHING_WINDOW {
        return None;
    }

    let sum = history
        .latest_n(SMOOTHING_WINDOW)
        .fold(Vector2::<f64>::zeros(), |acc, p| acc + p.to_vector());
    Some(sum / SMOOTHING_WINDOW as f64)
}

/// Returns the weight of the history average, given the movement coverage around the hand.
///
/// The less movement there is, the more the average dominates.
pub fn blend_weight(movement_coverage: f64) -> f64 {
    if movement_coverage < 0.001 {
        0.95
    } else if movement_coverage < 0.05 {
        0.8
    } else if movement_coverage < 0.2 {
        0.5
    } else {
        0.0
    }
}

/// Blends `current` with `average`, rounding to the nearest pixel.
pub fn blend(current: Point, average: Vector2<f64>, movement_coverage: f64) -> Point {
    let w = blend_weight(movement_coverage);
    if w == 0.0 {
        return current;
    }
    Point::from_vector_rounded(average * w + current.to_vector() * (1.0 - w))
}

/// Details of a [`smooth`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoothed {
    pub average: Vector2<f64>,
    pub movement_coverage: f64,
    pub result: Point,
}

/// Smooths `current` using the history and the motion around it.
///
/// Returns `None` (leaving the position as-is) if the history is too short.
pub fn smooth(current: Point, history: &History<Point>, movement: &Mask) -> Option<Smoothed> {
    let average = history_average(history)?;
    let movement_coverage = point_quality(movement, current, MOVEMENT_RADIUS);
    Some(Smoothed {
        average,
        movement_coverage,
        result: blend(current, average, movement_coverage),
    })
}

/// Replaces the second most recent history entry with the midpoint of its neighbors.
///
/// Does nothing until the history holds at least 3 entries.
pub fn correct_previous(history: &mut History<Point>) {
    let (Some(&newest), Some(&oldest)) = (history.nth_latest(0), history.nth_latest(2)) else {
        return;
    };
    if let Some(middle) = history.nth_latest_mut(1) {
        *middle = newest.midpoint(oldest);
    }
}
