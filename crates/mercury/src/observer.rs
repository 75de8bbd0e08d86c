//! Hooks for inspecting the decisions a [`Hand`][crate::Hand] makes while resolving a frame.
//!
//! Resolving a hand position involves several fallbacks and heuristics that are hard to follow
//! from the final position alone. An observer receives a [`SolveEvent`] for every step, which can
//! be used to draw debug overlays or to collect statistics.

use mercury_image::Point;
use nalgebra::Vector2;

use crate::{
    hand::{Intersection, Side},
    search::{SearchMode, SearchOutcome},
};

/// A step taken while resolving a hand position.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub enum SolveEvent<'a> {
    /// The area around a previous (or predicted) position was checked for skin.
    AreaSearch {
        start: Point,
        /// Coverage around `start`.
        quality: f64,
        /// Where the area search ended up, or `None` if the area was too empty to search.
        found: Option<Point>,
    },
    /// The position was extrapolated from the position history.
    Prediction {
        constant_velocity: Point,
        averaged: Point,
        chosen: Option<Point>,
    },
    /// A coverage search refined the position.
    Search {
        mode: SearchMode,
        start: Point,
        outcome: &'a SearchOutcome,
    },
    /// The refined position was smoothed using the position history.
    Smoothed {
        raw: Point,
        average: Vector2<f64>,
        movement_coverage: f64,
        result: Point,
    },
    /// The distance to the other hand was checked.
    Intersection { distance: f64, kind: Intersection },
    /// The frame has been resolved.
    Resolved { position: Option<Point> },
}

/// Receives [`SolveEvent`]s from a [`Hand`][crate::Hand].
///
/// This is implemented for all matching closures.
pub trait SolveObserver {
    fn observe(&mut self, side: Side, event: &SolveEvent<'_>);
}

impl<F> SolveObserver for F
where
    F: FnMut(Side, &SolveEvent<'_>),
{
    fn observe(&mut self, side: Side, event: &SolveEvent<'_>) {
        self(side, event)
    }
}
