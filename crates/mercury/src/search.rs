//! Greedy hill-climbing over disc coverage.

use std::collections::HashSet;

use mercury_image::{Mask, Point};

use crate::coverage::SearchSpace;

/// Restricts the directions a [`look_around`] search may step in.
///
/// Directions are named from the point of view of a person facing the camera: *left* is the
/// person's left, which is +X in the image. *Up* and *down* are image directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMode {
    /// Step in any of the 8 compass directions.
    Free,
    /// Never step towards the person's right (image -X).
    Left,
    /// Never step towards the person's left (image +X).
    Right,
    /// Never step downwards.
    Up,
    /// Never step upwards.
    Down,
}

// Unit step directions per mode, in evaluation order.
const FREE: &[(i32, i32)] = &[
    (1, 1),
    (1, -1),
    (1, 0),
    (-1, 1),
    (-1, -1),
    (-1, 0),
    (0, 1),
    (0, -1),
];
const LEFT: &[(i32, i32)] = &[(0, 1), (0, -1), (1, 1), (1, -1), (1, 0)];
const RIGHT: &[(i32, i32)] = &[(0, 1), (0, -1), (-1, 1), (-1, -1), (-1, 0)];
const UP: &[(i32, i32)] = &[(-1, 0), (1, 0), (1, -1), (-1, -1), (0, -1)];
const DOWN: &[(i32, i32)] = &[(-1, 0), (1, 0), (1, 1), (-1, 1), (0, 1)];

impl SearchMode {
    pub const ALL: [Self; 5] = [Self::Free, Self::Left, Self::Right, Self::Up, Self::Down];

    /// Returns the unit step directions this mode explores, in evaluation order.
    pub fn directions(self) -> &'static [(i32, i32)] {
        match self {
            SearchMode::Free => FREE,
            SearchMode::Left => LEFT,
            SearchMode::Right => RIGHT,
            SearchMode::Up => UP,
            SearchMode::Down => DOWN,
        }
    }

    /// Returns the neighbor offsets for a step size of `step` pixels.
    pub fn offsets(self, step: u32) -> impl Iterator<Item = Point> {
        let step = step as i32;
        self.directions()
            .iter()
            .map(move |&(dx, dy)| Point::new(dx * step, dy * step))
    }
}

/// Parameters of a [`look_around`] search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    pub max_iterations: u32,
    /// Distance between neighbors along each axis, in pixels.
    pub step_size: u32,
    /// Radius of the coverage disc.
    pub radius: u32,
    pub mode: SearchMode,
}

impl SearchParams {
    /// Returns a copy of `self` using a different [`SearchMode`].
    pub fn with_mode(self, mode: SearchMode) -> Self {
        Self { mode, ..self }
    }

    /// Returns a copy of `self` with a different iteration limit.
    pub fn with_max_iterations(self, max_iterations: u32) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }

    /// Margin around the start point that contains every disc the search can evaluate.
    pub fn reach(&self) -> u32 {
        self.radius
            .saturating_add(self.max_iterations.saturating_add(1).saturating_mul(self.step_size))
    }
}

/// Result of a [`look_around`] search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// The best position found.
    pub position: Point,
    /// Coverage at `position`.
    pub coverage: f64,
    /// Number of neighborhoods that were evaluated.
    pub iterations: u32,
    /// Every position the search moved through, starting with the start point and ending with
    /// `position`.
    pub path: Vec<Point>,
}

impl SearchOutcome {
    /// Returns the number of steps the search took.
    pub fn steps(&self) -> usize {
        self.path.len() - 1
    }
}

/// Climbs the coverage of `mask` starting at `start`.
///
/// Each iteration evaluates the neighbors of the current position in the directions allowed by
/// the search mode. The neighbor with the strictly greatest coverage that has not been visited
/// yet becomes the new position, but only if its coverage strictly exceeds the current one.
/// Otherwise, or after `max_iterations`, the search stops. Ties never move the position.
pub fn look_around(mask: &Mask, start: Point, params: &SearchParams) -> SearchOutcome {
    let space = SearchSpace::around(mask, start, params.reach());

    let mut position = start;
    let mut best = space.coverage(start, params.radius);
    let mut path = vec![start];
    let mut visited = HashSet::from([start]);
    let mut iterations = 0;

    while iterations < params.max_iterations {
        iterations += 1;

        let mut candidate: Option<(Point, f64)> = None;
        for offset in params.mode.offsets(params.step_size) {
            let neighbor = position + offset;
            if visited.contains(&neighbor) {
                continue;
            }
            let value = space.coverage(neighbor, params.radius);
            if candidate.map_or(true, |(_, max)| value > max) {
                candidate = Some((neighbor, value));
            }
        }

        match candidate {
            Some((neighbor, value)) if value > best => {
                log::trace!(
                    "{:?} search: {} -> {} ({:.3} -> {:.3})",
                    params.mode,
                    position,
                    neighbor,
                    best,
                    value
                );
                position = neighbor;
                best = value;
                visited.insert(neighbor);
                path.push(neighbor);
            }
            _ => break,
        }
    }

    SearchOutcome {
        position,
        coverage: best,
        iterations,
        path,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn params(mode: SearchMode, max_iterations: u32) -> SearchParams {
        SearchParams {
            max_iterations,
            step_size: 3,
            radius: 10,
            mode,
        }
    }

    #[test]
    fn direction_tables() {
        assert_eq!(SearchMode::Free.directions().len(), 8);
        for mode in SearchMode::ALL {
            let dirs = mode.directions();
            let unique = dirs.iter().collect::<HashSet<_>>();
            assert_eq!(unique.len(), dirs.len(), "{mode:?} has duplicate directions");
            assert!(!dirs.contains(&(0, 0)));
        }
        for mode in [
            SearchMode::Left,
            SearchMode::Right,
            SearchMode::Up,
            SearchMode::Down,
        ] {
            assert_eq!(mode.directions().len(), 5);
        }

        assert!(SearchMode::Left.directions().iter().all(|&(dx, _)| dx >= 0));
        assert!(SearchMode::Right.directions().iter().all(|&(dx, _)| dx <= 0));
        assert!(SearchMode::Up.directions().iter().all(|&(_, dy)| dy <= 0));
        assert!(SearchMode::Down.directions().iter().all(|&(_, dy)| dy >= 0));

        assert_eq!(
            SearchMode::Left.offsets(4).collect::<Vec<_>>(),
            [
                Point::new(0, 4),
                Point::new(0, -4),
                Point::new(4, 4),
                Point::new(4, -4),
                Point::new(4, 0),
            ]
        );
    }

    #[test]
    fn flat_mask_stops_immediately() {
        for mask in [Mask::new(100, 100), Mask::filled(100, 100)] {
            for mode in SearchMode::ALL {
                let outcome = look_around(&mask, Point::new(50, 50), &params(mode, 20));
                assert_eq!(outcome.position, Point::new(50, 50));
                assert_eq!(outcome.iterations, 1);
                assert_eq!(outcome.steps(), 0);
            }
        }
    }

    #[test]
    fn climbs_towards_blob() {
        let mut mask = Mask::new(200, 200);
        mask.fill_disc(Point::new(120, 100), 15);

        let outcome = look_around(&mask, Point::new(100, 100), &params(SearchMode::Free, 20));
        assert!(
            outcome.position.distance(Point::new(120, 100)) <= 5.0,
            "{outcome:?}"
        );
        assert!(outcome.coverage > 0.9);
        assert!(outcome.iterations <= 20);
    }

    #[test]
    fn monotonic_and_never_revisits() {
        let mut rng = fastrand::Rng::with_seed(0x5eed);
        let mask = Mask::from_fn(120, 120, |_, _| rng.u8(..) < 90);

        for _ in 0..20 {
            let start = Point::new(rng.i32(10..110), rng.i32(10..110));
            let mode = SearchMode::ALL[rng.usize(..SearchMode::ALL.len())];
            let outcome = look_around(&mask, start, &params(mode, 15));

            let unique = outcome.path.iter().collect::<HashSet<_>>();
            assert_eq!(unique.len(), outcome.path.len(), "revisited a point");

            let space = SearchSpace::around(&mask, start, 1000);
            let values = outcome
                .path
                .iter()
                .map(|&p| space.coverage(p, 10))
                .collect::<Vec<_>>();
            assert!(values.windows(2).all(|w| w[1] > w[0]), "{values:?}");
            assert_eq!(*values.last().unwrap(), outcome.coverage);
        }
    }

    #[test]
    fn respects_iteration_limit() {
        // Left half is on; the disc needs 4 steps to be fully covered.
        let mask = Mask::from_fn(400, 100, |x, _| x < 200);
        let outcome = look_around(&mask, Point::new(200, 50), &params(SearchMode::Free, 2));
        assert_eq!(outcome.iterations, 2);
        assert_eq!(outcome.steps(), 2);
        assert!(outcome.coverage < 1.0);

        let outcome = look_around(&mask, Point::new(200, 50), &params(SearchMode::Free, 20));
        assert!(outcome.iterations < 20);
        assert_eq!(outcome.coverage, 1.0);
    }

    #[test]
    fn biased_modes_never_step_backwards() {
        let mut mask = Mask::new(200, 200);
        mask.fill_disc(Point::new(70, 100), 20);

        // The blob lies on the image left; a `Left` search cannot reach it.
        let outcome = look_around(&mask, Point::new(95, 100), &params(SearchMode::Left, 20));
        assert!(outcome.path.windows(2).all(|w| w[1].x >= w[0].x));
        assert!(outcome.position.x >= 95);

        let outcome = look_around(&mask, Point::new(95, 100), &params(SearchMode::Right, 20));
        assert!(outcome.position.x < 95);
    }
}
