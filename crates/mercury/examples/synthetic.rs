//! Tracks two synthetic hands that swing towards each other and apart again.
//!
//! Run with `RUST_LOG=mercury=debug` to see the tracker's decisions.

use mercury::{
    blob::{BlobInformation, BlobKind, Condition},
    image::Rect,
    tracker::{Frame, HandTracker},
    HandParams, Mask, Point, Side,
};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 360;
const HAND_RADIUS: u32 = 22;
const FRAMES: u32 = 120;

/// Position of the hand on `side` at frame `t`.
fn hand_center(side: Side, t: u32) -> Point {
    let phase = t as f64 / FRAMES as f64 * std::f64::consts::TAU;
    let swing = (phase.sin() * 130.0) as i32;
    let lift = (phase.cos() * 40.0) as i32;
    match side {
        // The person faces the camera, so their left hand is on the image right.
        Side::Left => Point::new(WIDTH as i32 / 2 + 150 - swing, HEIGHT as i32 / 2 + lift),
        Side::Right => Point::new(WIDTH as i32 / 2 - 150 + swing, HEIGHT as i32 / 2 + lift),
    }
}

fn render(t: u32) -> (Mask, Vec<BlobInformation>) {
    let mut skin = Mask::new(WIDTH, HEIGHT);
    let mut rects = Vec::new();
    for side in Side::BOTH {
        let center = hand_center(side, t);
        skin.fill_disc(center, HAND_RADIUS);
        let size = 2 * HAND_RADIUS + 1;
        rects.push(Rect::from_center(center.x, center.y, size, size));
    }
    let blobs = rects
        .into_iter()
        .map(|rect| BlobInformation::from_rect(rect, BlobKind::Medium))
        .collect();
    (skin, blobs)
}

fn motion(prev: &Mask, cur: &Mask) -> Mask {
    Mask::from_fn(cur.width(), cur.height(), |x, y| {
        let (x, y) = (x as i32, y as i32);
        prev.get(x, y) != cur.get(x, y)
    })
}

fn main() -> anyhow::Result<()> {
    mercury::init_logger!();

    let params = HandParams::from_env()?;
    let mut tracker = HandTracker::new(params)?;

    let (mut prev, blobs) = render(0);
    for (side, blob) in Side::BOTH.into_iter().zip(&blobs) {
        let estimate = hand_center(side, 0);
        tracker
            .hand_mut(side)
            .set_estimate(estimate, blob, false, Condition::Normal);
    }

    let mut total_error = [0.0; 2];
    for t in 0..FRAMES {
        let (skin, blobs) = render(t);
        let movement = motion(&prev, &skin);
        let intersections = tracker.track(&Frame {
            skin: &skin,
            blobs: &blobs,
            movement: &movement,
        })?;

        for (i, side) in Side::BOTH.into_iter().enumerate() {
            let truth = hand_center(side, t);
            let error = match tracker.hand(side).position() {
                Some(p) => p.distance(truth),
                None => f64::INFINITY,
            };
            total_error[i] += error;
        }
        log::info!(
            "frame {t:3}: {:?} {:?}",
            tracker.positions(),
            intersections
        );

        prev = skin;
    }

    for (i, side) in Side::BOTH.into_iter().enumerate() {
        let hand = tracker.hand(side);
        log::info!(
            "{side} hand: mean error {:.1} px, trail of {} segments",
            total_error[i] / f64::from(FRAMES),
            hand.history().segments().count(),
        );
    }

    Ok(())
}
