//! Mercury two-hand position tracking.
//!
//! Mercury estimates the image position of both hands of a person facing the camera, frame by
//! frame, from data computed by upstream stages:
//!
//! - a binary skin [`Mask`],
//! - a list of skin [blobs](blob::BlobInformation),
//! - a binary motion-difference [`Mask`] highlighting recently changed pixels,
//! - optionally, a position estimate per hand injected by a blob classifier.
//!
//! Each [`Hand`] resolves its own position by hill-climbing over mask *coverage* (see
//! [`coverage`] and [`search`]), falls back to [motion prediction](predict) when the area around
//! its last position is empty, and smooths the result over its [`History`](history::History).
//! The [`HandTracker`] then keeps the two hands from collapsing onto the same region.
//!
//! # Coordinates
//!
//! All positions are integer pixel coordinates with X pointing right and Y pointing *down*.
//! "Left" and "right" hands are named from the person's point of view, so the left hand usually
//! appears on the right side of the image.
//!
//! A hand without a valid position reports `None`. Consumers that still use the `(0, 0)` sentinel
//! can convert with [`Point::or_sentinel`].
//!
//! # Environment Variables
//!
//! [`HandParams::from_env`] reads the following variables, falling back to the defaults of
//! [`HandParams::default`]:
//!
//! * `MERCURY_HISTORY_SIZE`: number of resolved positions kept per hand.
//! * `MERCURY_MAX_VELOCITY`: maximum plausible hand velocity in cm/s.
//! * `MERCURY_CM_IN_PIXELS`: camera calibration, in pixels per cm at the person's distance.
//! * `MERCURY_FPS`: frame rate of the input.

use log::LevelFilter;

pub mod blob;
pub mod coverage;
pub mod hand;
pub mod history;
pub mod observer;
pub mod params;
pub mod predict;
pub mod search;
pub mod smooth;
pub mod tracker;

pub use mercury_image as image;
pub use mercury_image::{Mask, Point};

pub use hand::{Hand, Side};
pub use params::HandParams;
pub use tracker::{Frame, HandTracker};

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = if cfg!(debug_assertions) {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_PKG_NAME")), LevelFilter::Debug)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// If `cfg!(debug_assertions)` is enabled, the calling crate will log at *trace* level, otherwise
/// at *debug* level. Mercury itself logs at *debug* level; per-iteration search traces can be
/// enabled with `RUST_LOG=mercury=trace`.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
