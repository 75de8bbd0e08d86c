//! Binary masks and pixel geometry for hand tracking.
//!
//! # Overview
//!
//! ## Masks and Views
//!
//! The tracker consumes single-channel binary images – skin masks and motion-difference masks –
//! via the [`Mask`] type. A pixel is *on* if its value is non-zero; collaborators usually write
//! `255` for on and `0` for off.
//!
//! [`MaskView`]s are lightweight, borrowed windows into a [`Mask`]. A view may extend past the
//! edges of its mask: pixels outside of the mask read as *off*. This lets algorithms look at a
//! fixed-size neighborhood around a point without caring about image borders.
//!
//! ## Geometry
//!
//! [`Point`] and [`Rect`] use signed integer pixel coordinates with X pointing right and Y pointing
//! *down*, matching the layout of the underlying image buffer. [`Disc`] enumerates the pixels of
//! a filled circle and is the shape every coverage measurement is based on.

mod disc;
mod mask;
mod point;
mod rect;
mod resolution;
mod view;

#[cfg(test)]
mod tests;

pub use disc::Disc;
pub use mask::Mask;
pub use point::Point;
pub use rect::Rect;
pub use resolution::Resolution;
pub use view::MaskView;
