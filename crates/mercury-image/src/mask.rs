use std::fmt;

use image::{GrayImage, ImageBuffer, Luma};

use crate::{Disc, Point, Rect, Resolution};

/// A single-channel binary image.
///
/// Each pixel is either *on* (any non-zero value) or *off* (`0`). Masks are produced by external
/// collaborators (skin segmentation, frame differencing) and are read-only for the tracker.
#[derive(Clone, PartialEq)]
pub struct Mask {
    pub(crate) buf: GrayImage,
}

impl Mask {
    /// Pixel value written for *on* pixels.
    pub const ON: u8 = 255;

    /// Pixel value written for *off* pixels.
    pub const OFF: u8 = 0;

    /// Creates a mask of the given size with every pixel turned off.
    ///
    /// # Panics
    ///
    /// This will panic if `width` or `height` is 0.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "cannot create an empty {width}x{height} mask"
        );
        Self {
            buf: ImageBuffer::new(width, height),
        }
    }

    /// Creates a mask of the given size with every pixel turned on.
    ///
    /// # Panics
    ///
    /// This will panic if `width` or `height` is 0.
    pub fn filled(width: u32, height: u32) -> Self {
        Self::from_fn(width, height, |_, _| true)
    }

    /// Creates a mask by invoking `f` for each pixel, which returns whether the pixel is on.
    ///
    /// # Panics
    ///
    /// This will panic if `width` or `height` is 0.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        assert!(
            width > 0 && height > 0,
            "cannot create an empty {width}x{height} mask"
        );
        Self {
            buf: ImageBuffer::from_fn(width, height, |x, y| {
                Luma([if f(x, y) { Self::ON } else { Self::OFF }])
            }),
        }
    }

    /// Wraps an existing 8-bit grayscale image.
    ///
    /// Returns `None` if the image has no pixels.
    pub fn from_gray(buf: GrayImage) -> Option<Self> {
        if buf.width() == 0 || buf.height() == 0 {
            return None;
        }
        Some(Self { buf })
    }

    /// Creates a mask from a row-major buffer of `width * height` bytes.
    ///
    /// Returns `None` if the buffer has the wrong length or the size is empty.
    pub fn from_raw(width: u32, height: u32, buf: Vec<u8>) -> Option<Self> {
        Self::from_gray(ImageBuffer::from_raw(width, height, buf)?)
    }

    #[inline]
    pub fn as_gray(&self) -> &GrayImage {
        &self.buf
    }

    /// Returns the width of this mask, in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.buf.width()
    }

    /// Returns the height of this mask, in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.buf.height()
    }

    #[inline]
    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width(), self.height())
    }

    /// Returns a [`Rect`] at `(0, 0)` covering the whole mask.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.resolution().rect()
    }

    /// Returns whether the pixel at `(x, y)` is on.
    ///
    /// Coordinates outside of the mask are off.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return false;
        }
        self.buf.get_pixel(x as u32, y as u32).0[0] != Self::OFF
    }

    /// Turns the pixel at `(x, y)` on or off.
    ///
    /// Writes to coordinates outside of the mask are ignored.
    pub fn set(&mut self, x: i32, y: i32, on: bool) {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return;
        }
        let value = if on { Self::ON } else { Self::OFF };
        self.buf.put_pixel(x as u32, y as u32, Luma([value]));
    }

    /// Turns on every pixel of a filled disc. Pixels outside of the mask are skipped.
    pub fn fill_disc(&mut self, center: Point, radius: u32) {
        for p in Disc::new(center, radius).points() {
            self.set(p.x, p.y, true);
        }
    }

    /// Turns on every pixel inside of `rect`. Pixels outside of the mask are skipped.
    pub fn fill_rect(&mut self, rect: Rect) {
        let Some(rect) = rect.intersection(&self.rect()) else {
            return;
        };
        for p in rect.iter_points() {
            self.set(p.x, p.y, true);
        }
    }

    /// Returns the number of pixels that are on.
    pub fn count_on(&self) -> u64 {
        self.buf.pixels().filter(|px| px.0[0] != Self::OFF).count() as u64
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mask({})", self.resolution())
    }
}
