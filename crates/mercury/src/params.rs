//! Per-hand tuning and calibration parameters.

use std::{env, str::FromStr};

use anyhow::{bail, Context};

use crate::smooth::SMOOTHING_WINDOW;

/// Calibration and tuning values owned by each [`Hand`][crate::Hand].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandParams {
    history_size: usize,
    max_velocity: f64,
    cm_in_pixels: f64,
    fps: f64,
}

impl HandParams {
    pub const DEFAULT_HISTORY_SIZE: usize = 20;

    /// Fastest plausible hand movement, in cm/s.
    pub const DEFAULT_MAX_VELOCITY: f64 = 300.0;

    pub const DEFAULT_CM_IN_PIXELS: f64 = 5.0;

    pub const DEFAULT_FPS: f64 = 25.0;

    /// Reads parameters from the `MERCURY_*` environment variables.
    ///
    /// Unset variables keep their default value. Malformed or invalid values result in an error.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut params = Self::default();
        if let Some(v) = env_var("MERCURY_HISTORY_SIZE")? {
            params.history_size = v;
        }
        if let Some(v) = env_var("MERCURY_MAX_VELOCITY")? {
            params.max_velocity = v;
        }
        if let Some(v) = env_var("MERCURY_CM_IN_PIXELS")? {
            params.cm_in_pixels = v;
        }
        if let Some(v) = env_var("MERCURY_FPS")? {
            params.fps = v;
        }
        params.validate()?;
        Ok(params)
    }

    /// Returns a copy of `self` with a different position history capacity.
    pub fn with_history_size(self, history_size: usize) -> Self {
        Self {
            history_size,
            ..self
        }
    }

    /// Returns a copy of `self` with a different maximum hand velocity (in cm/s).
    pub fn with_max_velocity(self, max_velocity: f64) -> Self {
        Self {
            max_velocity,
            ..self
        }
    }

    /// Returns a copy of `self` with a different calibration (in pixels per cm).
    pub fn with_cm_in_pixels(self, cm_in_pixels: f64) -> Self {
        Self {
            cm_in_pixels,
            ..self
        }
    }

    /// Returns a copy of `self` with a different frame rate.
    pub fn with_fps(self, fps: f64) -> Self {
        Self { fps, ..self }
    }

    /// Checks that the parameters describe a usable configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.history_size < SMOOTHING_WINDOW {
            bail!(
                "history size {} is smaller than the smoothing window of {} frames",
                self.history_size,
                SMOOTHING_WINDOW,
            );
        }
        for (name, value) in [
            ("max velocity", self.max_velocity),
            ("cm in pixels", self.cm_in_pixels),
            ("fps", self.fps),
        ] {
            if !(value.is_finite() && value > 0.0) {
                bail!("{name} must be a positive number, got {value}");
            }
        }
        Ok(())
    }

    #[inline]
    pub fn history_size(&self) -> usize {
        self.history_size
    }

    #[inline]
    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    #[inline]
    pub fn cm_in_pixels(&self) -> f64 {
        self.cm_in_pixels
    }

    #[inline]
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Converts a length in cm to pixels, rounding towards zero.
    #[inline]
    pub fn cm(&self, cm: f64) -> u32 {
        (cm * self.cm_in_pixels) as u32
    }

    /// The largest distance (in pixels) a hand can plausibly travel between two frames.
    pub fn max_jump(&self) -> f64 {
        2.0 * self.max_velocity * self.cm_in_pixels / self.fps
    }
}

impl Default for HandParams {
    fn default() -> Self {
        Self {
            history_size: Self::DEFAULT_HISTORY_SIZE,
            max_velocity: Self::DEFAULT_MAX_VELOCITY,
            cm_in_pixels: Self::DEFAULT_CM_IN_PIXELS,
            fps: Self::DEFAULT_FPS,
        }
    }
}

fn env_var<T>(name: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => {
            let parsed = value
                .trim()
                .parse()
                .with_context(|| format!("invalid value '{value}' for `{name}`"))?;
            Ok(Some(parsed))
        }
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("failed to read `{name}`")),
    }
}
