//! Fixed-timestep scheduling helpers for hosts.
//!
//! Hosts run a variable-rate frame loop. Each frame they:
//! 1. poll input once and store it in an [`InputLatch`],
//! 2. ask [`FixedTimestep::advance`] how many fixed ticks are due,
//! 3. run that many ticks, each consuming the latch's latest sample.
//!
//! Input is neither interpolated nor accumulated across the ticks of one frame.

use log::warn;

use crate::{
    constants::{FIXED_TIMESTEP, MAX_STEPS_PER_FRAME},
    error::{ConfigError, check},
    input::InputSample,
};

/// Accumulator turning variable frame times into a whole number of fixed ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedTimestep {
    step: f32,
    max_steps_per_frame: u32,
    accumulator: f32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self {
            step: FIXED_TIMESTEP,
            max_steps_per_frame: MAX_STEPS_PER_FRAME,
            accumulator: 0.0,
        }
    }
}

impl FixedTimestep {
    pub fn new(step: f32, max_steps_per_frame: u32) -> Result<Self, ConfigError> {
        check::positive("fixed_step", step)?;
        if max_steps_per_frame == 0 {
            return Err(ConfigError::NotPositive {
                field: "max_steps_per_frame",
                value: 0.0,
            });
        }

        Ok(Self {
            step,
            max_steps_per_frame,
            accumulator: 0.0,
        })
    }

    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add one frame's elapsed time and return the number of fixed ticks to run now.
    ///
    /// At most `max_steps_per_frame` ticks are returned. Time beyond that budget is dropped
    /// so a long stall does not trigger an ever-growing catch-up.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt < 0.0 {
            warn!("Ignoring invalid frame time {frame_dt}");
            return 0;
        }

        self.accumulator += frame_dt;

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_steps_per_frame {
            self.accumulator -= self.step;
            ticks += 1;
        }

        if self.accumulator >= self.step {
            let dropped = (self.accumulator / self.step).floor();
            warn!(
                "Fixed-step catch-up budget of {} exhausted, dropping {dropped} ticks",
                self.max_steps_per_frame
            );
            self.accumulator %= self.step;
        }

        ticks
    }

    /// Fraction of a step left in the accumulator, for render interpolation.
    #[inline]
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }
}

/// Holds the most recent input sample polled by the frame loop.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputLatch {
    latest: InputSample,
}

impl InputLatch {
    /// Replace the held sample. Called once per variable-rate frame.
    #[inline]
    pub fn store(&mut self, sample: InputSample) {
        self.latest = sample;
    }

    /// Sample consumed by the next fixed tick.
    #[inline]
    pub fn latest(&self) -> InputSample {
        self.latest
    }
}
