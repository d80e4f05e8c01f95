// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Release-velocity estimation from timestamped pointer samples.
//!
//! The controller only needs one number at release time, so estimation is
//! expressed as the small [`VelocityEstimator`] trait. [`WindowedVelocity`] is
//! the default strategy: recent displacement divided by recent elapsed time.

/// Number of samples retained by [`WindowedVelocity`].
const HISTORY_SIZE: usize = 20;

/// Default trailing window, in milliseconds.
pub const DEFAULT_WINDOW_MS: u64 = 100;

/// A gap between consecutive samples longer than this means the pointer rested.
pub const ASSUME_STOPPED_MS: u64 = 40;

/// Strategy for turning pointer samples into a release velocity.
pub trait VelocityEstimator {
    /// Record the pointer `position` (pixels) observed at `time_ms`.
    fn add_sample(&mut self, time_ms: u64, position: f64);

    /// Estimated velocity in pixels per second at the most recent sample.
    ///
    /// Returns `0.0` when there is not enough recent data.
    fn estimate_release_velocity(&self) -> f64;

    /// Forget all samples.
    fn reset(&mut self);
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Sample {
    time_ms: u64,
    position: f64,
}

/// Windowed-average velocity estimator.
///
/// Keeps a ring buffer of the most recent samples. The estimate is the
/// displacement between the oldest sample still inside the trailing window and
/// the newest sample, divided by the time between them. Walking back stops at
/// the first gap longer than [`ASSUME_STOPPED_MS`], so a pointer that rests
/// before release reports no velocity.
///
/// ```
/// use understory_fling::{VelocityEstimator, WindowedVelocity};
///
/// let mut v = WindowedVelocity::default();
/// v.add_sample(0, 0.0);
/// v.add_sample(10, 20.0);
/// v.add_sample(20, 40.0);
/// assert_eq!(v.estimate_release_velocity(), 2000.0);
/// ```
#[derive(Clone, Debug)]
pub struct WindowedVelocity {
    samples: [Option<Sample>; HISTORY_SIZE],
    newest: usize,
    window_ms: u64,
}

impl Default for WindowedVelocity {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_MS)
    }
}

impl WindowedVelocity {
    /// Creates an estimator averaging over the trailing `window_ms`.
    #[must_use]
    pub fn new(window_ms: u64) -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            newest: 0,
            window_ms,
        }
    }

    /// Length of the trailing window in milliseconds.
    #[must_use]
    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    fn previous_index(index: usize) -> usize {
        if index == 0 { HISTORY_SIZE - 1 } else { index - 1 }
    }
}

impl VelocityEstimator for WindowedVelocity {
    fn add_sample(&mut self, time_ms: u64, position: f64) {
        if !position.is_finite() {
            return;
        }
        self.newest = (self.newest + 1) % HISTORY_SIZE;
        self.samples[self.newest] = Some(Sample { time_ms, position });
    }

    fn estimate_release_velocity(&self) -> f64 {
        let Some(newest) = self.samples[self.newest] else {
            return 0.0;
        };

        let mut oldest = newest;
        let mut index = self.newest;
        for _ in 1..HISTORY_SIZE {
            index = Self::previous_index(index);
            let Some(sample) = self.samples[index] else {
                break;
            };
            // Timestamps going backwards mean a stale entry from before a wrap.
            if sample.time_ms > oldest.time_ms
                || newest.time_ms - sample.time_ms > self.window_ms
                || oldest.time_ms - sample.time_ms > ASSUME_STOPPED_MS
            {
                break;
            }
            oldest = sample;
        }

        let elapsed_ms = newest.time_ms - oldest.time_ms;
        if elapsed_ms == 0 {
            return 0.0;
        }
        (newest.position - oldest.position) / elapsed_ms as f64 * 1000.0
    }

    fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.newest = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::{ASSUME_STOPPED_MS, VelocityEstimator, WindowedVelocity};

    #[test]
    fn empty_and_single_sample_report_zero() {
        let mut v = WindowedVelocity::default();
        assert_eq!(v.estimate_release_velocity(), 0.0);
        v.add_sample(5, 100.0);
        assert_eq!(v.estimate_release_velocity(), 0.0);
    }

    #[test]
    fn constant_motion() {
        let mut v = WindowedVelocity::default();
        // 100 px every 10 ms.
        for i in 0..4_u32 {
            v.add_sample(u64::from(i) * 10, f64::from(i) * 100.0);
        }
        assert_eq!(v.estimate_release_velocity(), 10_000.0);
    }

    #[test]
    fn negative_direction() {
        let mut v = WindowedVelocity::default();
        v.add_sample(0, 300.0);
        v.add_sample(10, 200.0);
        v.add_sample(20, 100.0);
        assert_eq!(v.estimate_release_velocity(), -10_000.0);
    }

    #[test]
    fn samples_outside_window_are_ignored() {
        let mut v = WindowedVelocity::new(50);
        v.add_sample(0, 0.0);
        v.add_sample(30, 0.0);
        v.add_sample(60, 0.0);
        v.add_sample(90, 10.0);
        v.add_sample(100, 20.0);
        // Oldest sample inside the window is t=60: 20 px over 40 ms.
        assert_eq!(v.estimate_release_velocity(), 500.0);
    }

    #[test]
    fn resting_pointer_has_no_velocity() {
        let mut v = WindowedVelocity::default();
        v.add_sample(0, 0.0);
        v.add_sample(10, 50.0);
        v.add_sample(10 + ASSUME_STOPPED_MS + 1, 50.0);
        assert_eq!(v.estimate_release_velocity(), 0.0);
    }

    #[test]
    fn reset_clears_history() {
        let mut v = WindowedVelocity::default();
        v.add_sample(0, 0.0);
        v.add_sample(10, 100.0);
        v.reset();
        assert_eq!(v.estimate_release_velocity(), 0.0);
    }

    #[test]
    fn ring_buffer_wraps() {
        let mut v = WindowedVelocity::new(1_000);
        for i in 0..50_u32 {
            v.add_sample(u64::from(i) * 5, f64::from(i) * 5.0);
        }
        assert_eq!(v.estimate_release_velocity(), 1_000.0);
    }

    #[test]
    fn non_finite_positions_are_dropped() {
        let mut v = WindowedVelocity::default();
        v.add_sample(0, 0.0);
        v.add_sample(5, f64::NAN);
        v.add_sample(10, 10.0);
        assert_eq!(v.estimate_release_velocity(), 1_000.0);
    }
}
