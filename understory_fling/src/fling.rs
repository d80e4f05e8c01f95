// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spline-based fling deceleration with hard walls.
//!
//! The deceleration curve is the classic touch-scroller spline: a fling with
//! initial velocity `v` travels a distance and lasts a duration that both grow
//! logarithmically with `|v|`, scaled by a friction coefficient and the screen
//! density. Intermediate positions follow a precomputed spline table.
//!
//! A [`Fling`] is stepped by the host, one call per frame, and never owns a
//! timer. Its final position is clamped into the bounds given at start, so a
//! fling aimed past a wall decelerates into the wall and stops there.

use core::ops::RangeInclusive;

/// Tension curve inflection point.
const INFLECTION: f64 = 0.35;
const START_TENSION: f64 = 0.5;
const END_TENSION: f64 = 1.0;
const P1: f64 = START_TENSION * INFLECTION;
const P2: f64 = 1.0 - END_TENSION * (1.0 - INFLECTION);

/// Number of samples in the spline lookup table.
const NB_SAMPLES: usize = 100;

/// Earth's gravity in m/s².
const GRAVITY_EARTH: f64 = 9.80665;
const INCHES_PER_METER: f64 = 39.37;
/// `ln(0.78) / ln(0.9)`.
const DECELERATION_RATE: f64 = 2.358_201_815_814_816;

/// Rounds half up, like the pixel rounding of platform scrollers.
fn round_px(x: f64) -> f64 {
    libm::floor(x + 0.5)
}

/// Precomputed distance-over-time table of the fling spline.
#[derive(Clone, Debug)]
pub struct FlingSpline {
    positions: [f64; NB_SAMPLES + 1],
}

impl Default for FlingSpline {
    fn default() -> Self {
        Self::new()
    }
}

impl FlingSpline {
    /// Builds the lookup table.
    #[must_use]
    pub fn new() -> Self {
        let mut positions = [0.0; NB_SAMPLES + 1];
        let mut x_min = 0.0_f64;
        for (i, slot) in positions.iter_mut().take(NB_SAMPLES).enumerate() {
            let alpha = i as f64 / NB_SAMPLES as f64;
            // Bisect for x such that the bezier's time component equals alpha.
            let mut x_max = 1.0_f64;
            let (x, coef) = loop {
                let x = x_min + (x_max - x_min) / 2.0;
                let coef = 3.0 * x * (1.0 - x);
                let tx = coef * ((1.0 - x) * P1 + x * P2) + x * x * x;
                if (tx - alpha).abs() < 1e-5 {
                    break (x, coef);
                }
                if tx > alpha {
                    x_max = x;
                } else {
                    x_min = x;
                }
            };
            *slot = coef * ((1.0 - x) * START_TENSION + x) + x * x * x;
        }
        positions[NB_SAMPLES] = 1.0;
        Self { positions }
    }

    /// Fraction of the total distance covered at normalized time `t` in `[0, 1]`.
    #[must_use]
    pub fn distance_coefficient(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "t is clamped to [0, 1], so the index is at most NB_SAMPLES"
        )]
        let index = (NB_SAMPLES as f64 * t) as usize;
        if index >= NB_SAMPLES {
            return 1.0;
        }
        let t_inf = index as f64 / NB_SAMPLES as f64;
        let t_sup = (index + 1) as f64 / NB_SAMPLES as f64;
        let d_inf = self.positions[index];
        let d_sup = self.positions[index + 1];
        let slope = (d_sup - d_inf) / (t_sup - t_inf);
        d_inf + (t - t_inf) * slope
    }
}

/// Friction model and spline shared by all flings of one widget.
#[derive(Clone, Debug)]
pub struct FlingPhysics {
    friction: f64,
    physical_coefficient: f64,
    spline: FlingSpline,
}

impl Default for FlingPhysics {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FRICTION, 1.0)
    }
}

impl FlingPhysics {
    /// Default scroll friction.
    pub const DEFAULT_FRICTION: f64 = 0.015;

    /// Creates the physics for a `friction` coefficient and a screen `density`
    /// (1.0 for a 160 dpi baseline).
    ///
    /// Non-positive or non-finite inputs fall back to the defaults.
    #[must_use]
    pub fn new(friction: f64, density: f64) -> Self {
        let friction = if friction.is_finite() && friction > 0.0 {
            friction
        } else {
            log::warn!("fling: invalid friction {friction}, using default");
            Self::DEFAULT_FRICTION
        };
        let density = if density.is_finite() && density > 0.0 {
            density
        } else {
            log::warn!("fling: invalid density {density}, using 1.0");
            1.0
        };
        let ppi = density * 160.0;
        Self {
            friction,
            physical_coefficient: GRAVITY_EARTH * INCHES_PER_METER * ppi * 0.84,
            spline: FlingSpline::new(),
        }
    }

    /// The spline used to shape fling positions.
    #[must_use]
    pub fn spline(&self) -> &FlingSpline {
        &self.spline
    }

    fn spline_deceleration(&self, velocity: f64) -> f64 {
        libm::log(INFLECTION * velocity.abs() / (self.friction * self.physical_coefficient))
    }

    /// Duration in milliseconds of a fling started at `velocity` (px/s).
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "fling durations are a few seconds at most"
    )]
    pub fn fling_duration_ms(&self, velocity: f64) -> u64 {
        if velocity == 0.0 || !velocity.is_finite() {
            return 0;
        }
        let l = self.spline_deceleration(velocity);
        (1000.0 * libm::exp(l / (DECELERATION_RATE - 1.0))) as u64
    }

    /// Unsigned distance in pixels covered by a fling started at `velocity` (px/s).
    #[must_use]
    pub fn fling_distance(&self, velocity: f64) -> f64 {
        if velocity == 0.0 || !velocity.is_finite() {
            return 0.0;
        }
        let l = self.spline_deceleration(velocity);
        self.friction
            * self.physical_coefficient
            * libm::exp(DECELERATION_RATE / (DECELERATION_RATE - 1.0) * l)
    }

    /// Starts a fling at `start` with `velocity` (px/s) confined to `bounds`.
    ///
    /// The start position is expected to be pixel aligned; the final position
    /// is rounded to a whole pixel and clamped into `bounds`.
    #[must_use]
    pub fn start(
        &self,
        start: f64,
        velocity: f64,
        bounds: RangeInclusive<f64>,
        now_ms: u64,
    ) -> Fling {
        let (min, max) = if bounds.start() <= bounds.end() {
            (*bounds.start(), *bounds.end())
        } else {
            (*bounds.end(), *bounds.start())
        };
        let distance = self.fling_distance(velocity);
        let signed = if velocity < 0.0 { -distance } else { distance };
        let final_pos = round_px(start + signed).clamp(min, max);
        let duration_ms = self.fling_duration_ms(velocity);
        log::debug!(
            "fling: start {start} at {velocity} px/s, final {final_pos} in {duration_ms} ms, bounds [{min}, {max}]"
        );
        Fling {
            start,
            final_pos,
            min,
            max,
            duration_ms,
            start_time_ms: now_ms,
            current: start,
            finished: false,
        }
    }
}

/// A running fling.
#[derive(Clone, Debug, PartialEq)]
pub struct Fling {
    start: f64,
    final_pos: f64,
    min: f64,
    max: f64,
    duration_ms: u64,
    start_time_ms: u64,
    current: f64,
    finished: bool,
}

impl Fling {
    /// Advances the simulation to `now_ms`.
    ///
    /// Returns the new pixel-aligned position while the fling is running,
    /// including the frame on which it lands, and `None` once it has finished.
    pub fn step(&mut self, spline: &FlingSpline, now_ms: u64) -> Option<f64> {
        if self.finished {
            return None;
        }
        let elapsed = now_ms.saturating_sub(self.start_time_ms);
        if elapsed < self.duration_ms {
            let t = elapsed as f64 / self.duration_ms as f64;
            let travelled = spline.distance_coefficient(t) * (self.final_pos - self.start);
            self.current = round_px(self.start + travelled).clamp(self.min, self.max);
            if self.current == self.final_pos {
                self.finished = true;
            }
        } else {
            self.current = self.final_pos;
            self.finished = true;
        }
        Some(self.current)
    }

    /// Stops the fling where it is.
    pub fn abort(&mut self) {
        self.finished = true;
    }

    /// Whether the fling has come to rest.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Most recent position.
    #[must_use]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Position the fling will come to rest at.
    #[must_use]
    pub fn final_position(&self) -> f64 {
        self.final_pos
    }

    /// Total duration in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::{FlingPhysics, FlingSpline};

    #[test]
    fn spline_endpoints_and_monotonic() {
        let spline = FlingSpline::new();
        assert!(spline.distance_coefficient(0.0).abs() < 0.01);
        assert_eq!(spline.distance_coefficient(1.0), 1.0);

        let mut prev = 0.0;
        for i in 0..=100_u32 {
            let d = spline.distance_coefficient(f64::from(i) / 100.0);
            assert!(d >= prev, "spline must not move backwards at step {i}");
            prev = d;
        }
    }

    #[test]
    fn faster_flings_go_further_and_longer() {
        let physics = FlingPhysics::default();
        let slow_d = physics.fling_distance(1_000.0);
        let fast_d = physics.fling_distance(4_000.0);
        assert!(slow_d > 0.0);
        assert!(fast_d > slow_d);
        assert!(physics.fling_duration_ms(4_000.0) > physics.fling_duration_ms(1_000.0));
        // Direction does not change magnitude.
        assert_eq!(physics.fling_distance(-1_000.0), slow_d);
    }

    #[test]
    fn denser_screens_decelerate_harder() {
        let mdpi = FlingPhysics::new(FlingPhysics::DEFAULT_FRICTION, 1.0);
        let xhdpi = FlingPhysics::new(FlingPhysics::DEFAULT_FRICTION, 2.0);
        assert!(xhdpi.fling_distance(2_000.0) < mdpi.fling_distance(2_000.0));
    }

    #[test]
    fn zero_velocity_goes_nowhere() {
        let physics = FlingPhysics::default();
        assert_eq!(physics.fling_distance(0.0), 0.0);
        assert_eq!(physics.fling_duration_ms(0.0), 0);

        let mut fling = physics.start(40.0, 0.0, 0.0..=100.0, 0);
        assert_eq!(fling.step(physics.spline(), 0), Some(40.0));
        assert!(fling.is_finished());
        assert_eq!(fling.step(physics.spline(), 16), None);
    }

    #[test]
    fn fling_runs_to_rest_in_bounds() {
        let physics = FlingPhysics::default();
        let mut fling = physics.start(100.0, 1_500.0, 0.0..=10_000.0, 1_000);
        assert!(fling.final_position() > 100.0);

        let mut now = 1_000;
        let mut prev = 100.0;
        let mut frames = 0;
        while let Some(pos) = fling.step(physics.spline(), now) {
            assert!(pos >= prev, "positive fling moves forward");
            assert_eq!(pos, libm::floor(pos), "positions are whole pixels");
            prev = pos;
            now += 16;
            frames += 1;
            assert!(frames < 1_000, "fling must terminate");
        }
        assert!(fling.is_finished());
        assert_eq!(prev, fling.final_position());
    }

    #[test]
    fn negative_fling_stops_at_lower_wall() {
        let physics = FlingPhysics::default();
        let mut fling = physics.start(20.0, -8_000.0, 0.0..=500.0, 0);
        assert_eq!(fling.final_position(), 0.0);

        let mut now = 0;
        let mut last = 20.0;
        while let Some(pos) = fling.step(physics.spline(), now) {
            assert!((0.0..=500.0).contains(&pos));
            last = pos;
            now += 16;
        }
        assert_eq!(last, 0.0);
    }

    #[test]
    fn positive_fling_stops_at_upper_wall() {
        let physics = FlingPhysics::default();
        let fling = physics.start(490.0, 8_000.0, 0.0..=500.0, 0);
        assert_eq!(fling.final_position(), 500.0);
    }

    #[test]
    fn abort_finishes_immediately() {
        let physics = FlingPhysics::default();
        let mut fling = physics.start(0.0, 3_000.0, 0.0..=5_000.0, 0);
        assert!(fling.step(physics.spline(), 16).is_some());
        fling.abort();
        assert!(fling.is_finished());
        assert_eq!(fling.step(physics.spline(), 32), None);
    }

    #[test]
    fn clock_going_backwards_is_tolerated() {
        let physics = FlingPhysics::default();
        let mut fling = physics.start(0.0, 3_000.0, 0.0..=5_000.0, 500);
        assert_eq!(fling.step(physics.spline(), 100), Some(0.0));
    }

    #[test]
    fn reversed_bounds_are_normalized() {
        let physics = FlingPhysics::default();
        let fling = physics.start(10.0, -5_000.0, 100.0..=0.0, 0);
        assert_eq!(fling.final_position(), 0.0);
    }
}
