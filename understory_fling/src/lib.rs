// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_fling --heading-base-level=0

//! Understory Fling: headless 1D drag and momentum primitives.
//!
//! This crate provides the small pieces a touch-driven scroller needs between
//! raw pointer events and a moving position:
//!
//! - [`DragTracker`]: reference-position bookkeeping for a one-axis drag.
//! - [`VelocityEstimator`]: a pluggable strategy that turns timestamped pointer
//!   samples into a release velocity, with [`WindowedVelocity`] as the default.
//! - [`FlingPhysics`] and [`Fling`]: spline-based deceleration that is stepped
//!   once per host frame and stops at hard walls instead of bouncing.
//!
//! Nothing here owns a clock or a thread. Hosts pass timestamps in
//! milliseconds and decide when to step.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_fling::{FlingPhysics, VelocityEstimator, WindowedVelocity};
//!
//! let mut velocity = WindowedVelocity::default();
//! velocity.add_sample(0, 100.0);
//! velocity.add_sample(16, 140.0);
//! velocity.add_sample(32, 180.0);
//! let v = velocity.estimate_release_velocity();
//! assert_eq!(v, 2500.0);
//!
//! let physics = FlingPhysics::default();
//! let mut fling = physics.start(180.0, v, 0.0..=1_000.0, 32);
//! let mut now = 32;
//! while let Some(pos) = fling.step(physics.spline(), now) {
//!     assert!((0.0..=1_000.0).contains(&pos));
//!     now += 16;
//! }
//! assert_eq!(fling.current(), fling.final_position());
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod drag;
mod fling;
mod velocity;

pub use drag::DragTracker;
pub use fling::{Fling, FlingPhysics, FlingSpline};
pub use velocity::{ASSUME_STOPPED_MS, DEFAULT_WINDOW_MS, VelocityEstimator, WindowedVelocity};
