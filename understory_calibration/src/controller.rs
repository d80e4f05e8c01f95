// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer and frame driven interaction for a [`ScaleModel`].
//!
//! ## Usage
//!
//! 1) Forward pointer down/move/up/cancel events with their X coordinate and a
//!    millisecond timestamp.
//! 2) While [`InteractionController::is_animating`] is `true`, call
//!    [`InteractionController::on_animation_tick`] once per frame.
//! 3) Whenever [`InteractionController::take_redraw_request`] returns `true`,
//!    repaint from [`InteractionController::snapshot`] or
//!    [`InteractionController::paint`].

use understory_fling::{DragTracker, Fling, FlingPhysics, VelocityEstimator, WindowedVelocity};

use crate::config::{ConfigError, ScaleConfig};
use crate::model::ScaleModel;
use crate::position::InteractionMode;
use crate::render::{self, DrawSurface, ScaleSnapshot};

/// Thresholds and physics for touch handling, in device pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Moves no larger than this are treated as jitter and not applied.
    pub touch_slop_px: f64,
    /// Releases faster than this (px/s) start a fling.
    pub min_fling_velocity: f64,
    /// Release velocities are clamped to this magnitude (px/s).
    pub max_fling_velocity: f64,
    /// Trailing window used by the default velocity estimator.
    pub velocity_window_ms: u64,
    /// Screen density relative to 160 dpi; denser screens decelerate harder in pixels.
    pub density: f64,
    /// Fling friction.
    pub friction: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop_px: 8.0,
            min_fling_velocity: 50.0,
            max_fling_velocity: 8_000.0,
            velocity_window_ms: understory_fling::DEFAULT_WINDOW_MS,
            density: 1.0,
            friction: FlingPhysics::DEFAULT_FRICTION,
        }
    }
}

/// What the controller is doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum GesturePhase {
    /// No pointer is down and nothing is moving.
    #[default]
    Idle,
    /// A pointer is down.
    Dragging,
    /// A fling is decelerating.
    Flinging,
}

/// Drives a [`ScaleModel`] from pointer events and animation ticks.
///
/// The velocity strategy is pluggable through `V`; by default it is a
/// [`WindowedVelocity`] over [`GestureConfig::velocity_window_ms`].
#[derive(Clone, Debug)]
pub struct InteractionController<V = WindowedVelocity> {
    model: ScaleModel,
    gesture: GestureConfig,
    physics: FlingPhysics,
    drag: DragTracker,
    velocity: V,
    fling: Option<Fling>,
    phase: GesturePhase,
    redraw: bool,
}

impl InteractionController<WindowedVelocity> {
    /// Builds a controller over a fresh model.
    pub fn new(config: ScaleConfig, gesture: GestureConfig) -> Result<Self, ConfigError> {
        let velocity = WindowedVelocity::new(gesture.velocity_window_ms);
        Ok(Self::from_model(ScaleModel::new(config)?, gesture, velocity))
    }
}

impl<V: VelocityEstimator> InteractionController<V> {
    /// Builds a controller over a fresh model with a custom velocity estimator.
    pub fn with_estimator(
        config: ScaleConfig,
        gesture: GestureConfig,
        velocity: V,
    ) -> Result<Self, ConfigError> {
        Ok(Self::from_model(ScaleModel::new(config)?, gesture, velocity))
    }

    /// Wraps an existing model.
    pub fn from_model(model: ScaleModel, gesture: GestureConfig, velocity: V) -> Self {
        Self {
            model,
            physics: FlingPhysics::new(gesture.friction, gesture.density),
            gesture,
            drag: DragTracker::default(),
            velocity,
            fling: None,
            phase: GesturePhase::Idle,
            redraw: true,
        }
    }

    /// The driven model.
    #[must_use]
    pub fn model(&self) -> &ScaleModel {
        &self.model
    }

    /// Gesture thresholds in use.
    #[must_use]
    pub fn gesture_config(&self) -> &GestureConfig {
        &self.gesture
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Whether the host should keep calling [`Self::on_animation_tick`].
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.phase == GesturePhase::Flinging
    }

    /// Returns `true` once per requested redraw.
    pub fn take_redraw_request(&mut self) -> bool {
        core::mem::take(&mut self.redraw)
    }

    /// Read-only state for drawing.
    #[must_use]
    pub fn snapshot(&self) -> ScaleSnapshot {
        self.model.snapshot()
    }

    /// Paints the current state onto `surface`.
    pub fn paint(&self, surface: &mut impl DrawSurface) {
        render::paint(&self.model, surface);
    }

    /// The host view was resized.
    pub fn on_size_changed(&mut self, width_px: f64, height_px: f64) {
        self.model.on_size_changed(width_px, height_px);
        self.redraw = true;
    }

    /// Switches between marker-follow and viewport-scroll.
    pub fn set_interaction_mode(&mut self, mode: InteractionMode) {
        self.model.set_interaction_mode(mode);
        self.redraw = true;
    }

    /// Sets drag sensitivity in `[0, 1]`.
    pub fn set_move_speed(&mut self, factor: f64) {
        self.model.set_move_speed(factor);
    }

    /// A pointer went down. Any fling stops immediately.
    pub fn on_pointer_down(&mut self, x: f64, time_ms: u64) {
        if let Some(mut fling) = self.fling.take() {
            fling.abort();
            self.model.settle();
            self.redraw = true;
            log::debug!("calibration: fling interrupted at {}", fling.current());
        }
        log::debug!("calibration: drag started at {x}");
        self.drag.start(x);
        self.velocity.reset();
        self.velocity.add_sample(time_ms, x);
        self.phase = GesturePhase::Dragging;
    }

    /// The pointer moved while down.
    pub fn on_pointer_move(&mut self, x: f64, time_ms: u64) {
        if self.phase != GesturePhase::Dragging {
            return;
        }
        self.velocity.add_sample(time_ms, x);
        let Some(delta) = self.drag.update(x) else {
            return;
        };
        if delta.abs() > self.gesture.touch_slop_px {
            self.model.apply_drag(delta);
            self.redraw = true;
        }
    }

    /// The pointer was released.
    pub fn on_pointer_up(&mut self, x: f64, time_ms: u64) {
        self.release(x, time_ms);
    }

    /// The platform cancelled the gesture. Treated like a release.
    pub fn on_pointer_cancel(&mut self, x: f64, time_ms: u64) {
        self.release(x, time_ms);
    }

    /// Advances a running fling to `time_ms`.
    ///
    /// Returns whether the fling is still running afterwards.
    pub fn on_animation_tick(&mut self, time_ms: u64) -> bool {
        let Some(fling) = self.fling.as_mut() else {
            return false;
        };
        if let Some(px) = fling.step(self.physics.spline(), time_ms) {
            log::trace!("calibration: fling frame at {px}");
            self.model.apply_fling_step(px);
            self.redraw = true;
        }
        if fling.is_finished() {
            self.fling = None;
            self.model.settle();
            self.phase = GesturePhase::Idle;
            log::debug!("calibration: fling finished");
        }
        self.is_animating()
    }

    fn release(&mut self, x: f64, time_ms: u64) {
        if self.phase != GesturePhase::Dragging {
            return;
        }
        self.velocity.add_sample(time_ms, x);
        self.drag.end();

        let mut velocity = self.velocity.estimate_release_velocity();
        let max = self.gesture.max_fling_velocity.abs();
        if max.is_finite() {
            velocity = velocity.clamp(-max, max);
        }
        let velocity = libm::trunc(velocity);
        if velocity.is_nan() || velocity.abs() <= self.gesture.min_fling_velocity {
            self.phase = GesturePhase::Idle;
            log::debug!("calibration: released at {velocity} px/s, no fling");
            return;
        }

        let start = libm::floor(self.model.active_position().px() + 0.5);
        let end = libm::floor(self.model.total_span_px() + 0.5);
        self.fling = Some(self.physics.start(start, velocity, 0.0..=end, time_ms));
        self.phase = GesturePhase::Flinging;
        self.redraw = true;
    }
}
