// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::config::{ConfigError, ScaleConfig};
use crate::position::{ActivePosition, InteractionMode};
use crate::render::ScaleSnapshot;
use crate::ticks::Ticks;

/// Positional state of a calibration ruler.
///
/// `ScaleModel` owns the validated [`ScaleConfig`], the viewport size, and
/// two pixel positions: the marker and the viewport offset. The
/// [`InteractionMode`] decides which of them is the [`ActivePosition`] that
/// drags and flings move; the other keeps its last value so switching modes
/// never resets anything.
///
/// Drags are applied through [`ScaleModel::apply_drag`], which always leaves
/// the moved position on a tick. Fling frames are written unmodified through
/// [`ScaleModel::apply_fling_step`]; the marker handed to the renderer is
/// clamped and tick-aligned regardless.
#[derive(Clone, Debug)]
pub struct ScaleModel {
    config: ScaleConfig,
    total_span_px: f64,
    move_speed: f64,
    active: ActivePosition,
    /// Last value of the position that is not active.
    parked_px: f64,
    viewport_width_px: f64,
    viewport_height_px: f64,
}

impl ScaleModel {
    /// Validates `config` and builds a model in [`InteractionMode::ViewportScroll`].
    ///
    /// Until the host reports a size, the viewport is assumed to be
    /// `available_width_px` wide. The viewport offset starts at zero and the
    /// marker at its default (see [`ScaleModel::on_size_changed`]).
    pub fn new(config: ScaleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let total_span_px = config.total_span_px();
        let move_speed = sanitize_move_speed(config.move_speed);
        let viewport_width_px = sanitize_extent(config.available_width_px);
        let mut model = Self {
            config,
            total_span_px,
            move_speed,
            active: ActivePosition::ViewportAt(0.0),
            parked_px: 0.0,
            viewport_width_px,
            viewport_height_px: 0.0,
        };
        model.set_marker(model.default_marker());
        Ok(model)
    }

    /// The validated configuration.
    #[must_use]
    pub fn config(&self) -> &ScaleConfig {
        &self.config
    }

    /// Pixel length of the whole scale.
    #[must_use]
    pub fn total_span_px(&self) -> f64 {
        self.total_span_px
    }

    /// Pixels per scale unit.
    #[must_use]
    pub fn unit_spacing_px(&self) -> f64 {
        self.config.unit_spacing_px
    }

    /// Current viewport width.
    #[must_use]
    pub fn viewport_width_px(&self) -> f64 {
        self.viewport_width_px
    }

    /// Current viewport height.
    #[must_use]
    pub fn viewport_height_px(&self) -> f64 {
        self.viewport_height_px
    }

    /// Current interaction mode.
    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.active.mode()
    }

    /// The position drags and flings currently move.
    #[must_use]
    pub fn active_position(&self) -> ActivePosition {
        self.active
    }

    /// Stored marker position, whether or not it is active.
    #[must_use]
    pub fn marker_position_px(&self) -> f64 {
        match self.active {
            ActivePosition::MarkerAt(px) => px,
            ActivePosition::ViewportAt(_) => self.parked_px,
        }
    }

    /// Stored viewport offset, whether or not it is active.
    #[must_use]
    pub fn viewport_offset_px(&self) -> f64 {
        match self.active {
            ActivePosition::ViewportAt(px) => px,
            ActivePosition::MarkerAt(_) => self.parked_px,
        }
    }

    /// Marker position as drawn: clamped to the viewport and tick-aligned.
    #[must_use]
    pub fn display_marker_px(&self) -> f64 {
        self.snap(self.marker_position_px().clamp(0.0, self.viewport_width_px))
    }

    /// Switches the interaction mode. Stored positions are not touched.
    pub fn set_interaction_mode(&mut self, mode: InteractionMode) {
        if self.active.mode() == mode {
            return;
        }
        let previous = self.active.px();
        self.active = ActivePosition::for_mode(mode, self.parked_px);
        self.parked_px = previous;
    }

    /// Drag sensitivity in `[0, 1]`.
    #[must_use]
    pub fn move_speed(&self) -> f64 {
        self.move_speed
    }

    /// Sets the drag sensitivity; values outside `[0, 1]` are clamped.
    pub fn set_move_speed(&mut self, factor: f64) {
        self.move_speed = sanitize_move_speed(factor);
    }

    /// Records a new viewport size and recomputes the default marker position.
    ///
    /// The marker centres on the scale's own midpoint when the whole scale is
    /// shorter than the available width, and on the viewport's midpoint
    /// otherwise.
    pub fn on_size_changed(&mut self, width_px: f64, height_px: f64) {
        self.viewport_width_px = sanitize_extent(width_px);
        self.viewport_height_px = sanitize_extent(height_px);
        self.set_marker(self.default_marker());
    }

    /// Moves the active position by a pointer delta.
    ///
    /// The delta is scaled by the move speed. A moved marker is clamped to the
    /// viewport and then snapped onto a tick. A moved viewport offset is snapped
    /// but not clamped.
    pub fn apply_drag(&mut self, delta_px: f64) {
        if !delta_px.is_finite() {
            log::warn!("calibration: ignoring non-finite drag delta {delta_px}");
            return;
        }
        let moved = self.active.px() + delta_px * self.move_speed;
        let px = match self.active {
            ActivePosition::MarkerAt(_) => self.snap(moved.clamp(0.0, self.viewport_width_px)),
            ActivePosition::ViewportAt(_) => self.snap(moved),
        };
        self.active = self.active.with_px(px);
    }

    /// Writes a fling frame into the active position as-is.
    pub fn apply_fling_step(&mut self, px: f64) {
        if !px.is_finite() {
            log::warn!("calibration: ignoring non-finite fling position {px}");
            return;
        }
        self.active = self.active.with_px(px);
    }

    /// Brings the marker back onto a tick inside the viewport.
    ///
    /// Called when a fling comes to rest.
    pub fn settle(&mut self) {
        self.set_marker(self.display_marker_px());
    }

    /// Scale reading under the marker, in units from the first tick.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "marker is bounded by the viewport, far inside i64"
    )]
    pub fn current_value_at_marker(&self) -> i64 {
        libm::round(self.display_marker_px() / self.config.unit_spacing_px) as i64
    }

    /// View pixel of the tick `units` away from the scale's first tick.
    #[must_use]
    pub fn unit_to_view_x(&self, units: f64) -> f64 {
        self.viewport_offset_px() + units * self.config.unit_spacing_px
    }

    /// Scale units from the first tick at view pixel `x`.
    #[must_use]
    pub fn view_to_unit_x(&self, x: f64) -> f64 {
        (x - self.viewport_offset_px()) / self.config.unit_spacing_px
    }

    /// View pixel of the scale value `value`, counted from `start_value`.
    #[must_use]
    pub fn value_to_px(&self, value: f64) -> f64 {
        self.unit_to_view_x(value - f64::from(self.config.start_value))
    }

    /// Scale value at view pixel `x`.
    #[must_use]
    pub fn px_to_value(&self, x: f64) -> f64 {
        self.view_to_unit_x(x) + f64::from(self.config.start_value)
    }

    /// Lazily enumerates the ticks to draw for the current viewport offset.
    #[must_use]
    pub fn ticks(&self) -> Ticks {
        Ticks::new(
            self.viewport_offset_px(),
            self.config.unit_spacing_px,
            self.total_span_px,
            self.config.major_tick_interval,
        )
    }

    /// Read-only state for a drawing routine.
    #[must_use]
    pub fn snapshot(&self) -> ScaleSnapshot {
        let (major_ticks, minor_ticks): (Vec<_>, Vec<_>) = self.ticks().partition(|t| t.is_major);
        ScaleSnapshot {
            major_ticks,
            minor_ticks,
            mode: self.interaction_mode(),
            marker_px: self.display_marker_px(),
            viewport_offset_px: self.viewport_offset_px(),
            value_at_marker: self.current_value_at_marker(),
            viewport_width_px: self.viewport_width_px,
            viewport_height_px: self.viewport_height_px,
        }
    }

    /// Rounds toward zero onto a multiple of the unit spacing.
    fn snap(&self, px: f64) -> f64 {
        px - px % self.config.unit_spacing_px
    }

    fn default_marker(&self) -> f64 {
        let mid = if self.config.available_width_px > self.total_span_px {
            self.total_span_px / 2.0
        } else {
            self.viewport_width_px / 2.0
        };
        self.snap(mid.clamp(0.0, self.viewport_width_px))
    }

    fn set_marker(&mut self, px: f64) {
        match self.active {
            ActivePosition::MarkerAt(_) => self.active = ActivePosition::MarkerAt(px),
            ActivePosition::ViewportAt(_) => self.parked_px = px,
        }
    }
}

fn sanitize_move_speed(factor: f64) -> f64 {
    if factor.is_nan() {
        log::warn!("calibration: move speed is NaN, using 1.0");
        return 1.0;
    }
    if !(0.0..=1.0).contains(&factor) {
        log::warn!("calibration: move speed {factor} clamped to [0, 1]");
    }
    factor.clamp(0.0, 1.0)
}

fn sanitize_extent(px: f64) -> f64 {
    if px.is_finite() && px >= 0.0 {
        px
    } else {
        log::warn!("calibration: invalid extent {px}, using 0");
        0.0
    }
}
