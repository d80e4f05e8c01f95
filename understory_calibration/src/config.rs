// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolved ruler configuration and its validation.

use core::fmt;

use kurbo::Vec2;
use peniko::Color;

/// Error returned when a [`ScaleConfig`] cannot describe a ruler.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// `end_value` is not greater than `start_value`.
    EmptyRange {
        /// Configured first value.
        start: i32,
        /// Configured last value.
        end: i32,
    },
    /// `unit_spacing_px` is zero, negative, or not finite.
    InvalidSpacing(f64),
    /// `major_tick_interval` is zero.
    ZeroMajorInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRange { start, end } => write!(
                f,
                "scale end value {end} must be greater than start value {start}"
            ),
            Self::InvalidSpacing(spacing) => {
                write!(f, "unit spacing must be a positive number of pixels, got {spacing}")
            }
            Self::ZeroMajorInterval => f.write_str("major tick interval must be at least 1"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Colours used by [`crate::paint`].
#[derive(Clone, Copy, Debug)]
pub struct ScaleStyle {
    /// Major tick fill.
    pub major_tick: Color,
    /// Minor tick fill.
    pub minor_tick: Color,
    /// Major tick labels.
    pub label: Color,
    /// Marker line and triangle.
    pub marker: Color,
    /// Value readout under the marker.
    pub readout: Color,
}

impl Default for ScaleStyle {
    fn default() -> Self {
        Self {
            major_tick: Color::from_rgb8(0x00, 0x00, 0xff),
            minor_tick: Color::from_rgb8(0x00, 0x00, 0x00),
            label: Color::from_rgb8(0x44, 0x44, 0x44),
            marker: Color::from_rgb8(0xff, 0xff, 0x00),
            readout: Color::from_rgb8(0xff, 0xff, 0xff),
        }
    }
}

/// Ruler parameters, already resolved to device pixels by the host.
///
/// Use [`ScaleConfig::default`] and override fields, then hand it to
/// [`crate::ScaleModel::new`], which validates it.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
    /// First value of the scale.
    pub start_value: i32,
    /// Last value of the scale; must be greater than `start_value`.
    pub end_value: i32,
    /// Pixels per scale unit (distance between adjacent ticks).
    pub unit_spacing_px: f64,
    /// Height of a minor tick.
    pub minor_tick_height_px: f64,
    /// Height of a major tick.
    pub major_tick_height_px: f64,
    /// Every `major_tick_interval`-th tick is major.
    pub major_tick_interval: u32,
    /// Drag sensitivity in `[0, 1]`.
    pub move_speed: f64,
    /// Width available on the device, used to pick the default marker position.
    ///
    /// Zero means unknown, in which case the marker centres on the viewport.
    pub available_width_px: f64,
    /// Width of a tick rectangle.
    pub tick_width_px: f64,
    /// Offset of a major tick's label from the tick's foot.
    pub label_offset: Vec2,
    /// Colours.
    pub style: ScaleStyle,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            start_value: 0,
            end_value: 100,
            unit_spacing_px: 5.0,
            minor_tick_height_px: 16.0,
            major_tick_height_px: 26.0,
            major_tick_interval: 10,
            move_speed: 1.0,
            available_width_px: 0.0,
            tick_width_px: 2.0,
            label_offset: Vec2::new(10.0, 5.0),
            style: ScaleStyle::default(),
        }
    }
}

impl ScaleConfig {
    /// Convenience constructor for a range and spacing; other fields take defaults.
    #[must_use]
    pub fn new(start_value: i32, end_value: i32, unit_spacing_px: f64) -> Self {
        Self {
            start_value,
            end_value,
            unit_spacing_px,
            ..Self::default()
        }
    }

    /// Checks the invariants a [`crate::ScaleModel`] relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.end_value <= self.start_value {
            return Err(ConfigError::EmptyRange {
                start: self.start_value,
                end: self.end_value,
            });
        }
        if !self.unit_spacing_px.is_finite() || self.unit_spacing_px <= 0.0 {
            return Err(ConfigError::InvalidSpacing(self.unit_spacing_px));
        }
        if self.major_tick_interval == 0 {
            return Err(ConfigError::ZeroMajorInterval);
        }
        Ok(())
    }

    /// Number of scale units between `start_value` and `end_value`.
    #[must_use]
    pub fn unit_count(&self) -> f64 {
        f64::from(self.end_value) - f64::from(self.start_value)
    }

    /// Pixel length of the whole scale.
    #[must_use]
    pub fn total_span_px(&self) -> f64 {
        self.unit_count() * self.unit_spacing_px
    }
}
