// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing a ruler onto a host-provided surface.
//!
//! Rendering is a pure function of [`ScaleModel`] state. The host implements
//! [`DrawSurface`] over whatever canvas it has, and [`paint`] issues, in order:
//!
//! 1. one filled rectangle per tick, hanging from the top edge, plus a label
//!    next to every major tick,
//! 2. the marker: a vertical line across the full height and a downward
//!    triangle at the top,
//! 3. the value readout, centred horizontally near the bottom edge.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::{BezPath, Line, Point, Rect};
use peniko::Color;

use crate::model::ScaleModel;
use crate::position::InteractionMode;
use crate::ticks::Tick;

/// Stroke width of the marker line.
const MARKER_LINE_WIDTH: f64 = 1.0;

/// Minimal drawing interface the ruler renders through.
pub trait DrawSurface {
    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Fill a closed path.
    fn fill_path(&mut self, path: &BezPath, color: Color);

    /// Stroke a line segment.
    fn stroke_line(&mut self, line: Line, width: f64, color: Color);

    /// Advance width of `text` in the surface's label font.
    fn measure_text(&mut self, text: &str) -> f64;

    /// Distance from the baseline to the bottom of the label font.
    fn text_descent(&mut self) -> f64 {
        0.0
    }

    /// Draw `text` with its baseline starting at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, color: Color);
}

/// Read-only state consumed by a drawing routine.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleSnapshot {
    /// Major ticks, in index order.
    pub major_ticks: Vec<Tick>,
    /// Minor ticks, in index order.
    pub minor_ticks: Vec<Tick>,
    /// Mode at the time of the snapshot.
    pub mode: InteractionMode,
    /// Marker position, clamped to the viewport and tick-aligned.
    pub marker_px: f64,
    /// Pixel offset of the first tick.
    pub viewport_offset_px: f64,
    /// Scale reading under the marker.
    pub value_at_marker: i64,
    /// Viewport width.
    pub viewport_width_px: f64,
    /// Viewport height.
    pub viewport_height_px: f64,
}

/// Text shown under the marker.
#[must_use]
pub fn readout_text(value: i64) -> String {
    format!("Value: {value}")
}

/// Paints the ruler described by `model` onto `surface`.
pub fn paint(model: &ScaleModel, surface: &mut impl DrawSurface) {
    let config = model.config();
    let style = &config.style;
    let half_width = config.tick_width_px / 2.0;

    for tick in model.ticks() {
        let x = tick.position_px;
        if tick.is_major {
            let height = config.major_tick_height_px;
            let rect = Rect::new(x - half_width, 0.0, x + half_width, height);
            surface.fill_rect(rect, style.major_tick);
            let origin = Point::new(x, height) + config.label_offset;
            surface.draw_text(&tick.index.to_string(), origin, style.label);
        } else {
            let rect = Rect::new(x - half_width, 0.0, x + half_width, config.minor_tick_height_px);
            surface.fill_rect(rect, style.minor_tick);
        }
    }

    let height = model.viewport_height_px();
    let marker = model.display_marker_px();
    surface.stroke_line(
        Line::new((marker, 0.0), (marker, height)),
        MARKER_LINE_WIDTH,
        style.marker,
    );
    surface.fill_path(&marker_triangle(marker, config.minor_tick_height_px), style.marker);

    let text = readout_text(model.current_value_at_marker());
    let text_width = surface.measure_text(&text);
    let baseline = height - 2.0 * surface.text_descent();
    let origin = Point::new(model.viewport_width_px() / 2.0 - text_width / 2.0, baseline);
    surface.draw_text(&text, origin, style.readout);
}

/// Downward triangle whose tip sits on the marker line.
///
/// The triangle is two thirds of a minor tick tall and twice as wide.
#[must_use]
pub fn marker_triangle(marker_px: f64, minor_tick_height_px: f64) -> BezPath {
    let size = minor_tick_height_px / 3.0 * 2.0;
    let mut path = BezPath::new();
    path.move_to((marker_px - size, 0.0));
    path.line_to((marker_px + size, 0.0));
    path.line_to((marker_px, size));
    path.close_path();
    path
}
