// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_calibration --heading-base-level=0

//! Understory Calibration: a headless, touch-driven ruler.
//!
//! A calibration ruler is a horizontal scale of evenly spaced ticks with a
//! marker that reads off a value. This crate models its interaction core:
//!
//! - [`ScaleModel`]: validated configuration, the mapping between scale units
//!   and view pixels, and the marker / viewport positions with their snapping
//!   and clamping rules.
//! - [`InteractionController`]: turns pointer events and per-frame ticks into
//!   drags and decelerating flings on the model, and raises a redraw request.
//! - [`paint`]: renders the current state through a small [`DrawSurface`]
//!   trait using Kurbo geometry and Peniko colours.
//!
//! Drags act on one of two positions, chosen by [`InteractionMode`]:
//!
//! - [`InteractionMode::MarkerFollow`] moves the marker over a fixed scale.
//!   The marker is always clamped to the viewport and sits on a tick.
//! - [`InteractionMode::ViewportScroll`] scrolls the scale under the marker.
//!   The offset is tick-aligned after every drag but not clamped; flings stay
//!   within `[0, total_span_px]`.
//!
//! It does **not** parse style attributes, convert density-independent units,
//! or negotiate layout. Hosts resolve those into a [`ScaleConfig`] and call
//! [`InteractionController::on_size_changed`].
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_calibration::{GestureConfig, GesturePhase, InteractionController, ScaleConfig};
//!
//! let config = ScaleConfig::new(0, 100, 10.0);
//! let mut ruler = InteractionController::new(config, GestureConfig::default()).unwrap();
//! ruler.on_size_changed(400.0, 80.0);
//!
//! // Drag the scale 23 px to the right; it lands on a tick.
//! ruler.on_pointer_down(100.0, 0);
//! ruler.on_pointer_move(123.0, 500);
//! ruler.on_pointer_up(123.0, 1_000);
//! assert_eq!(ruler.model().viewport_offset_px(), 20.0);
//! assert_eq!(ruler.phase(), GesturePhase::Idle);
//!
//! let snapshot = ruler.snapshot();
//! assert_eq!(snapshot.value_at_marker, 20);
//! ```
//!
//! Construction fails for an empty range:
//!
//! ```rust
//! use understory_calibration::{ConfigError, ScaleConfig, ScaleModel};
//!
//! let err = ScaleModel::new(ScaleConfig::new(50, 10, 10.0)).unwrap_err();
//! assert_eq!(err, ConfigError::EmptyRange { start: 50, end: 10 });
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod controller;
mod model;
mod position;
mod render;
mod ticks;

pub use config::{ConfigError, ScaleConfig, ScaleStyle};
pub use controller::{GestureConfig, GesturePhase, InteractionController};
pub use model::ScaleModel;
pub use position::{ActivePosition, InteractionMode};
pub use render::{DrawSurface, ScaleSnapshot, marker_triangle, paint, readout_text};
pub use ticks::{Tick, Ticks};
