// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// How a horizontal drag is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum InteractionMode {
    /// The marker follows the pointer over a fixed scale.
    MarkerFollow,
    /// The scale scrolls under a fixed marker.
    #[default]
    ViewportScroll,
}

/// The position that drags and flings currently move.
///
/// The payload is in pixels: the marker's distance from the left edge for
/// [`ActivePosition::MarkerAt`], and the pixel offset of the scale's first
/// tick from the left edge for [`ActivePosition::ViewportAt`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActivePosition {
    /// Marker position while in [`InteractionMode::MarkerFollow`].
    MarkerAt(f64),
    /// Viewport offset while in [`InteractionMode::ViewportScroll`].
    ViewportAt(f64),
}

impl ActivePosition {
    /// Pixel payload.
    #[must_use]
    pub fn px(self) -> f64 {
        match self {
            Self::MarkerAt(px) | Self::ViewportAt(px) => px,
        }
    }

    /// The mode this position belongs to.
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        match self {
            Self::MarkerAt(_) => InteractionMode::MarkerFollow,
            Self::ViewportAt(_) => InteractionMode::ViewportScroll,
        }
    }

    /// Builds the position for `mode` at `px`.
    #[must_use]
    pub fn for_mode(mode: InteractionMode, px: f64) -> Self {
        match mode {
            InteractionMode::MarkerFollow => Self::MarkerAt(px),
            InteractionMode::ViewportScroll => Self::ViewportAt(px),
        }
    }

    /// Same variant, new payload.
    #[must_use]
    pub fn with_px(self, px: f64) -> Self {
        Self::for_mode(self.mode(), px)
    }
}
