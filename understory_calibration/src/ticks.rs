// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::iter::FusedIterator;

/// One graduation mark.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    /// Tick number counted from the scale's first tick.
    pub index: u32,
    /// Horizontal position in view pixels.
    pub position_px: f64,
    /// Whether this is a major (labelled, taller) tick.
    pub is_major: bool,
}

/// Lazy iterator over the ticks of a [`crate::ScaleModel`].
///
/// Yields ticks from index 0 while `offset + index * spacing` stays below the
/// scale's span plus one spacing, so the last cell always gets its trailing
/// tick.
#[derive(Clone, Debug)]
pub struct Ticks {
    offset_px: f64,
    spacing_px: f64,
    limit_px: f64,
    major_interval: u32,
    next: Option<u32>,
}

impl Ticks {
    pub(crate) fn new(
        offset_px: f64,
        spacing_px: f64,
        total_span_px: f64,
        major_interval: u32,
    ) -> Self {
        Self {
            offset_px,
            spacing_px,
            limit_px: total_span_px + spacing_px,
            major_interval: major_interval.max(1),
            next: Some(0),
        }
    }
}

impl Iterator for Ticks {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        let index = self.next?;
        let position_px = self.offset_px + f64::from(index) * self.spacing_px;
        if position_px >= self.limit_px || position_px.is_nan() {
            self.next = None;
            return None;
        }
        self.next = index.checked_add(1);
        Some(Tick {
            index,
            position_px,
            is_major: index % self.major_interval == 0,
        })
    }
}

impl FusedIterator for Ticks {}
