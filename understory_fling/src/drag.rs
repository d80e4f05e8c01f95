// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag tracking along a single axis.
//!
//! ## Usage
//!
//! 1) Call [`DragTracker::start`] with the pointer position on press.
//! 2) On each move, call [`DragTracker::update`] to get the delta since the previous position.
//! 3) Optionally query [`DragTracker::total_offset`] for the distance from the press position.
//! 4) Call [`DragTracker::end`] on release or cancel.
//!
//! ```
//! use understory_fling::DragTracker;
//!
//! let mut drag = DragTracker::default();
//! drag.start(10.0);
//! assert_eq!(drag.update(17.0), Some(7.0));
//! assert_eq!(drag.update(12.0), Some(-5.0));
//! assert_eq!(drag.total_offset(12.0), Some(2.0));
//! ```

/// Tracks the reference position of a one-dimensional drag.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragTracker {
    start: Option<f64>,
    last: Option<f64>,
}

impl DragTracker {
    /// Begin a drag at `pos`, replacing any drag in progress.
    pub fn start(&mut self, pos: f64) {
        self.start = Some(pos);
        self.last = Some(pos);
    }

    /// Advance the reference to `pos`, returning the movement since the previous position.
    ///
    /// Returns `None` when no drag is active.
    pub fn update(&mut self, pos: f64) -> Option<f64> {
        self.start?;
        let delta = self.last.map(|last| pos - last);
        self.last = Some(pos);
        delta
    }

    /// Distance from the press position to `pos`.
    #[must_use]
    pub fn total_offset(&self, pos: f64) -> Option<f64> {
        self.start.map(|start| pos - start)
    }

    /// The most recent reference position.
    #[must_use]
    pub fn last_position(&self) -> Option<f64> {
        self.last
    }

    /// End the drag and forget both positions.
    pub fn end(&mut self) {
        self.start = None;
        self.last = None;
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.start.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::DragTracker;

    #[test]
    fn fresh_tracker_is_idle() {
        let mut drag = DragTracker::default();
        assert!(!drag.is_dragging());
        assert_eq!(drag.update(5.0), None);
        assert_eq!(drag.last_position(), None);
    }

    #[test]
    fn deltas_are_incremental() {
        let mut drag = DragTracker::default();
        drag.start(0.0);
        assert_eq!(drag.update(5.0), Some(5.0));
        assert_eq!(drag.update(8.0), Some(3.0));
        assert_eq!(drag.update(6.5), Some(-1.5));
        assert_eq!(drag.last_position(), Some(6.5));
        assert_eq!(drag.total_offset(6.5), Some(6.5));
    }

    #[test]
    fn restart_replaces_reference() {
        let mut drag = DragTracker::default();
        drag.start(0.0);
        drag.update(40.0);

        drag.start(100.0);
        assert_eq!(drag.update(103.0), Some(3.0));
        assert_eq!(drag.total_offset(110.0), Some(10.0));
    }

    #[test]
    fn end_resets() {
        let mut drag = DragTracker::default();
        drag.start(1.0);
        drag.end();
        assert!(!drag.is_dragging());
        assert_eq!(drag.total_offset(3.0), None);

        // Ending twice is harmless.
        drag.end();
        assert!(!drag.is_dragging());
    }
}
