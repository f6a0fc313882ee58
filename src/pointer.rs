//! Pointer position and idle tracking.

#[cfg(test)]
#[path = "pointer_test.rs"]
mod pointer_test;

/// A point in CSS pixels, relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Latest pointer position and the time it last moved.
///
/// Raw coordinates are stored as delivered; the last event always wins.
#[derive(Debug, Clone, Copy)]
pub struct PointerTracker {
    position: Option<Point>,
    last_move_ms: f64,
}

impl PointerTracker {
    /// A tracker with no known position whose idle clock starts at `now_ms`.
    #[must_use]
    pub fn new(now_ms: f64) -> Self {
        Self { position: None, last_move_ms: now_ms }
    }

    /// Record a pointer-move event.
    pub fn on_move(&mut self, point: Point, now_ms: f64) {
        self.position = Some(point);
        self.last_move_ms = now_ms;
    }

    /// The last reported pointer position, if the pointer has moved yet.
    #[must_use]
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Timestamp of the most recent move (or of construction).
    #[must_use]
    pub fn last_move_ms(&self) -> f64 {
        self.last_move_ms
    }

    /// Milliseconds since the pointer last moved, never negative.
    #[must_use]
    pub fn idle_ms(&self, now_ms: f64) -> f64 {
        (now_ms - self.last_move_ms).max(0.0)
    }
}
