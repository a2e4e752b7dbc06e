//! # Gesture Module
//!
//! Classifies a finished touch drag as a swipe or a tap.
//!
//! ## Direction Convention
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   finger moves ◄──────────  (delta <= -threshold)  SwipeLeft  → next   │
//! │   finger moves ──────────►  (delta >= +threshold)  SwipeRight → prev   │
//! │   anything shorter                                  None       → tap    │
//! │                                                                         │
//! │   delta = end_x - start_x        (vertical travel is not considered)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Result of classifying a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum Gesture {
    /// Travel below threshold: a tap, not a swipe.
    None,
    /// Finger moved right-to-left. Advances to the next item.
    SwipeLeft,
    /// Finger moved left-to-right. Returns to the previous item.
    SwipeRight,
}

/// A coordinate reported by the host touch/pointer source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GesturePoint {
    pub x: f32,
    pub y: f32,
}

impl GesturePoint {
    pub const fn new(x: f32, y: f32) -> Self {
        GesturePoint { x, y }
    }
}

/// Classifies a drag from `(start_x, start_y)` to `(end_x, end_y)`.
///
/// A drag whose horizontal travel is exactly `threshold` counts as a swipe.
///
/// ## Example
/// ```rust
/// use pawfinder_core::gesture::{classify_gesture, Gesture};
///
/// assert_eq!(classify_gesture(200.0, 10.0, 150.0, 12.0, 50.0), Gesture::SwipeLeft);
/// assert_eq!(classify_gesture(200.0, 10.0, 251.0, 40.0, 50.0), Gesture::SwipeRight);
/// assert_eq!(classify_gesture(200.0, 10.0, 180.0, 10.0, 50.0), Gesture::None);
/// ```
pub fn classify_gesture(
    start_x: f32,
    _start_y: f32,
    end_x: f32,
    _end_y: f32,
    threshold: f32,
) -> Gesture {
    let delta = end_x - start_x;

    // NaN deltas fall through both comparisons
    if delta <= -threshold {
        Gesture::SwipeLeft
    } else if delta >= threshold {
        Gesture::SwipeRight
    } else {
        Gesture::None
    }
}

/// Start and latest points of an in-progress drag.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureTracker {
    start: Option<GesturePoint>,
    last: Option<GesturePoint>,
}

impl GestureTracker {
    /// Records a touch start, discarding any unfinished drag.
    pub fn start(self, x: f32, y: f32) -> Self {
        let point = GesturePoint::new(x, y);
        GestureTracker {
            start: Some(point),
            last: Some(point),
        }
    }

    /// Records the latest point. Ignored when no drag is in progress.
    pub fn moved(self, x: f32, y: f32) -> Self {
        match self.start {
            Some(start) => GestureTracker {
                start: Some(start),
                last: Some(GesturePoint::new(x, y)),
            },
            None => self,
        }
    }

    /// Finishes the drag and classifies it.
    ///
    /// Returns the cleared tracker alongside the gesture. A finish without
    /// a recorded start classifies as [`Gesture::None`].
    pub fn finish(self, x: f32, y: f32, threshold: f32) -> (Self, Gesture) {
        let gesture = match self.start {
            Some(start) => classify_gesture(start.x, start.y, x, y, threshold),
            None => Gesture::None,
        };
        (GestureTracker::default(), gesture)
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    pub fn start_point(&self) -> Option<GesturePoint> {
        self.start
    }

    pub fn last_point(&self) -> Option<GesturePoint> {
        self.last
    }
}
