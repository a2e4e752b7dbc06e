//! # Carousel Module
//!
//! Bounded one-item-at-a-time navigator used by the mobile comparison view.
//!
//! ## State Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Carousel Navigation (N = 3)                          │
//! │                                                                         │
//! │        previous()            previous()                                 │
//! │   ┌──────────────┐      ┌──────────────┐                                │
//! │   ▼              │      ▼              │                                │
//! │ ┌───┐  next()  ┌───┐  next()  ┌───┐                                    │
//! │ │ 0 │ ───────► │ 1 │ ───────► │ 2 │ ──► next() is a no-op              │
//! │ └───┘          └───┘          └───┘                                     │
//! │   ▲                                                                     │
//! │   └── previous() at 0 is a no-op                                        │
//! │                                                                         │
//! │  Inputs that move the index:                                            │
//! │  • next() / previous()         (arrow controls, SwipeLeft/SwipeRight)   │
//! │  • go_to(i)                    (clamped to [0, N-1], never wraps)       │
//! │  • select_indicator(i)         (progress dot, no swipe threshold)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every transition consumes the state and returns the next one, so the
//! same type works as a reducer and in plain unit tests.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::gesture::{Gesture, GestureTracker};
use crate::SWIPE_THRESHOLD_PX;

// =============================================================================
// Actions
// =============================================================================

/// Every input the carousel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CarouselAction {
    Next,
    Previous,
    GoTo { index: i64 },
    SelectIndicator { index: usize },
    GestureStart { x: f32, y: f32 },
    GestureMove { x: f32, y: f32 },
    GestureEnd { x: f32, y: f32 },
}

// =============================================================================
// Carousel State
// =============================================================================

/// Navigator over an ordered list of opaque records.
///
/// ## Invariants
/// - `current_index` is always within `[0, N-1]` (and `0` when empty)
/// - The item list is fixed for the lifetime of the state
#[derive(Debug, Clone)]
pub struct CarouselState<T> {
    items: Vec<T>,
    current_index: usize,
    gesture: GestureTracker,
    swipe_threshold: f32,
}

impl<T> CarouselState<T> {
    /// Creates a carousel positioned at the first item.
    ///
    /// An empty list is accepted: it has no current item and no indicators.
    pub fn new(items: Vec<T>) -> Self {
        CarouselState {
            items,
            current_index: 0,
            gesture: GestureTracker::default(),
            swipe_threshold: SWIPE_THRESHOLD_PX,
        }
    }

    /// Overrides the minimum swipe distance.
    ///
    /// Zero, negative and non-finite values are ignored: with them every
    /// tap would classify as a swipe.
    pub fn with_swipe_threshold(mut self, threshold: f32) -> Self {
        if threshold.is_finite() && threshold > 0.0 {
            self.swipe_threshold = threshold;
        }
        self
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Moves to `index`, clamped to the list bounds.
    pub fn go_to(mut self, index: i64) -> Self {
        if let Some(last) = self.items.len().checked_sub(1) {
            self.current_index = index.clamp(0, last as i64) as usize;
        }
        self
    }

    /// Moves one item forward. No-op on the last item.
    pub fn next(self) -> Self {
        let target = self.current_index as i64 + 1;
        self.go_to(target)
    }

    /// Moves one item back. No-op on the first item.
    pub fn previous(self) -> Self {
        let target = self.current_index as i64 - 1;
        self.go_to(target)
    }

    /// Progress-dot tap. Same as [`go_to`](Self::go_to), and never subject
    /// to the swipe threshold.
    pub fn select_indicator(self, index: usize) -> Self {
        let target = i64::try_from(index).unwrap_or(i64::MAX);
        self.go_to(target)
    }

    // -------------------------------------------------------------------------
    // Touch Gestures
    // -------------------------------------------------------------------------

    pub fn handle_gesture_start(mut self, x: f32, y: f32) -> Self {
        self.gesture = self.gesture.start(x, y);
        self
    }

    /// Records the latest touch point. Never changes the index.
    pub fn handle_gesture_move(mut self, x: f32, y: f32) -> Self {
        self.gesture = self.gesture.moved(x, y);
        self
    }

    /// Finishes the drag: a left swipe advances, a right swipe goes back,
    /// anything shorter than the threshold is a tap.
    pub fn handle_gesture_end(mut self, x: f32, y: f32) -> Self {
        let (tracker, gesture) = self.gesture.finish(x, y, self.swipe_threshold);
        self.gesture = tracker;

        match gesture {
            Gesture::SwipeLeft => self.next(),
            Gesture::SwipeRight => self.previous(),
            Gesture::None => self,
        }
    }

    /// Applies one action.
    pub fn reduce(self, action: CarouselAction) -> Self {
        match action {
            CarouselAction::Next => self.next(),
            CarouselAction::Previous => self.previous(),
            CarouselAction::GoTo { index } => self.go_to(index),
            CarouselAction::SelectIndicator { index } => self.select_indicator(index),
            CarouselAction::GestureStart { x, y } => self.handle_gesture_start(x, y),
            CarouselAction::GestureMove { x, y } => self.handle_gesture_move(x, y),
            CarouselAction::GestureEnd { x, y } => self.handle_gesture_end(x, y),
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The single item to render, `None` when the list is empty.
    pub fn current(&self) -> Option<&T> {
        self.items.get(self.current_index)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn swipe_threshold(&self) -> f32 {
        self.swipe_threshold
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_active()
    }

    /// Progress dots. Empty unless there are at least two items.
    pub fn indicators(&self) -> Vec<Indicator> {
        if self.items.len() <= 1 {
            return Vec::new();
        }

        (0..self.items.len())
            .map(|index| Indicator {
                index,
                active: index == self.current_index,
            })
            .collect()
    }

    /// Snapshot for the frontend.
    pub fn view(&self) -> CarouselView {
        let len = self.items.len();
        CarouselView {
            current_index: self.current_index,
            len,
            indicators: self.indicators(),
            can_go_previous: self.current_index > 0,
            can_go_next: self.current_index + 1 < len,
        }
    }
}

// =============================================================================
// View Types
// =============================================================================

/// One progress dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Indicator {
    pub index: usize,
    pub active: bool,
}

/// What the carousel component renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CarouselView {
    pub current_index: usize,
    pub len: usize,
    pub indicators: Vec<Indicator>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn three() -> CarouselState<&'static str> {
        CarouselState::new(vec!["Biscuit", "Mango", "Pepper"])
    }

    fn swipe(state: CarouselState<&'static str>, dx: f32) -> CarouselState<&'static str> {
        state
            .handle_gesture_start(200.0, 100.0)
            .handle_gesture_move(200.0 + dx / 2.0, 100.0)
            .handle_gesture_end(200.0 + dx, 100.0)
    }

    #[test]
    fn test_starts_at_zero() {
        let carousel = three();
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(carousel.current(), Some(&"Biscuit"));
    }

    #[test]
    fn test_go_to_clamps() {
        assert_eq!(three().go_to(7).current_index(), 2);
        assert_eq!(three().go_to(-4).current_index(), 0);
        assert_eq!(three().go_to(1).current_index(), 1);
    }

    #[test]
    fn test_idempotent_at_bounds() {
        assert_eq!(three().previous().current_index(), 0);
        assert_eq!(three().go_to(2).next().current_index(), 2);
    }

    fn arb_action() -> impl Strategy<Value = CarouselAction> {
        prop_oneof![
            Just(CarouselAction::Next),
            Just(CarouselAction::Previous),
            any::<i64>().prop_map(|index| CarouselAction::GoTo { index }),
            (0usize..12).prop_map(|index| CarouselAction::SelectIndicator { index }),
            (-400.0f32..400.0, -400.0f32..400.0)
                .prop_map(|(x, y)| CarouselAction::GestureStart { x, y }),
            (-400.0f32..400.0, -400.0f32..400.0)
                .prop_map(|(x, y)| CarouselAction::GestureMove { x, y }),
            (-400.0f32..400.0, -400.0f32..400.0)
                .prop_map(|(x, y)| CarouselAction::GestureEnd { x, y }),
        ]
    }

    proptest! {
        #[test]
        fn prop_index_stays_in_bounds(
            n in 0usize..8,
            actions in proptest::collection::vec(arb_action(), 0..60),
        ) {
            let mut carousel = CarouselState::new((0..n).collect::<Vec<_>>());
            for action in actions {
                carousel = carousel.reduce(action);
                prop_assert!(carousel.current_index() < n.max(1));

                let view = carousel.view();
                if n <= 1 {
                    prop_assert!(view.indicators.is_empty());
                } else {
                    prop_assert_eq!(view.indicators.len(), n);
                    prop_assert_eq!(view.indicators.iter().filter(|i| i.active).count(), 1);
                }
            }
        }

        #[test]
        fn prop_move_never_navigates(
            x in -400.0f32..400.0,
            y in -400.0f32..400.0,
        ) {
            let carousel = three().go_to(1).handle_gesture_start(0.0, 0.0);
            prop_assert_eq!(carousel.handle_gesture_move(x, y).current_index(), 1);
        }
    }

    #[test]
    fn test_swipe_left_three_times_does_not_wrap() {
        let carousel = swipe(three(), -60.0);
        assert_eq!(carousel.current_index(), 1);
        let carousel = swipe(carousel, -50.0);
        assert_eq!(carousel.current_index(), 2);
        let carousel = swipe(carousel, -80.0);
        assert_eq!(carousel.current_index(), 2);
    }

    #[test]
    fn test_swipe_right_goes_back() {
        let carousel = swipe(three().go_to(2), 75.0);
        assert_eq!(carousel.current_index(), 1);
    }

    #[test]
    fn test_short_drag_is_tap() {
        let carousel = swipe(three(), -49.0);
        assert_eq!(carousel.current_index(), 0);
        assert!(!carousel.is_dragging());
    }

    #[test]
    fn test_custom_threshold() {
        let carousel = swipe(three().with_swipe_threshold(100.0), -60.0);
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn test_invalid_threshold_keeps_default() {
        for threshold in [0.0, -20.0, f32::NAN, f32::INFINITY] {
            let carousel = three().with_swipe_threshold(threshold);
            assert_eq!(carousel.swipe_threshold(), SWIPE_THRESHOLD_PX);
            // A tap stays a tap
            assert_eq!(swipe(carousel, 0.0).current_index(), 0);
        }
    }

    #[test]
    fn test_gesture_move_has_no_side_effect() {
        let carousel = three()
            .handle_gesture_start(300.0, 0.0)
            .handle_gesture_move(0.0, 0.0);
        assert_eq!(carousel.current_index(), 0);
        assert!(carousel.is_dragging());
    }

    #[test]
    fn test_indicators_mark_current() {
        let view = three().next().view();
        assert_eq!(view.indicators.len(), 3);
        assert!(view.indicators[1].active);
        assert_eq!(view.indicators.iter().filter(|i| i.active).count(), 1);
        assert!(view.can_go_previous);
        assert!(view.can_go_next);
    }

    #[test]
    fn test_select_indicator_bypasses_threshold() {
        let carousel = three().select_indicator(2);
        assert_eq!(carousel.current_index(), 2);
        let carousel = carousel.select_indicator(usize::MAX);
        assert_eq!(carousel.current_index(), 2);
    }

    #[test]
    fn test_single_item() {
        let carousel = CarouselState::new(vec!["Solo"]);
        assert!(carousel.indicators().is_empty());

        let carousel = swipe(carousel, -200.0);
        let carousel = swipe(carousel, 200.0);
        assert_eq!(carousel.current_index(), 0);

        let view = carousel.view();
        assert!(!view.can_go_next);
        assert!(!view.can_go_previous);
    }

    #[test]
    fn test_empty_renders_nothing() {
        let carousel: CarouselState<&str> = CarouselState::new(Vec::new());
        let carousel = carousel.next().go_to(3).previous();
        assert_eq!(carousel.current(), None);
        assert_eq!(carousel.current_index(), 0);
        assert!(carousel.view().indicators.is_empty());
    }

    #[test]
    fn test_reduce_matches_methods() {
        let actions = [
            CarouselAction::GestureStart { x: 300.0, y: 0.0 },
            CarouselAction::GestureMove { x: 250.0, y: 0.0 },
            CarouselAction::GestureEnd { x: 200.0, y: 0.0 },
            CarouselAction::Next,
            CarouselAction::Previous,
            CarouselAction::GoTo { index: 99 },
            CarouselAction::SelectIndicator { index: 0 },
        ];

        let mut carousel = three();
        let mut seen = Vec::new();
        for action in actions {
            carousel = carousel.reduce(action);
            seen.push(carousel.current_index());
        }
        assert_eq!(seen, vec![0, 0, 1, 2, 1, 2, 0]);
    }

    #[test]
    fn test_action_json_shape() {
        let action: CarouselAction =
            serde_json::from_str(r#"{"type":"goTo","index":-1}"#).unwrap();
        assert_eq!(action, CarouselAction::GoTo { index: -1 });
    }
}
