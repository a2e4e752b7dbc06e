//! # Carousel State
//!
//! Live carousels, one per mounted mobile comparison view.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Frontend Event           Command                   State Change        │
//! │  ──────────────           ───────                   ────────────        │
//! │                                                                         │
//! │  View mounts ────────────► open_carousel() ───────► insert(new state)  │
//! │  touchstart ─────────────► carousel_gesture_start ► record start       │
//! │  touchend ───────────────► carousel_gesture_end ──► next()/previous()  │
//! │  Dot tapped ─────────────► carousel_select_indicator ► go_to(i)        │
//! │  View unmounts ──────────► close_carousel() ──────► remove(id)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use uuid::Uuid;

use pawfinder_core::{CarouselAction, CarouselState, CarouselView, Dog};

use crate::config::ViewConfig;
use crate::error::SessionResult;
use crate::state::registry::InstanceRegistry;

/// View snapshot plus the dog to render.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselSnapshot {
    pub view: CarouselView,
    pub current: Option<Dog>,
}

fn snapshot(state: &CarouselState<Dog>) -> CarouselSnapshot {
    CarouselSnapshot {
        view: state.view(),
        current: state.current().cloned(),
    }
}

#[derive(Debug, Clone)]
pub struct CarouselStore {
    carousels: InstanceRegistry<CarouselState<Dog>>,
    swipe_threshold: f32,
}

impl CarouselStore {
    pub fn new(config: &ViewConfig) -> Self {
        CarouselStore {
            carousels: InstanceRegistry::new("carousel"),
            swipe_threshold: config.carousel.swipe_threshold_px,
        }
    }

    pub fn swipe_threshold(&self) -> f32 {
        self.swipe_threshold
    }

    /// Mounts a carousel over `dogs`, positioned at the first one.
    pub fn open(&self, dogs: Vec<Dog>) -> SessionResult<(Uuid, CarouselSnapshot)> {
        let state = CarouselState::new(dogs).with_swipe_threshold(self.swipe_threshold);
        let snap = snapshot(&state);
        let id = self.carousels.insert(state)?;
        Ok((id, snap))
    }

    pub fn apply(&self, id: Uuid, action: CarouselAction) -> SessionResult<CarouselSnapshot> {
        self.carousels
            .update(id, |state| state.reduce(action), snapshot)
    }

    pub fn get(&self, id: Uuid) -> SessionResult<CarouselSnapshot> {
        self.carousels.with(id, snapshot)
    }

    pub fn close(&self, id: Uuid) -> SessionResult<()> {
        self.carousels.remove(id).map(|_| ())
    }

    pub fn open_count(&self) -> SessionResult<usize> {
        self.carousels.len()
    }
}

impl Default for CarouselStore {
    fn default() -> Self {
        Self::new(&ViewConfig::default())
    }
}
