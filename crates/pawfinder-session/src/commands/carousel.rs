//! # Carousel Commands
//!
//! Navigation commands for the mobile comparison carousel.
//!
//! None of these fail for out-of-range input: indexes clamp and swipes
//! past either end are ignored. The only error is an unknown id.

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use pawfinder_core::{CarouselAction, CarouselView, Dog};

use crate::error::ApiError;
use crate::state::{CarouselSnapshot, CarouselStore};

/// Carousel response: what to render and where the dots are.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselResponse {
    pub id: Uuid,
    pub view: CarouselView,
    /// The one dog to show, `None` for an empty carousel.
    pub current: Option<Dog>,
}

impl CarouselResponse {
    fn new(id: Uuid, snapshot: CarouselSnapshot) -> Self {
        CarouselResponse {
            id,
            view: snapshot.view,
            current: snapshot.current,
        }
    }
}

/// Mounts a carousel over `dogs`.
///
/// ## Returns
/// The new carousel positioned on the first dog. An empty list is
/// accepted and renders nothing.
pub fn open_carousel(carousels: &CarouselStore, dogs: Vec<Dog>) -> Result<CarouselResponse, ApiError> {
    let len = dogs.len();
    let (id, snapshot) = carousels.open(dogs)?;
    info!(%id, len, "Carousel opened");
    Ok(CarouselResponse::new(id, snapshot))
}

/// Applies any carousel action. The named commands below wrap this.
pub fn carousel_apply(
    carousels: &CarouselStore,
    id: Uuid,
    action: CarouselAction,
) -> Result<CarouselResponse, ApiError> {
    let snapshot = carousels.apply(id, action)?;
    debug!(%id, ?action, index = snapshot.view.current_index, "Carousel action applied");
    Ok(CarouselResponse::new(id, snapshot))
}

/// Arrow control: next dog.
pub fn carousel_next(carousels: &CarouselStore, id: Uuid) -> Result<CarouselResponse, ApiError> {
    carousel_apply(carousels, id, CarouselAction::Next)
}

/// Arrow control: previous dog.
pub fn carousel_previous(carousels: &CarouselStore, id: Uuid) -> Result<CarouselResponse, ApiError> {
    carousel_apply(carousels, id, CarouselAction::Previous)
}

/// Jumps to `index`, clamped.
pub fn carousel_go_to(
    carousels: &CarouselStore,
    id: Uuid,
    index: i64,
) -> Result<CarouselResponse, ApiError> {
    carousel_apply(carousels, id, CarouselAction::GoTo { index })
}

/// Progress dot tapped.
pub fn carousel_select_indicator(
    carousels: &CarouselStore,
    id: Uuid,
    index: usize,
) -> Result<CarouselResponse, ApiError> {
    carousel_apply(carousels, id, CarouselAction::SelectIndicator { index })
}

/// `touchstart`.
pub fn carousel_gesture_start(
    carousels: &CarouselStore,
    id: Uuid,
    x: f32,
    y: f32,
) -> Result<CarouselResponse, ApiError> {
    carousel_apply(carousels, id, CarouselAction::GestureStart { x, y })
}

/// `touchmove`.
pub fn carousel_gesture_move(
    carousels: &CarouselStore,
    id: Uuid,
    x: f32,
    y: f32,
) -> Result<CarouselResponse, ApiError> {
    carousel_apply(carousels, id, CarouselAction::GestureMove { x, y })
}

/// `touchend`: swipes left/right past the threshold navigate.
pub fn carousel_gesture_end(
    carousels: &CarouselStore,
    id: Uuid,
    x: f32,
    y: f32,
) -> Result<CarouselResponse, ApiError> {
    carousel_apply(carousels, id, CarouselAction::GestureEnd { x, y })
}

pub fn get_carousel(carousels: &CarouselStore, id: Uuid) -> Result<CarouselResponse, ApiError> {
    let snapshot = carousels.get(id)?;
    Ok(CarouselResponse::new(id, snapshot))
}

/// View unmounted.
pub fn close_carousel(carousels: &CarouselStore, id: Uuid) -> Result<(), ApiError> {
    carousels.close(id)?;
    info!(%id, "Carousel closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn dogs(n: usize) -> Vec<Dog> {
        (0..n)
            .map(|i| Dog::new(format!("550e8400-e29b-41d4-a716-44665544000{i}"), format!("Dog {i}")))
            .collect()
    }

    fn swipe(store: &CarouselStore, id: Uuid, dx: f32) -> CarouselResponse {
        carousel_gesture_start(store, id, 200.0, 300.0).unwrap();
        carousel_gesture_move(store, id, 200.0 + dx / 2.0, 300.0).unwrap();
        carousel_gesture_end(store, id, 200.0 + dx, 300.0).unwrap()
    }

    #[test]
    fn test_open_and_navigate() {
        let store = CarouselStore::default();
        let opened = open_carousel(&store, dogs(3)).unwrap();
        assert_eq!(opened.view.current_index, 0);
        assert_eq!(opened.current.as_ref().map(|d| d.name.as_str()), Some("Dog 0"));

        let id = opened.id;
        assert_eq!(carousel_next(&store, id).unwrap().view.current_index, 1);
        assert_eq!(carousel_go_to(&store, id, 40).unwrap().view.current_index, 2);
        assert_eq!(carousel_previous(&store, id).unwrap().view.current_index, 1);
        assert_eq!(
            carousel_select_indicator(&store, id, 0).unwrap().view.current_index,
            0
        );
    }

    #[test]
    fn test_swipes_clamp_at_end() {
        let store = CarouselStore::default();
        let id = open_carousel(&store, dogs(3)).unwrap().id;

        assert_eq!(swipe(&store, id, -60.0).view.current_index, 1);
        assert_eq!(swipe(&store, id, -60.0).view.current_index, 2);
        let last = swipe(&store, id, -60.0);
        assert_eq!(last.view.current_index, 2);
        assert!(!last.view.can_go_next);
    }

    #[test]
    fn test_single_dog_has_no_dots() {
        let store = CarouselStore::default();
        let opened = open_carousel(&store, dogs(1)).unwrap();
        assert!(opened.view.indicators.is_empty());
        assert_eq!(swipe(&store, opened.id, -300.0).view.current_index, 0);
    }

    #[test]
    fn test_unknown_and_closed_ids() {
        let store = CarouselStore::default();
        let err = carousel_next(&store, Uuid::new_v4()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let id = open_carousel(&store, dogs(2)).unwrap().id;
        close_carousel(&store, id).unwrap();
        assert_eq!(get_carousel(&store, id).unwrap_err().code, ErrorCode::NotFound);
        assert_eq!(store.open_count().unwrap(), 0);
    }
}
