//! # Comparison Commands
//!
//! Side-by-side comparison of 2-3 dogs. The desktop layout renders the
//! table; the mobile layout pages through the same dogs with the carousel
//! opened alongside it.

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use pawfinder_core::{build_comparison, ComparisonTable, Dog};

use crate::commands::carousel::{get_carousel, open_carousel, CarouselResponse};
use crate::error::{ApiError, SessionError};
use crate::state::{CarouselStore, ComparisonEntry, ComparisonStore};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResponse {
    pub id: Uuid,
    pub table: ComparisonTable,
    /// Mobile carousel over the same dogs, in column order.
    pub carousel: CarouselResponse,
}

/// Builds the table for `dogs` and opens its carousel.
///
/// ## Errors
/// - `INVALID_COMPARISON` for fewer than 2 or more than 3 dogs, or duplicates
/// - `VALIDATION_ERROR` for records with a bad id or name
pub fn open_comparison(
    comparisons: &ComparisonStore,
    carousels: &CarouselStore,
    dogs: Vec<Dog>,
) -> Result<ComparisonResponse, ApiError> {
    let table = build_comparison(&dogs).map_err(|e| {
        warn!(count = dogs.len(), "Rejected comparison: {}", e);
        ApiError::from(e)
    })?;

    let carousel = open_carousel(carousels, dogs)?;
    let id = comparisons.insert(ComparisonEntry {
        table: table.clone(),
        carousel_id: carousel.id,
    })?;

    info!(%id, carousel_id = %carousel.id, dogs = table.dog_ids.len(), "Comparison opened");
    Ok(ComparisonResponse {
        id,
        table,
        carousel,
    })
}

pub fn get_comparison(
    comparisons: &ComparisonStore,
    carousels: &CarouselStore,
    id: Uuid,
) -> Result<ComparisonResponse, ApiError> {
    let entry = comparisons.get(id)?;
    let carousel = get_carousel(carousels, entry.carousel_id)?;
    Ok(ComparisonResponse {
        id,
        table: entry.table,
        carousel,
    })
}

/// Closes the comparison and its carousel.
pub fn close_comparison(
    comparisons: &ComparisonStore,
    carousels: &CarouselStore,
    id: Uuid,
) -> Result<(), ApiError> {
    let entry = comparisons.remove(id)?;
    match carousels.close(entry.carousel_id) {
        Ok(()) => {}
        // Already closed on its own
        Err(SessionError::UnknownInstance { .. }) => {
            debug!(carousel_id = %entry.carousel_id, "Comparison carousel already closed");
        }
        Err(e) => return Err(e.into()),
    }
    info!(%id, "Comparison closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::carousel::carousel_next;
    use crate::error::ErrorCode;

    fn dog(i: usize, breed: &str) -> Dog {
        let mut dog = Dog::new(format!("550e8400-e29b-41d4-a716-44665544000{i}"), format!("Dog {i}"));
        dog.breed = Some(breed.to_string());
        dog
    }

    #[test]
    fn test_open_comparison_with_carousel() {
        let comparisons = ComparisonStore::default();
        let carousels = CarouselStore::default();

        let opened = open_comparison(
            &comparisons,
            &carousels,
            vec![dog(0, "Beagle"), dog(1, "Beagle"), dog(2, "Poodle")],
        )
        .unwrap();
        assert_eq!(opened.table.dog_names, vec!["Dog 0", "Dog 1", "Dog 2"]);
        assert!(opened.table.row("breed").unwrap().differs);
        assert_eq!(opened.carousel.view.len, 3);

        carousel_next(&carousels, opened.carousel.id).unwrap();
        let fetched = get_comparison(&comparisons, &carousels, opened.id).unwrap();
        assert_eq!(fetched.carousel.view.current_index, 1);
    }

    #[test]
    fn test_rejects_bad_sets() {
        let comparisons = ComparisonStore::default();
        let carousels = CarouselStore::default();

        let err = open_comparison(&comparisons, &carousels, vec![dog(0, "Beagle")]).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidComparison);

        let err = open_comparison(&comparisons, &carousels, vec![dog(0, "Beagle"), dog(0, "Pug")])
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidComparison);

        let mut nameless = dog(1, "Pug");
        nameless.name = "  ".to_string();
        let err = open_comparison(&comparisons, &carousels, vec![dog(0, "Beagle"), nameless])
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        // Nothing left behind by rejected opens
        assert_eq!(carousels.open_count().unwrap(), 0);
    }

    #[test]
    fn test_close_comparison_closes_carousel() {
        let comparisons = ComparisonStore::default();
        let carousels = CarouselStore::default();
        let opened =
            open_comparison(&comparisons, &carousels, vec![dog(0, "Beagle"), dog(1, "Pug")])
                .unwrap();

        close_comparison(&comparisons, &carousels, opened.id).unwrap();
        assert_eq!(carousels.open_count().unwrap(), 0);
        assert_eq!(
            get_comparison(&comparisons, &carousels, opened.id).unwrap_err().code,
            ErrorCode::NotFound
        );
    }
}
