//! # Image Commands
//!
//! Progressive image loading for dog photos and organization logos.
//!
//! ## Fallback Flow
//! ```text
//! open_dog_image(dog)
//!      │
//!      ▼
//! candidate 0 (CDN optimized) ── image_failed ──► candidate 1 (CDN stripped)
//!      │                                              │
//!      │ image_loaded                                 │ image_failed
//!      ▼                                              ▼
//!   frozen                          terminal fallback ── image_failed ──► glyph
//! ```
//!
//! A source already carrying a CDN directive is candidate 0 as given; a
//! plain URL on a known CDN host gets the directive added first, with the
//! plain URL as candidate 1. Generic sources have a single candidate.
//!
//! Every load/error event is also queued for caller telemetry; see
//! [`drain_image_notifications`].

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use pawfinder_core::{DisplayStage, Dog, ImageEvent, ImageView, Organization};

use crate::error::ApiError;
use crate::state::{ImageNotification, ImageSlotStore};

/// Image slot response: the slot id plus what to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSlotResponse {
    pub id: Uuid,
    pub view: ImageView,
}

/// Mounts an image slot for an arbitrary source.
///
/// ## Arguments
/// * `src` - Source URL; `None`, empty or malformed starts at the terminal fallback
/// * `alt` - Alt text, kept for every stage
/// * `fallback_src` - Placeholder for this slot; `None` uses the configured one
pub fn open_image_slot(
    images: &ImageSlotStore,
    src: Option<&str>,
    alt: &str,
    fallback_src: Option<&str>,
) -> Result<ImageSlotResponse, ApiError> {
    let (id, view) = images.open(src, alt, fallback_src)?;
    if view.stage == DisplayStage::TerminalFallback {
        debug!(%id, ?src, "Image slot opened without a usable source");
    } else {
        debug!(%id, src = ?view.src, "Image slot opened");
    }
    Ok(ImageSlotResponse { id, view })
}

/// Card photo for `dog`.
pub fn open_dog_image(images: &ImageSlotStore, dog: &Dog) -> Result<ImageSlotResponse, ApiError> {
    open_image_slot(images, dog.primary_image_url.as_deref(), &dog.image_alt(), None)
}

/// Logo for an organization card.
pub fn open_organization_logo(
    images: &ImageSlotStore,
    organization: &Organization,
) -> Result<ImageSlotResponse, ApiError> {
    open_image_slot(
        images,
        organization.logo_url.as_deref(),
        &organization.logo_alt(),
        None,
    )
}

/// Host `load` event.
pub fn image_loaded(images: &ImageSlotStore, id: Uuid) -> Result<ImageView, ApiError> {
    let view = images.apply(id, ImageEvent::Loaded)?;
    debug!(%id, src = ?view.src, "Image loaded");
    Ok(view)
}

/// Host `error` event: advances to the next fallback stage.
pub fn image_failed(images: &ImageSlotStore, id: Uuid) -> Result<ImageView, ApiError> {
    let view = images.apply(id, ImageEvent::Failed)?;
    match view.stage {
        DisplayStage::Glyph => warn!(%id, "Image fell back to glyph"),
        stage => debug!(%id, ?stage, src = ?view.src, "Image advanced to next fallback"),
    }
    Ok(view)
}

/// The source prop changed. Same value is a no-op; anything else restarts
/// the chain.
pub fn image_source_changed(
    images: &ImageSlotStore,
    id: Uuid,
    src: Option<String>,
) -> Result<ImageView, ApiError> {
    let view = images.apply(id, ImageEvent::SourceChanged { src })?;
    debug!(%id, src = ?view.src, "Image source changed");
    Ok(view)
}

pub fn get_image_slot(images: &ImageSlotStore, id: Uuid) -> Result<ImageView, ApiError> {
    Ok(images.get(id)?)
}

pub fn close_image_slot(images: &ImageSlotStore, id: Uuid) -> Result<(), ApiError> {
    images.close(id)?;
    debug!(%id, "Image slot closed");
    Ok(())
}

/// Returns and clears the queued load/error notifications.
pub fn drain_image_notifications(
    images: &ImageSlotStore,
) -> Result<Vec<ImageNotification>, ApiError> {
    let drained = images.drain_notifications()?;
    if !drained.is_empty() {
        info!(count = drained.len(), "Image notifications drained");
    }
    Ok(drained)
}
