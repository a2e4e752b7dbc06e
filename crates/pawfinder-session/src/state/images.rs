//! # Image Slot State
//!
//! Live image slots (card photos, organization logos) and the queue of
//! load/error notifications mirrored to the caller.
//!
//! ## Notification Pass-Through
//! ```text
//! host <img> ── load/error ──► image_loaded / image_failed
//!                                   │
//!                                   ├──► chain transition (this store)
//!                                   │
//!                                   └──► ImageNotification queued, unchanged
//!                                              │
//!                     caller telemetry ◄── drain_image_notifications()
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use pawfinder_core::{CdnRules, ImageEvent, ImageLoadChain, ImageView};

use crate::config::ViewConfig;
use crate::error::{SessionError, SessionResult};
use crate::state::registry::InstanceRegistry;

/// Notifications kept for a caller that never drains. Oldest go first.
pub const MAX_QUEUED_NOTIFICATIONS: usize = 1024;

/// Which host event happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    Load,
    Error,
}

/// A host load/error event, as reported, for caller-level telemetry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageNotification {
    pub slot_id: Uuid,
    pub kind: NotificationKind,
    /// URL that was displayed when the event arrived.
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ImageSlotStore {
    slots: InstanceRegistry<ImageLoadChain>,
    notifications: Arc<Mutex<VecDeque<ImageNotification>>>,
    rules: CdnRules,
    fallback_src: String,
}

impl ImageSlotStore {
    pub fn new(config: &ViewConfig) -> Self {
        ImageSlotStore {
            slots: InstanceRegistry::new("image slot"),
            notifications: Arc::new(Mutex::new(VecDeque::new())),
            rules: config.cdn_rules(),
            fallback_src: config.images.fallback_src.clone(),
        }
    }

    /// Mounts a slot for `src`. A missing or malformed `src` starts at the
    /// terminal fallback.
    ///
    /// `fallback_src` replaces the configured placeholder for this slot only.
    pub fn open(
        &self,
        src: Option<&str>,
        alt: &str,
        fallback_src: Option<&str>,
    ) -> SessionResult<(Uuid, ImageView)> {
        let fallback = fallback_src.unwrap_or(self.fallback_src.as_str());
        let chain = ImageLoadChain::new(src, alt, self.rules.clone()).with_fallback(fallback);
        let view = chain.view();
        let id = self.slots.insert(chain)?;
        Ok((id, view))
    }

    /// Applies a host event and queues the matching notification.
    ///
    /// The notification is queued under the slot lock, so the queue order
    /// is the order in which events were applied.
    pub fn apply(&self, id: Uuid, event: ImageEvent) -> SessionResult<ImageView> {
        let kind = match event {
            ImageEvent::Loaded => Some(NotificationKind::Load),
            ImageEvent::Failed => Some(NotificationKind::Error),
            ImageEvent::SourceChanged { .. } => None,
        };

        let mut queued = Ok(());
        let view = self.slots.update(
            id,
            |chain| {
                if let Some(kind) = kind {
                    // The URL in flight is the one the event refers to
                    queued = self.enqueue(ImageNotification {
                        slot_id: id,
                        kind,
                        url: chain.current_src().map(str::to_string),
                    });
                }
                chain.reduce(event)
            },
            ImageLoadChain::view,
        )?;
        queued?;
        Ok(view)
    }

    fn enqueue(&self, notification: ImageNotification) -> SessionResult<()> {
        let mut queue = self
            .notifications
            .lock()
            .map_err(|_| SessionError::StatePoisoned("image notifications"))?;
        if queue.len() >= MAX_QUEUED_NOTIFICATIONS {
            queue.pop_front();
            warn!(
                max = MAX_QUEUED_NOTIFICATIONS,
                "Image notification queue full, dropped oldest"
            );
        }
        queue.push_back(notification);
        Ok(())
    }

    pub fn get(&self, id: Uuid) -> SessionResult<ImageView> {
        self.slots.with(id, ImageLoadChain::view)
    }

    pub fn close(&self, id: Uuid) -> SessionResult<()> {
        self.slots.remove(id).map(|_| ())
    }

    /// Takes every queued notification, oldest first.
    pub fn drain_notifications(&self) -> SessionResult<Vec<ImageNotification>> {
        let mut queue = self
            .notifications
            .lock()
            .map_err(|_| SessionError::StatePoisoned("image notifications"))?;
        Ok(queue.drain(..).collect())
    }

    pub fn open_count(&self) -> SessionResult<usize> {
        self.slots.len()
    }
}

impl Default for ImageSlotStore {
    fn default() -> Self {
        Self::new(&ViewConfig::default())
    }
}
