//! # Config Commands

use tracing::debug;

use crate::config::ViewConfig;
use crate::error::ApiError;

/// Returns the active view configuration, so the frontend can match its
/// own placeholder and optimizer settings.
pub fn get_config(config: &ViewConfig) -> Result<ViewConfig, ApiError> {
    debug!("Getting view config");
    Ok(config.clone())
}
