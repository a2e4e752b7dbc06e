//! # Validation Module
//!
//! Input validation utilities for Pawfinder.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Listing API (upstream)                                       │
//! │  └── Dog records arrive already shaped, but fields may be missing      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Session command (Rust)                                       │
//! │  └── THIS MODULE: ids, names, image URLs                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: State machines                                               │
//! │  └── Never fail: clamp indexes, degrade images                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pawfinder_core::validation::{parse_image_source, validate_dog_name, ImageSource};
//!
//! assert!(validate_dog_name("Biscuit").is_ok());
//! assert!(matches!(
//!     parse_image_source("https://images.example.com/dog.jpg"),
//!     Ok(ImageSource::Remote(_))
//! ));
//! assert!(parse_image_source("not a url").is_err());
//! ```

use url::Url;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest image URL we will try to load.
pub const MAX_IMAGE_URL_LEN: usize = 2048;

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a dog display name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 100 characters
pub fn validate_dog_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a record id (UUID string).
///
/// ## Example
/// ```rust
/// use pawfinder_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

/// Validates an adoption fee in cents.
pub fn validate_fee_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "adoption fee".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Image Source
// =============================================================================

/// A loadable image source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Absolute http(s) URL.
    Remote(Url),
    /// Root-relative path served by the site itself (e.g. `/img/dog.png`).
    Local(String),
}

/// Parses a caller-supplied image `src`.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Must not be empty or longer than [`MAX_IMAGE_URL_LEN`]
/// - Absolute URLs must be `http` or `https` with a host
/// - Root-relative paths (`/...`, but not `//...`) are accepted as local
pub fn parse_image_source(src: &str) -> ValidationResult<ImageSource> {
    let src = src.trim();

    if src.is_empty() {
        return Err(ValidationError::Required {
            field: "src".to_string(),
        });
    }

    if src.len() > MAX_IMAGE_URL_LEN {
        return Err(ValidationError::TooLong {
            field: "src".to_string(),
            max: MAX_IMAGE_URL_LEN,
        });
    }

    if src.starts_with('/') && !src.starts_with("//") {
        return Ok(ImageSource::Local(src.to_string()));
    }

    let url = Url::parse(src).map_err(|e| ValidationError::InvalidFormat {
        field: "src".to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ValidationError::InvalidFormat {
            field: "src".to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(ValidationError::InvalidFormat {
            field: "src".to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(ImageSource::Remote(url))
}
