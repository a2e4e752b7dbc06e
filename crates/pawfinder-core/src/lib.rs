//! # pawfinder-core: Pure View Logic for Pawfinder
//!
//! This crate holds the behavioral state machines behind the adoption
//! site's listing cards and comparison views, as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pawfinder Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (React)                             │   │
//! │  │    DogCard ──► CompareMobile ──► LazyImage ──► ProgressDots    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ host bridge                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    pawfinder-session                            │   │
//! │  │    open_carousel, carousel_gesture_end, image_failed, etc.     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pawfinder-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌─────────────┐ ┌───────────┐ │   │
//! │  │   │ carousel  │  │  gesture  │  │ image_chain │ │comparison │ │   │
//! │  │   │  index    │  │  swipe    │  │  cdn rules  │ │  rows     │ │   │
//! │  │   └───────────┘  └───────────┘  └─────────────┘ └───────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO LOGGING • PURE TRANSITIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Display records (Dog)
//! - [`money`] - Adoption fees in integer cents
//! - [`error`] - Domain error types
//! - [`validation`] - Input checks for records and URLs
//! - [`gesture`] - Swipe classification
//! - [`carousel`] - Bounded carousel navigator
//! - [`cdn`] - Per-provider image URL rewriting
//! - [`image_chain`] - Progressive image fallback chain
//! - [`comparison`] - Comparison table derivation
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: every state change takes the old state by value
//!    and returns the new one
//! 2. **No I/O**: fetching, logging and storage live in pawfinder-session
//! 3. **Clamp, Don't Fail**: UI navigation never produces errors
//!
//! ## Example Usage
//!
//! ```rust
//! use pawfinder_core::carousel::CarouselState;
//!
//! let carousel = CarouselState::new(vec!["Biscuit", "Mango", "Pepper"]);
//! let carousel = carousel.next().next().next();
//!
//! // Never wraps past the last dog
//! assert_eq!(carousel.current_index(), 2);
//! assert_eq!(carousel.current(), Some(&"Pepper"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod carousel;
pub mod cdn;
pub mod comparison;
pub mod error;
pub mod gesture;
pub mod image_chain;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use carousel::{CarouselAction, CarouselState, CarouselView, Indicator};
pub use cdn::{CdnProvider, CdnRules, ImageTransform};
pub use comparison::{build_comparison, ComparisonTable};
pub use error::{CoreError, CoreResult, ValidationError};
pub use gesture::{classify_gesture, Gesture, GesturePoint};
pub use image_chain::{DisplayStage, ImageEvent, ImageLoadChain, ImageView};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum horizontal travel, in CSS pixels, for a touch drag to count as
/// a swipe instead of a tap.
///
/// Tunable: the session config can override it per deployment.
pub const SWIPE_THRESHOLD_PX: f32 = 50.0;

/// Local placeholder shown once every candidate URL has failed.
pub const DEFAULT_FALLBACK_SRC: &str = "/placeholder_dog.svg";

/// Maximum number of dogs in one comparison.
///
/// ## Why 3?
/// The desktop comparison table fits three columns; the mobile view pages
/// through the same set with the carousel.
pub const MAX_COMPARE_DOGS: usize = 3;

/// Minimum number of dogs for a comparison to make sense.
pub const MIN_COMPARE_DOGS: usize = 2;
