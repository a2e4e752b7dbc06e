//! # Commands Module
//!
//! Every function the frontend bridge calls.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs         ◄─── You are here (exports)
//! ├── carousel.rs    ◄─── Carousel navigation and touch gestures
//! ├── image.rs       ◄─── Image slot load/error/source events
//! ├── comparison.rs  ◄─── Comparison table + mobile carousel
//! └── config.rs      ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  React component                                                        │
//! │  ───────────────                                                        │
//! │  const view = await bridge.call('carousel_gesture_end', {               │
//! │    id, x: touch.clientX, y: touch.clientY                               │
//! │  });                                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Rust Session                                                           │
//! │  ────────────                                                           │
//! │  fn carousel_gesture_end(                                               │
//! │      carousels: &CarouselStore,   ◄── only the store it needs          │
//! │      id: Uuid, x: f32, y: f32,    ◄── from call params                 │
//! │  ) -> Result<CarouselResponse, ApiError>                                │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  React re-renders from CarouselResponse                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod carousel;
pub mod comparison;
pub mod config;
pub mod image;
