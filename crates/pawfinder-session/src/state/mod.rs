//! # State Module
//!
//! Hosts the live component instances.
//!
//! ## Why Multiple Stores?
//! Instead of one `AppState` holding everything, each component family
//! gets its own store:
//!
//! 1. **Clearer Command Signatures**: commands take exactly the stores they touch
//! 2. **Reduced Contention**: an image error never waits on a swipe
//! 3. **Easier Testing**: stores are built straight from a `ViewConfig`
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌───────────────┐  ┌─────────────────┐  ┌──────────────────┐          │
//! │  │ CarouselStore │  │ ImageSlotStore  │  │ ComparisonStore  │          │
//! │  │               │  │                 │  │                  │          │
//! │  │ id → Carousel │  │ id → ImageChain │  │ id → table +     │          │
//! │  │      State    │  │ + notifications │  │      carousel id │          │
//! │  └───────────────┘  └─────────────────┘  └──────────────────┘          │
//! │                                                                         │
//! │  Each map lives behind Arc<Mutex<..>> (see registry.rs)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod carousel;
mod comparison;
mod images;
mod registry;

pub use carousel::{CarouselSnapshot, CarouselStore};
pub use comparison::{ComparisonEntry, ComparisonStore};
pub use images::{ImageNotification, ImageSlotStore, NotificationKind, MAX_QUEUED_NOTIFICATIONS};
pub use registry::InstanceRegistry;
