//! # pawfinder-session: View Component Session Layer
//!
//! Hosts the live carousel and image-slot instances of one UI session and
//! exposes the commands the frontend bridge calls on user and host events.
//!
//! ## Module Organization
//! ```text
//! pawfinder-session/
//! ├── lib.rs           ◄─── You are here (tracing setup, re-exports)
//! ├── commands/        ◄─── Command handlers (called from the frontend)
//! │   ├── carousel.rs  ◄─── Arrows, dots, touch gestures
//! │   ├── image.rs     ◄─── Image load/error/source events
//! │   ├── comparison.rs◄─── Comparison table + carousel
//! │   └── config.rs    ◄─── Active configuration
//! ├── state/           ◄─── Per-family instance stores
//! ├── config.rs        ◄─── ViewConfig (TOML file + env overrides)
//! ├── error.rs         ◄─── SessionError, ApiError
//! └── bin/replay.rs    ◄─── Replays recorded event scenarios
//! ```
//!
//! ## Session Wiring
//! ```text
//! ViewConfig::load(path)
//!        │
//!        ▼
//! Session::new(config) ──► CarouselStore + ImageSlotStore + ComparisonStore
//!        │
//!        ▼
//! commands::*(&session.<store>, ...) ──► Result<Response, ApiError>
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod state;

pub use config::ViewConfig;
pub use error::{ApiError, ErrorCode, SessionError, SessionResult};
pub use state::{CarouselStore, ComparisonStore, ImageSlotStore};

use tracing_subscriber::EnvFilter;

/// Every store of one UI session, built from a single configuration.
#[derive(Debug, Clone)]
pub struct Session {
    pub config: ViewConfig,
    pub carousels: CarouselStore,
    pub images: ImageSlotStore,
    pub comparisons: ComparisonStore,
}

impl Session {
    pub fn new(config: ViewConfig) -> Self {
        Session {
            carousels: CarouselStore::new(&config),
            images: ImageSlotStore::new(&config),
            comparisons: ComparisonStore::new(),
            config,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ViewConfig::default())
    }
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show all debug messages
/// - `RUST_LOG=pawfinder=trace` - Trace level for our crates only
/// - Default: `info,pawfinder=debug`
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pawfinder=debug"));

    // Logs go to stderr so replay output on stdout stays clean JSON
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
