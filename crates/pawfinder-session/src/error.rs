//! # Session & API Error Types
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Pawfinder                              │
//! │                                                                         │
//! │  Frontend                    Rust Session                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  bridge.call('carousel_next', { id })                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Unknown id?  ───── SessionError::UnknownInstance ──┐            │  │
//! │  │         │                                           │            │  │
//! │  │         ▼                                           ▼            │  │
//! │  │  Bad records? ───── CoreError::Validation ──────► ApiError ─────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success (navigation and image failures never error) ───────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use pawfinder_core::CoreError;

// =============================================================================
// Session Error
// =============================================================================

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Failures of the session layer itself.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No live instance with this id (never opened, or already closed).
    #[error("{kind} not found: {id}")]
    UnknownInstance { kind: &'static str, id: Uuid },

    /// A command panicked while holding the store lock.
    #[error("{0} state is poisoned")]
    StatePoisoned(&'static str),

    /// Config file could not be read.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Config file is not valid TOML for [`crate::config::ViewConfig`].
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Config values out of range.
    #[error("Invalid view configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

// =============================================================================
// API Error
// =============================================================================

/// Error returned from commands to the frontend.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "carousel not found: 6f1c..."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Instance id not open
    NotFound,

    /// Input records failed validation
    ValidationError,

    /// Comparison set has the wrong size or duplicates
    InvalidComparison,

    /// View configuration could not be loaded
    ConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(kind: &str, id: &Uuid) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", kind, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidComparison { .. } | CoreError::DuplicateDog(_) => {
                ApiError::new(ErrorCode::InvalidComparison, err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts session errors to API errors.
impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::UnknownInstance { kind, id } => ApiError::not_found(kind, &id),
            SessionError::Core(e) => e.into(),
            SessionError::StatePoisoned(kind) => {
                tracing::error!(kind, "Store lock poisoned");
                ApiError::internal(format!("{} state unavailable", kind))
            }
            SessionError::ConfigLoadFailed(_)
            | SessionError::ConfigParse(_)
            | SessionError::ConfigSerialize(_)
            | SessionError::InvalidConfig(_) => {
                ApiError::new(ErrorCode::ConfigError, err.to_string())
            }
            SessionError::Io(e) => {
                tracing::error!("I/O error: {}", e);
                ApiError::internal("I/O operation failed")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
