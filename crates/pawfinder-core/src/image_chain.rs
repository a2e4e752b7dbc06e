//! # Image Chain Module
//!
//! Progressive fallback for a single image slot.
//!
//! ## Stage Progression
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Image Load Chain (Cloudflare source)                 │
//! │                                                                         │
//! │  level 0   /cdn-cgi/image/w=800,q=80,f=auto/dog.jpg                     │
//! │     │ error                                                             │
//! │     ▼                                                                   │
//! │  level 1   /dog.jpg                        (directive stripped)         │
//! │     │ error                                                             │
//! │     ▼                                                                   │
//! │  level 2   terminal fallback               (/placeholder_dog.svg)       │
//! │     │ error                                                             │
//! │     ▼                                                                   │
//! │  level 3   inline glyph                    (no network, cannot fail)    │
//! │                                                                         │
//! │  load at any level ──► frozen until the source changes                  │
//! │  source change      ──► recompute candidates, back to level 0           │
//! │  alt text           ──► identical at every level                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The chain only moves forward: an already-failed URL is never retried
//! for the same source.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cdn::{CdnProvider, CdnRules};
use crate::DEFAULT_FALLBACK_SRC;

// =============================================================================
// Stages & Events
// =============================================================================

/// What the slot is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "camelCase")]
#[ts(export)]
pub enum DisplayStage {
    /// One of the derived candidate URLs.
    Candidate { level: usize },
    /// The static local placeholder.
    TerminalFallback,
    /// Inline icon. Renders no network resource.
    Glyph,
}

/// Inputs from the host image primitive and the owning component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ImageEvent {
    Loaded,
    Failed,
    SourceChanged { src: Option<String> },
}

// =============================================================================
// Chain State
// =============================================================================

/// Fallback state for one image slot.
///
/// ## Invariants
/// - `level` never decreases while `source` stays the same
/// - `level <= candidates.len() + 1` (the glyph)
/// - `alt` is never rewritten
/// - no candidate equals `terminal_fallback`
#[derive(Debug, Clone, PartialEq)]
pub struct ImageLoadChain {
    source: Option<String>,
    provider: CdnProvider,
    candidates: Vec<String>,
    level: usize,
    terminal_fallback: String,
    alt: String,
    frozen: bool,
    rules: CdnRules,
}

impl ImageLoadChain {
    /// Creates a chain for `source` with the default placeholder.
    ///
    /// ## Example
    /// ```rust
    /// use pawfinder_core::cdn::CdnRules;
    /// use pawfinder_core::image_chain::{DisplayStage, ImageLoadChain};
    ///
    /// let chain = ImageLoadChain::new(Some("https://photos.example.org/rex.jpg"), "Rex", CdnRules::default());
    /// assert_eq!(chain.current_src(), Some("https://photos.example.org/rex.jpg"));
    ///
    /// let chain = chain.on_load_error();
    /// assert_eq!(chain.stage(), DisplayStage::TerminalFallback);
    /// assert_eq!(chain.alt(), "Rex");
    /// ```
    pub fn new(source: Option<&str>, alt: impl Into<String>, rules: CdnRules) -> Self {
        let mut chain = ImageLoadChain {
            source: None,
            provider: CdnProvider::Generic,
            candidates: Vec::new(),
            level: 0,
            terminal_fallback: DEFAULT_FALLBACK_SRC.to_string(),
            alt: alt.into(),
            frozen: false,
            rules,
        };
        chain.reset_to(source.map(str::to_string));
        chain
    }

    /// Replaces the terminal placeholder path.
    pub fn with_fallback(mut self, fallback_src: impl Into<String>) -> Self {
        self.terminal_fallback = fallback_src.into();
        self.drop_fallback_candidates();
        self
    }

    /// A candidate equal to the placeholder would be requested twice.
    fn drop_fallback_candidates(&mut self) {
        let fallback = &self.terminal_fallback;
        self.candidates.retain(|c| c != fallback);
        self.level = self.level.min(self.candidates.len() + 1);
    }

    fn reset_to(&mut self, source: Option<String>) {
        let (provider, candidates) = match source.as_deref() {
            Some(src) => self.rules.resolve(src),
            None => (CdnProvider::Generic, Vec::new()),
        };
        self.source = source;
        self.provider = provider;
        self.candidates = candidates;
        self.level = 0;
        self.frozen = false;
        self.drop_fallback_candidates();
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// The current URL failed: move to the next stage.
    ///
    /// Ignored once frozen by a successful load, and once the glyph is
    /// showing.
    pub fn on_load_error(mut self) -> Self {
        if !self.frozen && self.level <= self.candidates.len() {
            self.level += 1;
        }
        self
    }

    /// The current URL loaded: keep it until the source changes.
    pub fn on_load_success(mut self) -> Self {
        self.frozen = true;
        self
    }

    /// The owning component received a new `src`.
    ///
    /// Same source is not a new identity and keeps the current stage.
    pub fn on_source_change(mut self, source: Option<&str>) -> Self {
        if self.source.as_deref() != source {
            self.reset_to(source.map(str::to_string));
        }
        self
    }

    /// Applies one event.
    pub fn reduce(self, event: ImageEvent) -> Self {
        match event {
            ImageEvent::Loaded => self.on_load_success(),
            ImageEvent::Failed => self.on_load_error(),
            ImageEvent::SourceChanged { src } => self.on_source_change(src.as_deref()),
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn stage(&self) -> DisplayStage {
        match self.level.cmp(&self.candidates.len()) {
            std::cmp::Ordering::Less => DisplayStage::Candidate { level: self.level },
            std::cmp::Ordering::Equal => DisplayStage::TerminalFallback,
            std::cmp::Ordering::Greater => DisplayStage::Glyph,
        }
    }

    /// URL to request, `None` once the glyph is showing.
    pub fn current_src(&self) -> Option<&str> {
        match self.stage() {
            DisplayStage::Candidate { level } => self.candidates.get(level).map(String::as_str),
            DisplayStage::TerminalFallback => Some(self.terminal_fallback.as_str()),
            DisplayStage::Glyph => None,
        }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn provider(&self) -> CdnProvider {
        self.provider
    }

    pub fn alt(&self) -> &str {
        &self.alt
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn is_unoptimized_domain(&self) -> bool {
        self.provider.is_unoptimized_domain()
    }

    /// Snapshot for the frontend.
    pub fn view(&self) -> ImageView {
        ImageView {
            src: self.current_src().map(str::to_string),
            stage: self.stage(),
            alt: self.alt.clone(),
            unoptimized: self.is_unoptimized_domain(),
            loaded: self.frozen,
        }
    }
}

/// What the image component renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ImageView {
    /// `None` only at [`DisplayStage::Glyph`].
    pub src: Option<String>,
    pub stage: DisplayStage,
    pub alt: String,
    /// Bypass the frontend's own image optimizer.
    pub unoptimized: bool,
    pub loaded: bool,
}
