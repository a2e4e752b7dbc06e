//! # View Configuration
//!
//! Tunables for the view state machines, loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PAWFINDER_SWIPE_THRESHOLD_PX=64                                    │
//! │     PAWFINDER_CLOUDFLARE_HOSTS=images.a.org,images.b.org               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     explicit path, or the platform config dir:                         │
//! │     ~/.config/pawfinder/view.toml (Linux)                              │
//! │     ~/Library/Application Support/org.pawfinder.pawfinder/view.toml    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     50px swipe, 800w/q80 transforms, /placeholder_dog.svg              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # view.toml
//! [carousel]
//! swipe_threshold_px = 50.0
//!
//! [images]
//! fallback_src = "/placeholder_dog.svg"
//! width = 800
//! quality = 80
//! cloudflare_hosts = ["images.rescuedogs.example"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use pawfinder_core::{CdnRules, ImageTransform, DEFAULT_FALLBACK_SRC, SWIPE_THRESHOLD_PX};

use crate::error::{SessionError, SessionResult};

/// Widest transform we will ask a CDN for.
pub const MAX_IMAGE_WIDTH: u32 = 4096;

// =============================================================================
// Carousel Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Minimum horizontal drag, in CSS pixels, that counts as a swipe.
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold_px: f32,
}

fn default_swipe_threshold() -> f32 {
    SWIPE_THRESHOLD_PX
}

impl Default for CarouselConfig {
    fn default() -> Self {
        CarouselConfig {
            swipe_threshold_px: default_swipe_threshold(),
        }
    }
}

// =============================================================================
// Image Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Local placeholder shown after every candidate failed.
    #[serde(default = "default_fallback_src")]
    pub fallback_src: String,

    /// Requested CDN width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Requested CDN quality, 1-100.
    #[serde(default = "default_quality")]
    pub quality: u8,

    /// Hosts served through Cloudflare Image Resizing.
    #[serde(default)]
    pub cloudflare_hosts: Vec<String>,
}

fn default_fallback_src() -> String {
    DEFAULT_FALLBACK_SRC.to_string()
}

fn default_width() -> u32 {
    ImageTransform::default().width
}

fn default_quality() -> u8 {
    ImageTransform::default().quality
}

impl Default for ImageConfig {
    fn default() -> Self {
        ImageConfig {
            fallback_src: default_fallback_src(),
            width: default_width(),
            quality: default_quality(),
            cloudflare_hosts: Vec::new(),
        }
    }
}

// =============================================================================
// View Configuration
// =============================================================================

/// Complete view configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub carousel: CarouselConfig,

    #[serde(default)]
    pub images: ImageConfig,
}

impl ViewConfig {
    /// Loads configuration from file and environment.
    ///
    /// ## Loading Order
    /// 1. Start with defaults
    /// 2. Overlay the config file: `config_path` if given (must exist),
    ///    else the platform default path (skipped when absent)
    /// 3. Apply environment variable overrides
    /// 4. Validate
    pub fn load(config_path: Option<PathBuf>) -> SessionResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// [`load`](Self::load) with environment lookups going through `lookup`.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> SessionResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    debug!("No view config file, using defaults");
                    ViewConfig::default()
                }
            },
        };

        config.apply_overrides(lookup);
        config.validate()?;

        info!(
            swipe_threshold_px = config.carousel.swipe_threshold_px,
            fallback_src = %config.images.fallback_src,
            cloudflare_hosts = config.images.cloudflare_hosts.len(),
            "View configuration loaded"
        );
        Ok(config)
    }

    /// Loads configuration, falling back to defaults on any error.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load view config, using defaults: {}", e);
            ViewConfig::default()
        })
    }

    fn from_file(path: &Path) -> SessionResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SessionError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
        let config = toml::from_str(&contents)?;
        debug!(path = %path.display(), "Loaded view config file");
        Ok(config)
    }

    /// Renders the configuration as TOML (for `replay --print-config`).
    pub fn to_toml(&self) -> SessionResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Applies `PAWFINDER_*` overrides read through `lookup`.
    ///
    /// Unparsable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("PAWFINDER_SWIPE_THRESHOLD_PX") {
            match raw.trim().parse::<f32>() {
                Ok(px) => self.carousel.swipe_threshold_px = px,
                Err(_) => warn!(value = %raw, "Ignoring invalid PAWFINDER_SWIPE_THRESHOLD_PX"),
            }
        }

        if let Some(src) = lookup("PAWFINDER_FALLBACK_SRC") {
            self.images.fallback_src = src.trim().to_string();
        }

        if let Some(raw) = lookup("PAWFINDER_IMAGE_WIDTH") {
            match raw.trim().parse::<u32>() {
                Ok(width) => self.images.width = width,
                Err(_) => warn!(value = %raw, "Ignoring invalid PAWFINDER_IMAGE_WIDTH"),
            }
        }

        if let Some(raw) = lookup("PAWFINDER_IMAGE_QUALITY") {
            match raw.trim().parse::<u8>() {
                Ok(quality) => self.images.quality = quality,
                Err(_) => warn!(value = %raw, "Ignoring invalid PAWFINDER_IMAGE_QUALITY"),
            }
        }

        if let Some(hosts) = lookup("PAWFINDER_CLOUDFLARE_HOSTS") {
            self.images.cloudflare_hosts = hosts
                .split(',')
                .map(str::trim)
                .filter(|h| !h.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SessionResult<()> {
        let threshold = self.carousel.swipe_threshold_px;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(SessionError::InvalidConfig(format!(
                "swipe_threshold_px must be a positive number, got {}",
                threshold
            )));
        }

        if self.images.width == 0 || self.images.width > MAX_IMAGE_WIDTH {
            return Err(SessionError::InvalidConfig(format!(
                "images.width must be between 1 and {}",
                MAX_IMAGE_WIDTH
            )));
        }

        if !(1..=100).contains(&self.images.quality) {
            return Err(SessionError::InvalidConfig(
                "images.quality must be between 1 and 100".to_string(),
            ));
        }

        if self.images.fallback_src.trim().is_empty() {
            return Err(SessionError::InvalidConfig(
                "images.fallback_src must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// CDN rule table built from the image settings.
    pub fn cdn_rules(&self) -> CdnRules {
        CdnRules::new(ImageTransform {
            width: self.images.width,
            quality: self.images.quality,
        })
        .with_cloudflare_hosts(&self.images.cloudflare_hosts)
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "pawfinder", "pawfinder")
            .map(|dirs| dirs.config_dir().join("view.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ViewConfig::default();
        assert_eq!(config.carousel.swipe_threshold_px, 50.0);
        assert_eq!(config.images.fallback_src, "/placeholder_dog.svg");
        assert_eq!(config.images.width, 800);
        assert_eq!(config.images.quality, 80);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ViewConfig = toml::from_str(
            r#"
            [images]
            cloudflare_hosts = ["images.rescuedogs.example"]
            "#,
        )
        .unwrap();
        assert_eq!(config.carousel.swipe_threshold_px, 50.0);
        assert_eq!(config.images.width, 800);
        assert_eq!(config.images.cloudflare_hosts, vec!["images.rescuedogs.example"]);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config: ViewConfig = toml::from_str(
            r#"
            [carousel]
            swipe_threshold_px = 30.0

            [images]
            quality = 70
            "#,
        )
        .unwrap();

        config.apply_overrides(env(&[
            ("PAWFINDER_SWIPE_THRESHOLD_PX", "64"),
            ("PAWFINDER_CLOUDFLARE_HOSTS", " a.example , ,b.example"),
            ("PAWFINDER_IMAGE_WIDTH", "wide"),
        ]));

        assert_eq!(config.carousel.swipe_threshold_px, 64.0);
        assert_eq!(config.images.quality, 70);
        assert_eq!(config.images.width, 800);
        assert_eq!(config.images.cloudflare_hosts, vec!["a.example", "b.example"]);
    }

    #[test]
    fn test_config_validation() {
        let mut config = ViewConfig::default();
        config.carousel.swipe_threshold_px = 0.0;
        assert!(config.validate().is_err());

        let mut config = ViewConfig::default();
        config.carousel.swipe_threshold_px = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = ViewConfig::default();
        config.images.width = 5000;
        assert!(config.validate().is_err());

        let mut config = ViewConfig::default();
        config.images.quality = 0;
        assert!(config.validate().is_err());

        let mut config = ViewConfig::default();
        config.images.fallback_src = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = ViewConfig::load(Some(PathBuf::from("/nonexistent/pawfinder/view.toml")));
        assert!(matches!(result, Err(SessionError::ConfigLoadFailed(_))));
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const FILE_CONFIG: &str = r#"
        [carousel]
        swipe_threshold_px = 30.0

        [images]
        fallback_src = "/custom-placeholder.svg"
        quality = 70
        cloudflare_hosts = ["images.rescuedogs.example"]
    "#;

    #[test]
    fn test_load_reads_file_over_defaults() {
        let file = write_config(FILE_CONFIG);
        let config = ViewConfig::load_with(Some(file.path().to_path_buf()), env(&[])).unwrap();

        assert_eq!(config.carousel.swipe_threshold_px, 30.0);
        assert_eq!(config.images.fallback_src, "/custom-placeholder.svg");
        assert_eq!(config.images.quality, 70);
        // Not in the file
        assert_eq!(config.images.width, 800);
        assert_eq!(config.images.cloudflare_hosts, vec!["images.rescuedogs.example"]);
    }

    #[test]
    fn test_load_env_beats_file() {
        let file = write_config(FILE_CONFIG);
        let config = ViewConfig::load_with(
            Some(file.path().to_path_buf()),
            env(&[
                ("PAWFINDER_SWIPE_THRESHOLD_PX", "72"),
                ("PAWFINDER_FALLBACK_SRC", "/env-placeholder.svg"),
            ]),
        )
        .unwrap();

        assert_eq!(config.carousel.swipe_threshold_px, 72.0);
        assert_eq!(config.images.fallback_src, "/env-placeholder.svg");
        assert_eq!(config.images.quality, 70);
    }

    #[test]
    fn test_load_rejects_bad_file_values() {
        let file = write_config(
            r#"
            [images]
            width = 9000
            "#,
        );
        let result = ViewConfig::load_with(Some(file.path().to_path_buf()), env(&[]));
        assert!(matches!(result, Err(SessionError::InvalidConfig(_))));

        let file = write_config("[carousel]\nswipe_threshold_px = \"wide\"\n");
        let result = ViewConfig::load_with(Some(file.path().to_path_buf()), env(&[]));
        assert!(matches!(result, Err(SessionError::ConfigParse(_))));
    }

    #[test]
    fn test_toml_round_trip_sections() {
        let toml_str = ViewConfig::default().to_toml().unwrap();
        assert!(toml_str.contains("[carousel]"));
        assert!(toml_str.contains("[images]"));
    }

    #[test]
    fn test_cdn_rules_use_config() {
        let mut config = ViewConfig::default();
        config.images.cloudflare_hosts = vec!["images.rescuedogs.example".to_string()];
        config.images.width = 400;

        let (_, candidates) = config
            .cdn_rules()
            .resolve("https://images.rescuedogs.example/dog.jpg");
        assert_eq!(
            candidates[0],
            "https://images.rescuedogs.example/cdn-cgi/image/w=400,q=80,f=auto/dog.jpg"
        );
    }
}
