//! # CDN Module
//!
//! Per-provider image URL rewriting.
//!
//! Each supported image CDN has its own URL grammar for on-the-fly
//! resizing, so rewriting is a closed dispatch over [`CdnProvider`]
//! instead of one generic algorithm.
//!
//! ## Provider Grammars
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CloudflareImages (path convention)                                     │
//! │    https://images.example.com/cdn-cgi/image/w=800,q=80,f=auto/a/b.jpg   │
//! │                               └──────────── directive ────────┘         │
//! │    original: https://images.example.com/a/b.jpg                         │
//! │                                                                         │
//! │  Imgix (query convention)                                               │
//! │    https://rescue.imgix.net/a/b.jpg?w=800&q=80&auto=format              │
//! │    original: https://rescue.imgix.net/a/b.jpg                           │
//! │                                                                         │
//! │  Generic                                                                │
//! │    used as-is, never rewritten                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use url::Url;

use crate::validation::{parse_image_source, ImageSource};

/// Path prefix Cloudflare Image Resizing listens on.
const CLOUDFLARE_PREFIX: &str = "/cdn-cgi/image/";

/// Host suffix of Imgix sources.
const IMGIX_HOST_SUFFIX: &str = ".imgix.net";

/// Query keys Imgix treats as rendering parameters.
const IMGIX_DIRECTIVE_KEYS: &[&str] = &["w", "h", "q", "auto", "fm", "fit", "dpr"];

// =============================================================================
// Transform
// =============================================================================

/// Resize parameters requested from a CDN. Format is always negotiated
/// automatically by the CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageTransform {
    pub width: u32,
    pub quality: u8,
}

impl Default for ImageTransform {
    fn default() -> Self {
        ImageTransform {
            width: 800,
            quality: 80,
        }
    }
}

// =============================================================================
// Provider
// =============================================================================

/// Recognized image hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum CdnProvider {
    CloudflareImages,
    Imgix,
    Generic,
}

impl CdnProvider {
    /// True for providers that already resize on their side, so the
    /// frontend must not route the URL through its own optimizer.
    pub fn is_unoptimized_domain(&self) -> bool {
        !matches!(self, CdnProvider::Generic)
    }

    /// Builds the ordered candidate list for `url`.
    fn candidates(&self, url: &Url, transform: ImageTransform) -> Vec<String> {
        match self {
            CdnProvider::CloudflareImages => {
                if !has_cloudflare_directive(url) {
                    return dedup_pair(cloudflare_with_directive(url, transform), url.to_string());
                }
                match cloudflare_original(url) {
                    Some(original) => dedup_pair(url.to_string(), original.to_string()),
                    // Directive with no object: nothing to strip back to
                    None => vec![url.to_string()],
                }
            }
            CdnProvider::Imgix => {
                let original = imgix_original(url);
                let optimized = if has_imgix_directive(url) {
                    url.to_string()
                } else {
                    imgix_with_directive(&original, transform)
                };
                dedup_pair(optimized, original.to_string())
            }
            CdnProvider::Generic => vec![url.to_string()],
        }
    }
}

impl std::fmt::Display for CdnProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CdnProvider::CloudflareImages => write!(f, "cloudflare"),
            CdnProvider::Imgix => write!(f, "imgix"),
            CdnProvider::Generic => write!(f, "generic"),
        }
    }
}

// =============================================================================
// Rule Table
// =============================================================================

/// Provider detection table plus the transform to request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CdnRules {
    cloudflare_hosts: Vec<String>,
    transform: ImageTransform,
}

impl CdnRules {
    /// Creates rules with no extra Cloudflare zones. URLs that already use
    /// the `/cdn-cgi/image/` prefix are still recognized.
    pub fn new(transform: ImageTransform) -> Self {
        CdnRules {
            cloudflare_hosts: Vec::new(),
            transform,
        }
    }

    /// Adds hosts served through Cloudflare Image Resizing.
    pub fn with_cloudflare_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.cloudflare_hosts.extend(
            hosts
                .into_iter()
                .map(|h| h.as_ref().trim().to_ascii_lowercase())
                .filter(|h| !h.is_empty()),
        );
        self
    }

    pub fn transform(&self) -> ImageTransform {
        self.transform
    }

    /// Resolves which provider serves `url`.
    pub fn detect(&self, url: &Url) -> CdnProvider {
        let host = url.host_str().unwrap_or_default().to_ascii_lowercase();

        if has_cloudflare_directive(url) || self.cloudflare_hosts.iter().any(|h| *h == host) {
            CdnProvider::CloudflareImages
        } else if host.ends_with(IMGIX_HOST_SUFFIX) {
            CdnProvider::Imgix
        } else {
            CdnProvider::Generic
        }
    }

    /// Computes the provider and ordered candidate URLs for a raw `src`.
    ///
    /// Empty or malformed sources yield an empty list, which sends the
    /// image straight to its terminal fallback.
    ///
    /// ## Example
    /// ```rust
    /// use pawfinder_core::cdn::{CdnProvider, CdnRules};
    ///
    /// let rules = CdnRules::default();
    /// let (provider, candidates) = rules.resolve(
    ///     "https://images.example.com/cdn-cgi/image/w=800,q=80,f=auto/rescue_dogs/dog.jpg",
    /// );
    /// assert_eq!(provider, CdnProvider::CloudflareImages);
    /// assert_eq!(candidates[1], "https://images.example.com/rescue_dogs/dog.jpg");
    /// ```
    pub fn resolve(&self, src: &str) -> (CdnProvider, Vec<String>) {
        match parse_image_source(src) {
            Ok(ImageSource::Remote(url)) => {
                let provider = self.detect(&url);
                let candidates = provider.candidates(&url, self.transform);
                (provider, candidates)
            }
            Ok(ImageSource::Local(path)) => (CdnProvider::Generic, vec![path]),
            Err(_) => (CdnProvider::Generic, Vec::new()),
        }
    }
}

// =============================================================================
// Cloudflare Grammar
// =============================================================================

fn has_cloudflare_directive(url: &Url) -> bool {
    url.path().starts_with(CLOUDFLARE_PREFIX)
}

/// Strips `/cdn-cgi/image/<opts>` and returns the plain object URL.
///
/// Cloudflare also accepts an absolute origin URL after the options; that
/// URL is returned as-is when present and parsable. `None` when there is
/// no directive or no object path after it.
fn cloudflare_original(url: &Url) -> Option<Url> {
    let rest = url.path().strip_prefix(CLOUDFLARE_PREFIX)?;

    let object_path = match rest.split_once('/') {
        Some((_opts, path)) => path,
        None => "",
    };
    if object_path.is_empty() {
        return None;
    }

    if object_path.starts_with("http://") || object_path.starts_with("https://") {
        if let Ok(origin) = Url::parse(object_path) {
            return Some(origin);
        }
    }

    let mut original = url.clone();
    original.set_path(&format!("/{object_path}"));
    Some(original)
}

fn cloudflare_with_directive(original: &Url, transform: ImageTransform) -> String {
    let mut optimized = original.clone();
    optimized.set_path(&format!(
        "{CLOUDFLARE_PREFIX}w={},q={},f=auto{}",
        transform.width,
        transform.quality,
        original.path()
    ));
    optimized.to_string()
}

// =============================================================================
// Imgix Grammar
// =============================================================================

fn has_imgix_directive(url: &Url) -> bool {
    url.query_pairs()
        .any(|(key, _)| IMGIX_DIRECTIVE_KEYS.contains(&key.as_ref()))
}

/// Drops rendering parameters, keeping anything else (e.g. signatures).
fn imgix_original(url: &Url) -> Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !IMGIX_DIRECTIVE_KEYS.contains(&key.as_ref()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut original = url.clone();
    if kept.is_empty() {
        original.set_query(None);
    } else {
        original.query_pairs_mut().clear().extend_pairs(kept);
    }
    original
}

fn imgix_with_directive(original: &Url, transform: ImageTransform) -> String {
    let mut optimized = original.clone();
    optimized
        .query_pairs_mut()
        .append_pair("w", &transform.width.to_string())
        .append_pair("q", &transform.quality.to_string())
        .append_pair("auto", "format");
    optimized.to_string()
}

fn dedup_pair(first: String, second: String) -> Vec<String> {
    if first == second {
        vec![first]
    } else {
        vec![first, second]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> CdnRules {
        CdnRules::default().with_cloudflare_hosts(["images.rescuedogs.example"])
    }

    #[test]
    fn test_cloudflare_existing_directive_is_kept() {
        let src = "https://images.example.com/cdn-cgi/image/w=800,q=80,f=auto/rescue_dogs/dog.jpg";
        let (provider, candidates) = rules().resolve(src);

        assert_eq!(provider, CdnProvider::CloudflareImages);
        assert_eq!(
            candidates,
            vec![
                src.to_string(),
                "https://images.example.com/rescue_dogs/dog.jpg".to_string(),
            ]
        );
    }

    #[test]
    fn test_cloudflare_zone_gets_directive() {
        let (provider, candidates) =
            rules().resolve("https://images.rescuedogs.example/dogs/42.jpg?v=3");

        assert_eq!(provider, CdnProvider::CloudflareImages);
        assert_eq!(
            candidates,
            vec![
                "https://images.rescuedogs.example/cdn-cgi/image/w=800,q=80,f=auto/dogs/42.jpg?v=3"
                    .to_string(),
                "https://images.rescuedogs.example/dogs/42.jpg?v=3".to_string(),
            ]
        );
    }

    #[test]
    fn test_cloudflare_transform_is_configurable() {
        let rules = CdnRules::new(ImageTransform {
            width: 400,
            quality: 60,
        })
        .with_cloudflare_hosts([" Images.RescueDogs.Example "]);
        let (_, candidates) = rules.resolve("https://images.rescuedogs.example/a.jpg");

        assert_eq!(
            candidates[0],
            "https://images.rescuedogs.example/cdn-cgi/image/w=400,q=60,f=auto/a.jpg"
        );
    }

    #[test]
    fn test_cloudflare_absolute_origin() {
        let src = "https://images.example.com/cdn-cgi/image/w=300/https://origin.example.org/dog.png";
        let (_, candidates) = rules().resolve(src);
        assert_eq!(candidates[1], "https://origin.example.org/dog.png");
    }

    #[test]
    fn test_cloudflare_directive_without_object_is_not_stripped() {
        for src in [
            "https://images.example.com/cdn-cgi/image/w=300",
            "https://images.example.com/cdn-cgi/image/w=300/",
        ] {
            let (provider, candidates) = rules().resolve(src);
            assert_eq!(provider, CdnProvider::CloudflareImages);
            assert_eq!(candidates, vec![src.to_string()]);
        }
    }

    #[test]
    fn test_imgix_directive_added_and_stripped() {
        let (provider, candidates) = rules().resolve("https://rescue.imgix.net/dogs/7.jpg");

        assert_eq!(provider, CdnProvider::Imgix);
        assert_eq!(
            candidates,
            vec![
                "https://rescue.imgix.net/dogs/7.jpg?w=800&q=80&auto=format".to_string(),
                "https://rescue.imgix.net/dogs/7.jpg".to_string(),
            ]
        );
    }

    #[test]
    fn test_imgix_keeps_non_directive_params() {
        let src = "https://rescue.imgix.net/dogs/7.jpg?w=200&s=abc123";
        let (_, candidates) = rules().resolve(src);

        assert_eq!(candidates[0], src);
        assert_eq!(candidates[1], "https://rescue.imgix.net/dogs/7.jpg?s=abc123");
    }

    #[test]
    fn test_generic_single_candidate() {
        let src = "https://photos.shelter.example/dog.jpg?size=large";
        let (provider, candidates) = rules().resolve(src);

        assert_eq!(provider, CdnProvider::Generic);
        assert!(!provider.is_unoptimized_domain());
        assert_eq!(candidates, vec![src.to_string()]);
    }

    #[test]
    fn test_local_path_single_candidate() {
        let (provider, candidates) = rules().resolve("/img/dogs/default.png");
        assert_eq!(provider, CdnProvider::Generic);
        assert_eq!(candidates, vec!["/img/dogs/default.png".to_string()]);
    }

    #[test]
    fn test_empty_and_malformed_sources() {
        assert!(rules().resolve("").1.is_empty());
        assert!(rules().resolve("   ").1.is_empty());
        assert!(rules().resolve("http://").1.is_empty());
        assert!(rules().resolve("not a url").1.is_empty());
    }

    #[test]
    fn test_known_providers_are_unoptimized() {
        assert!(CdnProvider::CloudflareImages.is_unoptimized_domain());
        assert!(CdnProvider::Imgix.is_unoptimized_domain());
    }
}
