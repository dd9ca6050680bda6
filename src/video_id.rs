use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::{fmt::Display, ops::Deref};

/// Every canonical watch url starts with this.
pub const WATCH_URL_HEAD: &str = "https://www.youtube.com/watch?v=";

// Three reference shapes tried leftmost-first: short-link tail, query
// parameter tail, bare eleven character id.
static REFERENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r".be/(.*?)$|=(.*?)$|^(\w{11})$").expect("Failed to compile reference pattern")
});

#[derive(thiserror::Error, Debug)]
pub enum ResolveError {
    #[error("invalid video id or url: {0:?}")]
    InvalidReference(String),
}

/// Canonical video id, normalized from whatever reference shape the
/// caller had on hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Normalize a video reference into a canonical id.
    ///
    /// Accepts a bare id, a full watch url, or a shortened youtu.be url.
    /// Anything that matches none of those shapes is taken verbatim as
    /// the id; the page fetch is the real validator. Only a reference
    /// that yields an empty candidate is rejected.
    pub fn resolve(reference: &str) -> Result<VideoId, ResolveError> {
        let candidate = match REFERENCE_PATTERN.captures(reference) {
            Some(caps) => caps
                .iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str())
                .find(|s| !s.is_empty())
                .unwrap_or_default(),
            // some ids slip through every shape, e.g. 'UeqP-7eEgc8'
            None => reference,
        };

        if candidate.is_empty() {
            return Err(ResolveError::InvalidReference(reference.to_string()));
        }

        Ok(VideoId(candidate.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The canonical watch url for this id.
    pub fn watch_url(&self) -> String {
        format!("{WATCH_URL_HEAD}{}", self.0)
    }
}

impl Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VideoId {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VideoId::resolve(s)
    }
}

impl Deref for VideoId {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<VideoId> for String {
    fn from(fr: VideoId) -> Self {
        fr.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_id() {
        let id = VideoId::resolve("dQw4w9WgXcQ").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_watch_url() {
        let id = VideoId::resolve("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_short_url() {
        let id = VideoId::resolve("https://youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_all_shapes_resolve_to_same_id() {
        let bare = VideoId::resolve("dQw4w9WgXcQ").unwrap();
        let full = VideoId::resolve("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
        let short = VideoId::resolve("https://youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(bare, full);
        assert_eq!(full, short);
    }

    #[test]
    fn test_short_url_without_scheme() {
        let id = VideoId::resolve("youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_hyphenated_id_resolves_via_fallback() {
        // '-' is not a word character, so the bare-id shape never matches
        let id = VideoId::resolve("UeqP-7eEgc8").unwrap();
        assert_eq!(id.as_str(), "UeqP-7eEgc8");
    }

    #[test]
    fn test_id_starting_with_hyphen() {
        let id = VideoId::resolve("-wtIMTCHWuI").unwrap();
        assert_eq!(id.as_str(), "-wtIMTCHWuI");
    }

    #[test]
    fn test_watch_url_keeps_trailing_params() {
        // everything after the first '=' is taken as-is, same as the query shape
        let id = VideoId::resolve("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ&t=42s");
    }

    #[test]
    fn test_short_token_falls_back_verbatim() {
        let id = VideoId::resolve("abc").unwrap();
        assert_eq!(id.as_str(), "abc");
    }

    #[test]
    fn test_long_token_falls_back_verbatim() {
        // twelve word characters match none of the three shapes
        let id = VideoId::resolve("abcdefghijkl").unwrap();
        assert_eq!(id.as_str(), "abcdefghijkl");
    }

    #[test]
    fn test_empty_reference_rejected() {
        assert!(VideoId::resolve("").is_err());
    }

    #[test]
    fn test_lone_equals_rejected() {
        assert!(VideoId::resolve("=").is_err());
    }

    #[test]
    fn test_short_url_with_empty_tail_rejected() {
        assert!(VideoId::resolve("https://youtu.be/").is_err());
    }

    #[test]
    fn test_error_mentions_reference() {
        let err = VideoId::resolve("=").unwrap_err();
        assert_eq!(err.to_string(), "invalid video id or url: \"=\"");
    }

    #[test]
    fn test_watch_url_built_from_id() {
        let id = VideoId::resolve("dQw4w9WgXcQ").unwrap();
        assert_eq!(id.watch_url(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }

    #[test]
    fn test_from_str() {
        let id: VideoId = "https://youtu.be/dQw4w9WgXcQ".parse().unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_display() {
        let id = VideoId::resolve("dQw4w9WgXcQ").unwrap();
        assert_eq!(id.to_string(), "dQw4w9WgXcQ");
    }
}
