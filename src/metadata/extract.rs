use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use super::types::{Thumbnail, VideoMetadata};
use crate::video_id::{VideoId, WATCH_URL_HEAD};

// The player details block is cut out of the page by its bounding markers.
// Which field closes the block varies by page variant, so a second pattern
// covers pages where the live-content field is absent.
static DETAILS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"videoDetails":(.*?)"isLiveContent":.*?\}"#)
        .expect("Failed to compile details pattern")
});
static DETAILS_ALT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"videoDetails":(.*?)"autonavToggle":.*?\}"#)
        .expect("Failed to compile alternate details pattern")
});
static LIKE_COUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"iconType":"LIKE"\},"defaultText":(.*?)\}\}"#)
        .expect("Failed to compile like count pattern")
});
static UPLOAD_DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<meta itemprop="uploadDate" content="(.*?)">"#)
        .expect("Failed to compile upload date pattern")
});
static GENRE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<meta itemprop="genre" content="(.*?)">"#)
        .expect("Failed to compile genre pattern")
});

const DETAILS_LABEL: &str = r#"videoDetails":"#;
const AUTONAV_MARKER: &str = r#","autonavToggle":"#;

#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    #[error("player details block not found in page text")]
    DetailsMissing,

    #[error("player details block is not valid json: {0}")]
    DetailsUnparsable(#[source] serde_json::Error),

    #[error("player details block lacks a mandatory field: {0}")]
    DetailsIncomplete(#[source] serde_json::Error),
}

/// The mandatory slice of the player details block. Unknown keys are
/// plentiful and ignored. Optional fields are read off the parsed value
/// separately, where an unexpected shape counts as absent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoDetails {
    title: String,
    video_id: String,
    length_seconds: String,
    is_live_content: bool,
    channel_id: String,
}

/// One fetched watch page. The text is scanned, never mutated, so a page
/// can be queried any number of times.
pub struct WatchPage {
    id: VideoId,
    text: String,
}

impl WatchPage {
    pub fn new(id: VideoId, text: String) -> Self {
        Self { id, text }
    }

    /// Pull the metadata record out of the page text.
    ///
    /// The details block is mandatory: a page without one, or with one
    /// that stays unparsable after repair, is an error. A parsable block
    /// without a title means the page describes no playable video, which
    /// comes back as `Ok(None)`. Every other field is optional and falls
    /// back to null on its own, missing or mistyped, without disturbing
    /// the rest.
    pub fn extract_metadata(&self) -> Result<Option<VideoMetadata>, ExtractError> {
        let found = DETAILS_PATTERN
            .find(&self.text)
            .or_else(|| DETAILS_ALT_PATTERN.find(&self.text))
            .ok_or(ExtractError::DetailsMissing)?;

        // the match is a prefix of a larger structure, cut off at a sibling
        // key boundary; drop everything from that boundary on
        let mut raw_details = found.as_str();
        if let Some(cut) = raw_details.find(AUTONAV_MARKER) {
            raw_details = &raw_details[..cut];
        }

        let repaired = raw_details.replace(DETAILS_LABEL, "");
        let value: serde_json::Value =
            serde_json::from_str(&repaired).map_err(ExtractError::DetailsUnparsable)?;

        if value.get("title").is_none() {
            log::debug!("{}: details block has no title, video is not playable", self.id);
            return Ok(None);
        }

        let views = value
            .get("viewCount")
            .and_then(|count| count.as_str())
            .map(str::to_owned);
        let tags = value.get("keywords").and_then(|keywords| {
            keywords
                .as_array()?
                .iter()
                .map(|tag| tag.as_str().map(str::to_owned))
                .collect()
        });
        let description = value
            .get("shortDescription")
            .and_then(|text| text.as_str())
            .map(str::to_owned);
        let thumbnails = value
            .get("thumbnail")
            .and_then(|set| set.get("thumbnails"))
            .and_then(|list| serde_json::from_value::<Vec<Thumbnail>>(list.clone()).ok());

        let details: VideoDetails =
            serde_json::from_value(value).map_err(ExtractError::DetailsIncomplete)?;

        Ok(Some(VideoMetadata {
            title: details.title,
            id: details.video_id.clone(),
            views,
            streamed: details.is_live_content,
            duration: details.length_seconds,
            author_id: details.channel_id,
            upload_date: self.extract_upload_date(),
            url: format!("{WATCH_URL_HEAD}{}", details.video_id),
            thumbnails,
            tags,
            description,
            likes: self.extract_likes(),
            genre: self.extract_genre(),
        }))
    }

    /// Like count from the like-button accessibility label. The captured
    /// fragment is three braces short of valid json and gets them appended
    /// before parsing.
    fn extract_likes(&self) -> Option<String> {
        let fragment = LIKE_COUNT_PATTERN
            .captures(&self.text)
            .and_then(|caps| caps.get(1).map(|m| m.as_str()))?;

        let mut balanced = fragment.to_string();
        balanced.push_str("}}}");

        let parsed: serde_json::Value = match serde_json::from_str(&balanced) {
            Ok(value) => value,
            Err(err) => {
                log::debug!("{}: like fragment not parseable: {err}", self.id);
                return None;
            }
        };

        let label = parsed
            .get("accessibility")?
            .get("accessibilityData")?
            .get("label")?
            .as_str()?;

        Some(label.split_whitespace().next()?.replace(',', ""))
    }

    fn extract_genre(&self) -> Option<String> {
        GENRE_PATTERN
            .captures(&self.text)
            .and_then(|caps| caps.get(1).map(|m| m.as_str().to_owned()))
    }

    fn extract_upload_date(&self) -> Option<String> {
        UPLOAD_DATE_PATTERN
            .captures(&self.text)
            .and_then(|caps| caps.get(1).map(|m| m.as_str().to_owned()))
    }
}
