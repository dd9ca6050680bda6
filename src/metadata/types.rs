use serde::{Deserialize, Serialize};

/// One entry of the player thumbnail list, passed through as found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Everything extracted from one watch page.
///
/// Field order is the serialization order. The first group comes out of
/// the player details block and is always present; the rest is optional
/// and serializes as null when the page did not give it up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    pub id: String,
    pub views: Option<String>,
    pub streamed: bool,
    pub duration: String,
    pub author_id: String,
    pub upload_date: Option<String>,
    pub url: String,
    pub thumbnails: Option<Vec<Thumbnail>>,
    pub tags: Option<Vec<String>>,
    pub description: Option<String>,
    pub likes: Option<String>,
    pub genre: Option<String>,
}
