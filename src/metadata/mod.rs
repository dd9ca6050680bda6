pub mod extract;
pub mod types;

pub use extract::{ExtractError, WatchPage};
pub use types::{Thumbnail, VideoMetadata};

use crate::config::ScrapeConfig;
use crate::scrape::{self, ScrapeError};
use crate::video_id::{ResolveError, VideoId};

#[derive(thiserror::Error, Debug)]
pub enum MetaError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Main entry point for fetching video metadata from a reference string.
///
/// `Ok(None)` means the page was fetched and parsed but describes no
/// playable video.
pub fn fetch_video_meta(
    reference: &str,
    scrape_config: Option<&ScrapeConfig>,
) -> Result<Option<VideoMetadata>, MetaError> {
    let id = VideoId::resolve(reference)?;
    log::debug!("{id}: resolved from {reference:?}");

    let text = scrape::fetch_watch_page(&id, scrape_config)?;

    let page = WatchPage::new(id, text);
    Ok(page.extract_metadata()?)
}
