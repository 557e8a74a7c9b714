use std::path::PathBuf;
use std::sync::Arc;

use engine_logging::engine_info;

use crate::archive::{build_archive, ArchiveError};
use crate::collect::{CollectError, ImageCollector};
use crate::extract::{decode_page, DocumentQuery, ExtractError};
use crate::filename::sanitize_title;
use crate::persist::{ArchiveStore, PersistError};
use crate::{FetchError, Fetcher};

/// One variant per pipeline stage; the stage a page failed in is the
/// variant you get back.
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error("page fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error("no usable title matched the configured selector")]
    MissingTitle,
    #[error(transparent)]
    Collect(#[from] CollectError),
    #[error(transparent)]
    Archive(#[from] ArchiveError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackSummary {
    pub title: String,
    pub image_count: usize,
    pub bytes_written: u64,
    pub path: PathBuf,
}

/// Runs one page through fetch -> extract -> collect -> archive -> persist.
///
/// Any stage failing aborts the page with that stage's error; a partial
/// archive is never written. Pages are independent: callers may run many
/// packers (or clones of one) concurrently.
#[derive(Clone)]
pub struct PagePacker {
    fetcher: Arc<dyn Fetcher>,
    query: Arc<dyn DocumentQuery>,
    collector: ImageCollector,
    store: ArchiveStore,
}

impl PagePacker {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        query: Arc<dyn DocumentQuery>,
        store: ArchiveStore,
    ) -> Self {
        let collector = ImageCollector::new(Arc::clone(&fetcher));
        Self {
            fetcher,
            query,
            collector,
            store,
        }
    }

    /// Caps concurrent image fetches; unbounded by default.
    pub fn with_max_in_flight(mut self, max_in_flight: Option<usize>) -> Self {
        self.collector = self.collector.with_max_in_flight(max_in_flight);
        self
    }

    pub async fn pack(&self, url: &str) -> Result<PackSummary, PackError> {
        engine_info!("packing {url}");
        let output = self.fetcher.fetch(url).await?;
        let html = decode_page(&output)?;
        let page = self.query.extract(&html);

        let title = page
            .title
            .as_deref()
            .and_then(sanitize_title)
            .ok_or(PackError::MissingTitle)?;

        let images = self.collector.collect(&page.image_srcs).await?;
        let image_count = images.len();
        let archive = build_archive(images)?;

        let bytes_written = self.store.persist(&title, &archive)?;
        let path = self.store.archive_path(&title);
        engine_info!("packed {image_count} images into {}", path.display());

        Ok(PackSummary {
            title,
            image_count,
            bytes_written,
            path,
        })
    }
}
