//! Pagepack engine: fetch a page, download its images concurrently, and
//! persist them as a single zip archive named after the page title.
mod archive;
mod collect;
mod extract;
mod fetch;
mod filename;
mod pack;
mod persist;
mod types;

pub use archive::{build_archive, ArchiveError};
pub use collect::{entry_name, CollectError, ImageCollector};
pub use extract::{decode_page, DocumentQuery, ExtractError, ExtractedPage, SelectorQuery};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use filename::{archive_filename, sanitize_title};
pub use pack::{PackError, PackSummary, PagePacker};
pub use persist::{ensure_output_dir, ArchiveStore, PersistError, DEFAULT_OUTPUT_DIR};
pub use types::{FailureKind, FetchError, FetchOutput, Image};
