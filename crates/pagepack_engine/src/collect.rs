use std::sync::Arc;

use engine_logging::{engine_debug, engine_info};
use tokio::sync::{mpsc, Semaphore};

use crate::{FetchError, Fetcher, Image};

type TaskOutcome = (usize, String, Result<Image, FetchError>);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectError {
    #[error("image {index} ({url:?}) failed: {source}")]
    Fetch {
        index: usize,
        url: String,
        #[source]
        source: FetchError,
    },
    #[error("collected {received} of {expected} image results")]
    Incomplete { expected: usize, received: usize },
}

/// Fans one fetch task out per image source and fans the results back in.
///
/// Aggregation is single-writer: worker tasks never touch the result list,
/// they hand completed images to the `collect` future over a channel. The
/// channel closing (every worker's sender dropped) is the completion
/// barrier, so `collect` observes every worker's outcome before returning,
/// even after an error has been latched.
#[derive(Clone)]
pub struct ImageCollector {
    fetcher: Arc<dyn Fetcher>,
    max_in_flight: Option<usize>,
}

impl ImageCollector {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            max_in_flight: None,
        }
    }

    /// Caps the number of fetches running at once. `None` (the default)
    /// launches every fetch immediately.
    pub fn with_max_in_flight(mut self, max_in_flight: Option<usize>) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }

    /// Downloads every source and returns the full image set, or the first
    /// error encountered. On failure the remaining in-flight fetches still
    /// run to completion; their results are discarded here.
    pub async fn collect(&self, srcs: &[String]) -> Result<Vec<Image>, CollectError> {
        engine_info!("{} images", srcs.len());
        let limiter = self
            .max_in_flight
            .map(|limit| Arc::new(Semaphore::new(limit.max(1))));
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<TaskOutcome>();

        for (index, src) in srcs.iter().enumerate() {
            let fetcher = Arc::clone(&self.fetcher);
            let limiter = limiter.clone();
            let done_tx = done_tx.clone();
            let src = src.clone();
            tokio::spawn(async move {
                // The semaphore is never closed; the permit only throttles.
                let _permit = match &limiter {
                    Some(semaphore) => Arc::clone(semaphore).acquire_owned().await.ok(),
                    None => None,
                };
                engine_debug!("START [{index}] {src}");
                let outcome = fetcher.fetch(&src).await.map(|output| Image {
                    name: entry_name(index, &src),
                    content: output.bytes,
                });
                engine_debug!("DONE [{index}] {src}");
                // Send fails only if collect itself was dropped.
                let _ = done_tx.send((index, src, outcome));
            });
        }
        drop(done_tx);

        let mut images = Vec::with_capacity(srcs.len());
        let mut first_error: Option<CollectError> = None;
        while let Some((index, url, outcome)) = done_rx.recv().await {
            match outcome {
                Ok(image) => images.push(image),
                Err(source) => {
                    if first_error.is_none() {
                        first_error = Some(CollectError::Fetch { index, url, source });
                    }
                }
            }
        }

        if let Some(error) = first_error {
            return Err(error);
        }
        if images.len() != srcs.len() {
            // A worker died without reporting; a short set must not pass
            // as success.
            return Err(CollectError::Incomplete {
                expected: srcs.len(),
                received: images.len(),
            });
        }
        Ok(images)
    }
}

/// Archive entry name for the image at `index`: the source's final
/// `/`-delimited segment, prefixed with the position in the source list.
pub fn entry_name(index: usize, src: &str) -> String {
    let basename = src.rsplit('/').next().unwrap_or(src);
    format!("{index}-{basename}")
}
