use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use engine_logging::{engine_error, engine_info, engine_warn};
use tokio::task::JoinSet;

use pagepack_engine::{
    ArchiveStore, DocumentQuery, FetchSettings, Fetcher, PackError, PackSummary, PagePacker,
    ReqwestFetcher, SelectorQuery,
};

use crate::config::Settings;

/// Per page group: prompt for URLs on stdin and spawn one pipeline task
/// per entered URL. A blank line or EOF ends the group. All spawned pages
/// are joined at the end; a failed page is logged and never takes the
/// process down with it.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let fetcher: Arc<dyn Fetcher> = Arc::new(
        ReqwestFetcher::new(FetchSettings::default()).context("building http client")?,
    );
    let store = ArchiveStore::new(&settings.output_directory);
    engine_info!("output directory: {}", store.root().display());

    let mut tasks: JoinSet<(String, Result<PackSummary, PackError>)> = JoinSet::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    for page in &settings.pages {
        // A selector typo should fail the run up front, not every page.
        let query: Arc<dyn DocumentQuery> = Arc::new(
            SelectorQuery::new(&page.title_selector, &page.image_selector)
                .with_context(|| format!("selectors for page group {}", page.url))?,
        );
        let packer = PagePacker::new(Arc::clone(&fetcher), query, store.clone())
            .with_max_in_flight(settings.max_in_flight);

        engine_info!("page group {}: enter URLs, blank line to finish", page.url);
        loop {
            print!("URL: ");
            io::stdout().flush().ok();
            let Some(line) = lines.next() else {
                break;
            };
            let url = line.context("reading stdin")?.trim().to_string();
            if url.is_empty() {
                break;
            }
            engine_info!("-> {url}");
            let packer = packer.clone();
            tasks.spawn(async move {
                let result = packer.pack(&url).await;
                (url, result)
            });
        }
    }

    let mut failed = 0usize;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((url, Ok(summary))) => engine_info!(
                "done {url}: {} ({} images, {} bytes)",
                summary.title,
                summary.image_count,
                summary.bytes_written
            ),
            Ok((url, Err(error))) => {
                failed += 1;
                engine_error!("failed {url}: {error}");
            }
            Err(join_error) => {
                failed += 1;
                engine_error!("page task died: {join_error}");
            }
        }
    }
    if failed > 0 {
        engine_warn!("{failed} page(s) failed");
    }
    engine_info!("Finished");
    Ok(())
}
