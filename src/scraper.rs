use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, warn};

use crate::browser::ScheduleBrowser;
use crate::config::ScraperConfig;
use crate::discovery::discover_links;
use crate::dom::Dom;
use crate::error::{Error, Result};
use crate::harvest::{harvest_page, BlockOutcome, PageOutcome};
use crate::record::ScheduleSnapshot;
use crate::store::SnapshotStore;

/// Totals for one completed run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub subject_pages: usize,
    pub pages_skipped: usize,
    pub records: usize,
    pub incomplete_blocks: usize,
    pub failed_blocks: usize,
    pub failed_expansions: usize,
    pub output_path: PathBuf,
}

/// State a run threads through its stages: the document being driven, the
/// settings, the accumulated records and the file they are written to.
pub struct ScrapeContext<'a, D: Dom + ?Sized> {
    dom: &'a D,
    config: &'a ScraperConfig,
    snapshot: ScheduleSnapshot,
    store: SnapshotStore,
    summary: RunSummary,
}

impl<'a, D: Dom + ?Sized> ScrapeContext<'a, D> {
    /// Create the output directory and an empty snapshot.
    pub async fn new(dom: &'a D, config: &'a ScraperConfig) -> Result<Self> {
        let store = SnapshotStore::create(config.output_path()).await?;
        let summary = RunSummary {
            output_path: store.path().to_path_buf(),
            ..RunSummary::default()
        };
        Ok(Self {
            dom,
            config,
            snapshot: ScheduleSnapshot::new(),
            store,
            summary,
        })
    }

    pub fn snapshot(&self) -> &ScheduleSnapshot {
        &self.snapshot
    }

    pub async fn discover(&self) -> Result<Vec<String>> {
        let timings = &self.config.timings;
        discover_links(
            self.dom,
            &self.config.directory_url(),
            &self.config.link_filter(),
            timings.directory_wait,
            timings.poll_interval,
        )
        .await
    }

    /// Harvest one subject page, fold its records into the snapshot and
    /// rewrite the output file.
    pub async fn visit(&mut self, url: &str) -> Result<()> {
        info!(%url, "scraping");
        self.summary.subject_pages += 1;

        match harvest_page(self.dom, url, &self.config.timings).await {
            PageOutcome::Skipped { .. } => self.summary.pages_skipped += 1,
            PageOutcome::Harvested(page) => {
                self.summary.failed_expansions += page.failed_expansions;
                for block in page.blocks {
                    match block {
                        BlockOutcome::Complete(fields) => {
                            let accepted = self.snapshot.accept(fields).is_ok();
                            debug_assert!(accepted, "complete block rejected by snapshot");
                        }
                        BlockOutcome::Incomplete(_) => self.summary.incomplete_blocks += 1,
                        BlockOutcome::Failed(_) => self.summary.failed_blocks += 1,
                    }
                }
            }
        }

        self.store.save(self.snapshot.records()).await?;
        self.summary.records = self.snapshot.len();
        info!(
            records = self.snapshot.len(),
            path = %self.store.path().display(),
            "partial save complete"
        );
        Ok(())
    }

    pub fn finish(self) -> RunSummary {
        self.summary
    }
}

/// Discover every subject page for the term and harvest them in order,
/// saving after each one.
pub async fn scrape<D: Dom + ?Sized>(dom: &D, config: &ScraperConfig) -> Result<RunSummary> {
    let mut ctx = ScrapeContext::new(dom, config).await?;
    let links = ctx.discover().await?;

    for url in &links {
        ctx.visit(url).await?;
    }

    let summary = ctx.finish();
    info!(
        records = summary.records,
        pages = summary.subject_pages,
        skipped = summary.pages_skipped,
        path = %summary.output_path.display(),
        "room schedule saved"
    );
    Ok(summary)
}

/// Launch a browser, scrape with it and shut it down again, whatever the
/// outcome. Ctrl-C stops the run after the last completed save.
pub async fn run(config: &ScraperConfig) -> Result<RunSummary> {
    config.validate()?;

    let browser = ScheduleBrowser::launch(&config.browser).await?;

    let outcome = async {
        let page = browser.new_page("about:blank").await?;
        tokio::select! {
            result = scrape(&page, config) => result,
            _ = tokio::signal::ctrl_c() => Err(Error::Interrupted),
        }
    }
    .await;

    if let Err(e) = browser.close().await {
        warn!("failed to close browser cleanly: {e}");
    }

    outcome
}
