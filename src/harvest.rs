//! Expanding the rows of one subject page and reading its detail blocks.
//!
//! Nothing in here returns `Err` for a problem confined to one page, one
//! expand control or one block. Those are reported through [`PageOutcome`]
//! and [`BlockOutcome`] so the caller decides what to count and log.

use tracing::{debug, info, warn};

use crate::config::Timings;
use crate::dom::{wait_for_all, wait_for_stable, Dom};
use crate::error::Error;
use crate::record::{field_value, ClassFields, Field, MISSING};

pub const EXPAND_ROW_SELECTOR: &str = r#"button[aria-label="Expand Row"]"#;
pub const DETAIL_BLOCK_SELECTOR: &str = ".class-info-main";

/// Why a whole subject page contributed nothing.
#[derive(Debug)]
pub enum PageSkip {
    Navigation(Error),
    /// No expand control rendered within the rows wait.
    NoRows(Error),
    /// Rows were expanded but no detail block rendered within the blocks wait.
    NoDetailBlocks(Error),
}

impl std::fmt::Display for PageSkip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageSkip::Navigation(e) => write!(f, "page failed to load: {e}"),
            PageSkip::NoRows(e) => write!(f, "no expandable rows: {e}"),
            PageSkip::NoDetailBlocks(e) => write!(f, "no class-info blocks after expanding: {e}"),
        }
    }
}

/// What a single detail block yielded.
#[derive(Debug)]
pub enum BlockOutcome {
    Complete(ClassFields),
    /// At least one field element was absent.
    Incomplete(Vec<Field>),
    /// Reading the block failed outright.
    Failed(Error),
}

/// Everything read from one subject page whose rows could be expanded.
#[derive(Debug)]
pub struct PageHarvest {
    pub url: String,
    pub expand_controls: usize,
    pub failed_expansions: usize,
    /// One entry per detail block, in document order.
    pub blocks: Vec<BlockOutcome>,
}

impl PageHarvest {
    pub fn complete(&self) -> impl Iterator<Item = &ClassFields> {
        self.blocks.iter().filter_map(|b| match b {
            BlockOutcome::Complete(fields) => Some(fields),
            _ => None,
        })
    }
}

#[derive(Debug)]
pub enum PageOutcome {
    Harvested(PageHarvest),
    Skipped { url: String, reason: PageSkip },
}

/// Load one subject page, expand every row and read every detail block.
pub async fn harvest_page<D: Dom + ?Sized>(dom: &D, url: &str, timings: &Timings) -> PageOutcome {
    let skipped = |reason: PageSkip| {
        warn!(%url, "skipping page: {reason}");
        PageOutcome::Skipped {
            url: url.to_string(),
            reason,
        }
    };

    if let Err(e) = dom.navigate(url).await {
        return skipped(PageSkip::Navigation(e));
    }

    if let Err(e) = wait_for_all(
        dom,
        EXPAND_ROW_SELECTOR,
        timings.rows_wait,
        timings.poll_interval,
    )
    .await
    {
        return skipped(PageSkip::NoRows(e));
    }

    // rows can keep arriving after the first one renders
    let controls = match wait_for_stable(
        dom,
        EXPAND_ROW_SELECTOR,
        timings.render_quiet,
        timings.rows_wait,
        timings.poll_interval,
    )
    .await
    {
        Ok(controls) => controls,
        Err(e) => return skipped(PageSkip::NoRows(e)),
    };
    info!(rows = controls.len(), "expanding rows");

    let mut failed_expansions = 0;
    for control in &controls {
        if let Err(e) = dom.activate(control).await {
            warn!("couldn't click expand row: {e}");
            failed_expansions += 1;
            continue;
        }
        if !timings.expand_settle.is_zero() {
            tokio::time::sleep(timings.expand_settle).await;
        }
    }

    if let Err(e) = wait_for_all(
        dom,
        DETAIL_BLOCK_SELECTOR,
        timings.blocks_wait,
        timings.poll_interval,
    )
    .await
    {
        return skipped(PageSkip::NoDetailBlocks(e));
    }

    let blocks = match wait_for_stable(
        dom,
        DETAIL_BLOCK_SELECTOR,
        timings.render_quiet,
        timings.blocks_wait,
        timings.poll_interval,
    )
    .await
    {
        Ok(blocks) => blocks,
        Err(e) => return skipped(PageSkip::NoDetailBlocks(e)),
    };
    info!(blocks = blocks.len(), "found class blocks");

    let mut outcomes = Vec::with_capacity(blocks.len());
    for block in &blocks {
        let outcome = read_block(dom, block).await;
        match &outcome {
            BlockOutcome::Complete(_) => {}
            BlockOutcome::Incomplete(missing) => {
                let names: Vec<String> = missing.iter().map(|f| f.to_string()).collect();
                warn!(missing = %names.join(", "), "incomplete class info, skipping");
            }
            BlockOutcome::Failed(e) => warn!("unexpected error on one block: {e}"),
        }
        outcomes.push(outcome);
    }

    PageOutcome::Harvested(PageHarvest {
        url: url.to_string(),
        expand_controls: controls.len(),
        failed_expansions,
        blocks: outcomes,
    })
}

/// Read the five fields out of one detail block.
pub async fn read_block<D: Dom + ?Sized>(dom: &D, block: &D::Node) -> BlockOutcome {
    match read_fields(dom, block).await {
        Ok(fields) => {
            let missing = fields.missing();
            if missing.is_empty() {
                BlockOutcome::Complete(fields)
            } else {
                BlockOutcome::Incomplete(missing)
            }
        }
        Err(e) => BlockOutcome::Failed(e),
    }
}

async fn read_fields<D: Dom + ?Sized>(dom: &D, block: &D::Node) -> crate::Result<ClassFields> {
    Ok(ClassFields {
        building: read_field(dom, block, Field::Building).await?,
        room: read_field(dom, block, Field::Room).await?,
        days: read_field(dom, block, Field::Days).await?,
        start_time: read_field(dom, block, Field::StartTime).await?,
        end_time: read_field(dom, block, Field::EndTime).await?,
    })
}

/// Text of the first element matching `field` inside `block`, with its label
/// stripped, or [`MISSING`] when there is no such element.
async fn read_field<D: Dom + ?Sized>(
    dom: &D,
    block: &D::Node,
    field: Field,
) -> crate::Result<String> {
    let found = dom.find_within(block, field.selector()).await?;
    match found.first() {
        Some(el) => Ok(field_value(&dom.text(el).await?)),
        None => {
            debug!(%field, "field element not found");
            Ok(MISSING.to_string())
        }
    }
}
