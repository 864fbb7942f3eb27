use std::collections::HashSet;
use std::time::Duration;

use tracing::{debug, info};

use crate::dom::{wait_for_all, Dom};
use crate::error::Result;

/// CSS selector for anchors whose raw `href` contains `filter`.
pub fn link_selector(filter: &str) -> String {
    format!(r#"a[href*="{filter}"]"#)
}

/// Load the directory page and collect the subject-page links on it.
///
/// Links are returned in first-seen order with duplicates removed. Fails
/// with [`crate::Error::Timeout`] if no anchor matching `filter` renders
/// within `timeout`.
pub async fn discover_links<D: Dom + ?Sized>(
    dom: &D,
    directory_url: &str,
    filter: &str,
    timeout: Duration,
    interval: Duration,
) -> Result<Vec<String>> {
    dom.navigate(directory_url).await?;

    let anchors = wait_for_all(dom, &link_selector(filter), timeout, interval).await?;

    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for anchor in &anchors {
        match dom.link_target(anchor).await? {
            Some(href) if !href.is_empty() => {
                if seen.insert(href.clone()) {
                    links.push(href);
                } else {
                    debug!(%href, "duplicate subject link");
                }
            }
            _ => {}
        }
    }

    info!(count = links.len(), "found subject links");
    for link in &links {
        info!("  {link}");
    }

    Ok(links)
}
