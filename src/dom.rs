//! The slice of browser automation the scraper depends on.
//!
//! [`Dom`] is implemented by [`crate::page::Page`] on top of chromiumoxide;
//! anything else that can answer CSS queries over a live document (a test
//! double, a different driver) can stand in for it.

use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::error::{Error, Result};

#[async_trait]
pub trait Dom: Send + Sync {
    /// Handle to a node in the current document.
    type Node: Send + Sync;

    /// Load `url` in place of the current document.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// All nodes in the document matching a CSS selector, in document order.
    async fn find_all(&self, selector: &str) -> Result<Vec<Self::Node>>;

    /// Descendants of `node` matching a CSS selector, in document order.
    async fn find_within(&self, node: &Self::Node, selector: &str) -> Result<Vec<Self::Node>>;

    /// Rendered text of `node`.
    async fn text(&self, node: &Self::Node) -> Result<String>;

    /// Resolved (absolute) link target of an anchor node.
    async fn link_target(&self, node: &Self::Node) -> Result<Option<String>>;

    /// Fire the node's click handler directly, skipping visibility and
    /// interactability checks.
    async fn activate(&self, node: &Self::Node) -> Result<()>;
}

/// Poll until at least one node matches `selector`, then return every match.
/// Lookup errors while polling count as "not yet".
pub async fn wait_for_all<D: Dom + ?Sized>(
    dom: &D,
    selector: &str,
    timeout: Duration,
    interval: Duration,
) -> Result<Vec<D::Node>> {
    let start = Instant::now();

    loop {
        match dom.find_all(selector).await {
            Ok(nodes) if !nodes.is_empty() => return Ok(nodes),
            _ if start.elapsed() < timeout => {
                tokio::time::sleep(interval).await;
            }
            _ => {
                return Err(Error::Timeout(format!("{selector} after {timeout:?}")));
            }
        }
    }
}

/// Poll `selector` until its match count has held still for `quiet`, giving
/// up on stability after `limit` and returning whatever matches at that point.
pub async fn wait_for_stable<D: Dom + ?Sized>(
    dom: &D,
    selector: &str,
    quiet: Duration,
    limit: Duration,
    interval: Duration,
) -> Result<Vec<D::Node>> {
    let start = Instant::now();
    let mut nodes = dom.find_all(selector).await?;
    let mut unchanged_since = Instant::now();

    while unchanged_since.elapsed() < quiet && start.elapsed() < limit {
        tokio::time::sleep(interval).await;
        let next = dom.find_all(selector).await?;
        if next.len() != nodes.len() {
            unchanged_since = Instant::now();
        }
        nodes = next;
    }

    Ok(nodes)
}
