use async_trait::async_trait;
use chromiumoxide::page::Page as CrPage;

use crate::dom::Dom;
use crate::element::Element;
use crate::error::{Error, Result};

/// Wrapper around a chromiumoxide Page exposing what the scraper drives.
pub struct Page {
    inner: CrPage,
}

impl Page {
    pub(crate) fn new(inner: CrPage) -> Self {
        Self { inner }
    }

    // ── Navigation ──────────────────────────────────────────────────

    /// Navigate to the given URL and wait for the page to load.
    pub async fn goto(&self, url: &str) -> Result<()> {
        self.inner
            .goto(url)
            .await
            .map_err(|e| Error::NavigationError(format!("{url}: {e}")))?;
        Ok(())
    }

    // ── Element Queries ─────────────────────────────────────────────

    /// Find all elements matching the given CSS selector.
    pub async fn find_elements(&self, selector: &str) -> Result<Vec<Element>> {
        let els = self
            .inner
            .find_elements(selector)
            .await
            .map_err(|e| Error::ElementNotFound(e.to_string()))?;
        Ok(els.into_iter().map(Element::new).collect())
    }
}

#[async_trait]
impl Dom for Page {
    type Node = Element;

    async fn navigate(&self, url: &str) -> Result<()> {
        self.goto(url).await
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Element>> {
        self.find_elements(selector).await
    }

    async fn find_within(&self, node: &Element, selector: &str) -> Result<Vec<Element>> {
        node.find_elements(selector).await
    }

    async fn text(&self, node: &Element) -> Result<String> {
        node.inner_text().await
    }

    async fn link_target(&self, node: &Element) -> Result<Option<String>> {
        node.href().await
    }

    async fn activate(&self, node: &Element) -> Result<()> {
        node.js_click().await
    }
}
