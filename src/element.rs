use chromiumoxide::element::Element as CrElement;

use crate::error::{Error, Result};

/// Wrapper around a chromiumoxide Element, providing a simplified API.
pub struct Element {
    inner: CrElement,
}

impl Element {
    pub(crate) fn new(inner: CrElement) -> Self {
        Self { inner }
    }

    /// Dispatch a click from inside the page (`this.click()`), so hidden or
    /// overlapped controls still fire.
    pub async fn js_click(&self) -> Result<()> {
        self.inner
            .call_js_fn("function() { this.click(); }", false)
            .await
            .map_err(|e| Error::JsError(e.to_string()))?;
        Ok(())
    }

    /// The `href` property of this element, resolved against the document URL.
    pub async fn href(&self) -> Result<Option<String>> {
        let returns = self
            .inner
            .call_js_fn("function() { return this.href || null; }", false)
            .await
            .map_err(|e| Error::JsError(e.to_string()))?;
        Ok(returns
            .result
            .value
            .and_then(|v| v.as_str().map(str::to_string)))
    }

    /// Get the inner text of this element.
    pub async fn inner_text(&self) -> Result<String> {
        self.inner
            .inner_text()
            .await
            .map_err(Error::CdpError)?
            .ok_or_else(|| Error::ElementNotFound("inner text is empty".into()))
    }

    /// Find all child elements matching the given CSS selector.
    pub async fn find_elements(&self, selector: &str) -> Result<Vec<Element>> {
        let els = self
            .inner
            .find_elements(selector)
            .await
            .map_err(Error::CdpError)?;
        Ok(els.into_iter().map(Element::new).collect())
    }
}
