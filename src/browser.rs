use chromiumoxide::browser::{Browser as CrBrowser, BrowserConfig as CrBrowserConfig};
use chromiumoxide::handler::viewport::Viewport;
use futures::StreamExt;
use tracing::debug;

use crate::config::BrowserConfig;
use crate::error::{Error, Result};
use crate::page::Page;

/// Extra Chromium switches, given without the leading `--`.
const PERF_ARGS: &[&str] = &[
    "disable-gpu",
    "disable-extensions",
    "metrics-recording-only",
    "mute-audio",
    "no-default-browser-check",
    "disable-client-side-phishing-detection",
    "disable-popup-blocking",
    "disable-prompt-on-repost",
];

/// The one browser session a scrape run drives.
///
/// Call [`ScheduleBrowser::close`] when done. If the session is dropped
/// instead (early return, panic) the event handler task is aborted and
/// chromiumoxide kills the child process.
pub struct ScheduleBrowser {
    browser: CrBrowser,
    handler_task: tokio::task::JoinHandle<()>,
}

impl ScheduleBrowser {
    /// Start Chromium and the task that pumps its CDP events.
    pub async fn launch(config: &BrowserConfig) -> Result<Self> {
        let (browser, mut handler) = CrBrowser::launch(chromium_config(config)?)
            .await
            .map_err(|e| Error::LaunchError(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {}
        });

        debug!(headless = config.headless, "browser launched");

        Ok(Self {
            browser,
            handler_task,
        })
    }

    /// Open a new page (tab) navigated to the given URL.
    pub async fn new_page(&self, url: &str) -> Result<Page> {
        let cr_page = self
            .browser
            .new_page(url)
            .await
            .map_err(|e| Error::NavigationError(e.to_string()))?;
        Ok(Page::new(cr_page))
    }

    /// Shut the browser down and wait for the process to exit.
    pub async fn close(mut self) -> Result<()> {
        self.browser.close().await?;
        self.browser.wait().await?;
        debug!("browser closed");
        Ok(())
    }
}

fn chromium_config(config: &BrowserConfig) -> Result<CrBrowserConfig> {
    let builder = match config.headless {
        true => CrBrowserConfig::builder().new_headless_mode(),
        false => CrBrowserConfig::builder().with_head(),
    };

    let builder = PERF_ARGS
        .iter()
        .fold(builder.no_sandbox(), |b, flag| b.arg(*flag))
        .viewport(Viewport {
            width: config.viewport_width,
            height: config.viewport_height,
            device_scale_factor: None,
            emulating_mobile: false,
            is_landscape: false,
            has_touch: false,
        });

    let builder = match &config.chrome_path {
        Some(path) => builder.chrome_executable(path),
        None => builder,
    };

    builder.build().map_err(Error::LaunchError)
}

impl Drop for ScheduleBrowser {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}
