use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_HOST: &str = "www.csus.edu";
pub const DEFAULT_OUTPUT_DIR: &str = "ScrapedSchedules";

pub struct BrowserConfig {
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Location of the Chrome/Chromium executable. Auto-detected when `None`.
    pub chrome_path: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1920,
            viewport_height: 1080,
            chrome_path: None,
        }
    }
}

/// Wait bounds and settle delays used while driving the schedule pages.
#[derive(Debug, Clone, Copy)]
pub struct Timings {
    /// How long the directory page gets to render a matching subject link.
    pub directory_wait: Duration,
    /// How long a subject page gets to render its "Expand Row" controls.
    pub rows_wait: Duration,
    /// How long expanded rows get to render their first detail block.
    pub blocks_wait: Duration,
    /// Pause after activating each expand control.
    pub expand_settle: Duration,
    /// The row and detail-block counts must hold still this long before
    /// they are acted on.
    pub render_quiet: Duration,
    pub poll_interval: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            directory_wait: Duration::from_secs(20),
            rows_wait: Duration::from_secs(15),
            blocks_wait: Duration::from_secs(10),
            expand_settle: Duration::from_millis(300),
            render_quiet: Duration::from_secs(1),
            poll_interval: Duration::from_millis(100),
        }
    }
}

pub struct ScraperConfig {
    /// Term identifier as it appears in the schedule URLs, e.g. "summer-2025".
    pub semester_year: String,
    pub host: String,
    pub output_dir: PathBuf,
    pub browser: BrowserConfig,
    pub timings: Timings,
}

impl ScraperConfig {
    pub fn builder(semester_year: impl Into<String>) -> ScraperBuilder {
        ScraperBuilder::new(semester_year)
    }

    /// The page listing every subject area for the term.
    pub fn directory_url(&self) -> String {
        format!("https://{}{}", self.host, self.link_filter())
    }

    /// Substring every subject-page link contains.
    pub fn link_filter(&self) -> String {
        format!("/class-schedule/{}/", self.semester_year)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}_schedule.json", self.semester_year))
    }

    pub fn validate(&self) -> Result<()> {
        if self.semester_year.is_empty() {
            return Err(Error::Config("semester identifier is empty".into()));
        }
        if !self
            .semester_year
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(Error::Config(format!(
                "semester identifier {:?} may only contain letters, digits and '-'",
                self.semester_year
            )));
        }
        if self.host.is_empty() || self.host.contains('/') {
            return Err(Error::Config(format!(
                "host {:?} must be a bare host name",
                self.host
            )));
        }
        Ok(())
    }
}

pub struct ScraperBuilder {
    config: ScraperConfig,
}

impl ScraperBuilder {
    pub fn new(semester_year: impl Into<String>) -> Self {
        Self {
            config: ScraperConfig {
                semester_year: semester_year.into(),
                host: DEFAULT_HOST.to_string(),
                output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
                browser: BrowserConfig::default(),
                timings: Timings::default(),
            },
        }
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.output_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.config.browser.headless = headless;
        self
    }

    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.config.browser.viewport_width = width;
        self.config.browser.viewport_height = height;
        self
    }

    pub fn chrome_path(mut self, path: impl Into<String>) -> Self {
        self.config.browser.chrome_path = Some(path.into());
        self
    }

    /// Replace all wait bounds and settle delays at once.
    pub fn timings(mut self, timings: Timings) -> Self {
        self.config.timings = timings;
        self
    }

    /// Build the configuration, rejecting identifiers that cannot be
    /// embedded in the schedule URLs and selectors.
    pub fn build(self) -> Result<ScraperConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
