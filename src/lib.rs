pub mod browser;
pub mod config;
pub mod discovery;
pub mod dom;
pub mod element;
pub mod error;
pub mod harvest;
pub mod page;
pub mod record;
pub mod scraper;
pub mod store;

pub use browser::ScheduleBrowser;
pub use config::{BrowserConfig, ScraperConfig, Timings};
pub use dom::Dom;
pub use error::{Error, Result};
pub use page::Page;
pub use record::{ClassRecord, ScheduleSnapshot};
pub use scraper::{run, scrape, RunSummary};
