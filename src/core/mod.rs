pub mod orchestrator;
pub mod scraper;

pub use crate::domain::model::{OrderedMap, RunResult, ScrapeResult, SiteConfig, SiteMap};
pub use crate::domain::ports::{BrowserEngine, BrowserSession, ConfigProvider, PageHandle, Storage};
pub use crate::utils::error::Result;
