pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod setup;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{chromium::ChromiumEngine, storage::LocalStorage};
pub use core::{
    orchestrator::{RunOrchestrator, RunOutcome, RunSummary},
    scraper::{ScrapePolicy, SiteScraper},
};
pub use utils::error::{Result, ScrapeError};
