pub mod sites;

#[cfg(feature = "cli")]
use crate::core::scraper::ScrapePolicy;
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::{error::Result, validation::{validate_path, Validate}};
#[cfg(feature = "cli")]
use clap::Parser;

/// Site map read at the start of every run.
pub const CONFIG_PATH: &str = "backend/configs/sites.json";
/// Primary results file.
pub const PRIMARY_OUTPUT_PATH: &str = "backend/data/prices.json";
/// Copy of the results served by the static frontend.
pub const MIRROR_OUTPUT_PATH: &str = "frontend/public/data/prices.json";
/// Installed frontend dependencies.
pub const FRONTEND_DEPS_DIR: &str = "frontend/node_modules";

pub const REQUIRED_DIRS: &[&str] = &["backend/configs", "backend/data", "frontend/public/data"];

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "autocompare")]
#[command(about = "Scrape the configured sites with a headless browser and write prices.json")]
pub struct CliConfig {
    /// Project root the fixed config and output paths are resolved against
    #[arg(long, default_value = ".")]
    pub root: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn config_path(&self) -> &str {
        CONFIG_PATH
    }

    fn primary_output_path(&self) -> &str {
        PRIMARY_OUTPUT_PATH
    }

    fn mirror_output_path(&self) -> &str {
        MIRROR_OUTPUT_PATH
    }

    fn required_dirs(&self) -> &[&str] {
        REQUIRED_DIRS
    }

    fn policy(&self) -> ScrapePolicy {
        ScrapePolicy::default()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("root", &self.root)
    }
}
