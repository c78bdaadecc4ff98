use crate::config::sites::{lint_sites, load_sites};
use crate::core::scraper::SiteScraper;
use crate::core::{BrowserEngine, ConfigProvider, RunResult, ScrapeResult, Storage};
use crate::utils::error::Result;

/// How a run ended, when it did not fail outright.
#[derive(Debug)]
pub enum RunOutcome {
    /// The config was valid but listed no sites; nothing was launched or written.
    NothingToDo,
    Completed(RunSummary),
}

#[derive(Debug)]
pub struct RunSummary {
    pub results: RunResult,
    pub written: Vec<String>,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.results.succeeded()
    }

    pub fn total(&self) -> usize {
        self.results.total()
    }

    /// Final console line of a run, e.g. `Successfully scraped: 1/2 sites`.
    pub fn summary_line(&self) -> String {
        format!(
            "Successfully scraped: {}/{} sites",
            self.succeeded(),
            self.total()
        )
    }
}

/// Console line printed before each site is scraped.
pub fn progress_line(site: &str) -> String {
    format!("Scraping {}...", site)
}

pub struct RunOrchestrator<S: Storage, C: ConfigProvider, E: BrowserEngine> {
    storage: S,
    config: C,
    engine: E,
    scraper: SiteScraper,
}

impl<S: Storage, C: ConfigProvider, E: BrowserEngine> RunOrchestrator<S, C, E> {
    pub fn new(storage: S, config: C, engine: E) -> Self {
        let scraper = SiteScraper::new(config.policy());
        Self {
            storage,
            config,
            engine,
            scraper,
        }
    }

    /// Scrapes every configured site in order and writes the results to
    /// both output files.
    ///
    /// Per-site failures are recorded in the results, including a browser
    /// that fails to start. Configuration errors and write failures abort
    /// the run.
    pub async fn run(&self) -> Result<RunOutcome> {
        for dir in self.config.required_dirs() {
            self.storage.create_dir_all(dir).await?;
        }

        let sites = load_sites(&self.storage, self.config.config_path()).await?;
        if sites.is_empty() {
            tracing::warn!("No sites configured in {}", self.config.config_path());
            println!("No sites configured for scraping.");
            return Ok(RunOutcome::NothingToDo);
        }

        for problem in lint_sites(&sites) {
            tracing::warn!("{}", problem);
        }

        println!("Starting scrape of {} sites...", sites.len());
        tracing::info!("Starting scrape of {} sites", sites.len());

        // 瀏覽器啟動失敗時，每個站點都記錄同一個錯誤
        let (session, launch_error) = match self.engine.launch().await {
            Ok(session) => (Some(session), None),
            Err(e) => {
                tracing::error!("Browser launch failed: {}", e);
                println!("Error launching browser: {}", e);
                (None, Some(e.to_string()))
            }
        };
        let pacing = self.scraper.policy().pacing_delay;

        let mut results = RunResult::new();
        for (index, (name, site)) in sites.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(pacing).await;
            }

            println!("{}", progress_line(name));
            let result = match (&session, &launch_error) {
                (Some(session), _) => self.scraper.scrape(session.as_ref(), name, site).await,
                (None, error) => ScrapeResult::failed(
                    name,
                    &site.url,
                    error.as_deref().unwrap_or("browser unavailable"),
                ),
            };
            tracing::info!(
                site = name,
                success = result.is_success(),
                "Finished {}",
                name
            );
            results.record(name, result);
        }

        if let Some(session) = session {
            if let Err(e) = session.shutdown().await {
                tracing::warn!("Browser shutdown failed: {}", e);
            }
        }

        let content = results.to_pretty_json()?;
        let mut written = Vec::with_capacity(2);
        for path in [
            self.config.primary_output_path(),
            self.config.mirror_output_path(),
        ] {
            tracing::debug!("Writing {} bytes to {}", content.len(), path);
            self.storage.write_file(path, content.as_bytes()).await?;
            written.push(path.to_string());
        }

        println!("\nScraping complete!");
        println!("Results saved to:");
        for path in &written {
            println!("  - {}", path);
        }

        let summary = RunSummary { results, written };
        println!("{}", summary.summary_line());

        Ok(RunOutcome::Completed(summary))
    }
}
