use crate::core::{BrowserSession, OrderedMap, PageHandle, ScrapeResult, SiteConfig};
use crate::utils::error::{Result, ScrapeError};
use std::time::Duration;

pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);
pub const SETTLE_DELAY: Duration = Duration::from_secs(2);
pub const PACING_DELAY: Duration = Duration::from_secs(1);

/// Fixed waits applied around every site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapePolicy {
    /// Upper bound for a navigation to report the page as loaded.
    pub navigation_timeout: Duration,
    /// Flat wait after navigation so client-side rendering can finish.
    pub settle_delay: Duration,
    /// Pause between two consecutive sites.
    pub pacing_delay: Duration,
}

impl Default for ScrapePolicy {
    fn default() -> Self {
        Self {
            navigation_timeout: NAVIGATION_TIMEOUT,
            settle_delay: SETTLE_DELAY,
            pacing_delay: PACING_DELAY,
        }
    }
}

pub struct SiteScraper {
    policy: ScrapePolicy,
}

impl SiteScraper {
    pub fn new(policy: ScrapePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScrapePolicy {
        &self.policy
    }

    /// Scrapes one site. Never fails: anything that goes wrong before field
    /// extraction ends up in the result's `error`.
    pub async fn scrape(
        &self,
        session: &dyn BrowserSession,
        name: &str,
        site: &SiteConfig,
    ) -> ScrapeResult {
        match self.scrape_page(session, name, site).await {
            Ok(data) => ScrapeResult::succeeded(name, &site.url, data),
            Err(e) => {
                tracing::warn!("Error scraping {}: {}", name, e);
                println!("Error scraping {}: {}", name, e);
                ScrapeResult::failed(name, &site.url, e.to_string())
            }
        }
    }

    async fn scrape_page(
        &self,
        session: &dyn BrowserSession,
        name: &str,
        site: &SiteConfig,
    ) -> Result<OrderedMap<Option<String>>> {
        let mut page = session.new_page().await?;
        let outcome = self.extract(page.as_mut(), name, site).await;

        // 無論成功與否都要關閉頁面
        if let Err(e) = page.close().await {
            tracing::debug!("Failed to close page for {}: {}", name, e);
        }

        outcome
    }

    async fn extract(
        &self,
        page: &mut dyn PageHandle,
        name: &str,
        site: &SiteConfig,
    ) -> Result<OrderedMap<Option<String>>> {
        tracing::debug!("Navigating to {}", site.url);
        tokio::time::timeout(self.policy.navigation_timeout, page.goto(&site.url))
            .await
            .map_err(|_| ScrapeError::NavigationTimeout {
                url: site.url.clone(),
                timeout: self.policy.navigation_timeout,
            })??;

        tokio::time::sleep(self.policy.settle_delay).await;

        let mut data = OrderedMap::with_capacity(site.selectors.len());
        for (field, selector) in site.selectors.iter() {
            let value = match page.text_content(selector).await {
                Ok(text) => normalize_text(text),
                Err(e) => {
                    tracing::warn!("Error scraping {} from {}: {}", field, name, e);
                    None
                }
            };
            tracing::debug!(site = name, field, found = value.is_some(), "extracted field");
            data.insert(field, value);
        }

        Ok(data)
    }
}

/// An empty text node counts as missing; anything else is trimmed.
fn normalize_text(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.is_empty()).map(|t| t.trim().to_string())
}
