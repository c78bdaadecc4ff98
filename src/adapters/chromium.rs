//! Headless Chromium through chromiumoxide.

use crate::core::{BrowserEngine, BrowserSession, PageHandle};
use crate::utils::error::{Result, ScrapeError};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Environment variables that may point at a Chrome/Chromium executable.
pub const BROWSER_PATH_VARS: &[&str] = &["CHROME_PATH", "CHROMIUM_PATH"];

const BROWSER_BINARIES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
];

/// Find a Chromium binary: explicit env override first, then `PATH`.
pub fn find_chromium() -> Option<PathBuf> {
    for var in BROWSER_PATH_VARS {
        if let Ok(p) = std::env::var(var) {
            let path = PathBuf::from(p);
            if path.exists() {
                return Some(path);
            }
        }
    }

    for binary in BROWSER_BINARIES {
        if let Ok(path) = which::which(binary) {
            return Some(path);
        }
    }

    if cfg!(target_os = "macos") {
        let common = PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
        if common.exists() {
            return Some(common);
        }
    }

    None
}

pub struct ChromiumEngine {
    executable: Option<PathBuf>,
    request_timeout: Duration,
}

impl ChromiumEngine {
    /// Uses [`find_chromium`]; when nothing is found chromiumoxide falls back
    /// to its own detection at launch time.
    pub fn new() -> Self {
        Self {
            executable: find_chromium(),
            request_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_executable(executable: PathBuf) -> Self {
        Self {
            executable: Some(executable),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Default for ChromiumEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BrowserEngine for ChromiumEngine {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .request_timeout(self.request_timeout)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions");

        if let Some(path) = &self.executable {
            tracing::debug!("Using browser executable {}", path.display());
            builder = builder.chrome_executable(path);
        }

        let config = builder
            .build()
            .map_err(|e| ScrapeError::browser(format!("failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScrapeError::browser(format!("failed to launch Chromium: {}", e)))?;

        // CDP 事件必須持續消費，否則頁面操作會卡住
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::trace!("browser handler event error: {}", e);
                }
            }
        });

        tracing::info!("Headless Chromium started");
        Ok(Box::new(ChromiumSession {
            browser,
            handler_task,
        }))
    }
}

struct ChromiumSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn new_page(&self) -> Result<Box<dyn PageHandle>> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScrapeError::browser(format!("failed to open page: {}", e)))?;
        Ok(Box::new(ChromiumPage { page }))
    }

    async fn shutdown(self: Box<Self>) -> Result<()> {
        let ChromiumSession {
            mut browser,
            handler_task,
        } = *self;

        let closed = browser.close().await;
        if let Err(e) = browser.wait().await {
            tracing::debug!("browser process did not exit cleanly: {}", e);
        }
        handler_task.abort();

        closed
            .map(|_| ())
            .map_err(|e| ScrapeError::browser(format!("failed to close Chromium: {}", e)))
    }
}

struct ChromiumPage {
    page: Page,
}

/// JSON-encodes the text so a missing element comes back as `null`.
///
/// Kept as a plain expression: chromiumoxide sends anything that looks like a
/// function literal through `callFunctionOn` instead of `evaluate`.
fn text_content_script(selector: &str) -> Result<String> {
    let selector = serde_json::to_string(selector)?;
    Ok(format!(
        "JSON.stringify(document.querySelector({})?.textContent ?? null)",
        selector
    ))
}

#[async_trait]
impl PageHandle for ChromiumPage {
    async fn goto(&mut self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| ScrapeError::browser(format!("navigation to {} failed: {}", url, e)))?;
        Ok(())
    }

    async fn text_content(&self, selector: &str) -> Result<Option<String>> {
        let extraction_error = |message: String| ScrapeError::ExtractionError {
            selector: selector.to_string(),
            message,
        };

        let script = text_content_script(selector)?;
        let encoded: String = self
            .page
            .evaluate(script.as_str())
            .await
            .map_err(|e| extraction_error(e.to_string()))?
            .into_value()
            .map_err(|e| extraction_error(e.to_string()))?;

        serde_json::from_str(&encoded).map_err(|e| extraction_error(e.to_string()))
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.page
            .close()
            .await
            .map_err(|e| ScrapeError::browser(format!("failed to close page: {}", e)))
    }
}
