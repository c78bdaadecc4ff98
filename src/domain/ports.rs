use crate::core::scraper::ScrapePolicy;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn create_dir_all(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Where a run reads its sites from and writes its results to.
pub trait ConfigProvider: Send + Sync {
    fn config_path(&self) -> &str;
    fn primary_output_path(&self) -> &str;
    fn mirror_output_path(&self) -> &str;
    /// Directories that must exist before a run starts.
    fn required_dirs(&self) -> &[&str];
    fn policy(&self) -> ScrapePolicy;
}

/// Starts the shared browser for a run.
#[async_trait]
pub trait BrowserEngine: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>>;
}

/// A running browser. Opened once and shut down once per run.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Opens an isolated page for one site.
    async fn new_page(&self) -> Result<Box<dyn PageHandle>>;
    async fn shutdown(self: Box<Self>) -> Result<()>;
}

#[async_trait]
pub trait PageHandle: Send + Sync {
    /// Navigates and waits for the page to report it has loaded.
    async fn goto(&mut self, url: &str) -> Result<()>;
    /// Raw `textContent` of the first element matching `selector`,
    /// `None` when nothing matches.
    async fn text_content(&self, selector: &str) -> Result<Option<String>>;
    async fn close(self: Box<Self>) -> Result<()>;
}
