#![allow(dead_code)]

use async_trait::async_trait;
use autocompare::config::{CONFIG_PATH, MIRROR_OUTPUT_PATH, PRIMARY_OUTPUT_PATH, REQUIRED_DIRS};
use autocompare::core::{BrowserEngine, BrowserSession, ConfigProvider, PageHandle};
use autocompare::{Result, ScrapeError, ScrapePolicy};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// How the fake browser behaves for a given URL.
#[derive(Clone)]
pub enum PageScript {
    Loads(HashMap<String, String>),
    Fails(String),
    Hangs,
}

pub fn loads(elements: &[(&str, &str)]) -> PageScript {
    PageScript::Loads(
        elements
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

#[derive(Clone, Default)]
pub struct FakeEngine {
    scripts: Arc<HashMap<String, PageScript>>,
    pub fail_launch: bool,
    pub launches: Arc<AtomicUsize>,
    pub shutdowns: Arc<AtomicUsize>,
    pub pages_opened: Arc<AtomicUsize>,
    pub pages_closed: Arc<AtomicUsize>,
}

impl FakeEngine {
    pub fn new(scripts: Vec<(&str, PageScript)>) -> Self {
        Self {
            scripts: Arc::new(
                scripts
                    .into_iter()
                    .map(|(url, script)| (url.to_string(), script))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    /// An engine whose browser never starts.
    pub fn failing_launch() -> Self {
        Self {
            fail_launch: true,
            ..Self::default()
        }
    }

    pub fn launch_count(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrowserEngine for FakeEngine {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        if self.fail_launch {
            return Err(ScrapeError::browser("could not find Chromium executable"));
        }
        Ok(Box::new(self.clone()))
    }
}

#[async_trait]
impl BrowserSession for FakeEngine {
    async fn new_page(&self) -> Result<Box<dyn PageHandle>> {
        self.pages_opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakePage {
            scripts: self.scripts.clone(),
            elements: HashMap::new(),
            closed: self.pages_closed.clone(),
        }))
    }

    async fn shutdown(self: Box<Self>) -> Result<()> {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct FakePage {
    scripts: Arc<HashMap<String, PageScript>>,
    elements: HashMap<String, String>,
    closed: Arc<AtomicUsize>,
}

#[async_trait]
impl PageHandle for FakePage {
    async fn goto(&mut self, url: &str) -> Result<()> {
        match self.scripts.get(url) {
            Some(PageScript::Loads(elements)) => {
                self.elements = elements.clone();
                Ok(())
            }
            Some(PageScript::Fails(message)) => Err(ScrapeError::browser(message)),
            Some(PageScript::Hangs) => std::future::pending().await,
            None => Ok(()),
        }
    }

    async fn text_content(&self, selector: &str) -> Result<Option<String>> {
        Ok(self.elements.get(selector).cloned())
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Default project paths with a configurable policy.
pub struct TestConfig {
    pub policy: ScrapePolicy,
}

impl TestConfig {
    pub fn instant() -> Self {
        Self {
            policy: ScrapePolicy {
                navigation_timeout: Duration::from_secs(30),
                settle_delay: Duration::ZERO,
                pacing_delay: Duration::ZERO,
            },
        }
    }

    pub fn default_policy() -> Self {
        Self {
            policy: ScrapePolicy::default(),
        }
    }
}

impl ConfigProvider for TestConfig {
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
        self.policy
    }
}

pub fn write_sites(root: &Path, content: &str) {
    let path = root.join(CONFIG_PATH);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

pub fn read_output(root: &Path, path: &str) -> Option<Vec<u8>> {
    std::fs::read(root.join(path)).ok()
}
