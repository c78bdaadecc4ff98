use crate::adapters::chromium::find_chromium;
use crate::config::{
    CONFIG_PATH, FRONTEND_DEPS_DIR, MIRROR_OUTPUT_PATH, PRIMARY_OUTPUT_PATH,
};
use crate::setup::{run_command, CommandProbe, Probe, ProbeOutcome};
use async_trait::async_trait;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

pub const MIN_RUST_VERSION: Version = Version {
    major: 1,
    minor: 80,
    patch: 0,
};
pub const MIN_NODE_MAJOR: u64 = 20;

const TOOLCHAIN_TIMEOUT: Duration = Duration::from_secs(10);
const NODE_TIMEOUT: Duration = Duration::from_secs(5);

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").expect("version pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// First `major.minor[.patch]` found in `text`, e.g. `rustc 1.82.0 (f6e511eec 2024-10-15)` or `v20.11.1`.
pub fn parse_version(text: &str) -> Option<Version> {
    let caps = VERSION_RE.captures(text)?;
    Some(Version {
        major: caps.get(1)?.as_str().parse().ok()?,
        minor: caps.get(2)?.as_str().parse().ok()?,
        patch: caps
            .get(3)
            .map(|m| m.as_str().parse().unwrap_or(0))
            .unwrap_or(0),
    })
}

pub struct RustToolchainProbe {
    pub program: String,
    pub minimum: Version,
}

impl Default for RustToolchainProbe {
    fn default() -> Self {
        Self {
            program: "rustc".to_string(),
            minimum: MIN_RUST_VERSION,
        }
    }
}

#[async_trait]
impl Probe for RustToolchainProbe {
    fn name(&self) -> &str {
        "Rust Toolchain"
    }

    async fn check(&self) -> ProbeOutcome {
        match run_command(&self.program, &["--version"], TOOLCHAIN_TIMEOUT).await {
            CommandProbe::Output(text) => match parse_version(&text) {
                Some(version) if version >= self.minimum => {
                    ProbeOutcome::pass(format!("Rust {}", version))
                }
                Some(version) => ProbeOutcome::fail(format!(
                    "Rust {} (requires {}+)",
                    version, self.minimum
                ))
                .hint("Run: rustup update stable"),
                None => ProbeOutcome::fail(format!("Unrecognised version output: {}", text)),
            },
            CommandProbe::NotFound => ProbeOutcome::fail(format!("{} not installed", self.program))
                .hint("Install Rust from https://rustup.rs"),
            CommandProbe::TimedOut => ProbeOutcome::warn("Could not check Rust version"),
            CommandProbe::Failed(e) => ProbeOutcome::fail(format!("{} failed: {}", self.program, e)),
        }
    }
}

pub struct RequiredToolsProbe {
    pub tools: Vec<String>,
}

impl Default for RequiredToolsProbe {
    fn default() -> Self {
        Self {
            tools: vec!["cargo".to_string(), "npm".to_string()],
        }
    }
}

#[async_trait]
impl Probe for RequiredToolsProbe {
    fn name(&self) -> &str {
        "Required Tools"
    }

    async fn check(&self) -> ProbeOutcome {
        let mut found = Vec::new();
        let mut missing = Vec::new();
        for tool in &self.tools {
            match which::which(tool) {
                Ok(path) => found.push(format!("[OK] {} ({})", tool, path.display())),
                Err(_) => missing.push(tool.as_str()),
            }
        }

        let mut outcome = if missing.is_empty() {
            ProbeOutcome::pass(format!("{} tool(s) available", found.len()))
        } else {
            ProbeOutcome::fail(format!("Missing tools: {}", missing.join(", ")))
                .hint("Install Rust (cargo) from https://rustup.rs and Node.js (npm) from https://nodejs.org")
        };
        outcome.details.extend(found);
        outcome
    }
}

pub struct BrowserProbe {
    locate: fn() -> Option<PathBuf>,
}

impl BrowserProbe {
    pub fn new(locate: fn() -> Option<PathBuf>) -> Self {
        Self { locate }
    }
}

impl Default for BrowserProbe {
    fn default() -> Self {
        Self::new(find_chromium)
    }
}

#[async_trait]
impl Probe for BrowserProbe {
    fn name(&self) -> &str {
        "Chromium Browser"
    }

    async fn check(&self) -> ProbeOutcome {
        match (self.locate)() {
            Some(path) => {
                ProbeOutcome::pass(format!("Chromium browser is installed: {}", path.display()))
            }
            None => ProbeOutcome::warn("Chromium browser may not be installed")
                .hint("Install Chromium or Google Chrome, or set CHROME_PATH"),
        }
    }
}

pub struct ConfigFileProbe {
    pub root: PathBuf,
}

#[async_trait]
impl Probe for ConfigFileProbe {
    fn name(&self) -> &str {
        "Configuration Files"
    }

    async fn check(&self) -> ProbeOutcome {
        let config_file = self.root.join(CONFIG_PATH);
        if config_file.exists() {
            ProbeOutcome::pass(format!("Configuration file exists: {}", config_file.display()))
        } else {
            ProbeOutcome::warn(format!(
                "Configuration file not found: {}",
                config_file.display()
            ))
            .hint("This is OK for initial setup, but you'll need to create it.")
        }
    }
}

pub struct DataFilesProbe {
    pub root: PathBuf,
}

/// `Some(error)` when `path` exists but is not a JSON object.
fn invalid_data_file(path: &Path) -> Option<String> {
    let content = match std::fs::read(path) {
        Ok(content) => content,
        Err(e) => return Some(e.to_string()),
    };
    match serde_json::from_slice::<serde_json::Value>(&content) {
        Ok(serde_json::Value::Object(_)) => None,
        Ok(_) => Some("expected a JSON object keyed by site name".to_string()),
        Err(e) => Some(e.to_string()),
    }
}

#[async_trait]
impl Probe for DataFilesProbe {
    fn name(&self) -> &str {
        "Data Files"
    }

    async fn check(&self) -> ProbeOutcome {
        let primary = self.root.join(PRIMARY_OUTPUT_PATH);
        let mirror = self.root.join(MIRROR_OUTPUT_PATH);
        let mut lines = Vec::new();

        for (label, path) in [("Backend", &primary), ("Frontend", &mirror)] {
            if path.exists() {
                lines.push(format!("[OK] {} price data exists: {}", label, path.display()));
            } else {
                lines.push(format!(
                    "[WARN] {} price data not found: {}",
                    label,
                    path.display()
                ));
                lines.push("   Run the scraper to generate: cargo run --release".to_string());
            }
        }

        let mut outcome = if mirror.exists() {
            match invalid_data_file(&mirror) {
                Some(e) => ProbeOutcome::fail(format!(
                    "Frontend price data is not valid: {}",
                    e
                )),
                None => ProbeOutcome::pass("Price data available"),
            }
        } else if primary.exists() {
            ProbeOutcome::pass("Price data available")
        } else {
            ProbeOutcome::warn("No price data yet")
        };
        outcome.details.extend(lines);
        outcome
    }
}

pub struct NodeProbe {
    pub program: String,
    pub min_major: u64,
}

impl Default for NodeProbe {
    fn default() -> Self {
        Self {
            program: "node".to_string(),
            min_major: MIN_NODE_MAJOR,
        }
    }
}

#[async_trait]
impl Probe for NodeProbe {
    fn name(&self) -> &str {
        "Node.js Installation"
    }

    async fn check(&self) -> ProbeOutcome {
        match run_command(&self.program, &["--version"], NODE_TIMEOUT).await {
            CommandProbe::Output(text) => match parse_version(&text) {
                Some(version) if version.major >= self.min_major => {
                    ProbeOutcome::pass(format!("Node.js {}", text))
                }
                Some(version) => ProbeOutcome::warn(format!(
                    "Node.js version should be {}+ (found {})",
                    self.min_major, version.major
                )),
                None => ProbeOutcome::warn(format!("Unrecognised Node.js version: {}", text)),
            },
            CommandProbe::NotFound => ProbeOutcome::fail("Node.js not installed"),
            CommandProbe::TimedOut => ProbeOutcome::warn("Could not check Node.js version"),
            CommandProbe::Failed(e) => ProbeOutcome::fail(format!("Node.js not found: {}", e)),
        }
    }
}

pub struct FrontendDepsProbe {
    pub root: PathBuf,
}

#[async_trait]
impl Probe for FrontendDepsProbe {
    fn name(&self) -> &str {
        "Frontend Dependencies"
    }

    async fn check(&self) -> ProbeOutcome {
        if self.root.join(FRONTEND_DEPS_DIR).is_dir() {
            ProbeOutcome::pass("Frontend dependencies are installed")
        } else {
            ProbeOutcome::warn("Frontend dependencies not installed")
                .hint("Run: cd frontend && npm install")
        }
    }
}

/// The standard checklist for a project rooted at `root`.
pub fn default_probes(root: &Path) -> Vec<Box<dyn Probe>> {
    vec![
        Box::new(RustToolchainProbe::default()),
        Box::new(RequiredToolsProbe::default()),
        Box::new(BrowserProbe::default()),
        Box::new(ConfigFileProbe {
            root: root.to_path_buf(),
        }),
        Box::new(DataFilesProbe {
            root: root.to_path_buf(),
        }),
        Box::new(NodeProbe::default()),
        Box::new(FrontendDepsProbe {
            root: root.to_path_buf(),
        }),
    ]
}
