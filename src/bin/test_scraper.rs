use anyhow::{bail, Context, Result};
use autocompare::config::sites::{lint_sites, load_sites};
use autocompare::config::CONFIG_PATH;
use autocompare::core::{BrowserEngine, SiteMap};
use autocompare::utils::logger;
use autocompare::{ChromiumEngine, LocalStorage, ScrapeError, ScrapePolicy, SiteScraper};
use clap::Parser;

#[derive(Parser)]
#[command(name = "test-scraper")]
#[command(about = "Validate sites.json and scrape the first configured site")]
struct Args {
    /// Project root containing backend/configs/sites.json
    #[arg(long, default_value = ".")]
    root: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn banner(title: &str) {
    let rule = "=".repeat(60);
    println!("\n{}\n{}\n{}", rule, title, rule);
}

async fn check_config(storage: &LocalStorage, root: &str) -> Result<SiteMap> {
    banner("Testing Scraper Configuration");

    let config_file = format!("{}/{}", root, CONFIG_PATH);
    let sites = match load_sites(storage, CONFIG_PATH).await {
        Ok(sites) => sites,
        Err(e @ ScrapeError::ConfigNotFound { .. }) => {
            println!("[FAIL] Configuration file not found: {}", config_file);
            println!("\nPlease create backend/configs/sites.json with your scraping configurations.");
            return Err(e.into());
        }
        Err(e) => {
            println!("[FAIL] {}", e);
            return Err(e.into());
        }
    };

    if sites.is_empty() {
        println!("[FAIL] No sites configured in sites.json");
        bail!("no sites configured");
    }

    println!("[OK] Configuration file found: {}", config_file);
    println!("[OK] Found {} site(s) configured", sites.len());
    for problem in lint_sites(&sites) {
        println!("[WARN] {}", problem);
    }

    println!("\nConfigured sites:");
    for (name, site) in sites.iter() {
        println!("  - {}: {}", name, site.url);
    }

    Ok(sites)
}

const PREVIEW_CHARS: usize = 50;

fn preview(value: &str) -> String {
    value.chars().take(PREVIEW_CHARS).collect()
}

fn render_field(field: &str, value: Option<&str>) -> String {
    match value.filter(|v| !v.is_empty()) {
        Some(v) => format!("    [OK] {}: {}...", field, preview(v)),
        None => format!("    [FAIL] {}: None...", field),
    }
}

async fn scrape_first_site(sites: &SiteMap) -> Result<bool> {
    let (name, site) = sites.first().context("no sites to test")?;
    banner(&format!("Testing scrape: {}", name));

    let session = ChromiumEngine::new()
        .launch()
        .await
        .context("failed to start the browser")?;
    let result = SiteScraper::new(ScrapePolicy::default())
        .scrape(session.as_ref(), name, site)
        .await;
    if let Err(e) = session.shutdown().await {
        tracing::warn!("Browser shutdown failed: {}", e);
    }

    if !result.is_success() {
        println!("[FAIL] Failed to scrape {}", name);
        println!("  Error: {}", result.error().unwrap_or("Unknown error"));
        return Ok(false);
    }

    println!("[OK] Successfully scraped {}", name);
    println!("\nResults:");
    println!("  URL: {}", result.url());
    println!("  Scraped at: {}", result.scraped_at().to_rfc3339());
    println!("  Data extracted:");
    for (field, value) in result.data().iter() {
        println!("{}", render_field(field, value.as_deref()));
    }

    Ok(true)
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    banner("AutoCompare Scraper Test Suite");

    let storage = LocalStorage::new(args.root.clone());
    let sites = match check_config(&storage, &args.root).await {
        Ok(sites) => sites,
        Err(e) => {
            tracing::debug!("config check failed: {:#}", e);
            std::process::exit(1);
        }
    };

    let (first, _) = match sites.first() {
        Some(entry) => entry,
        None => std::process::exit(1),
    };
    println!("\nTesting scrape of first site: {}", first);

    match scrape_first_site(&sites).await {
        Ok(true) => {
            banner("[SUCCESS] Test completed successfully!");
            println!("\nYou can now run the full scraper with:");
            println!("  cargo run --release");
        }
        Ok(false) => {
            banner("[FAIL] Test failed - please check your configuration");
            std::process::exit(1);
        }
        Err(e) => {
            println!("[FAIL] Error during scraping: {:#}", e);
            std::process::exit(1);
        }
    }
}
