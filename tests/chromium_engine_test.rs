use autocompare::core::{BrowserEngine, SiteConfig};
use autocompare::{ChromiumEngine, ScrapePolicy, SiteScraper};
use httpmock::prelude::*;
use std::time::Duration;

const LISTING: &str = r#"<!doctype html>
<html>
  <body>
    <h1>
      2019 Toyota Corolla
    </h1>
    <span class="price">$15,450</span>
    <span class="empty"></span>
  </body>
</html>"#;

#[tokio::test]
#[ignore] // Requires Chromium to be installed
async fn test_chromium_scrapes_served_page() {
    let server = MockServer::start();
    let page_mock = server.mock(|when, then| {
        when.method(GET).path("/listing");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(LISTING);
    });

    let site: SiteConfig = serde_json::from_value(serde_json::json!({
        "url": server.url("/listing"),
        "selectors": {
            "title": "h1",
            "price": ".price",
            "empty": ".empty",
            "missing": ".does-not-exist",
            "invalid": "div[",
        }
    }))
    .unwrap();

    let session = ChromiumEngine::new()
        .launch()
        .await
        .expect("failed to launch Chromium");
    let scraper = SiteScraper::new(ScrapePolicy {
        settle_delay: Duration::from_millis(200),
        ..ScrapePolicy::default()
    });
    let result = scraper.scrape(session.as_ref(), "local", &site).await;
    session.shutdown().await.expect("shutdown failed");

    page_mock.assert();
    assert!(result.is_success(), "error: {:?}", result.error());
    let data = result.data();
    assert_eq!(data.get("title"), Some(&Some("2019 Toyota Corolla".to_string())));
    assert_eq!(data.get("price"), Some(&Some("$15,450".to_string())));
    assert_eq!(data.get("empty"), Some(&None));
    assert_eq!(data.get("missing"), Some(&None));
    assert_eq!(data.get("invalid"), Some(&None));
}

#[tokio::test]
#[ignore] // Requires Chromium to be installed
async fn test_chromium_unreachable_host_fails_site() {
    let site: SiteConfig = serde_json::from_value(serde_json::json!({
        "url": "http://127.0.0.1:9/never",
        "selectors": {"title": "h1"}
    }))
    .unwrap();

    let session = ChromiumEngine::new()
        .launch()
        .await
        .expect("failed to launch Chromium");
    let result = SiteScraper::new(ScrapePolicy::default())
        .scrape(session.as_ref(), "down", &site)
        .await;
    session.shutdown().await.expect("shutdown failed");

    assert!(!result.is_success());
    assert!(result.error().is_some());
    assert!(result.data().is_empty());
}
