use crate::core::{SiteMap, Storage};
use crate::utils::error::{Result, ScrapeError};
use crate::utils::validation::{validate_selector, validate_url};

/// Reads and parses the site map at `path`.
///
/// An empty but valid map is returned as-is; deciding that there is nothing
/// to do is up to the caller.
pub async fn load_sites<S: Storage>(storage: &S, path: &str) -> Result<SiteMap> {
    let bytes = match storage.read_file(path).await {
        Ok(bytes) => bytes,
        Err(ScrapeError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ScrapeError::ConfigNotFound {
                path: path.to_string(),
            });
        }
        Err(ScrapeError::IoError(source)) => {
            return Err(ScrapeError::ConfigReadError {
                path: path.to_string(),
                source,
            });
        }
        Err(e) => return Err(e),
    };

    let sites = parse_sites(&bytes, path)?;
    tracing::debug!("Loaded {} site(s) from {}", sites.len(), path);
    Ok(sites)
}

pub fn parse_sites(content: &[u8], path: &str) -> Result<SiteMap> {
    serde_json::from_slice(content).map_err(|source| ScrapeError::ConfigParseError {
        path: path.to_string(),
        source,
    })
}

/// Soft checks on a loaded site map. Problems are reported, not enforced.
pub fn lint_sites(sites: &SiteMap) -> Vec<ScrapeError> {
    let mut problems = Vec::new();

    for (name, site) in sites.iter() {
        if let Err(e) = validate_url(&format!("{}.url", name), &site.url) {
            problems.push(e);
        }
        if site.selectors.is_empty() {
            problems.push(ScrapeError::ValidationError {
                field: format!("{}.selectors", name),
                value: "{}".to_string(),
                reason: "No selectors configured; the site will produce empty data".to_string(),
            });
        }
        for (field, selector) in site.selectors.iter() {
            if let Err(e) =
                validate_selector(&format!("{}.selectors.{}", name, field), selector)
            {
                problems.push(e);
            }
        }
    }

    problems
}
