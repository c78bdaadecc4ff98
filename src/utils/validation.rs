//! Value checks shared by the config lint and CLI argument validation.
//!
//! Every check returns a [`ScrapeError::ValidationError`] naming the offending
//! field, e.g. `carvana.url` or `carvana.selectors.price`.

use crate::utils::error::{Result, ScrapeError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> ScrapeError {
    ScrapeError::ValidationError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// A site URL the browser can navigate to: absolute http(s) with a host.
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, format!("Invalid URL format: {}", e)))?;

    match url.scheme() {
        "http" | "https" if url.host().is_some() => Ok(()),
        "http" | "https" => Err(invalid(field_name, url_str, "URL has no host")),
        scheme => Err(invalid(
            field_name,
            url_str,
            format!("Unsupported URL scheme: {}", scheme),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }
    Ok(())
}

/// Catches blank selectors and unbalanced `[]` / `()`, the usual typos that
/// make `querySelector` throw. Anything subtler is left to the browser.
pub fn validate_selector(field_name: &str, selector: &str) -> Result<()> {
    if selector.trim().is_empty() {
        return Err(invalid(field_name, selector, "Selector cannot be empty"));
    }

    let mut depth: Vec<char> = Vec::new();
    for c in selector.chars() {
        match c {
            '[' | '(' => depth.push(c),
            ']' | ')' => {
                let open = if c == ']' { '[' } else { '(' };
                if depth.pop() != Some(open) {
                    return Err(invalid(field_name, selector, format!("Unexpected '{}'", c)));
                }
            }
            _ => {}
        }
    }
    if let Some(open) = depth.pop() {
        return Err(invalid(field_name, selector, format!("Unclosed '{}'", open)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("url", "https://example.com").is_ok());
        assert!(validate_url("url", "http://example.com/cars?page=2").is_ok());
        assert!(validate_url("url", "").is_err());
        assert!(validate_url("url", "invalid-url").is_err());
        assert!(validate_url("url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("root", ".").is_ok());
        assert!(validate_path("root", "").is_err());
        assert!(validate_path("root", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_selector() {
        assert!(validate_selector("price", ".price").is_ok());
        assert!(validate_selector("price", "a[data-test=\"price\"]:nth-child(2)").is_ok());
        assert!(validate_selector("price", "   ").is_err());
        assert!(validate_selector("price", "div[").is_err());
        assert!(validate_selector("price", "li:nth-child(2]").is_err());

        let err = validate_selector("dealer.selectors.price", "div)").unwrap_err();
        assert!(err.to_string().contains("dealer.selectors.price"));
    }
}
