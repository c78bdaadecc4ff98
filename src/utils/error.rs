use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Invalid JSON in configuration file {path}: {source}")]
    ConfigParseError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not read configuration file {path}: {source}")]
    ConfigReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Browser error: {message}")]
    BrowserError { message: String },

    #[error("Navigation to {url} timed out after {}s", .timeout.as_secs())]
    NavigationTimeout {
        url: String,
        timeout: std::time::Duration,
    },

    #[error("Extraction failed for selector '{selector}': {message}")]
    ExtractionError { selector: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value for '{field}': {value} ({reason})")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Browser,
    Persistence,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code used by the binaries.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl ScrapeError {
    pub fn browser(message: impl std::fmt::Display) -> Self {
        ScrapeError::BrowserError {
            message: message.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ScrapeError::ConfigNotFound { .. }
            | ScrapeError::ConfigReadError { .. }
            | ScrapeError::ConfigParseError { .. } => ErrorCategory::Configuration,
            ScrapeError::BrowserError { .. }
            | ScrapeError::NavigationTimeout { .. }
            | ScrapeError::ExtractionError { .. } => ErrorCategory::Browser,
            ScrapeError::IoError(_) | ScrapeError::SerializationError(_) => {
                ErrorCategory::Persistence
            }
            ScrapeError::ValidationError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ScrapeError::ValidationError { .. } | ScrapeError::ExtractionError { .. } => {
                ErrorSeverity::Low
            }
            ScrapeError::NavigationTimeout { .. } => ErrorSeverity::Medium,
            ScrapeError::ConfigNotFound { .. }
            | ScrapeError::ConfigReadError { .. }
            | ScrapeError::ConfigParseError { .. }
            | ScrapeError::BrowserError { .. } => ErrorSeverity::High,
            ScrapeError::IoError(_) | ScrapeError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScrapeError::ConfigNotFound { path } => {
                format!("Configuration file not found: {}", path)
            }
            ScrapeError::ConfigReadError { path, source } => {
                format!("Could not read configuration file {}: {}", path, source)
            }
            ScrapeError::ConfigParseError { source, .. } => {
                format!("Invalid JSON in configuration file: {}", source)
            }
            ScrapeError::BrowserError { message } => {
                format!("The browser could not be used: {}", message)
            }
            ScrapeError::NavigationTimeout { url, .. } => {
                format!("The page at {} did not load in time", url)
            }
            ScrapeError::ExtractionError { selector, .. } => {
                format!("Could not read text for selector '{}'", selector)
            }
            ScrapeError::IoError(e) => format!("Could not write results: {}", e),
            ScrapeError::SerializationError(e) => format!("Could not encode results: {}", e),
            ScrapeError::ValidationError { field, reason, .. } => {
                format!("{}: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScrapeError::ConfigNotFound { .. } => {
                "Please create a sites.json file with your scraping configurations."
            }
            ScrapeError::ConfigReadError { .. } => {
                "Make sure backend/configs/sites.json is a readable file."
            }
            ScrapeError::ConfigParseError { .. } => {
                "Each site needs a \"url\" string and a \"selectors\" object of field names to CSS selectors."
            }
            ScrapeError::BrowserError { .. } => {
                "Install Chromium or set CHROME_PATH to a Chrome/Chromium executable."
            }
            ScrapeError::NavigationTimeout { .. } => {
                "Check that the site is reachable from this machine."
            }
            ScrapeError::ExtractionError { .. } => "Verify the CSS selector against the live page.",
            ScrapeError::IoError(_) | ScrapeError::SerializationError(_) => {
                "Check permissions and free space for backend/data and frontend/public/data."
            }
            ScrapeError::ValidationError { .. } => "Fix the value in backend/configs/sites.json.",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_are_high_severity() {
        let err = ScrapeError::ConfigNotFound {
            path: "backend/configs/sites.json".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity().exit_code(), 1);
        assert!(err.to_string().contains("backend/configs/sites.json"));
    }

    #[test]
    fn test_config_read_error_is_configuration_not_persistence() {
        let err = ScrapeError::ConfigReadError {
            path: "backend/configs/sites.json".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity().exit_code(), 1);
        assert!(err.user_friendly_message().contains("Could not read configuration file"));
    }

    #[test]
    fn test_write_failures_are_critical() {
        let err = ScrapeError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        ));
        assert_eq!(err.category(), ErrorCategory::Persistence);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.severity().exit_code(), 3);
    }

    #[test]
    fn test_navigation_timeout_message() {
        let err = ScrapeError::NavigationTimeout {
            url: "https://example.test".to_string(),
            timeout: std::time::Duration::from_secs(30),
        };
        assert_eq!(
            err.to_string(),
            "Navigation to https://example.test timed out after 30s"
        );
    }
}
