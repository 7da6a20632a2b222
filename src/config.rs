//! Viewer configuration
//!
//! Built from command-line arguments (and `WJVIEW_BROWSER`); nothing is read
//! from or written to disk between runs.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

/// Command used to open links when none is configured
pub const DEFAULT_BROWSER: &str = "xdg-open";

/// Configuration for one viewer invocation
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Path to the .wabbajack file
    pub wabbajack_path: PathBuf,

    /// Browser command to open mod pages
    pub browser: String,
}

impl ViewerConfig {
    pub fn new(wabbajack_path: PathBuf) -> Self {
        Self {
            wabbajack_path,
            browser: DEFAULT_BROWSER.to_string(),
        }
    }

    pub fn with_browser(mut self, browser: impl Into<String>) -> Self {
        self.browser = browser.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.wabbajack_path.is_file() {
            return Err(ConfigError::WabbajackNotFound(self.wabbajack_path.clone()));
        }

        if self.browser.trim().is_empty() {
            return Err(ConfigError::MissingBrowser);
        }

        Ok(())
    }

    /// Hand a URL to the configured browser without waiting for it
    pub fn open_url(&self, url: &str) -> std::io::Result<()> {
        debug!("Opening {} with {}", url, self.browser);
        Command::new(self.browser.trim()).arg(url).spawn()?;
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Wabbajack file not found: {0}")]
    WabbajackNotFound(PathBuf),

    #[error("No browser command configured (--browser or WJVIEW_BROWSER)")]
    MissingBrowser,
}
