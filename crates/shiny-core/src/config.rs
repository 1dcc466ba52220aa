//! Configuration for the tracker.

use std::path::PathBuf;

use crate::error::{ShinyError, ShinyResult};
use crate::hunt::DEFAULT_TITLE;

/// Directory name used under the platform data directory.
pub const APP_DIR_NAME: &str = "shiny-tracker";

/// Tracker configuration.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Where session files live. `None` uses the platform data directory.
    pub data_dir: Option<PathBuf>,
    /// Title given to newly created sessions.
    pub default_title: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl TrackerConfig {
    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Set the title for new sessions. Blank titles fall back to the default.
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.default_title = if title.trim().is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            title
        };
        self
    }

    /// The configured data directory, or `<platform data dir>/shiny-tracker`.
    pub fn resolved_data_dir(&self) -> ShinyResult<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|d| d.join(APP_DIR_NAME))
                .ok_or(ShinyError::NoDataDir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = TrackerConfig::default();
        assert!(cfg.data_dir.is_none());
        assert_eq!(cfg.default_title, "Untitled");
    }

    #[test]
    fn builder_methods() {
        let cfg = TrackerConfig::default()
            .with_data_dir("/tmp/hunts")
            .with_default_title("New hunt");
        assert_eq!(cfg.resolved_data_dir().unwrap(), PathBuf::from("/tmp/hunts"));
        assert_eq!(cfg.default_title, "New hunt");
    }

    #[test]
    fn blank_title_falls_back() {
        let cfg = TrackerConfig::default().with_default_title("   ");
        assert_eq!(cfg.default_title, "Untitled");
    }
}
