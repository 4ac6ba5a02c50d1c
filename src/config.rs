//! Configuration for site generation runs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Settings for one site generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory the generated site is written to.
    pub output_dir: PathBuf,
    /// Site title shown on the index page and in page titles.
    pub title: String,
    /// Also generate cumulative charts next to the raw ones.
    pub cumulative_charts: bool,
    /// Canvas height in pixels.
    pub chart_height: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./generated"),
            title: "Triage statistics".to_string(),
            cumulative_charts: true,
            chart_height: 320,
        }
    }
}

impl ReportConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Save configuration to a TOML file.
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::new()
    }
}

/// Builder pattern for [`ReportConfig`].
pub struct ReportConfigBuilder {
    config: ReportConfig,
}

impl ReportConfigBuilder {
    pub fn new() -> Self {
        Self { config: ReportConfig::default() }
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn cumulative_charts(mut self, enabled: bool) -> Self {
        self.config.cumulative_charts = enabled;
        self
    }

    pub fn chart_height(mut self, height: u32) -> Self {
        self.config.chart_height = height;
        self
    }

    pub fn build(self) -> ReportConfig {
        self.config
    }
}

impl Default for ReportConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
