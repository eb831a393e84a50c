// Console Configuration
//
// Catalog overrides, ranking defaults, layout and logging, read from TOML

use anyhow::{Context, Result};
use lecatalogue::{CatalogOverrides, EndpointCatalog};
use legraphe::{GraphBuilder, LayoutConfig};
use lerecommandation::CategoryFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file, relative to a project directory
pub const DEFAULT_CONFIG_FILE: &str = ".leconsole/config.toml";

/// Environment variable overriding the configured log level
pub const LOG_LEVEL_ENV: &str = "LECONSOLE_LOG_LEVEL";

/// Console configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Endpoint catalog adjustments
    pub catalog: CatalogOverrides,

    /// Suggestion defaults
    pub ranking: RankingConfig,

    /// Graph layout constants
    pub layout: LayoutConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Suggestion defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Category filter used when none is given
    pub default_filter: CategoryFilter,

    /// Maximum suggestions shown
    pub limit: Option<usize>,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from a project directory
    ///
    /// Looks for `.leconsole/config.toml`; returns the defaults if it is absent.
    pub fn load<P: AsRef<Path>>(project_path: P) -> Result<Self> {
        let config_path = project_path.as_ref().join(DEFAULT_CONFIG_FILE);

        if !config_path.exists() {
            return Ok(ConsoleConfig::default());
        }

        Self::load_file(&config_path)
    }

    /// Load configuration from an explicit file
    pub fn load_file<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: ConsoleConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        Ok(config)
    }

    /// Save configuration under a project directory
    ///
    /// Creates `.leconsole` if it doesn't exist.
    pub fn save<P: AsRef<Path>>(&self, project_path: P) -> Result<()> {
        let config_path = project_path.as_ref().join(DEFAULT_CONFIG_FILE);
        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
        }

        let toml_string =
            toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(&config_path, toml_string)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    /// Built-in catalog with the configured overrides applied
    pub fn catalog(&self) -> Result<EndpointCatalog> {
        EndpointCatalog::builtin()
            .with_overrides(&self.catalog)
            .context("Invalid [catalog] configuration")
    }

    /// Graph builder using the configured layout
    pub fn graph_builder(&self) -> GraphBuilder {
        GraphBuilder::new().with_layout(self.layout)
    }

    /// Effective log level, letting `LECONSOLE_LOG_LEVEL` win over the file
    pub fn log_level(&self) -> String {
        std::env::var(LOG_LEVEL_ENV)
            .ok()
            .filter(|level| !level.trim().is_empty())
            .unwrap_or_else(|| self.logging.level.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_builtin_catalog() {
        let config = ConsoleConfig::default();
        assert!(config.catalog.is_empty());
        assert_eq!(config.ranking.default_filter, CategoryFilter::All);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.catalog().unwrap().len(), EndpointCatalog::builtin().len());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: ConsoleConfig = toml::from_str(
            r#"
            [ranking]
            default_filter = "local"

            [layout]
            child_spacing = 200.0
            "#,
        )
        .unwrap();

        assert_eq!(config.ranking.default_filter, CategoryFilter::Local);
        assert_eq!(config.ranking.limit, None);
        assert_eq!(config.layout.child_spacing, 200.0);
        assert_eq!(config.layout.main_spacing, LayoutConfig::default().main_spacing);
        assert_eq!(config.logging, LoggingConfig::default());
    }
}
