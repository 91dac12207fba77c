//! Pipeline configuration.
//!
//! Looked up in `./sqlnode.toml`, then `<config dir>/sqlnode/config.toml`;
//! missing files fall back to defaults.
//!
//! ```toml
//! dialect = "postgres"
//! schema = "app"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compiler::Dialect;
use crate::error::{NodeError, NodeResult};

pub const CONFIG_FILE: &str = "sqlnode.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// SQL dialect to compile for
    pub dialect: Dialect,

    /// Schema to qualify unqualified tables with (optional)
    pub schema: Option<String>,
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    pub fn from_toml(content: &str) -> NodeResult<Self> {
        toml::from_str(content).map_err(|e| NodeError::Config(e.to_string()))
    }

    pub fn load_from(path: &Path) -> NodeResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load from the first config file found, or defaults.
    pub fn load() -> NodeResult<Self> {
        for path in Self::search_paths() {
            if path.exists() {
                debug!(path = %path.display(), "loading config");
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("sqlnode").join("config.toml"));
        }
        paths
    }
}

/// Builder for PipelineConfig
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.config.dialect = dialect;
        self
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.config.schema = Some(schema.into());
        self
    }

    pub fn build(self) -> PipelineConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml() {
        let config = PipelineConfig::from_toml("dialect = \"sqlite\"\nschema = \"app\"\n").unwrap();
        assert_eq!(config.dialect, Dialect::Sqlite);
        assert_eq!(config.schema.as_deref(), Some("app"));
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(PipelineConfig::from_toml("").unwrap(), PipelineConfig::default());
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        assert!(matches!(
            PipelineConfig::from_toml("dialect = \"oracle\""),
            Err(NodeError::Config(_))
        ));
        assert!(matches!(
            PipelineConfig::from_toml("schemas = \"app\""),
            Err(NodeError::Config(_))
        ));
    }

    #[test]
    fn test_builder() {
        let config = PipelineConfig::builder()
            .dialect(Dialect::Sqlite)
            .schema("tenant_1")
            .build();
        assert_eq!(config.dialect, Dialect::Sqlite);
        assert_eq!(config.schema.as_deref(), Some("tenant_1"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = PipelineConfig::load_from(Path::new("/nonexistent/sqlnode.toml")).unwrap_err();
        assert!(matches!(err, NodeError::Io(_)));
    }

    #[test]
    fn test_search_paths_start_in_working_dir() {
        assert_eq!(PipelineConfig::search_paths()[0], PathBuf::from(CONFIG_FILE));
    }
}
