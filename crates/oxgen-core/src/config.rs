use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Generation options loaded from `.oxgen.yaml`, shaped (not implemented)
/// by the CLI driver.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenOptions {
    /// Path to the spec document (file or http(s) URL).
    pub spec: String,
    /// Directory generated files are written under.
    pub target: String,
    /// Target module names for the three output artifacts.
    pub model_module: String,
    pub operations_module: String,
    pub server_module: String,
    /// Allow-lists; an empty list admits everything.
    pub include: IncludeFilters,
    /// Skip whole artifact classes.
    pub skip_models: bool,
    pub skip_operations: bool,
    /// Also emit a runnable service scaffold (Cargo.toml + main.rs).
    pub scaffold: bool,
    /// Package name used by the scaffold; defaults to the slugified title.
    pub service_name: Option<String>,
}

impl Default for GenOptions {
    fn default() -> Self {
        Self {
            spec: "swagger.yaml".to_string(),
            target: "./generated".to_string(),
            model_module: "models".to_string(),
            operations_module: "operations".to_string(),
            server_module: "server".to_string(),
            include: IncludeFilters::default(),
            skip_models: false,
            skip_operations: false,
            scaffold: false,
            service_name: None,
        }
    }
}

/// Optional allow-lists of operation identifiers, tags, and model names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IncludeFilters {
    pub operations: Vec<String>,
    pub tags: Vec<String>,
    pub models: Vec<String>,
}

impl IncludeFilters {
    pub fn operation_allowed(&self, id: &str) -> bool {
        self.operations.is_empty() || self.operations.iter().any(|o| o == id)
    }

    pub fn tag_allowed(&self, tag: &str) -> bool {
        self.tags.is_empty() || self.tags.iter().any(|t| t == tag)
    }

    pub fn model_allowed(&self, name: &str) -> bool {
        self.models.is_empty() || self.models.iter().any(|m| m == name)
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".oxgen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<GenOptions>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: GenOptions = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# oxgen configuration
spec: swagger.yaml
target: ./generated

model_module: models
operations_module: operations
server_module: server

include:
  operations: []   # operation ids to generate; empty = all
  tags: []         # route groups to generate; empty = all
  models: []       # definitions to generate; empty = all

skip_models: false
skip_operations: false

scaffold: false    # also emit Cargo.toml + main.rs for a runnable service
# service_name: my-service
"#
}
