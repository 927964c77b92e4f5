// File Path: src/services/route_config.rs
// Description: Route table loading and JSON Schema validation.

// ====================================================
// SECTION: Imports and Struct Definition
// ====================================================

use crate::models::{ApiError, ApiResult, RouteTableConfig};
use serde_json::Value;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};
use tokio::fs;
use tracing::{info, instrument, warn};
use jsonschema::{Draft, JSONSchema};

pub struct RouteConfigService {
    pub schema_dir: PathBuf,
    pub data_dir: PathBuf,
    pub schemas: HashMap<String, JSONSchema>,
}

// ====================================================
// SECTION: Service Initialization
// ====================================================

impl RouteConfigService {
    pub async fn new(schema_dir: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> ApiResult<Self> {
        let schema_path = schema_dir.into();
        let data_path = data_dir.into();

        if !schema_path.exists() {
            return Err(ApiError::FileNotFound(format!(
                "Schema directory not found: {}",
                schema_path.display()
            )));
        }

        if !data_path.exists() {
            return Err(ApiError::FileNotFound(format!(
                "Data directory not found: {}",
                data_path.display()
            )));
        }

        let mut service = Self {
            schema_dir: schema_path,
            data_dir: data_path,
            schemas: HashMap::new(),
        };

        service.load_schemas().await?;
        Ok(service)
    }

    async fn load_schemas(&mut self) -> ApiResult<()> {
        info!("Loading schemas from: {}", self.schema_dir.display());

        let mut entries = fs::read_dir(&self.schema_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let schema_name = stem.trim_end_matches(".schema").to_string();

            match self.load_schema(&path).await {
                Ok(schema) => {
                    info!("Loaded schema: {} from {}", schema_name, path.display());
                    self.schemas.insert(schema_name, schema);
                }
                Err(e) => {
                    warn!("Failed to load schema {}: {}", schema_name, e);
                }
            }
        }

        Ok(())
    }

    async fn load_schema(&self, schema_path: &Path) -> ApiResult<JSONSchema> {
        let content = fs::read_to_string(schema_path).await?;

        let schema_value: Value = serde_json::from_str(&content)
            .map_err(|e| ApiError::ValidationError(format!("Invalid JSON schema: {}", e)))?;

        JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema_value)
            .map_err(|e| ApiError::ValidationError(format!("Schema compilation failed: {}", e)))
    }
}

// ====================================================
// SECTION: Route Table Loading
// ====================================================

impl RouteConfigService {
    /// Reads `<data_dir>/<name>.yaml`, validating it against schema `<name>` when one is loaded.
    #[instrument(skip(self))]
    pub async fn load_yaml(&self, name: &str) -> ApiResult<Value> {
        let yaml_path = self.data_dir.join(format!("{}.yaml", name));

        if !yaml_path.exists() {
            return Err(ApiError::FileNotFound(format!(
                "YAML file not found: {}",
                yaml_path.display()
            )));
        }

        let content = fs::read_to_string(&yaml_path).await?;

        let yaml_data: Value = serde_yaml::from_str(&content)
            .map_err(|e| ApiError::YamlParseError(e.to_string()))?;

        match self.schemas.get(name) {
            Some(schema) => {
                schema.validate(&yaml_data).map_err(|errors| {
                    let error_messages: Vec<String> = errors.map(|e| e.to_string()).collect();
                    ApiError::ValidationError(format!("Schema validation failed: {:?}", error_messages))
                })?;
            }
            None => warn!("No schema named '{}'; loading {} unvalidated", name, yaml_path.display()),
        }

        Ok(yaml_data)
    }

    /// Route tables are only loaded against a compiled schema of the same name.
    pub async fn load_route_config(&self, name: &str) -> ApiResult<RouteTableConfig> {
        if !self.schemas.contains_key(name) {
            return Err(ApiError::ValidationError(format!(
                "No schema '{}' loaded from {}; refusing unvalidated route table",
                name,
                self.schema_dir.display()
            )));
        }
        let data = self.load_yaml(name).await?;
        serde_json::from_value(data)
            .map_err(|e| ApiError::ValidationError(format!("Invalid route table '{}': {}", name, e)))
    }

    pub fn list_available_schemas(&self) -> Vec<String> {
        self.schemas.keys().cloned().collect()
    }
}
