//! Serializable registry configuration.
//!
//! Only renderer type tags can be configured from data; custom renderer
//! functions are registered in code. Field names are normalized and tags
//! parsed leniently as the configuration is deserialized, so an unknown tag
//! logs a warning and becomes `text` instead of rejecting the file.
//!
//! Files are layered with figment, in increasing precedence:
//! 1. Defaults (`auto_detect: true`, no renderers)
//! 2. The YAML or JSON file, chosen by extension
//! 3. Environment variables prefixed with `SHEETMAP_FIELDS_`

use std::path::Path;

use figment::providers::{Env, Format, Json, Serialized, Yaml};
use figment::Figment;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::types::RendererType;
use crate::value::normalize_field_name;

/// Prefix for environment variable overrides, e.g. `SHEETMAP_FIELDS_AUTO_DETECT=false`.
pub const ENV_PREFIX: &str = "SHEETMAP_FIELDS_";

/// Construction input for a [`FieldRendererRegistry`](crate::FieldRendererRegistry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub auto_detect: bool,
    #[serde(deserialize_with = "deserialize_renderers")]
    pub renderers: IndexMap<String, RendererType>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            auto_detect: true,
            renderers: IndexMap::new(),
        }
    }
}

impl RegistryConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a `.yaml`/`.yml` or `.json` file, then apply environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("renderer config not found: {}", path.display()),
            )
            .into());
        }

        let file_figment = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Figment::new().merge(Json::file(path)),
            _ => Figment::new().merge(Yaml::file(path)),
        };

        let config: RegistryConfig = Self::base_figment()
            .merge(file_figment)
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?;

        debug!(
            path = %path.display(),
            renderers = config.renderers.len(),
            auto_detect = config.auto_detect,
            "loaded renderer config"
        );
        Ok(config)
    }

    /// Defaults with environment overrides only.
    pub fn from_env() -> Result<Self> {
        Ok(Self::base_figment()
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?)
    }

    fn base_figment() -> Figment {
        Figment::from(Serialized::defaults(RegistryConfig::default()))
    }
}

fn deserialize_renderers<'de, D>(
    deserializer: D,
) -> std::result::Result<IndexMap<String, RendererType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IndexMap::<String, String>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(name, tag)| {
            (
                normalize_field_name(&name),
                RendererType::from_tag_lenient(&tag),
            )
        })
        .collect())
}
