//! Host configuration parsed from environment variables.

use std::path::PathBuf;

use canvas::editor::EditClampPolicy;
use canvas::engine::EngineConfig;
use canvas::error::ErrorCode;

pub const DEFAULT_OUT_DIR: &str = ".";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown FLOORPLAN_EDIT_CLAMP policy '{0}' (expected 'clamp' or 'override')")]
    UnknownClampPolicy(String),
    #[error("invalid {var}: '{value}' is not a byte count")]
    InvalidByteCount { var: &'static str, value: String },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownClampPolicy(_) => "E_CONFIG_CLAMP_POLICY",
            Self::InvalidByteCount { .. } => "E_CONFIG_BYTE_COUNT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub out_dir: PathBuf,
    pub edit_clamp: EditClampPolicy,
    pub max_background_bytes: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { out_dir: PathBuf::from(DEFAULT_OUT_DIR), edit_clamp: EditClampPolicy::Clamp, max_background_bytes: None }
    }
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `FLOORPLAN_OUT_DIR`: export directory, default `.`
    /// - `FLOORPLAN_EDIT_CLAMP`: `clamp` (default) or `override`
    /// - `FLOORPLAN_MAX_BACKGROUND_BYTES`: background size limit, unlimited when absent
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build config from any key lookup. Empty values count as absent.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let out_dir = get("FLOORPLAN_OUT_DIR").map_or_else(|| PathBuf::from(DEFAULT_OUT_DIR), PathBuf::from);
        let edit_clamp = parse_edit_clamp(get("FLOORPLAN_EDIT_CLAMP").as_deref())?;
        let max_background_bytes = get("FLOORPLAN_MAX_BACKGROUND_BYTES")
            .map(|raw| parse_byte_count("FLOORPLAN_MAX_BACKGROUND_BYTES", &raw))
            .transpose()?;

        Ok(Self { out_dir, edit_clamp, max_background_bytes })
    }

    /// Engine knobs derived from this config.
    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig { edit_clamp: self.edit_clamp, max_background_bytes: self.max_background_bytes }
    }
}

pub fn parse_edit_clamp(raw: Option<&str>) -> Result<EditClampPolicy, ConfigError> {
    match raw.map(str::trim).unwrap_or("clamp") {
        "clamp" => Ok(EditClampPolicy::Clamp),
        "override" => Ok(EditClampPolicy::Override),
        other => Err(ConfigError::UnknownClampPolicy(other.to_string())),
    }
}

fn parse_byte_count(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidByteCount { var, value: raw.to_string() })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
