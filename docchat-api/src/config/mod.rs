use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

pub const SERVICE_NAME: &str = "docchat-api";

/// 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub storage: StorageConfig,
    pub limits: UploadLimits,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `{id}_{filename}` files; created when missing.
    pub upload_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadLimits {
    /// Largest accepted file, in decoded bytes. Equal to the limit is accepted.
    pub max_upload_bytes: usize,
}

impl DocumentConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let default_limit = DEFAULT_MAX_UPLOAD_BYTES.to_string();

        Ok(DocumentConfig {
            common: common_config,
            storage: StorageConfig {
                upload_dir: get_env("UPLOAD_DIR", Some("uploads"), is_prod)?,
            },
            limits: UploadLimits {
                max_upload_bytes: parse_byte_limit(&get_env(
                    "MAX_UPLOAD_BYTES",
                    Some(&default_limit),
                    is_prod,
                )?)?,
            },
        })
    }
}

fn parse_byte_limit(raw: &str) -> Result<usize, AppError> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(AppError::ConfigError(anyhow::anyhow!(
            "MAX_UPLOAD_BYTES must be greater than zero"
        ))),
        Ok(limit) => Ok(limit),
        Err(e) => Err(AppError::ConfigError(anyhow::anyhow!(
            "MAX_UPLOAD_BYTES must be a byte count, got {:?}: {}",
            raw,
            e
        ))),
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    if let Ok(val) = env::var(key) {
        return Ok(val);
    }

    match default {
        Some(_) if is_prod => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} is required in production but not set",
            key
        ))),
        Some(def) => Ok(def.to_string()),
        None => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} is required but not set",
            key
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_limit_accepts_plain_counts() {
        assert_eq!(parse_byte_limit("10485760").unwrap(), DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(parse_byte_limit(" 42 ").unwrap(), 42);
    }

    #[test]
    fn byte_limit_rejects_garbage_and_zero() {
        assert!(matches!(parse_byte_limit("10MB"), Err(AppError::ConfigError(_))));
        assert!(matches!(parse_byte_limit("0"), Err(AppError::ConfigError(_))));
    }

    #[test]
    fn defaults_apply_outside_production() {
        let value = get_env("DOCCHAT_TEST_UNSET_VARIABLE", Some("uploads"), false).unwrap();
        assert_eq!(value, "uploads");
        assert!(get_env("DOCCHAT_TEST_UNSET_VARIABLE", None, false).is_err());
    }

    #[test]
    fn production_requires_explicit_values() {
        assert!(matches!(
            get_env("DOCCHAT_TEST_UNSET_VARIABLE", Some("uploads"), true),
            Err(AppError::ConfigError(_))
        ));
    }
}
