use anyhow::Context;
use std::collections::HashMap;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::Level;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_FAST_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_MULTIMODAL_MODEL: &str = "gemini-1.5-pro";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// Not checked at startup; a missing key fails on the first model call.
    pub gemini_api_key: Option<String>,
    pub api_base: String,
    pub fast_model: String,
    pub multimodal_model: String,
    pub log_level: Level,
    pub prompts_path: PathBuf,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 8002)),
            gemini_api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            fast_model: DEFAULT_FAST_MODEL.to_string(),
            multimodal_model: DEFAULT_MULTIMODAL_MODEL.to_string(),
            log_level: Level::INFO,
            prompts_path: PathBuf::from("./prompts"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        let defaults = Self::default();

        let bind_address = match std::env::var("BIND_ADDRESS") {
            Ok(value) => value.parse::<SocketAddr>().map_err(|e| {
                ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
            })?,
            Err(_) => defaults.bind_address,
        };

        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let api_base = std::env::var("MODEL_API_BASE").unwrap_or(defaults.api_base);
        let fast_model = std::env::var("FAST_MODEL").unwrap_or(defaults.fast_model);
        let multimodal_model =
            std::env::var("MULTIMODAL_MODEL").unwrap_or(defaults.multimodal_model);

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let prompts_path = std::env::var("PROMPTS_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.prompts_path);

        let max_upload_bytes = match std::env::var("MAX_UPLOAD_BYTES") {
            Ok(value) => value.parse::<usize>().map_err(|e| {
                ConfigError::InvalidValue("MAX_UPLOAD_BYTES".to_string(), e.to_string())
            })?,
            Err(_) => defaults.max_upload_bytes,
        };

        if fast_model.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "FAST_MODEL".to_string(),
                "model name must not be empty".to_string(),
            ));
        }
        if multimodal_model.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "MULTIMODAL_MODEL".to_string(),
                "model name must not be empty".to_string(),
            ));
        }

        Ok(Self {
            bind_address,
            gemini_api_key,
            api_base,
            fast_model,
            multimodal_model,
            log_level,
            prompts_path,
            max_upload_bytes,
        })
    }
}

/// Loads prompt overrides from a directory of `*.md` files, keyed by file stem.
/// A missing directory yields no overrides.
pub fn load_prompt_overrides(prompts_path: &Path) -> anyhow::Result<HashMap<String, String>> {
    let mut prompts = HashMap::new();
    if !prompts_path.is_dir() {
        return Ok(prompts);
    }
    for entry in fs::read_dir(prompts_path)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("md") {
            let prompt_key = path
                .file_stem()
                .and_then(|s| s.to_str())
                .context("Could not get file stem")?
                .to_string();
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read prompt {}", path.display()))?;
            prompts.insert(prompt_key, content);
        }
    }
    Ok(prompts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tracing::Level;

    fn clear_env_vars() {
        unsafe {
            env::remove_var("BIND_ADDRESS");
            env::remove_var("GEMINI_API_KEY");
            env::remove_var("MODEL_API_BASE");
            env::remove_var("FAST_MODEL");
            env::remove_var("MULTIMODAL_MODEL");
            env::remove_var("RUST_LOG");
            env::remove_var("PROMPTS_PATH");
            env::remove_var("MAX_UPLOAD_BYTES");
        }
    }

    #[test]
    fn test_config_error_display() {
        let invalid_value =
            ConfigError::InvalidValue("TEST_VAR".to_string(), "bad_value".to_string());
        assert_eq!(
            format!("{}", invalid_value),
            "Invalid value for environment variable TEST_VAR: bad_value"
        );
    }

    #[test]
    #[serial]
    fn test_config_from_env_defaults() {
        clear_env_vars();

        let config = Config::from_env().expect("Config should load without any variables");

        assert_eq!(config.bind_address.to_string(), "0.0.0.0:8002");
        assert_eq!(config.gemini_api_key, None);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.fast_model, "gemini-1.5-flash");
        assert_eq!(config.multimodal_model, "gemini-1.5-pro");
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.prompts_path, PathBuf::from("./prompts"));
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
    }

    #[test]
    #[serial]
    fn test_config_from_env_custom_values() {
        clear_env_vars();
        unsafe {
            env::set_var("BIND_ADDRESS", "127.0.0.1:8080");
            env::set_var("GEMINI_API_KEY", "test-gemini-key");
            env::set_var("MODEL_API_BASE", "http://localhost:9999/v1");
            env::set_var("FAST_MODEL", "gemini-2.0-flash");
            env::set_var("MULTIMODAL_MODEL", "gemini-2.5-pro");
            env::set_var("RUST_LOG", "debug");
            env::set_var("PROMPTS_PATH", "/custom/prompts");
            env::set_var("MAX_UPLOAD_BYTES", "1024");
        }

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.bind_address.to_string(), "127.0.0.1:8080");
        assert_eq!(config.gemini_api_key, Some("test-gemini-key".to_string()));
        assert_eq!(config.api_base, "http://localhost:9999/v1");
        assert_eq!(config.fast_model, "gemini-2.0-flash");
        assert_eq!(config.multimodal_model, "gemini-2.5-pro");
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.prompts_path, PathBuf::from("/custom/prompts"));
        assert_eq!(config.max_upload_bytes, 1024);
        clear_env_vars();
    }

    #[test]
    #[serial]
    fn test_blank_api_key_is_treated_as_missing() {
        clear_env_vars();
        unsafe {
            env::set_var("GEMINI_API_KEY", "   ");
        }

        let config = Config::from_env().expect("Config should load successfully");
        assert_eq!(config.gemini_api_key, None);
        clear_env_vars();
    }

    #[test]
    #[serial]
    fn test_config_invalid_bind_address() {
        clear_env_vars();
        unsafe {
            env::set_var("BIND_ADDRESS", "not-a-valid-address");
        }

        let err = Config::from_env().unwrap_err();
        let ConfigError::InvalidValue(var, _) = err;
        assert_eq!(var, "BIND_ADDRESS");
        clear_env_vars();
    }

    #[test]
    #[serial]
    fn test_config_invalid_log_level() {
        clear_env_vars();
        unsafe {
            env::set_var("RUST_LOG", "not-a-level");
        }

        let err = Config::from_env().unwrap_err();
        let ConfigError::InvalidValue(var, _) = err;
        assert_eq!(var, "RUST_LOG");
        clear_env_vars();
    }

    #[test]
    #[serial]
    fn test_config_invalid_upload_limit() {
        clear_env_vars();
        unsafe {
            env::set_var("MAX_UPLOAD_BYTES", "ten megabytes");
        }

        let err = Config::from_env().unwrap_err();
        let ConfigError::InvalidValue(var, _) = err;
        assert_eq!(var, "MAX_UPLOAD_BYTES");
        clear_env_vars();
    }

    #[test]
    #[serial]
    fn test_config_empty_model_rejected() {
        clear_env_vars();
        unsafe {
            env::set_var("FAST_MODEL", "");
        }

        let err = Config::from_env().unwrap_err();
        let ConfigError::InvalidValue(var, _) = err;
        assert_eq!(var, "FAST_MODEL");
        clear_env_vars();
    }

    #[test]
    fn test_load_prompt_overrides_reads_markdown_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("lesson.md"), "Teach {title} slowly.").unwrap();
        fs::write(dir.path().join("tutor_text.md"), "Answer: {question}").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::create_dir(dir.path().join("drafts.md")).unwrap();

        let prompts = load_prompt_overrides(dir.path()).unwrap();

        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts["lesson"], "Teach {title} slowly.");
        assert_eq!(prompts["tutor_text"], "Answer: {question}");
    }

    #[test]
    fn test_load_prompt_overrides_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let prompts = load_prompt_overrides(&dir.path().join("absent")).unwrap();
        assert!(prompts.is_empty());
    }
}
