use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::market::{RANGE_SAMPLES, RANGE_SOURCES};

/// Effective application configuration.
///
/// Precedence, lowest to highest: built-in defaults, `revalue.toml` (or
/// `config/revalue.toml`), `REVALUE_*` environment variables, explicit
/// overrides from the caller.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub pricing: PricingConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct PricingConfig {
    /// Region code assumed when a request carries none.
    pub default_region: String,
    /// Number of jittered points in the displayed price range.
    pub range_samples: usize,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub default_region: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pricing: PricingConfig {
                default_region: "us".to_string(),
                range_samples: RANGE_SAMPLES,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("revalue.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(pricing) = patch.pricing {
            if let Some(default_region) = pricing.default_region {
                self.pricing.default_region = default_region;
            }
            if let Some(range_samples) = pricing.range_samples {
                self.pricing.range_samples = range_samples;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("REVALUE_PRICING_DEFAULT_REGION") {
            self.pricing.default_region = value;
        }
        if let Some(value) = read_env("REVALUE_PRICING_RANGE_SAMPLES") {
            self.pricing.range_samples = parse_usize("REVALUE_PRICING_RANGE_SAMPLES", &value)?;
        }

        let log_level =
            read_env("REVALUE_LOGGING_LEVEL").or_else(|| read_env("REVALUE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("REVALUE_LOGGING_FORMAT").or_else(|| read_env("REVALUE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(default_region) = overrides.default_region {
            self.pricing.default_region = default_region;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pricing.default_region.trim().is_empty() {
            return Err(ConfigError::Validation(
                "pricing.default_region must not be empty".to_string(),
            ));
        }

        if self.pricing.range_samples == 0 || self.pricing.range_samples > RANGE_SOURCES.len() {
            return Err(ConfigError::Validation(format!(
                "pricing.range_samples must be in range 1..={}",
                RANGE_SOURCES.len()
            )));
        }

        let level = self.logging.level.trim().to_ascii_lowercase();
        match level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::Validation(
                "logging.level must be one of trace|debug|info|warn|error".to_string(),
            )),
        }
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("revalue.toml"), PathBuf::from("config/revalue.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    toml::from_str::<ConfigPatch>(&raw)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    pricing: Option<PricingPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct PricingPatch {
    default_region: Option<String>,
    range_samples: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::sync::{Mutex, OnceLock};

    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    #[test]
    fn defaults_are_valid() {
        let _guard = env_lock().lock().expect("env lock");
        clear_vars(&[
            "REVALUE_PRICING_DEFAULT_REGION",
            "REVALUE_PRICING_RANGE_SAMPLES",
            "REVALUE_LOGGING_LEVEL",
            "REVALUE_LOG_LEVEL",
            "REVALUE_LOGGING_FORMAT",
            "REVALUE_LOG_FORMAT",
        ]);

        let config = AppConfig::load(LoadOptions::default()).expect("default config loads");
        assert_eq!(config.pricing.default_region, "us");
        assert_eq!(config.pricing.range_samples, 5);
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn file_patch_overrides_defaults() {
        let _guard = env_lock().lock().expect("env lock");
        clear_vars(&["REVALUE_PRICING_DEFAULT_REGION", "REVALUE_LOGGING_LEVEL"]);

        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("revalue.toml");
        fs::write(
            &path,
            r#"
[pricing]
default_region = "uk"
range_samples = 3

[logging]
level = "debug"
format = "pretty"
"#,
        )
        .expect("write config file");

        let config =
            AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                .expect("file config loads");

        assert_eq!(config.pricing.default_region, "uk");
        assert_eq!(config.pricing.range_samples, 3);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn env_beats_file_and_overrides_beat_env() {
        let _guard = env_lock().lock().expect("env lock");

        env::set_var("REVALUE_PRICING_DEFAULT_REGION", "jp");
        env::set_var("REVALUE_LOG_LEVEL", "warn");

        let result = (|| {
            let dir = TempDir::new().expect("tempdir");
            let path = dir.path().join("revalue.toml");
            fs::write(&path, "[pricing]\ndefault_region = \"uk\"\n").expect("write config file");

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .expect("config loads");

            assert_eq!(config.pricing.default_region, "jp");
            assert_eq!(config.logging.level, "debug");
        })();

        clear_vars(&["REVALUE_PRICING_DEFAULT_REGION", "REVALUE_LOG_LEVEL"]);
        result
    }

    #[test]
    fn out_of_range_samples_fail_validation() {
        let _guard = env_lock().lock().expect("env lock");

        env::set_var("REVALUE_PRICING_RANGE_SAMPLES", "12");
        let error = AppConfig::load(LoadOptions::default())
            .expect_err("12 samples should fail validation");
        clear_vars(&["REVALUE_PRICING_RANGE_SAMPLES"]);

        assert!(matches!(
            error,
            ConfigError::Validation(ref message) if message.contains("range_samples")
        ));
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let _guard = env_lock().lock().expect("env lock");

        let error = AppConfig::load(LoadOptions {
            config_path: Some("does/not/exist.toml".into()),
            require_file: true,
            ..LoadOptions::default()
        })
        .expect_err("missing required file should fail");

        assert!(matches!(error, ConfigError::MissingConfigFile(_)));
    }
}
