use config::{Config, Environment, File};
use reprop::AccessMode;
use reprop_logger::LevelFilter;
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

const DEFAULT_CONFIG: &str = "garage";
const ENV_PREFIX: &str = "GARAGE";

#[reprop_derive::reprop_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    #[error("Invalid setting{}: {message}", format_context(.context))]
    Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GarageConfig {
    pub logging: LoggingConfig,
    pub car: CarConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub env_filter: Option<String>,
    /// Directory for rolling log files; console only when absent.
    pub path: Option<PathBuf>,
    pub json: bool,
    pub trace_properties: bool,
}

/// Initial state and policies of the demo car.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CarConfig {
    pub model: String,
    /// Upper bound accepted by the `speed` constraint, in km/h.
    pub top_speed: f64,
    pub vin: String,
    pub pin_access: AccessMode,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            env_filter: None,
            path: None,
            json: false,
            trace_properties: false,
        }
    }
}

impl Default for CarConfig {
    fn default() -> Self {
        Self {
            model: "Volvo XC90".to_owned(),
            top_speed: 350.0,
            vin: "YV1CZ59H541234567".to_owned(),
            pin_access: AccessMode::WriteOnly,
        }
    }
}

impl LoggingConfig {
    /// Parses `level` (`off`, `error`, `warn`, `info`, `debug`, `trace`).
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] for unknown level names.
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.level).map_err(|e| ConfigError::Invalid {
            message: format!("'{}': {e}", self.level).into(),
            context: Some("logging.level".into()),
        })
    }
}

/// Loads [`GarageConfig`] from a file layered with `GARAGE__` environment overrides.
///
/// Nested keys use double underscores: `GARAGE__CAR__TOP_SPEED=250` maps to
/// `car.top_speed`. With no `path`, a `garage.*` file in the working directory is used
/// when present and defaults otherwise; an explicit `path` must exist.
///
/// # Errors
/// Returns [`ConfigError::Config`] if an explicit file is missing, a source is malformed
/// or the merged values do not fit [`GarageConfig`].
pub fn load_config(path: Option<&Path>) -> Result<GarageConfig, ConfigError> {
    load_with_env(path, None)
}

fn load_with_env(
    path: Option<&Path>,
    env: Option<HashMap<String, String>>,
) -> Result<GarageConfig, ConfigError> {
    let required = path.is_some();
    let effective = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG), Path::to_path_buf);

    let builder = Config::builder()
        .add_source(File::from(effective.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .convert_case(config::Case::Snake)
                .try_parsing(true)
                .source(env),
        );

    info!("Loading config from {}", effective.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<GarageConfig>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_sane() {
        let cfg = GarageConfig::default();
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.logging.path.is_none());
        assert_eq!(cfg.car.pin_access, AccessMode::WriteOnly);
        assert!(cfg.car.top_speed > 0.0);
    }

    #[test]
    fn test_file_values_override_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("garage.toml");
        fs::write(
            &path,
            "[car]\nmodel = \"Saab 900\"\ntop_speed = 210.0\npin_access = \"read_write\"\n",
        )?;

        let cfg = load_with_env(Some(&path), Some(HashMap::new()))?;
        assert_eq!(cfg.car.model, "Saab 900");
        assert!((cfg.car.top_speed - 210.0).abs() < f64::EPSILON);
        assert_eq!(cfg.car.pin_access, AccessMode::ReadWrite);
        assert_eq!(cfg.car.vin, CarConfig::default().vin);
        Ok(())
    }

    #[test]
    fn test_environment_overrides_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("garage.toml");
        fs::write(&path, "[car]\ntop_speed = 210.0\n")?;

        let env = HashMap::from([
            ("GARAGE__CAR__TOP_SPEED".to_owned(), "180".to_owned()),
            ("GARAGE__LOGGING__LEVEL".to_owned(), "debug".to_owned()),
        ]);
        let cfg = load_with_env(Some(&path), Some(env))?;

        assert!((cfg.car.top_speed - 180.0).abs() < f64::EPSILON);
        assert_eq!(cfg.logging.level, "debug");
        Ok(())
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        let dir = tempdir().expect("temp dir");
        let missing = dir.path().join("absent.toml");
        let result = load_with_env(Some(&missing), Some(HashMap::new()));
        assert!(matches!(result, Err(ConfigError::Config { .. })));
    }

    #[test]
    fn test_unknown_access_mode_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("garage.toml");
        fs::write(&path, "[car]\npin_access = \"append_only\"\n")?;

        let result = load_with_env(Some(&path), Some(HashMap::new()));
        assert!(matches!(result, Err(ConfigError::Config { .. })));
        Ok(())
    }

    #[test]
    fn test_level_filter_parsing() {
        let mut logging = LoggingConfig::default();
        assert_eq!(logging.level_filter().ok(), Some(LevelFilter::INFO));

        logging.level = "loud".to_owned();
        let err = logging.level_filter().unwrap_err();
        assert_eq!(err.attached_context(), Some("logging.level"));
    }
}
