//! Layered settings loading
//!
//! Precedence, lowest first: built-in defaults, the TOML file, the `.env`
//! file, then the process environment. Values from `.env` never replace a
//! variable that is already set in the environment.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use carousel_model::CarouselSettings;

use crate::error::{ConfigError, Result};
use crate::sources::{EnvConfig, FileCarouselConfig, FileConfig, Millis};
use crate::validation::{self, ConfigWarnings};

const DEFAULT_CONFIG_LOCATIONS: &[&str] = &["carousel.toml", "config/carousel.toml"];
const DEFAULT_ENV_FILE: &str = ".env";

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    /// Replaces the process environment when set.
    pub env_vars: Option<HashMap<String, String>>,
    /// Skip probing the working directory for a config file.
    pub skip_default_locations: bool,
}

/// Where the loaded settings came from.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
    /// Settings whose value came from the environment.
    pub env_overrides: Vec<&'static str>,
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub settings: CarouselSettings,
    pub metadata: ConfigMetadata,
    pub warnings: ConfigWarnings,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Read variables from `vars` instead of the process environment.
    pub fn with_env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.options.env_vars = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    pub fn skip_default_locations(mut self) -> Self {
        self.options.skip_default_locations = true;
        self
    }

    pub fn load(&self) -> Result<ConfigLoad> {
        let (vars, env_file_loaded) = self.gather_vars()?;
        let env = EnvConfig::from_vars(&vars)?;
        let (file, config_path) = self.load_file_config(&env)?;

        let mut warnings = ConfigWarnings::default();
        if config_path.is_none() && !env_file_loaded && env.overridden().is_empty() {
            warnings.push_with_hint(
                "No carousel configuration found; using built-in defaults",
                "Create carousel.toml or set CAROUSEL_* environment variables",
            );
        }

        let settings = compose(file.carousel, &env)?;
        warnings.extend(validation::apply_guard_rails(&settings)?);

        let metadata = ConfigMetadata {
            config_path,
            env_file_loaded,
            env_overrides: env.overridden(),
        };
        tracing::debug!(
            config = ?metadata.config_path,
            env_file = metadata.env_file_loaded,
            overrides = ?metadata.env_overrides,
            "carousel settings loaded"
        );

        Ok(ConfigLoad {
            settings,
            metadata,
            warnings,
        })
    }

    /// Merge the `.env` file under the live environment.
    fn gather_vars(&self) -> Result<(HashMap<String, String>, bool)> {
        let mut vars = match &self.options.env_vars {
            Some(vars) => vars.clone(),
            None => std::env::vars().collect(),
        };

        let path = self
            .options
            .env_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE));
        let entries = match dotenvy::from_path_iter(&path) {
            Ok(entries) => entries,
            Err(dotenvy::Error::Io(_)) => return Ok((vars, false)),
            Err(err) => return Err(err.into()),
        };
        for entry in entries {
            let (key, value) = entry?;
            vars.entry(key).or_insert(value);
        }
        Ok((vars, true))
    }

    fn load_file_config(&self, env: &EnvConfig) -> Result<(FileConfig, Option<PathBuf>)> {
        let requested = self
            .options
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());

        let path = match requested {
            Some(path) if !path.exists() => return Err(ConfigError::MissingConfig { path }),
            Some(path) => path,
            None if self.options.skip_default_locations => {
                return Ok((FileConfig::default(), None));
            }
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists())
            {
                Some(path) => path,
                None => return Ok((FileConfig::default(), None)),
            },
        };

        let file = read_file_config(&path)?;
        Ok((file, Some(path)))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn compose(file: FileCarouselConfig, env: &EnvConfig) -> Result<CarouselSettings> {
    let defaults = CarouselSettings::default();

    Ok(CarouselSettings {
        auto_slide_interval_ms: match env.auto_slide_interval_ms {
            Some(ms) => ms,
            None => file_millis("auto_slide_interval_ms", file.auto_slide_interval_ms)?
                .unwrap_or(defaults.auto_slide_interval_ms),
        },
        card_width: env.card_width.or(file.card_width).or(defaults.card_width),
        card_height: env
            .card_height
            .or(file.card_height)
            .unwrap_or(defaults.card_height),
        viewport_width: env
            .viewport_width
            .or(file.viewport_width)
            .unwrap_or(defaults.viewport_width),
        min_drag_distance: env
            .min_drag_distance
            .or(file.min_drag_distance)
            .unwrap_or(defaults.min_drag_distance),
        size: env.size.clone().or(file.size).unwrap_or(defaults.size),
        spacing: env.spacing.or(file.spacing).unwrap_or(defaults.spacing),
        grace_period_ms: match env.grace_period_ms {
            Some(ms) => ms,
            None => file_millis("grace_period_ms", file.grace_period_ms)?
                .unwrap_or(defaults.grace_period_ms),
        },
        alignment: env
            .alignment
            .or(file.alignment)
            .unwrap_or(defaults.alignment),
    })
}

fn file_millis(field: &'static str, value: Option<Millis>) -> Result<Option<u64>> {
    value
        .map(|millis| {
            millis.resolve().map_err(|err| ConfigError::Invalid {
                field,
                reason: err.to_string(),
            })
        })
        .transpose()
}
