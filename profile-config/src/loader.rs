use once_cell::sync::Lazy;
use profile_model::{AcknowledgePolicy, ModelError};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::{
    constants::{
        DEFAULT_REQUEST_TIMEOUT, DEFAULT_TOKEN_COOKIE, DEFAULT_TOKEN_FIELD,
        DEFAULT_TOKEN_HEADER,
    },
    models::{ClientConfig, ConfigMetadata, TokenConfig},
    sources::{EnvConfig, FileConfig, FileTokenConfig},
    util::non_blank,
    validation::{self, ConfigGuardRailError, ConfigWarnings},
};

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("profile.toml"),
        PathBuf::from("config/profile.toml"),
    ]
});

/// Result of a successful load: the config plus anything worth surfacing.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: ClientConfig,
    pub warnings: ConfigWarnings,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_file: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Use this file instead of searching for `.env` upwards from the
    /// working directory.
    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.env_file = Some(path.into());
        self
    }

    /// Apply the `.env` file, read the process environment and compose.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = self.apply_env_file()?;
        let mut load = self.load_with_env(EnvConfig::gather())?;
        load.config.metadata.env_file_loaded = env_file_loaded;
        Ok(load)
    }

    /// Compose against an already gathered environment. No `.env` handling.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        let (config, mut warnings) =
            compose_config(file_config, env, config_path)?;

        warnings.extend(validation::apply_guard_rails(&config)?);
        for warning in &warnings.items {
            warn!(hint = ?warning.hint, "{}", warning.message);
        }

        debug!(
            endpoint = %config.endpoint,
            acknowledge = %config.acknowledge,
            timeout = ?config.request_timeout,
            "profile client configuration loaded"
        );

        Ok(ConfigLoad { config, warnings })
    }

    /// `Ok(false)` when there was no file to apply. Variables already set
    /// in the process win over the file.
    fn apply_env_file(&self) -> Result<bool, ConfigLoadError> {
        let applied = match &self.env_file {
            Some(path) => dotenvy::from_path(path),
            None => dotenvy::dotenv().map(drop),
        };
        match applied {
            Ok(()) => Ok(true),
            Err(dotenvy::Error::Io(err)) => {
                debug!(error = %err, "no .env file applied");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn choose_config_file(&self, env: &EnvConfig) -> Option<ConfigFile> {
        let named = self
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());
        if let Some(path) = named {
            return Some(ConfigFile::Named(path));
        }
        DEFAULT_CONFIG_LOCATIONS
            .iter()
            .find(|candidate| candidate.exists())
            .cloned()
            .map(ConfigFile::Discovered)
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let path = match self.choose_config_file(env) {
            None => return Ok((None, None)),
            Some(ConfigFile::Named(path)) if !path.exists() => {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            Some(
                ConfigFile::Named(path) | ConfigFile::Discovered(path),
            ) => path,
        };

        debug!(path = %path.display(), "reading profile configuration file");
        let file_config = read_file_config(&path)?;
        Ok((Some(file_config), Some(path)))
    }
}

/// The TOML file a load will read.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigFile {
    /// Given by the caller or `PROFILE_CONFIG_PATH`; must exist.
    Named(PathBuf),
    /// First existing default location.
    Discovered(PathBuf),
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|err| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
    toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source: err,
    })
}

fn compose_config(
    file_config: Option<FileConfig>,
    env: EnvConfig,
    config_path: Option<PathBuf>,
) -> Result<(ClientConfig, ConfigWarnings), ConfigLoadError> {
    let mut warnings = ConfigWarnings::default();

    if config_path.is_none() {
        warnings.push_with_hint(
            "No profile.toml detected; falling back to environment variables",
            "Create profile.toml or set PROFILE_CONFIG_PATH",
        );
    }

    let FileConfig {
        endpoint: file_endpoint,
        request_timeout: file_timeout,
        acknowledge: file_acknowledge,
        token: file_token,
    } = file_config.unwrap_or_default();
    let FileTokenConfig {
        field: file_field,
        header: file_header,
        cookie: file_cookie,
    } = file_token;

    let raw_endpoint = env
        .endpoint
        .or(non_blank(file_endpoint))
        .ok_or(ConfigLoadError::MissingEndpoint)?;
    let endpoint = Url::parse(raw_endpoint.trim()).map_err(|source| {
        ConfigLoadError::InvalidEndpoint {
            value: raw_endpoint.clone(),
            source,
        }
    })?;

    let token = TokenConfig {
        field: env
            .token_field
            .or(file_field)
            .unwrap_or_else(|| DEFAULT_TOKEN_FIELD.to_string()),
        header: env
            .token_header
            .or(file_header)
            .unwrap_or_else(|| DEFAULT_TOKEN_HEADER.to_string()),
        cookie: env
            .token_cookie
            .or(file_cookie)
            .unwrap_or_else(|| DEFAULT_TOKEN_COOKIE.to_string()),
    };

    let request_timeout = match env.request_timeout.or(non_blank(file_timeout))
    {
        Some(raw) => parse_timeout(&raw)?,
        None => DEFAULT_REQUEST_TIMEOUT,
    };

    let acknowledge = match env.acknowledge.or(non_blank(file_acknowledge)) {
        Some(raw) => raw
            .parse::<AcknowledgePolicy>()
            .map_err(ConfigLoadError::InvalidAcknowledge)?,
        None => AcknowledgePolicy::default(),
    };

    let config = ClientConfig {
        endpoint,
        token,
        request_timeout,
        acknowledge,
        metadata: ConfigMetadata {
            config_path,
            env_file_loaded: false,
        },
    };

    Ok((config, warnings))
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigLoadError> {
    humantime::parse_duration(raw.trim()).map_err(|source| {
        ConfigLoadError::InvalidTimeout {
            value: raw.to_string(),
            source,
        }
    })
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("no endpoint configured (set `endpoint` or PROFILE_ENDPOINT)")]
    MissingEndpoint,
    #[error("invalid endpoint URL '{value}'")]
    InvalidEndpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid request timeout '{value}'")]
    InvalidTimeout {
        value: String,
        #[source]
        source: humantime::DurationError,
    },
    #[error("invalid acknowledge policy")]
    InvalidAcknowledge(#[source] ModelError),
    #[error(transparent)]
    GuardRail(#[from] ConfigGuardRailError),
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}
