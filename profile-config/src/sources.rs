use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{
    ENV_ACKNOWLEDGE, ENV_CONFIG_PATH, ENV_ENDPOINT, ENV_REQUEST_TIMEOUT,
    ENV_TOKEN_COOKIE, ENV_TOKEN_FIELD, ENV_TOKEN_HEADER,
};
use crate::util::non_blank;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Humantime duration such as `"10s"` or `"1m 30s"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acknowledge: Option<String>,
    #[serde(default)]
    pub token: FileTokenConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileTokenConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie: Option<String>,
}

/// Raw values read from the environment. Blank variables count as unset.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub token_field: Option<String>,
    pub token_header: Option<String>,
    pub token_cookie: Option<String>,
    pub request_timeout: Option<String>,
    pub acknowledge: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| non_blank(lookup(name));
        Self {
            config_path: get(ENV_CONFIG_PATH).map(PathBuf::from),
            endpoint: get(ENV_ENDPOINT),
            token_field: get(ENV_TOKEN_FIELD),
            token_header: get(ENV_TOKEN_HEADER),
            token_cookie: get(ENV_TOKEN_COOKIE),
            request_timeout: get(ENV_REQUEST_TIMEOUT),
            acknowledge: get(ENV_ACKNOWLEDGE),
        }
    }
}
