use std::{path::PathBuf, time::Duration};

use profile_model::AcknowledgePolicy;
use url::Url;

use crate::constants::{
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_TOKEN_COOKIE, DEFAULT_TOKEN_FIELD,
    DEFAULT_TOKEN_HEADER,
};

/// Fully resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Where profile updates are POSTed.
    pub endpoint: Url,
    pub token: TokenConfig,
    pub request_timeout: Duration,
    pub acknowledge: AcknowledgePolicy,
    pub metadata: ConfigMetadata,
}

impl ClientConfig {
    /// Configuration with every setting but the endpoint at its default.
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            token: TokenConfig::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            acknowledge: AcknowledgePolicy::default(),
            metadata: ConfigMetadata::default(),
        }
    }

    pub fn with_acknowledge(mut self, policy: AcknowledgePolicy) -> Self {
        self.acknowledge = policy;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Names under which the anti-forgery token travels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenConfig {
    /// Form body field.
    pub field: String,
    /// Request header.
    pub header: String,
    /// Cookie the page stores it in.
    pub cookie: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            field: DEFAULT_TOKEN_FIELD.to_string(),
            header: DEFAULT_TOKEN_HEADER.to_string(),
            cookie: DEFAULT_TOKEN_COOKIE.to_string(),
        }
    }
}

/// Where the configuration came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
