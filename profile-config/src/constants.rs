//! Defaults shared by the loader and programmatic construction.

use std::time::Duration;

/// Form field the server reads the anti-forgery token from.
pub const DEFAULT_TOKEN_FIELD: &str = "csrfmiddlewaretoken";

/// Header carrying the same token.
pub const DEFAULT_TOKEN_HEADER: &str = "X-CSRFToken";

/// Cookie the server stores the token in.
pub const DEFAULT_TOKEN_COOKIE: &str = "csrftoken";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_CONFIG_PATH: &str = "PROFILE_CONFIG_PATH";
pub const ENV_ENDPOINT: &str = "PROFILE_ENDPOINT";
pub const ENV_TOKEN_FIELD: &str = "PROFILE_TOKEN_FIELD";
pub const ENV_TOKEN_HEADER: &str = "PROFILE_TOKEN_HEADER";
pub const ENV_TOKEN_COOKIE: &str = "PROFILE_TOKEN_COOKIE";
pub const ENV_REQUEST_TIMEOUT: &str = "PROFILE_REQUEST_TIMEOUT";
pub const ENV_ACKNOWLEDGE: &str = "PROFILE_ACKNOWLEDGE";
