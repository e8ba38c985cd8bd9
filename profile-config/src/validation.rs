use http::HeaderName;
use thiserror::Error;

use crate::models::ClientConfig;
use crate::util::is_loopback;

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("endpoint scheme '{scheme}' is not supported (use http or https)")]
    UnsupportedScheme { scheme: String },
    #[error("setting {key} must not be blank")]
    BlankSetting { key: &'static str },
    #[error("'{name}' is not a valid header name")]
    InvalidHeaderName { name: String },
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

pub fn apply_guard_rails(
    config: &ClientConfig,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    match config.endpoint.scheme() {
        "https" => {}
        "http" => {
            if !is_loopback(&config.endpoint) {
                warnings.push_with_hint(
                    format!(
                        "endpoint {} uses plain http; the anti-forgery \
                         token travels unencrypted",
                        config.endpoint
                    ),
                    "Use an https endpoint outside local development",
                );
            }
        }
        other => {
            return Err(ConfigGuardRailError::UnsupportedScheme {
                scheme: other.to_string(),
            });
        }
    }

    if config.token.field.trim().is_empty() {
        return Err(ConfigGuardRailError::BlankSetting { key: "token.field" });
    }
    if config.token.cookie.trim().is_empty() {
        return Err(ConfigGuardRailError::BlankSetting { key: "token.cookie" });
    }
    if config.token.header.trim().is_empty() {
        return Err(ConfigGuardRailError::BlankSetting {
            key: "token.header",
        });
    }
    if HeaderName::from_bytes(config.token.header.as_bytes()).is_err() {
        return Err(ConfigGuardRailError::InvalidHeaderName {
            name: config.token.header.clone(),
        });
    }

    if config.request_timeout.is_zero() {
        return Err(ConfigGuardRailError::ZeroTimeout);
    }

    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use url::Url;

    fn config(endpoint: &str) -> ClientConfig {
        ClientConfig::new(Url::parse(endpoint).unwrap())
    }

    #[test]
    fn local_http_is_quiet() {
        let warnings =
            apply_guard_rails(&config("http://127.0.0.1:8000/edit")).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn remote_http_warns() {
        let warnings =
            apply_guard_rails(&config("http://example.com/edit")).unwrap();
        assert_eq!(warnings.items.len(), 1);
        assert!(warnings.items[0].message.contains("plain http"));
    }

    #[test]
    fn rejects_other_schemes() {
        let err = apply_guard_rails(&config("ftp://example.com/edit"))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigGuardRailError::UnsupportedScheme { ref scheme }
                if scheme == "ftp"
        ));
    }

    #[test]
    fn rejects_bad_token_settings() {
        let mut blank = config("https://example.com/edit");
        blank.token.field = " ".into();
        assert!(matches!(
            apply_guard_rails(&blank),
            Err(ConfigGuardRailError::BlankSetting { key: "token.field" })
        ));

        for bad in ["X CSRF", "X-Token:", "X-Tok\u{e9}n"] {
            let mut header = config("https://example.com/edit");
            header.token.header = bad.into();
            assert!(
                matches!(
                    apply_guard_rails(&header),
                    Err(ConfigGuardRailError::InvalidHeaderName { ref name })
                        if name == bad
                ),
                "{bad} should be rejected"
            );
        }

        let mut custom = config("https://example.com/edit");
        custom.token.header = "X-CSRF-Token".into();
        assert!(apply_guard_rails(&custom).is_ok());
    }

    #[test]
    fn rejects_zero_timeout() {
        let zero = config("https://example.com/edit")
            .with_request_timeout(Duration::ZERO);
        assert!(matches!(
            apply_guard_rails(&zero),
            Err(ConfigGuardRailError::ZeroTimeout)
        ));
    }
}
