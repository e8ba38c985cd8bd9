//! Anti-forgery token providers.
//!
//! Three ways a page hands out its token: a value captured once at load
//! time, a hidden form field in the page markup, and a cookie.

use std::{borrow::Cow, sync::RwLock};

use once_cell::sync::Lazy;
use profile_contracts::token::TokenProvider;
use profile_model::CsrfToken;
use regex::Regex;
use tracing::debug;

/// Token captured once when the page loaded.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenProvider {
    token: Option<CsrfToken>,
}

impl StaticTokenProvider {
    pub fn new(token: CsrfToken) -> Self {
        Self { token: Some(token) }
    }

    /// Blank input yields a provider with no token.
    pub fn from_raw(raw: &str) -> Self {
        Self {
            token: CsrfToken::new(raw).ok(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl TokenProvider for StaticTokenProvider {
    fn token(&self) -> Option<CsrfToken> {
        self.token.clone()
    }
}

static INPUT_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<input\b[^>]*>").expect("input tag pattern is valid")
});

static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"(?is)\b([a-z][a-z0-9_:-]*)\s*=\s*"#,
        r#"(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#,
    ))
    .expect("attribute pattern is valid")
});

/// Token read from the hidden `<input>` a server-rendered form carries.
#[derive(Debug, Clone, Default)]
pub struct MarkupTokenProvider {
    token: Option<CsrfToken>,
}

impl MarkupTokenProvider {
    /// Scan `markup` once for an input named `field_name` and keep its value.
    pub fn from_html(markup: &str, field_name: &str) -> Self {
        let token = hidden_field_value(markup, field_name)
            .and_then(|value| CsrfToken::new(value).ok());
        debug!(
            field = field_name,
            found = token.is_some(),
            "scanned page markup for anti-forgery token"
        );
        Self { token }
    }
}

impl TokenProvider for MarkupTokenProvider {
    fn token(&self) -> Option<CsrfToken> {
        self.token.clone()
    }
}

/// Value of the first `<input>` whose `name` attribute equals `field_name`.
pub fn hidden_field_value(markup: &str, field_name: &str) -> Option<String> {
    INPUT_TAG.find_iter(markup).find_map(|tag| {
        let mut name = None;
        let mut value = None;
        for attr in ATTRIBUTE.captures_iter(tag.as_str()) {
            let raw = attr
                .get(2)
                .or_else(|| attr.get(3))
                .or_else(|| attr.get(4))
                .map(|m| m.as_str());
            match attr[1].to_ascii_lowercase().as_str() {
                "name" => name = raw,
                "value" => value = raw,
                _ => {}
            }
        }
        (name == Some(field_name))
            .then(|| value.unwrap_or_default().to_string())
    })
}

/// Token read from a named cookie.
///
/// The cookie string can be swapped at runtime; the next read sees the new
/// value, so a rotated token is used by the following submission.
#[derive(Debug)]
pub struct CookieTokenProvider {
    name: String,
    cookies: RwLock<String>,
}

impl CookieTokenProvider {
    pub fn new(name: impl Into<String>, cookies: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cookies: RwLock::new(cookies.into()),
        }
    }

    pub fn replace_cookies(&self, cookies: impl Into<String>) {
        if let Ok(mut guard) = self.cookies.write() {
            *guard = cookies.into();
        }
    }
}

impl TokenProvider for CookieTokenProvider {
    fn token(&self) -> Option<CsrfToken> {
        let cookies = self.cookies.read().ok()?;
        cookie_value(&cookies, &self.name)
            .and_then(|value| CsrfToken::new(value).ok())
    }
}

/// Look up `name` in a `Cookie`-header style string (`a=1; b=2`).
///
/// Values are percent-decoded; a value that does not decode is returned raw.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
        .map(|raw| {
            urlencoding::decode(raw)
                .map(Cow::into_owned)
                .unwrap_or_else(|_| raw.to_string())
        })
}
