use std::fmt::{self, Display};

/// Errors produced by model constructors and parsing routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    BlankToken,
    UnknownAcknowledgePolicy(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::BlankToken => {
                write!(f, "anti-forgery token must not be blank")
            }
            ModelError::UnknownAcknowledgePolicy(raw) => write!(
                f,
                "unknown acknowledge policy '{raw}' \
                 (expected 'inline-echo' or 'reload-notice')"
            ),
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
