//! Error types for the submit cycle.

use profile_contracts::transport::{RequestBuildError, TransportError};
use profile_model::Notice;
use thiserror::Error;

/// Why a submit cycle ended without an acknowledgement.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The email field failed the syntactic check; nothing was sent.
    ///
    /// The rejected value stays on the field and out of the message, so
    /// logging the error does not log user input.
    #[error("email failed validation")]
    InvalidEmail { email: String },

    /// The page carried no anti-forgery token; nothing was sent.
    #[error("no anti-forgery token available")]
    MissingToken,

    /// The token or its header name cannot travel as a header; nothing was
    /// sent.
    #[error("could not build the update request")]
    Request(#[from] RequestBuildError),

    /// The request was sent but did not succeed.
    #[error("profile update failed: {0}")]
    Transport(#[from] TransportError),
}

impl SubmitError {
    /// The notice shown to the user for this failure.
    pub fn notice(&self) -> Notice {
        match self {
            SubmitError::InvalidEmail { .. } => Notice::EmailInvalid,
            SubmitError::MissingToken => Notice::MissingToken,
            SubmitError::Request(_) | SubmitError::Transport(_) => {
                Notice::UpdateFailed
            }
        }
    }

    /// Whether a request reached the transport.
    pub fn was_sent(&self) -> bool {
        matches!(self, SubmitError::Transport(_))
    }
}

/// Failure to construct the HTTP transport.
#[derive(Debug, Error)]
#[error("failed to build HTTP client")]
pub struct TransportBuildError(#[from] reqwest::Error);
