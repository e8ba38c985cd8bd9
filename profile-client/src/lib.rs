//! Client side of the profile update form.
//!
//! [`ProfileUpdateClient`] runs one submit cycle per trigger: it validates
//! the email field, reads the anti-forgery token, POSTs the form through a
//! [`Transport`](profile_contracts::transport::Transport) and acknowledges
//! the result on the page. [`HttpTransport`] is the reqwest-backed
//! transport; the [`token`] module holds the token providers.

pub mod client;
pub mod error;
pub mod page;
pub mod request;
pub mod token;
pub mod transport;

pub use client::{
    Acknowledgement, Collaborators, CycleState, ProfileUpdateClient,
};
pub use error::{SubmitError, TransportBuildError};
pub use page::{HeadlessPage, PageState, TerminalNotifier};
pub use token::{CookieTokenProvider, MarkupTokenProvider, StaticTokenProvider};
pub use transport::HttpTransport;
