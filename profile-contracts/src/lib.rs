//! Trait surfaces that describe the collaborators of a profile update.
//!
//! The update client only ever talks to the outside world through these
//! seams: a [`TokenProvider`](token::TokenProvider) for the anti-forgery
//! token, a [`Transport`](transport::Transport) for the POST, and the page
//! ([`ProfileView`](page::ProfileView) plus [`Notifier`](page::Notifier)).

pub mod page;
pub mod token;
pub mod transport;

/// Frequently used traits and wire types.
pub mod prelude {
    pub use super::page::{Notifier, ProfileView};
    pub use super::token::TokenProvider;
    pub use super::transport::{
        PostRequest, RequestBuildError, Transport, TransportError,
        TransportResponse,
    };
}

#[cfg(feature = "mock")]
pub use page::{MockNotifier, MockProfileView};
#[cfg(feature = "mock")]
pub use token::MockTokenProvider;
#[cfg(feature = "mock")]
pub use transport::MockTransport;
