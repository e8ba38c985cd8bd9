use profile_model::CsrfToken;

/// Source of the anti-forgery token embedded in the page.
///
/// Reads are synchronous and cheap. The client asks once per submission so
/// a provider backed by rotating state hands out the current value.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TokenProvider: Send + Sync {
    /// `None` when the page carries no usable token.
    fn token(&self) -> Option<CsrfToken>;
}
