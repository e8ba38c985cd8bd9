use http::header::{ACCEPT, HeaderName, HeaderValue};
use profile_config::TokenConfig;
use profile_contracts::transport::{PostRequest, RequestBuildError};
use profile_model::{CsrfToken, ProfileInput};
use url::Url;

pub const EMAIL_FIELD: &str = "email";
pub const BIO_FIELD: &str = "bio";

/// Builds the profile update POST.
///
/// The token travels twice: in the configured header and in the configured
/// form field, so the server can check either. Fails when the configured
/// header name or the token itself cannot be sent as a header.
pub fn build_update_request(
    endpoint: &Url,
    names: &TokenConfig,
    input: &ProfileInput,
    token: &CsrfToken,
) -> Result<PostRequest, RequestBuildError> {
    let request = PostRequest::new(endpoint.clone())
        .with_typed_header(
            ACCEPT,
            HeaderValue::from_static("application/json"),
        )
        .with_typed_header(
            HeaderName::from_static("x-requested-with"),
            HeaderValue::from_static("XMLHttpRequest"),
        )
        .with_header(&names.header, token.as_str())?
        .with_field(EMAIL_FIELD, input.email.as_str())
        .with_field(BIO_FIELD, input.bio.as_str())
        .with_field(names.field.as_str(), token.as_str());
    Ok(request)
}
