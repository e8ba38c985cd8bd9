use std::fmt;

/// Blocking, user-visible notifications raised by the update flow.
///
/// `Display` yields the exact text shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    /// The email field failed validation; nothing was sent.
    EmailInvalid,
    /// No anti-forgery token was available; nothing was sent.
    MissingToken,
    /// The request succeeded and the page was updated in place.
    ProfileUpdated,
    /// The request succeeded but the page must be reloaded to show it.
    ReloadRequired,
    /// The request failed; the form is left as the user typed it.
    UpdateFailed,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::EmailInvalid => "Email invalid",
            Notice::MissingToken => {
                "Security token missing, please reload the page"
            }
            Notice::ProfileUpdated => "Profile Updated",
            Notice::ReloadRequired => {
                "Your data has been updated. Reload the page to see the changes"
            }
            Notice::UpdateFailed => "Update failed, please retry",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Notice::EmailInvalid | Notice::MissingToken | Notice::UpdateFailed
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
