use profile_model::Notice;

/// Read/write access to the profile form and its display elements.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ProfileView: Send + Sync {
    /// Current value of the email input.
    fn email(&self) -> String;

    /// Current value of the bio input.
    fn bio(&self) -> String;

    /// Write into the read-only email display element.
    fn show_email(&self, value: &str);

    /// Write into the read-only bio display element.
    fn show_bio(&self, value: &str);

    /// Empty both input fields.
    fn clear_inputs(&self);
}

/// Blocking, user-visible notifications (an alert box or equivalent).
///
/// `notify` returns only once the notice has been shown.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}
