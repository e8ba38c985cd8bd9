/// The user action that starts a profile update cycle.
///
/// Mirrors a form submit event: the handler calls [`prevent_default`] so the
/// host does not fall back to a navigating form post.
///
/// [`prevent_default`]: SubmitEvent::prevent_default
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
