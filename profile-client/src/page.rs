//! Page implementations for hosts without a browser DOM.

use std::{
    io::{self, Write},
    sync::Mutex,
};

use profile_contracts::page::{Notifier, ProfileView};
use profile_model::Notice;

/// Snapshot of the headless page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageState {
    /// Email input.
    pub email: String,
    /// Bio input.
    pub bio: String,
    /// Read-only email display element.
    pub shown_email: String,
    /// Read-only bio display element.
    pub shown_bio: String,
    /// Every notice shown so far, oldest first.
    pub notices: Vec<Notice>,
}

/// In-memory profile form that records the notices it is shown.
#[derive(Debug, Default)]
pub struct HeadlessPage {
    state: Mutex<PageState>,
}

impl HeadlessPage {
    pub fn new(email: impl Into<String>, bio: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(PageState {
                email: email.into(),
                bio: bio.into(),
                ..PageState::default()
            }),
        }
    }

    /// Type into the email input.
    pub fn set_email(&self, value: impl Into<String>) {
        self.update(|state| state.email = value.into());
    }

    /// Type into the bio input.
    pub fn set_bio(&self, value: impl Into<String>) {
        self.update(|state| state.bio = value.into());
    }

    pub fn snapshot(&self) -> PageState {
        self.state
            .lock()
            .map(|state| state.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.snapshot().notices
    }

    fn update(&self, apply: impl FnOnce(&mut PageState)) {
        let mut guard =
            self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        apply(&mut guard);
    }
}

impl ProfileView for HeadlessPage {
    fn email(&self) -> String {
        self.snapshot().email
    }

    fn bio(&self) -> String {
        self.snapshot().bio
    }

    fn show_email(&self, value: &str) {
        self.update(|state| state.shown_email = value.to_string());
    }

    fn show_bio(&self, value: &str) {
        self.update(|state| state.shown_bio = value.to_string());
    }

    fn clear_inputs(&self) {
        self.update(|state| {
            state.email.clear();
            state.bio.clear();
        });
    }
}

impl Notifier for HeadlessPage {
    fn notify(&self, notice: &Notice) {
        self.update(|state| state.notices.push(*notice));
    }
}

/// Writes notices to stderr, one line each, flushed before returning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: &Notice) {
        let mut stderr = io::stderr().lock();
        let prefix = if notice.is_failure() { "error" } else { "ok" };
        // Nothing sensible to do if the terminal itself is gone.
        let _ = writeln!(stderr, "[{prefix}] {notice}");
        let _ = stderr.flush();
    }
}
