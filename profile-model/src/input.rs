#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::email::validate_email;

/// Field values captured from the profile form at the moment of submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProfileInput {
    pub email: String,
    pub bio: String,
}

impl ProfileInput {
    pub fn new(email: impl Into<String>, bio: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            bio: bio.into(),
        }
    }

    pub fn email_is_valid(&self) -> bool {
        validate_email(&self.email)
    }

    /// Whether an email value was entered at all. Whitespace counts.
    pub fn has_email(&self) -> bool {
        !self.email.is_empty()
    }

    pub fn has_bio(&self) -> bool {
        !self.bio.is_empty()
    }
}
