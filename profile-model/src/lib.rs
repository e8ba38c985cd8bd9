//! Core data model definitions shared across the profile-update crates.
#![allow(missing_docs)]

pub mod acknowledge;
pub mod email;
pub mod error;
pub mod event;
pub mod input;
pub mod notice;
pub mod submission;
pub mod token;

pub use acknowledge::AcknowledgePolicy;
pub use email::validate_email;
pub use error::ModelError;
pub use event::SubmitEvent;
pub use input::ProfileInput;
pub use notice::Notice;
pub use submission::SubmissionId;
pub use token::CsrfToken;
