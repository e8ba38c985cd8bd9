use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use profile_config::{ClientConfig, TokenConfig};
use profile_contracts::prelude::{
    Notifier, ProfileView, TokenProvider, Transport, TransportResponse,
};
use profile_model::{
    AcknowledgePolicy, Notice, ProfileInput, SubmissionId, SubmitEvent,
};
use tracing::{debug, info, warn};
use url::Url;

use crate::{error::SubmitError, request::build_update_request};

/// Everything the client talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub tokens: Arc<dyn TokenProvider>,
    pub transport: Arc<dyn Transport>,
    pub view: Arc<dyn ProfileView>,
    pub notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// Phases of a single submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Validating,
    Submitting,
    Acknowledged,
    Failed,
}

impl fmt::Display for CycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CycleState::Validating => "validating",
            CycleState::Submitting => "submitting",
            CycleState::Acknowledged => "acknowledged",
            CycleState::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Outcome of a cycle that reached the acknowledged state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgement {
    pub submission_id: SubmissionId,
    /// The values that were sent.
    pub input: ProfileInput,
    pub status: u16,
    pub policy: AcknowledgePolicy,
}

/// Drives the validate → submit → acknowledge flow of the profile form.
///
/// Every trigger is an independent cycle. Overlapping cycles are neither
/// merged nor ordered; each one is acknowledged when its own response
/// arrives.
#[derive(Clone)]
pub struct ProfileUpdateClient {
    endpoint: Url,
    token_names: TokenConfig,
    acknowledge: AcknowledgePolicy,
    collaborators: Collaborators,
    in_flight: Arc<AtomicUsize>,
}

impl fmt::Debug for ProfileUpdateClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileUpdateClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("acknowledge", &self.acknowledge)
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

impl ProfileUpdateClient {
    pub fn new(config: &ClientConfig, collaborators: Collaborators) -> Self {
        info!(
            endpoint = %config.endpoint,
            acknowledge = %config.acknowledge,
            "creating profile update client"
        );

        Self {
            endpoint: config.endpoint.clone(),
            token_names: config.token.clone(),
            acknowledge: config.acknowledge,
            collaborators,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Submissions sent and not yet completed.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Handle a submit trigger.
    ///
    /// Everything up to the POST runs before the first await, so validation
    /// and token failures are reported before this future ever yields. The
    /// user has been notified by the time the result is returned.
    pub async fn on_submit_triggered(
        &self,
        event: &mut SubmitEvent,
    ) -> Result<Acknowledgement, SubmitError> {
        event.prevent_default();

        let submission_id = SubmissionId::new();
        let view = &self.collaborators.view;
        let input = ProfileInput::new(view.email(), view.bio());
        trace_state(submission_id, CycleState::Validating);

        if !input.email_is_valid() {
            return Err(self.fail(
                submission_id,
                SubmitError::InvalidEmail { email: input.email },
            ));
        }

        let Some(token) = self.collaborators.tokens.token() else {
            return Err(self.fail(submission_id, SubmitError::MissingToken));
        };

        let request = match build_update_request(
            &self.endpoint,
            &self.token_names,
            &input,
            &token,
        ) {
            Ok(request) => request,
            Err(err) => return Err(self.fail(submission_id, err.into())),
        };

        trace_state(submission_id, CycleState::Submitting);
        let outcome = {
            let _in_flight = InFlight::enter(&self.in_flight);
            self.collaborators.transport.post(request).await
        };

        match outcome {
            Ok(response) => Ok(self.complete(submission_id, input, response)),
            Err(err) => Err(self.fail(submission_id, err.into())),
        }
    }

    /// Reflect an accepted update on the page according to the configured
    /// policy.
    ///
    /// With [`AcknowledgePolicy::InlineEcho`] the submitted values are
    /// echoed into the display elements (blank values leave their element
    /// alone) and both inputs are cleared. With
    /// [`AcknowledgePolicy::ReloadNotice`] the page is left untouched.
    pub fn acknowledge_update(&self, submitted: &ProfileInput) {
        let view = &self.collaborators.view;
        let notice = match self.acknowledge {
            AcknowledgePolicy::InlineEcho => {
                if submitted.has_email() {
                    view.show_email(&submitted.email);
                }
                if submitted.has_bio() {
                    view.show_bio(&submitted.bio);
                }
                view.clear_inputs();
                Notice::ProfileUpdated
            }
            AcknowledgePolicy::ReloadNotice => Notice::ReloadRequired,
        };
        self.collaborators.notifier.notify(&notice);
    }

    fn complete(
        &self,
        submission_id: SubmissionId,
        input: ProfileInput,
        response: TransportResponse,
    ) -> Acknowledgement {
        info!(
            %submission_id,
            status = response.status,
            "profile update accepted"
        );
        self.acknowledge_update(&input);
        trace_state(submission_id, CycleState::Acknowledged);

        Acknowledgement {
            submission_id,
            input,
            status: response.status,
            policy: self.acknowledge,
        }
    }

    fn fail(
        &self,
        submission_id: SubmissionId,
        err: SubmitError,
    ) -> SubmitError {
        if err.was_sent() {
            warn!(%submission_id, error = %err, "profile update failed");
        } else {
            debug!(%submission_id, error = %err, "profile update not sent");
        }
        self.collaborators.notifier.notify(&err.notice());
        trace_state(submission_id, CycleState::Failed);
        err
    }
}

fn trace_state(submission_id: SubmissionId, state: CycleState) {
    debug!(%submission_id, %state, "submit cycle transition");
}

/// Counts a submission as in flight for as long as it lives.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}
