//! Step-flow controller — validates events and applies them atomically.

use tracing::debug;
use uuid::Uuid;

use crate::catalog::types::{PatientRestriction, Service};
use crate::error::FlowError;

use super::state::{FlowState, PatientStatus, Step};

/// Widget configuration the step sequence is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowConfig {
    /// Practice has more than one physical location enabled.
    pub multisite: bool,
    /// Number of locations actually configured.
    pub location_count: usize,
    /// Vacation override: the wizard is replaced by a static notice.
    pub vacation_active: bool,
}

impl FlowConfig {
    /// Whether the location step is part of the sequence. Multisite alone
    /// is not enough; a multisite practice with a single configured
    /// location skips the step.
    pub fn has_location_step(&self) -> bool {
        self.multisite && self.location_count > 1
    }
}

/// A user interaction forwarded by the client layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ChoosePatientStatus(PatientStatus),
    ChooseLocation(Uuid),
    ChooseService(String),
    SubmitForm,
    NavigateBack,
}

impl Event {
    /// Short identifier used in rejection messages and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ChoosePatientStatus(_) => "choose_patient_status",
            Self::ChooseLocation(_) => "choose_location",
            Self::ChooseService(_) => "choose_service",
            Self::SubmitForm => "submit_form",
            Self::NavigateBack => "navigate_back",
        }
    }
}

/// What a successful event application produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The flow moved to this step.
    Moved(Step),
    /// The chosen service navigates away; the flow stays at `services`.
    Redirect(String),
}

/// The step-flow state machine.
///
/// The applicable step sequence is computed once per configuration, not per
/// user action. The controller holds no per-visitor state itself; it
/// mutates the [`FlowState`] passed into [`advance`](Self::advance), and
/// only on success; a rejected event leaves the state untouched.
#[derive(Debug, Clone)]
pub struct FlowController {
    config: FlowConfig,
    sequence: Vec<Step>,
}

impl FlowController {
    pub fn new(config: FlowConfig) -> Self {
        let mut sequence = vec![Step::Welcome];
        if config.has_location_step() {
            sequence.push(Step::Location);
        }
        sequence.extend([Step::Services, Step::Form, Step::Success]);
        Self { config, sequence }
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// The ordered steps applicable to this configuration.
    pub fn steps(&self) -> &[Step] {
        &self.sequence
    }

    /// The first step of the wizard. Always `welcome`; the vacation
    /// override is checked by the renderer before any step logic runs.
    pub fn initial_step(&self) -> Step {
        Step::Welcome
    }

    /// Position of a step within the applicable sequence.
    pub fn step_index(&self, step: Step) -> Option<usize> {
        self.sequence.iter().position(|s| *s == step)
    }

    /// Apply one event to the state.
    ///
    /// `services` is the loaded catalog for the selected location; it is
    /// only consulted for `ChooseService`. The call either fully succeeds
    /// (state replaced) or is fully rejected (state untouched); there is
    /// no partial transition visible to callers.
    pub fn advance(
        &self,
        state: &mut FlowState,
        event: Event,
        services: &[Service],
    ) -> Result<Outcome, FlowError> {
        if self.config.vacation_active {
            debug!(event = event.kind(), "rejected event: vacation mode");
            return Err(FlowError::VacationActive);
        }
        if state.current_step.is_terminal() {
            debug!(event = event.kind(), "rejected event: flow is complete");
            return Err(self.invalid(&event, state));
        }

        match event {
            Event::ChoosePatientStatus(status) => {
                if state.current_step != Step::Welcome {
                    return Err(self.invalid(&Event::ChoosePatientStatus(status), state));
                }
                let next = self.next_after(Step::Welcome);
                state.patient_status = Some(status);
                state.current_step = next;
                Ok(Outcome::Moved(next))
            }
            Event::ChooseLocation(uuid) => {
                if state.current_step != Step::Location {
                    return Err(self.invalid(&Event::ChooseLocation(uuid), state));
                }
                let next = self.next_after(Step::Location);
                state.selected_location = Some(uuid);
                state.current_step = next;
                Ok(Outcome::Moved(next))
            }
            Event::ChooseService(key) => {
                if state.current_step != Step::Services {
                    return Err(self.invalid(&Event::ChooseService(key), state));
                }
                let Some(service) = services.iter().find(|s| s.key == key) else {
                    debug!(%key, "rejected event: unknown service");
                    return Err(FlowError::UnknownService(key));
                };
                if let Some(url) = service.external_url.as_deref().filter(|u| !u.is_empty()) {
                    return Ok(Outcome::Redirect(url.to_string()));
                }
                if service.patient_restriction == PatientRestriction::PatientsOnly
                    && state.patient_status != Some(PatientStatus::Bestandspatient)
                {
                    debug!(%key, "rejected event: patients-only restriction");
                    return Err(FlowError::PolicyViolation { service_key: key });
                }
                state.selected_service = Some(key);
                state.current_step = Step::Form;
                Ok(Outcome::Moved(Step::Form))
            }
            Event::SubmitForm => {
                if state.current_step != Step::Form {
                    return Err(self.invalid(&Event::SubmitForm, state));
                }
                state.current_step = Step::Success;
                Ok(Outcome::Moved(Step::Success))
            }
            Event::NavigateBack => {
                let index = self
                    .step_index(state.current_step)
                    .filter(|i| *i > 0)
                    .ok_or_else(|| self.invalid(&Event::NavigateBack, state))?;
                let previous = self.sequence[index - 1];
                state.current_step = previous;
                Ok(Outcome::Moved(previous))
            }
        }
    }

    fn next_after(&self, step: Step) -> Step {
        // Every non-terminal step in the sequence has a successor.
        let index = self.step_index(step).expect("step is in sequence");
        self.sequence[index + 1]
    }

    fn invalid(&self, event: &Event, state: &FlowState) -> FlowError {
        debug!(
            event = event.kind(),
            step = %state.current_step,
            "rejected event: invalid transition"
        );
        FlowError::InvalidTransition {
            event: event.kind(),
            step: state.current_step,
        }
    }
}
