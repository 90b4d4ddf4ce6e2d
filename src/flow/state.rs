//! Flow state — which step the visitor is on and what they have chosen.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One screen of the intake wizard.
///
/// The full order is Welcome → Location → Services → Form → Success;
/// Location only exists for multisite practices with more than one
/// location (see [`FlowConfig`](super::FlowConfig)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Welcome,
    Location,
    Services,
    Form,
    Success,
}

impl Step {
    /// Whether this step is terminal (no further events are processed).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Stable identifier emitted as the `data-step` attribute.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::Location => "location",
            Self::Services => "services",
            Self::Form => "form",
            Self::Success => "success",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// The visitor's self-declared relationship to the practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatientStatus {
    /// Existing patient.
    Bestandspatient,
    /// New patient.
    Neupatient,
}

impl PatientStatus {
    /// Stable identifier emitted as the `data-patient-status` attribute.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Bestandspatient => "bestandspatient",
            Self::Neupatient => "neupatient",
        }
    }
}

impl std::fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Per-widget-instance runtime state.
///
/// Created when the widget opens, mutated only by
/// [`FlowController::advance`](super::FlowController::advance), and
/// discarded when the widget closes. Never shared between instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowState {
    /// Step currently shown.
    pub current_step: Step,
    /// Chosen on the welcome step; `None` until then.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_status: Option<PatientStatus>,
    /// Chosen on the location step (multisite only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_location: Option<Uuid>,
    /// Key of the service whose form is open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_service: Option<String>,
}

impl Default for FlowState {
    fn default() -> Self {
        Self {
            current_step: Step::Welcome,
            patient_status: None,
            selected_location: None,
            selected_service: None,
        }
    }
}
