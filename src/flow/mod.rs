//! Step-flow state machine for the intake wizard.

pub mod controller;
pub mod state;

pub use controller::{Event, FlowConfig, FlowController, Outcome};
pub use state::{FlowState, PatientStatus, Step};
