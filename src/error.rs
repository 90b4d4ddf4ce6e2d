//! Error types for the intake widget engine.

use crate::flow::state::Step;

/// Top-level error type for the widget engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Step-flow transition errors.
///
/// A rejected event never mutates the flow state. `InvalidTransition` is
/// expected noise (stale clicks, replayed events) and warrants no UI error;
/// `PolicyViolation` must be surfaced to the user with the specific
/// "existing patients only" explanation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("Event {event} is not valid at step {step}")]
    InvalidTransition { event: &'static str, step: Step },

    #[error("Service {service_key} is available to existing patients only")]
    PolicyViolation { service_key: String },

    #[error("Unknown service key: {0}")]
    UnknownService(String),

    #[error("Vacation mode is active; the widget accepts no events")]
    VacationActive,
}

/// Catalog/storage-adjacent errors (used by the admin reorder binary).
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog file is not a JSON array of service rows")]
    NotAnArray,

    #[error("Service row {index} has no service_key")]
    MissingKey { index: usize },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the widget engine.
pub type Result<T> = std::result::Result<T, Error>;
