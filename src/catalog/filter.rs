//! Service visibility filter.
//!
//! A pure classification pass: every service keeps its input position (the
//! sort key is owned by the storage layer) and gets an interaction
//! annotation the renderer and the flow controller agree on. Precedence:
//! external redirect beats the patients-only restriction.

use crate::catalog::types::{PatientRestriction, Service};
use crate::flow::state::PatientStatus;

/// The service list as handed over by the host.
///
/// `NotLoaded` ("not fetched yet") is distinct from a loaded-but-empty
/// catalog; the renderer shows a placeholder for one and an explicit
/// "nothing available" state for the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCatalog {
    NotLoaded,
    Loaded(Vec<Service>),
}

impl ServiceCatalog {
    pub fn services(&self) -> &[Service] {
        match self {
            Self::NotLoaded => &[],
            Self::Loaded(services) => services,
        }
    }
}

/// How a rendered service card reacts to a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Opens the in-widget form.
    Openable,
    /// Shown but disabled; clicking surfaces the patients-only explanation.
    Blocked,
    /// Navigates away to the service's external URL.
    External,
}

/// A service paired with its computed interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedService<'a> {
    pub service: &'a Service,
    pub interaction: Interaction,
}

/// Filter output, keeping the not-loaded / empty distinction visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilteredServices<'a> {
    NotLoaded,
    Empty,
    Ready(Vec<AnnotatedService<'a>>),
}

/// Annotate every service for the given patient status, preserving order.
pub fn visible_services(
    catalog: &ServiceCatalog,
    patient_status: Option<PatientStatus>,
) -> FilteredServices<'_> {
    let services = match catalog {
        ServiceCatalog::NotLoaded => return FilteredServices::NotLoaded,
        ServiceCatalog::Loaded(services) if services.is_empty() => {
            return FilteredServices::Empty;
        }
        ServiceCatalog::Loaded(services) => services,
    };

    let annotated = services
        .iter()
        .map(|service| AnnotatedService {
            service,
            interaction: interaction_for(service, patient_status),
        })
        .collect();
    FilteredServices::Ready(annotated)
}

fn interaction_for(service: &Service, patient_status: Option<PatientStatus>) -> Interaction {
    if service.is_external() {
        return Interaction::External;
    }
    if service.patient_restriction == PatientRestriction::PatientsOnly
        && patient_status != Some(PatientStatus::Bestandspatient)
    {
        return Interaction::Blocked;
    }
    Interaction::Openable
}
