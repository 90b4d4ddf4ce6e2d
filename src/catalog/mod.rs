//! Catalog data — locations, services, widget settings.

pub mod filter;
pub mod icons;
pub mod types;

pub use filter::{visible_services, AnnotatedService, FilteredServices, Interaction, ServiceCatalog};
pub use types::{Location, PatientRestriction, Service, WidgetPosition, WidgetSettings};
