//! End-to-end tests for the intake widget engine.
//!
//! Drives the public API the way an embedding host would: build a
//! controller from configuration, feed user events through `advance`, and
//! render the resulting state at each step.

use praxis_intake::catalog::{
    Location, PatientRestriction, Service, ServiceCatalog, WidgetSettings,
};
use praxis_intake::error::FlowError;
use praxis_intake::flow::{Event, FlowConfig, FlowController, FlowState, Outcome, PatientStatus, Step};
use praxis_intake::host::HostContext;
use praxis_intake::render::view::progress_fraction;
use praxis_intake::render::{render_step, render_vacation_view, render_widget, RenderInput};
use uuid::Uuid;

fn location(name: &str) -> Location {
    Location {
        uuid: Uuid::new_v4(),
        name: name.into(),
        address: "Musterstr. 1".into(),
        zip: "10115".into(),
        city: "Berlin".into(),
    }
}

fn service(key: &str, restriction: PatientRestriction, external: Option<&str>) -> Service {
    Service {
        key: key.into(),
        label: key.into(),
        description: String::new(),
        icon: None,
        patient_restriction: restriction,
        external_url: external.map(Into::into),
        sort_order: 0,
    }
}

fn settings(praxis_name: &str) -> WidgetSettings {
    WidgetSettings {
        praxis_name: praxis_name.into(),
        ..Default::default()
    }
}

/// Scenario A: multisite with two locations. Choosing a patient status on
/// the welcome step advances immediately (no confirmation screen), and the
/// progress fraction after welcome is 1/3 (success does not count toward
/// the denominator).
#[test]
fn multisite_flow_advances_directly_with_expected_progress() {
    let controller = FlowController::new(FlowConfig {
        multisite: true,
        location_count: 2,
        vacation_active: false,
    });
    assert_eq!(
        controller.steps(),
        [
            Step::Welcome,
            Step::Location,
            Step::Services,
            Step::Form,
            Step::Success
        ]
    );

    let mut state = FlowState::default();
    let outcome = controller
        .advance(
            &mut state,
            Event::ChoosePatientStatus(PatientStatus::Bestandspatient),
            &[],
        )
        .unwrap();
    assert_eq!(outcome, Outcome::Moved(Step::Location));
    assert_eq!(state.patient_status, Some(PatientStatus::Bestandspatient));

    let fraction = progress_fraction(&controller, state.current_step);
    assert!((fraction - 1.0 / 3.0).abs() < 1e-9);
}

/// Scenario B: multisite flag set but only one location configured; the
/// location step is excluded.
#[test]
fn single_location_multisite_skips_location_step() {
    let controller = FlowController::new(FlowConfig {
        multisite: true,
        location_count: 1,
        vacation_active: false,
    });
    assert_eq!(
        controller.steps(),
        [Step::Welcome, Step::Services, Step::Form, Step::Success]
    );

    let mut state = FlowState::default();
    let outcome = controller
        .advance(
            &mut state,
            Event::ChoosePatientStatus(PatientStatus::Neupatient),
            &[],
        )
        .unwrap();
    assert_eq!(outcome, Outcome::Moved(Step::Services));
}

/// Scenario C: a patients-only service chosen by a new patient is a policy
/// violation (not a generic transition error), the card renders blocked,
/// and the flow stays on the services step.
#[test]
fn patients_only_service_is_blocked_for_new_patients() {
    let services = vec![service("rezept", PatientRestriction::PatientsOnly, None)];
    let catalog = ServiceCatalog::Loaded(services.clone());

    let controller = FlowController::new(FlowConfig {
        multisite: false,
        location_count: 1,
        vacation_active: false,
    });
    let mut state = FlowState::default();
    controller
        .advance(
            &mut state,
            Event::ChoosePatientStatus(PatientStatus::Neupatient),
            &services,
        )
        .unwrap();
    assert_eq!(state.current_step, Step::Services);

    let err = controller
        .advance(&mut state, Event::ChooseService("rezept".into()), &services)
        .unwrap_err();
    assert_eq!(
        err,
        FlowError::PolicyViolation {
            service_key: "rezept".into()
        }
    );
    assert_eq!(state.current_step, Step::Services);

    let s = settings("Praxis Dr. Weber");
    let host = HostContext::default();
    let input = RenderInput {
        state: &state,
        controller: &controller,
        locations: &[],
        services: &catalog,
        settings: &s,
        host: &host,
    };
    let html = render_step(Step::Services, &input);
    assert!(html.contains("intake-service-blocked"));
    assert!(html.contains("data-patient-only=\"1\""));
}

/// Scenario D: vacation mode replaces the whole flow with the notice; no
/// step markup is emitted and no event is accepted.
#[test]
fn vacation_mode_short_circuits_everything() {
    let mut s = settings("Praxis Dr. Weber");
    s.vacation_active = true;
    s.vacation_text = "<p>Wir machen Pause.</p>".into();

    let controller = FlowController::new(FlowConfig {
        multisite: true,
        location_count: 3,
        vacation_active: true,
    });
    let state = FlowState::default();
    let catalog = ServiceCatalog::Loaded(vec![service("termin", PatientRestriction::All, None)]);
    let host = HostContext::default();
    let input = RenderInput {
        state: &state,
        controller: &controller,
        locations: &[],
        services: &catalog,
        settings: &s,
        host: &host,
    };

    let html = render_widget(&input);
    assert_eq!(html, render_vacation_view(&s, &host));
    assert!(html.contains("Wir machen Pause."));
    assert!(!html.contains("data-step"));
    assert!(!html.contains("data-service-key"));

    let mut state = FlowState::default();
    let err = controller
        .advance(
            &mut state,
            Event::ChoosePatientStatus(PatientStatus::Bestandspatient),
            &[],
        )
        .unwrap_err();
    assert_eq!(err, FlowError::VacationActive);
}

/// Scenario E: a location with no address data renders its name only.
#[test]
fn bare_location_renders_without_empty_address_lines() {
    let bare = Location {
        uuid: Uuid::new_v4(),
        name: "Standort Mitte".into(),
        address: String::new(),
        zip: String::new(),
        city: String::new(),
    };
    let controller = FlowController::new(FlowConfig {
        multisite: true,
        location_count: 2,
        vacation_active: false,
    });
    let state = FlowState {
        current_step: Step::Location,
        patient_status: Some(PatientStatus::Neupatient),
        ..Default::default()
    };
    let s = settings("Praxis Dr. Weber");
    let host = HostContext::default();
    let catalog = ServiceCatalog::NotLoaded;
    let locations = [bare, location("Standort Süd")];
    let input = RenderInput {
        state: &state,
        controller: &controller,
        locations: &locations,
        services: &catalog,
        settings: &s,
        host: &host,
    };
    let html = render_step(Step::Location, &input);
    let (bare_part, full_part) = html.split_once("Standort Süd").unwrap();
    assert!(bare_part.contains("Standort Mitte"));
    assert!(!bare_part.contains("intake-location-address"));
    assert!(!bare_part.contains("intake-location-city"));
    assert!(full_part.contains("Musterstr. 1"));
    assert!(full_part.contains("10115 Berlin"));
}

/// Walks the complete happy path of a multisite practice: status →
/// location → service → form → success, rendering every step on the way.
#[test]
fn full_multisite_walkthrough() {
    let locations = [location("Standort Nord"), location("Standort Süd")];
    let services = vec![
        service("termin", PatientRestriction::All, None),
        service("rezept", PatientRestriction::PatientsOnly, None),
    ];
    let catalog = ServiceCatalog::Loaded(services.clone());
    let controller = FlowController::new(FlowConfig {
        multisite: true,
        location_count: locations.len(),
        vacation_active: false,
    });
    let s = settings("Praxis Dr. Weber");
    let host = HostContext::default();

    let mut state = FlowState::default();
    assert_eq!(controller.initial_step(), Step::Welcome);

    controller
        .advance(
            &mut state,
            Event::ChoosePatientStatus(PatientStatus::Bestandspatient),
            &services,
        )
        .unwrap();
    assert_eq!(state.current_step, Step::Location);

    controller
        .advance(
            &mut state,
            Event::ChooseLocation(locations[0].uuid),
            &services,
        )
        .unwrap();
    assert_eq!(state.current_step, Step::Services);
    assert_eq!(state.selected_location, Some(locations[0].uuid));

    // The existing patient may open the restricted service.
    controller
        .advance(&mut state, Event::ChooseService("rezept".into()), &services)
        .unwrap();
    assert_eq!(state.current_step, Step::Form);

    // One step back and forward again.
    controller
        .advance(&mut state, Event::NavigateBack, &services)
        .unwrap();
    assert_eq!(state.current_step, Step::Services);
    controller
        .advance(&mut state, Event::ChooseService("termin".into()), &services)
        .unwrap();

    controller
        .advance(&mut state, Event::SubmitForm, &services)
        .unwrap();
    assert_eq!(state.current_step, Step::Success);

    let input = RenderInput {
        state: &state,
        controller: &controller,
        locations: &locations,
        services: &catalog,
        settings: &s,
        host: &host,
    };
    let html = render_widget(&input);
    assert!(html.contains("data-step=\"success\""));
    assert!(html.contains("Anfrage gesendet"));
    // Progress bar is full on the final screen.
    assert!(html.contains("width:100%"));

    // A fresh widget instance starts over; closing discards the state.
    assert_eq!(FlowState::default().current_step, Step::Welcome);
}

/// External services redirect instead of opening the form, regardless of
/// restriction, and the card carries the external URL for the client layer.
#[test]
fn external_service_redirects_and_renders_contract() {
    let services = vec![service(
        "labor",
        PatientRestriction::PatientsOnly,
        Some("https://labor.example.org/login"),
    )];
    let catalog = ServiceCatalog::Loaded(services.clone());
    let controller = FlowController::new(FlowConfig {
        multisite: false,
        location_count: 1,
        vacation_active: false,
    });
    let mut state = FlowState::default();
    controller
        .advance(
            &mut state,
            Event::ChoosePatientStatus(PatientStatus::Neupatient),
            &services,
        )
        .unwrap();

    let outcome = controller
        .advance(&mut state, Event::ChooseService("labor".into()), &services)
        .unwrap();
    assert_eq!(
        outcome,
        Outcome::Redirect("https://labor.example.org/login".into())
    );
    assert_eq!(state.current_step, Step::Services);

    let s = settings("Praxis Dr. Weber");
    let host = HostContext::default();
    let input = RenderInput {
        state: &state,
        controller: &controller,
        locations: &[],
        services: &catalog,
        settings: &s,
        host: &host,
    };
    let html = render_step(Step::Services, &input);
    assert!(html.contains("intake-service-external"));
    assert!(html.contains("data-external-url=\"https://labor.example.org/login\""));
}

/// Two widget instances on one page never share state.
#[test]
fn instances_do_not_interfere() {
    let services = vec![service("termin", PatientRestriction::All, None)];
    let controller = FlowController::new(FlowConfig {
        multisite: false,
        location_count: 1,
        vacation_active: false,
    });

    let mut first = FlowState::default();
    let second = FlowState::default();
    controller
        .advance(
            &mut first,
            Event::ChoosePatientStatus(PatientStatus::Neupatient),
            &services,
        )
        .unwrap();

    assert_eq!(first.current_step, Step::Services);
    assert_eq!(second.current_step, Step::Welcome);
}
