//! Step partials and the widget view.
//!
//! Rendering is a pure function of its inputs: identical inputs yield
//! byte-identical markup. The vacation override is checked before any step
//! logic runs; `render_vacation_view` never touches the flow controller.

use crate::catalog::filter::{visible_services, FilteredServices, Interaction};
use crate::catalog::icons::icon_for;
use crate::catalog::types::{Location, PatientRestriction, Service, WidgetSettings};
use crate::catalog::ServiceCatalog;
use crate::flow::controller::FlowController;
use crate::flow::state::{FlowState, Step};
use crate::host::HostContext;
use crate::i18n::Translator;

use super::escape::{escape_attr, escape_text, escape_url, sanitize_rich_text};

/// Whether the terminal success step counts toward the progress fraction.
/// It does not: the bar reads "how far through the questions am I", and
/// success is the screen after the last question.
const SUCCESS_COUNTS_TOWARD_PROGRESS: bool = false;

/// Everything one render call needs from the host.
///
/// Catalog data arrives fully loaded; the renderer performs no I/O.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub state: &'a FlowState,
    pub controller: &'a FlowController,
    pub locations: &'a [Location],
    pub services: &'a ServiceCatalog,
    pub settings: &'a WidgetSettings,
    pub host: &'a HostContext,
}

// Minimal writer with deterministic push order.
struct Markup {
    buf: String,
}

impl Markup {
    fn new() -> Self {
        Self {
            buf: String::with_capacity(4 * 1024),
        }
    }

    fn push(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    /// Emit ` name="value"` with the value attribute-escaped.
    fn attr(&mut self, name: &str, value: &str) {
        self.buf.push(' ');
        self.buf.push_str(name);
        self.buf.push_str("=\"");
        self.buf.push_str(&escape_attr(value));
        self.buf.push('"');
    }

    fn finish(self) -> String {
        self.buf
    }
}

/// Render the full widget for the current flow state.
///
/// Vacation mode short-circuits to [`render_vacation_view`] before any
/// step logic executes.
pub fn render_widget(input: &RenderInput) -> String {
    if input.settings.vacation_active {
        return render_vacation_view(input.settings, input.host);
    }

    let multisite_flag = if input.controller.config().has_location_step() {
        "1"
    } else {
        "0"
    };

    let mut w = Markup::new();
    w.push("<div class=\"praxis-intake\"");
    w.attr("data-multisite", multisite_flag);
    w.push(">");
    write_header(&mut w, input);
    write_progress(&mut w, input);
    w.push(&render_step(input.state.current_step, input));
    w.push("</div>");
    w.finish()
}

/// Render the vacation notice, the override path for `vacation_active`.
///
/// Bypasses the step flow entirely: only the notice and a minimal trigger
/// affordance, no step markup.
pub fn render_vacation_view(settings: &WidgetSettings, host: &HostContext) -> String {
    let t = Translator::for_locale(host.locale);
    let mut w = Markup::new();
    w.push("<div class=\"praxis-intake praxis-intake-vacation\"");
    w.attr("data-vacation", "1");
    w.push(">");
    w.push("<button class=\"intake-trigger\" type=\"button\">");
    w.push(&escape_text(t.translate("Open intake assistant")));
    w.push("</button>");
    w.push("<div class=\"intake-vacation-notice\">");
    w.push("<h2>");
    w.push(&escape_text(t.translate("We are currently closed for vacation")));
    w.push("</h2>");
    if !settings.vacation_text.is_empty() {
        w.push("<div class=\"intake-vacation-text\">");
        w.push(&sanitize_rich_text(&settings.vacation_text));
        w.push("</div>");
    }
    if let Some(end) = settings.vacation_end_date {
        w.push("<p class=\"intake-vacation-until\">");
        let line = t
            .translate("We are back on {date}")
            .replace("{date}", &escape_text(&host.format_date(end)));
        w.push(&line);
        w.push("</p>");
    }
    w.push("</div></div>");
    w.finish()
}

/// Render one step's partial, wrapped in its step container.
pub fn render_step(step: Step, input: &RenderInput) -> String {
    let t = Translator::for_locale(input.host.locale);
    let mut w = Markup::new();
    w.push("<section class=\"intake-step\"");
    w.attr("data-step", step.id());
    w.push(">");
    match step {
        Step::Welcome => write_welcome(&mut w, input, &t),
        Step::Location => write_location(&mut w, input, &t),
        Step::Services => write_services(&mut w, input, &t),
        Step::Form => write_form(&mut w, input, &t),
        Step::Success => write_success(&mut w, &t),
    }
    w.push("</section>");
    w.finish()
}

/// Progress fill fraction for the current step, in `0.0..=1.0`.
pub fn progress_fraction(controller: &FlowController, step: Step) -> f64 {
    let mut counted = controller.steps().len();
    if !SUCCESS_COUNTS_TOWARD_PROGRESS {
        counted -= 1;
    }
    if counted < 2 {
        return 1.0;
    }
    let index = controller.step_index(step).unwrap_or(0).min(counted - 1);
    index as f64 / (counted - 1) as f64
}

fn write_header(w: &mut Markup, input: &RenderInput) {
    let t = Translator::for_locale(input.host.locale);
    let settings = input.settings;
    w.push("<header class=\"intake-header\">");
    let logo = settings
        .logo_url
        .as_deref()
        .map(escape_url)
        .unwrap_or_default();
    if !logo.is_empty() {
        w.push("<img class=\"intake-logo\"");
        w.attr("src", &logo);
        w.attr("alt", &settings.praxis_name);
        w.push(">");
    }
    w.push("<div class=\"intake-header-text\">");
    w.push("<span class=\"intake-praxis-name\">");
    w.push(&escape_text(&settings.praxis_name));
    w.push("</span>");
    if !settings.widget_title.is_empty() {
        w.push("<span class=\"intake-title\">");
        w.push(&escape_text(&settings.widget_title));
        w.push("</span>");
    }
    if !settings.widget_subtitle.is_empty() {
        w.push("<span class=\"intake-subtitle\">");
        w.push(&escape_text(&settings.widget_subtitle));
        w.push("</span>");
    }
    w.push("</div>");
    w.push("<button class=\"intake-back\" type=\"button\"");
    w.attr("data-action", "back");
    w.attr("aria-label", t.translate("Back"));
    w.push(">‹</button>");
    w.push("<button class=\"intake-close\" type=\"button\"");
    w.attr("data-action", "close");
    w.attr("aria-label", t.translate("Close"));
    w.push(">×</button>");
    w.push("</header>");
}

fn write_progress(w: &mut Markup, input: &RenderInput) {
    let fraction = progress_fraction(input.controller, input.state.current_step);
    let percent = (fraction * 100.0).round() as u32;
    w.push("<div class=\"intake-progress\"><div class=\"intake-progress-fill\"");
    w.attr("style", &format!("width:{percent}%"));
    w.push("></div></div>");
}

fn write_welcome(w: &mut Markup, input: &RenderInput, t: &Translator) {
    let settings = input.settings;
    w.push("<h2>");
    let greeting = t
        .translate("Welcome to {praxis}")
        .replace("{praxis}", &escape_text(&settings.praxis_name));
    w.push(&greeting);
    w.push("</h2>");
    if !settings.welcome_text.is_empty() {
        w.push("<div class=\"intake-welcome-text\">");
        w.push(&sanitize_rich_text(&settings.welcome_text));
        w.push("</div>");
    }
    w.push("<p class=\"intake-question\">");
    w.push(&escape_text(t.translate("Are you already a patient with us?")));
    w.push("</p>");
    w.push("<div class=\"intake-choices\">");
    for (status, label) in [
        ("bestandspatient", "Existing patient"),
        ("neupatient", "New patient"),
    ] {
        w.push("<button class=\"intake-choice\" type=\"button\"");
        w.attr("data-patient-status", status);
        w.push(">");
        w.push(&escape_text(t.translate(label)));
        w.push("</button>");
    }
    w.push("</div>");
}

fn write_location(w: &mut Markup, input: &RenderInput, t: &Translator) {
    w.push("<h2>");
    w.push(&escape_text(t.translate("Please choose a location")));
    w.push("</h2>");
    if input.locations.is_empty() {
        w.push("<p class=\"intake-empty\">");
        w.push(&escape_text(t.translate("No locations are available at the moment")));
        w.push("</p>");
        return;
    }
    w.push("<ul class=\"intake-locations\">");
    for location in input.locations {
        w.push("<li><button class=\"intake-location\" type=\"button\"");
        w.attr("data-location-uuid", &location.uuid.to_string());
        w.push(">");
        w.push("<span class=\"intake-location-name\">");
        w.push(&escape_text(&location.name));
        w.push("</span>");
        // Address lines only when present; a bare location renders its
        // name and nothing else.
        if !location.address.is_empty() {
            w.push("<span class=\"intake-location-address\">");
            w.push(&escape_text(&location.address));
            w.push("</span>");
        }
        if !location.zip.is_empty() || !location.city.is_empty() {
            let line = format!("{} {}", location.zip, location.city);
            w.push("<span class=\"intake-location-city\">");
            w.push(&escape_text(line.trim()));
            w.push("</span>");
        }
        w.push("</button></li>");
    }
    w.push("</ul>");
}

fn write_services(w: &mut Markup, input: &RenderInput, t: &Translator) {
    w.push("<h2>");
    w.push(&escape_text(t.translate("Which service do you need?")));
    w.push("</h2>");
    match visible_services(input.services, input.state.patient_status) {
        FilteredServices::NotLoaded => {
            w.push("<p class=\"intake-loading\">");
            w.push(&escape_text(t.translate("Loading services")));
            w.push("…</p>");
        }
        FilteredServices::Empty => {
            w.push("<p class=\"intake-empty\">");
            w.push(&escape_text(t.translate("No services are available at the moment")));
            w.push("</p>");
        }
        FilteredServices::Ready(annotated) => {
            let scope = input
                .state
                .selected_location
                .map(|uuid| uuid.to_string())
                .unwrap_or_default();
            w.push("<ul class=\"intake-services\">");
            for entry in annotated {
                write_service_card(w, entry.service, entry.interaction, &scope, t);
            }
            w.push("</ul>");
        }
    }
}

fn write_service_card(
    w: &mut Markup,
    service: &Service,
    interaction: Interaction,
    location_scope: &str,
    t: &Translator,
) {
    let class = match interaction {
        Interaction::Openable => "intake-service",
        Interaction::Blocked => "intake-service intake-service-blocked",
        Interaction::External => "intake-service intake-service-external",
    };
    let patient_only = match service.patient_restriction {
        PatientRestriction::PatientsOnly => "1",
        PatientRestriction::All => "0",
    };
    w.push("<li><button type=\"button\"");
    w.attr("class", class);
    w.attr("data-service-key", &service.key);
    w.attr("data-location-scope", location_scope);
    w.attr("data-patient-only", patient_only);
    if interaction == Interaction::External {
        let url = service
            .external_url
            .as_deref()
            .map(escape_url)
            .unwrap_or_default();
        w.attr("data-external-url", &url);
    }
    if interaction == Interaction::Blocked {
        w.push(" disabled");
    }
    w.push(">");
    let icon = service
        .icon
        .as_deref()
        .filter(|i| !i.is_empty())
        .unwrap_or_else(|| icon_for(&service.key));
    w.push("<span class=\"intake-service-icon\"");
    w.attr("data-icon", icon);
    w.push("></span>");
    w.push("<span class=\"intake-service-label\">");
    w.push(&escape_text(&service.label));
    w.push("</span>");
    if !service.description.is_empty() {
        w.push("<span class=\"intake-service-description\">");
        w.push(&escape_text(&service.description));
        w.push("</span>");
    }
    if interaction == Interaction::Blocked {
        w.push("<span class=\"intake-service-hint\">");
        w.push(&escape_text(
            t.translate("This service is available to existing patients only"),
        ));
        w.push("</span>");
    }
    w.push("</button></li>");
}

fn write_form(w: &mut Markup, input: &RenderInput, t: &Translator) {
    let selected = input.state.selected_service.as_deref().unwrap_or_default();
    let label = input
        .services
        .services()
        .iter()
        .find(|s| s.key == selected)
        .map(|s| s.label.as_str())
        .unwrap_or(selected);
    w.push("<h2>");
    w.push(&escape_text(label));
    w.push("</h2>");
    w.push("<form class=\"intake-form\"");
    w.attr("data-service-key", selected);
    w.push(">");
    w.push("<label>");
    w.push(&escape_text(t.translate("Your name")));
    w.push("<input type=\"text\" name=\"name\" required></label>");
    w.push("<label>");
    w.push(&escape_text(t.translate("How can we reach you?")));
    w.push("<input type=\"text\" name=\"contact\" required></label>");
    w.push("<label>");
    w.push(&escape_text(t.translate("Your message")));
    w.push("<textarea name=\"message\" rows=\"4\"></textarea></label>");
    w.push("<button type=\"submit\">");
    w.push(&escape_text(t.translate("Send request")));
    w.push("</button>");
    w.push("</form>");
}

fn write_success(w: &mut Markup, t: &Translator) {
    w.push("<h2>");
    w.push(&escape_text(t.translate("Request sent")));
    w.push("</h2>");
    w.push("<p class=\"intake-success\">");
    w.push(&escape_text(
        t.translate("Thank you! We will get back to you as soon as possible."),
    ));
    w.push("</p>");
}
