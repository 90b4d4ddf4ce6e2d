//! Immutable catalog shapes supplied by the storage layer.
//!
//! The engine never mutates these; they are loaded once per render request
//! by the host and handed in fully populated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A physical practice location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Stable identifier, unique across the practice.
    pub uuid: Uuid,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub city: String,
}

/// Who may open a service's request form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PatientRestriction {
    /// Open to everyone.
    #[default]
    All,
    /// Existing patients only. The legacy spelling `patient_only` is still
    /// found in older stored catalogs and normalizes to this variant.
    #[serde(alias = "patient_only")]
    PatientsOnly,
}

/// One bookable service offered by the practice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Unique within a location's active set. An empty key renders with
    /// empty identifiers and yields an inert card; the storage layer is
    /// expected to never produce one.
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    /// Explicit icon override; when absent the key-indexed icon table
    /// applies (see [`icons::icon_for`](super::icons::icon_for)).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub patient_restriction: PatientRestriction,
    /// When present and non-empty the service is a redirect target, not an
    /// in-widget form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    /// Externally assigned priority. The engine preserves input order and
    /// never sorts by this; ordering is owned by the storage layer.
    #[serde(default)]
    pub sort_order: i64,
}

impl Service {
    /// Whether this service navigates away instead of opening a form.
    pub fn is_external(&self) -> bool {
        self.external_url.as_deref().is_some_and(|u| !u.is_empty())
    }
}

/// Which page edge the widget trigger is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WidgetPosition {
    Left,
    #[default]
    Right,
}

impl WidgetPosition {
    pub fn css_side(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Practice-wide widget settings.
///
/// `welcome_text` and `vacation_text` are rich text with a restricted tag
/// set; they are the only fields ever passed through the rich-text
/// sanitizer. Invariant: while `vacation_active` is set, no step other
/// than the vacation notice is reachable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetSettings {
    pub praxis_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub widget_position: WidgetPosition,
    #[serde(default)]
    pub widget_title: String,
    #[serde(default)]
    pub widget_subtitle: String,
    #[serde(default)]
    pub welcome_text: String,
    #[serde(default)]
    pub primary_color: String,
    #[serde(default)]
    pub accent_color: String,
    #[serde(default)]
    pub vacation_active: bool,
    #[serde(default)]
    pub vacation_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vacation_end_date: Option<NaiveDate>,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            praxis_name: String::new(),
            logo_url: None,
            widget_position: WidgetPosition::default(),
            widget_title: String::new(),
            widget_subtitle: String::new(),
            welcome_text: String::new(),
            primary_color: String::new(),
            accent_color: String::new(),
            vacation_active: false,
            vacation_text: String::new(),
            vacation_end_date: None,
        }
    }
}
