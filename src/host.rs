//! Host environment values, injected explicitly.
//!
//! The original host exposed site name, locale, and date formatting as
//! ambient globals; here they travel as a value object passed into render
//! calls so rendering stays a pure function of its inputs.

use chrono::NaiveDate;

use crate::i18n::Locale;

/// Host-provided context for one render request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostContext {
    /// Name of the embedding site (not necessarily the praxis name).
    pub site_name: String,
    /// Active UI locale.
    pub locale: Locale,
    /// chrono format string for user-facing dates.
    pub date_format: String,
}

impl HostContext {
    /// Format a date the way the host displays dates.
    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }
}

impl Default for HostContext {
    fn default() -> Self {
        Self {
            site_name: String::new(),
            locale: Locale::default(),
            date_format: "%d.%m.%Y".to_string(),
        }
    }
}
