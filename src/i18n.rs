//! Localization — source-string keys with a built-in German table.
//!
//! Keys are the English source strings. A missing translation falls back
//! to the key itself, so a gap in the table can never blank out the UI.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Active UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    /// German, the practice-facing default.
    #[default]
    De,
    /// English is the source language; translations are the identity.
    En,
}

/// Translates source-language keys into the active locale.
#[derive(Debug, Clone, Copy)]
pub struct Translator {
    locale: Locale,
}

impl Translator {
    pub fn for_locale(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Look up `key` in the active locale's table; fall back to `key`
    /// itself when no mapping exists.
    pub fn translate<'a>(&self, key: &'a str) -> &'a str {
        match self.locale {
            Locale::En => key,
            Locale::De => lookup_de(key).unwrap_or_else(|| {
                debug!(%key, "no German translation, falling back to source string");
                key
            }),
        }
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

fn lookup_de(key: &str) -> Option<&'static str> {
    let translated = match key {
        "Welcome to {praxis}" => "Willkommen bei {praxis}",
        "Are you already a patient with us?" => "Sind Sie bereits Patient:in bei uns?",
        "Existing patient" => "Bestandspatient:in",
        "New patient" => "Neupatient:in",
        "Please choose a location" => "Bitte wählen Sie einen Standort",
        "Which service do you need?" => "Welches Anliegen haben Sie?",
        "This service is available to existing patients only" => {
            "Dieses Anliegen ist nur für Bestandspatient:innen verfügbar"
        }
        "No services are available at the moment" => {
            "Zurzeit sind keine Anliegen verfügbar"
        }
        "No locations are available at the moment" => {
            "Zurzeit sind keine Standorte verfügbar"
        }
        "Loading services" => "Anliegen werden geladen",
        "Your name" => "Ihr Name",
        "How can we reach you?" => "Wie können wir Sie erreichen?",
        "Your message" => "Ihre Nachricht",
        "Send request" => "Anfrage senden",
        "Request sent" => "Anfrage gesendet",
        "Thank you! We will get back to you as soon as possible." => {
            "Vielen Dank! Wir melden uns so schnell wie möglich bei Ihnen."
        }
        "Back" => "Zurück",
        "Close" => "Schließen",
        "We are currently closed for vacation" => "Wir sind zurzeit im Urlaub",
        "We are back on {date}" => "Ab dem {date} sind wir wieder für Sie da",
        "Open intake assistant" => "Online-Anmeldung öffnen",
        _ => return None,
    };
    Some(translated)
}
