//! Key-indexed icon lookup with a generic fallback.

/// Icon used when a service key has no dedicated entry.
pub const DEFAULT_ICON: &str = "clipboard";

/// Resolve the icon identifier for a service key.
///
/// A static mapping, not a mutable table; the `icon` field on a service
/// overrides this when set.
pub fn icon_for(key: &str) -> &'static str {
    match key {
        "termin" => "calendar",
        "rezept" => "pill",
        "ueberweisung" => "arrow-right-circle",
        "krankschreibung" => "file-text",
        "befund" => "folder-open",
        "frage" => "message-circle",
        "videosprechstunde" => "video",
        _ => DEFAULT_ICON,
    }
}
