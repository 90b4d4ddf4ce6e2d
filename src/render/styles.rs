//! Theme-variable emission.
//!
//! One CSS custom-property block per widget instance, a pure function of
//! the settings. Colors are validated before interpolation; an invalid
//! value falls back to the built-in default rather than propagating.

use crate::catalog::types::WidgetSettings;

pub const DEFAULT_PRIMARY_COLOR: &str = "#1f6f5c";
pub const DEFAULT_ACCENT_COLOR: &str = "#eaf4f1";

/// Render the widget's CSS variable block.
pub fn render_styles(settings: &WidgetSettings) -> String {
    let primary = hex_color(&settings.primary_color).unwrap_or(DEFAULT_PRIMARY_COLOR);
    let accent = hex_color(&settings.accent_color).unwrap_or(DEFAULT_ACCENT_COLOR);
    let side = settings.widget_position.css_side();
    format!(
        ".praxis-intake{{--intake-primary:{primary};--intake-accent:{accent};}}\n\
         .praxis-intake .intake-trigger{{{side}:1.5rem;}}\n"
    )
}

/// Accepts `#rgb` and `#rrggbb`; anything else is rejected.
fn hex_color(value: &str) -> Option<&str> {
    let digits = value.strip_prefix('#')?;
    if matches!(digits.len(), 3 | 6) && digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        Some(value)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::WidgetPosition;

    #[test]
    fn valid_colors_are_used() {
        let settings = WidgetSettings {
            primary_color: "#2a6f4e".into(),
            accent_color: "#fff".into(),
            ..Default::default()
        };
        let css = render_styles(&settings);
        assert!(css.contains("--intake-primary:#2a6f4e;"));
        assert!(css.contains("--intake-accent:#fff;"));
    }

    #[test]
    fn invalid_colors_fall_back() {
        let settings = WidgetSettings {
            primary_color: "red; } body { display:none".into(),
            accent_color: "#12345".into(),
            ..Default::default()
        };
        let css = render_styles(&settings);
        assert!(css.contains(DEFAULT_PRIMARY_COLOR));
        assert!(css.contains(DEFAULT_ACCENT_COLOR));
        assert!(!css.contains("display:none"));
    }

    #[test]
    fn position_picks_the_anchored_side() {
        let mut settings = WidgetSettings::default();
        assert!(render_styles(&settings).contains("{right:1.5rem;}"));
        settings.widget_position = WidgetPosition::Left;
        assert!(render_styles(&settings).contains("{left:1.5rem;}"));
    }
}
