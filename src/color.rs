//! Color value recognition

use regex::Regex;

fn hex_color_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid regex"))
}

/// True for `#rgb` and `#rrggbb` colors
pub fn is_hex_color(value: &str) -> bool {
    hex_color_regex().is_match(value.trim())
}
