//! Parsing of the CSS-style colour strings used in draggable configs.

use egui::Color32;

/// Named colours accepted in `render_color`.
const NAMED_COLORS: &[(&str, Color32)] = &[
    ("black", Color32::BLACK),
    ("white", Color32::WHITE),
    ("red", Color32::from_rgb(239, 68, 68)),
    ("orange", Color32::from_rgb(249, 115, 22)),
    ("yellow", Color32::from_rgb(234, 179, 8)),
    ("green", Color32::from_rgb(34, 197, 94)),
    ("blue", Color32::from_rgb(59, 130, 246)),
    ("purple", Color32::from_rgb(168, 85, 247)),
    ("pink", Color32::from_rgb(236, 72, 153)),
    ("gray", Color32::from_rgb(107, 114, 128)),
    ("grey", Color32::from_rgb(107, 114, 128)),
    ("transparent", Color32::TRANSPARENT),
];

/// Parse `#rgb`, `#rrggbb`, `#rrggbbaa` or a named colour.
pub fn parse_css_color(color: &str) -> Option<Color32> {
    let color = color.trim();
    let Some(hex) = color.strip_prefix('#') else {
        return NAMED_COLORS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(color))
            .map(|&(_, c)| c);
    };

    // from_str_radix accepts a leading sign
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                rgb[i] = v * 17;
            }
            Some(Color32::from_rgb(rgb[0], rgb[1], rgb[2]))
        }
        6 => Some(Color32::from_rgb(
            channel(hex.get(0..2)?)?,
            channel(hex.get(2..4)?)?,
            channel(hex.get(4..6)?)?,
        )),
        8 => Some(Color32::from_rgba_unmultiplied(
            channel(hex.get(0..2)?)?,
            channel(hex.get(2..4)?)?,
            channel(hex.get(4..6)?)?,
            channel(hex.get(6..8)?)?,
        )),
        _ => None,
    }
}

/// Resolve an optional colour string, logging and falling back on failure.
pub fn resolve_fill(color: Option<&str>, fallback: Color32) -> Color32 {
    match color {
        Some(css) => parse_css_color(css).unwrap_or_else(|| {
            log::warn!("Unrecognised colour {:?}, using fallback", css);
            fallback
        }),
        None => fallback,
    }
}
