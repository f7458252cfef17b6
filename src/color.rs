//! Theme colors and hex helpers.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

pub const PINK: &str = "#ff4fa3";
pub const WHITE: &str = "#ffffff";
pub const BLACK: &str = "#000000";
pub const BACKGROUND: &str = "#242424";

/// Opacity of the resize margin fill.
pub const MARGIN_ALPHA: f64 = 0.3;

/// Parse `#RGB` or `#RRGGBB` values into RGB channels.
#[must_use]
pub fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim().strip_prefix('#')?;
    let nibbles = hex.bytes().map(nibble).collect::<Option<Vec<u8>>>()?;
    match nibbles.as_slice() {
        &[r, g, b] => Some((r * 17, g * 17, b * 17)),
        &[r1, r2, g1, g2, b1, b2] => Some(((r1 << 4) | r2, (g1 << 4) | g2, (b1 << 4) | b2)),
        _ => None,
    }
}

fn nibble(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Append an alpha channel to a hex color, producing `#rrggbbaa`.
///
/// `opacity` is clamped to `[0, 1]`; NaN counts as fully opaque. Colors that
/// don't parse fall back to [`PINK`].
#[must_use]
pub fn with_alpha(color: &str, opacity: f64) -> String {
    let opacity = if opacity.is_nan() { 1.0 } else { opacity.clamp(0.0, 1.0) };
    let (r, g, b) = parse_hex_rgb(color)
        .or_else(|| parse_hex_rgb(PINK))
        .unwrap_or((255, 79, 163));
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let a = (opacity * 255.0).round() as u8;
    format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
}
