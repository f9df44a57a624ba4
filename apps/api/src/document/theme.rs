//! Theme — named color roles for the rendered resume, plus the hex↔HSL
//! conversion used at the color-picker boundary.
//!
//! The document stores every color as an HSL string (`"hsl(H S% L%)"` with
//! integer components). Picker widgets speak hex, so the edit boundary
//! converts both ways. Conversion is deliberately permissive: malformed
//! input degrades to black, never to an error.

use serde::{Deserialize, Serialize};

/// Color roles applied to the rendered resume. All values are HSL strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSpec {
    pub heading_color: String,
    pub section_title_color: String,
    pub item_title_color: String,
    pub item_description_color: String,
    pub link_color: String,
    pub secondary_color: String,
}

impl Default for ThemeSpec {
    fn default() -> Self {
        ThemeSpec {
            heading_color: "hsl(210 40% 20%)".to_string(),
            section_title_color: "hsl(210 86% 53%)".to_string(),
            item_title_color: "hsl(210 29% 24%)".to_string(),
            item_description_color: "hsl(210 10% 23%)".to_string(),
            link_color: "hsl(180 55% 46%)".to_string(),
            secondary_color: "hsl(210 20% 45%)".to_string(),
        }
    }
}

/// Converts `#rgb` or `#rrggbb` to an HSL string with integer components.
/// Any other shape (wrong length, bad digits, non-ASCII) resolves to black.
pub fn hex_to_hsl(hex: &str) -> String {
    let (r, g, b) = parse_hex_rgb(hex);
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let mut h = 0.0;
    let mut s = 0.0;
    if max > min {
        let d = max - min;
        s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        h /= 6.0;
    }

    format!(
        "hsl({} {}% {}%)",
        (h * 360.0).round() as u32,
        (s * 100.0).round() as u32,
        (l * 100.0).round() as u32
    )
}

/// Converts an HSL string back to `#rrggbb` hex. The parser only reads the
/// first three unsigned integers embedded in the string, so `"hsl(210 86% 53%)"`
/// and `"210 86% 53%"` are equivalent. Fewer than three integers resolves
/// to `#000000`.
pub fn hsl_to_hex(hsl: &str) -> String {
    let nums = embedded_integers(hsl);
    if nums.len() < 3 {
        return "#000000".to_string();
    }

    let h = f64::from(nums[0]);
    let s = f64::from(nums[1]) / 100.0;
    let l = f64::from(nums[2]) / 100.0;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match nums[0] {
        // Near-red hues round up to 360 on the hex side; both ends of the
        // wheel are red.
        0..=59 | 360 => (c, x, 0.0),
        60..=119 => (x, c, 0.0),
        120..=179 => (0.0, c, x),
        180..=239 => (0.0, x, c),
        240..=299 => (x, 0.0, c),
        300..=359 => (c, 0.0, x),
        // Out-of-range hue: no chroma contribution, same as the m-only floor.
        _ => (0.0, 0.0, 0.0),
    };

    format!(
        "#{:02x}{:02x}{:02x}",
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8
    )
}

/// Parses `#rgb` / `#rrggbb` into channel bytes. Anything else is (0, 0, 0).
fn parse_hex_rgb(hex: &str) -> (u8, u8, u8) {
    if !hex.is_ascii() || !hex.starts_with('#') {
        return (0, 0, 0);
    }
    match hex.len() {
        4 => {
            let digits = hex.as_bytes();
            (
                hex_byte_doubled(digits[1]),
                hex_byte_doubled(digits[2]),
                hex_byte_doubled(digits[3]),
            )
        }
        7 => (
            hex_pair(&hex[1..3]),
            hex_pair(&hex[3..5]),
            hex_pair(&hex[5..7]),
        ),
        _ => (0, 0, 0),
    }
}

fn hex_pair(s: &str) -> u8 {
    u8::from_str_radix(s, 16).unwrap_or(0)
}

/// Expands a shorthand hex digit: `f` → `0xff`.
fn hex_byte_doubled(digit: u8) -> u8 {
    let nibble = match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    };
    nibble << 4 | nibble
}

/// Collects every run of decimal digits in the string as an integer.
fn embedded_integers(s: &str) -> Vec<u32> {
    let mut out = Vec::new();
    let mut current: Option<u32> = None;
    for ch in s.chars() {
        if let Some(d) = ch.to_digit(10) {
            current = Some(current.unwrap_or(0).saturating_mul(10).saturating_add(d));
        } else if let Some(value) = current.take() {
            out.push(value);
        }
    }
    if let Some(value) = current {
        out.push(value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parses the three integers back out of an HSL string.
    fn hsl_components(hsl: &str) -> (u32, u32, u32) {
        let nums = embedded_integers(hsl);
        assert!(nums.len() >= 3, "expected 3 components in {hsl}");
        (nums[0], nums[1], nums[2])
    }

    #[test]
    fn test_hex_to_hsl_primaries() {
        assert_eq!(hex_to_hsl("#ff0000"), "hsl(0 100% 50%)");
        assert_eq!(hex_to_hsl("#00ff00"), "hsl(120 100% 50%)");
        assert_eq!(hex_to_hsl("#0000ff"), "hsl(240 100% 50%)");
    }

    #[test]
    fn test_hex_to_hsl_grays_have_zero_saturation() {
        assert_eq!(hex_to_hsl("#000000"), "hsl(0 0% 0%)");
        assert_eq!(hex_to_hsl("#ffffff"), "hsl(0 0% 100%)");
        assert_eq!(hex_to_hsl("#808080"), "hsl(0 0% 50%)");
    }

    #[test]
    fn test_hex_to_hsl_shorthand_expands_digits() {
        assert_eq!(hex_to_hsl("#fff"), hex_to_hsl("#ffffff"));
        assert_eq!(hex_to_hsl("#f00"), hex_to_hsl("#ff0000"));
        assert_eq!(hex_to_hsl("#3af"), hex_to_hsl("#33aaff"));
    }

    #[test]
    fn test_hsl_to_hex_known_values() {
        assert_eq!(hsl_to_hex("hsl(0 100% 50%)"), "#ff0000");
        assert_eq!(hsl_to_hex("hsl(120 100% 25%)"), "#008000");
        assert_eq!(hsl_to_hex("hsl(0 0% 100%)"), "#ffffff");
        assert_eq!(hsl_to_hex("hsl(210 86% 53%)"), "#2087ee");
    }

    #[test]
    fn test_hsl_to_hex_accepts_bare_triplet() {
        assert_eq!(hsl_to_hex("210 86% 53%"), hsl_to_hex("hsl(210 86% 53%)"));
    }

    #[test]
    fn test_malformed_hex_defaults_to_black() {
        assert_eq!(hex_to_hsl("bad"), "hsl(0 0% 0%)");
        assert_eq!(hex_to_hsl(""), "hsl(0 0% 0%)");
        assert_eq!(hex_to_hsl("#12345"), "hsl(0 0% 0%)");
        assert_eq!(hex_to_hsl("héx#aa"), "hsl(0 0% 0%)");
        // Bad digits fall back per-channel rather than erroring.
        assert_eq!(hex_to_hsl("#zzzzzz"), "hsl(0 0% 0%)");
    }

    #[test]
    fn test_malformed_hsl_defaults_to_black() {
        assert_eq!(hsl_to_hex("bad"), "#000000");
        assert_eq!(hsl_to_hex(""), "#000000");
        assert_eq!(hsl_to_hex("hsl(10 20%)"), "#000000");
    }

    #[test]
    fn test_out_of_range_hue_does_not_panic() {
        // Saturating math and cast saturation keep absurd inputs in-range.
        let hex = hsl_to_hex("hsl(720 500% 500%)");
        assert!(hex.starts_with('#') && hex.len() == 7);
    }

    #[test]
    fn test_hue_360_is_red_not_black() {
        // Hues just below red round up to 360 on the hex side; that must
        // land on the red arm, not fall through to zero chroma.
        assert_eq!(hex_to_hsl("#ff0001"), "hsl(360 100% 50%)");
        assert_eq!(hsl_to_hex("hsl(360 100% 50%)"), "#ff0000");
    }

    #[test]
    fn test_round_trip_is_stable_after_first_conversion() {
        // hex → hsl loses sub-integer precision; once a color has passed
        // through hsl_to_hex it must survive further round trips exactly.
        for hsl in ["hsl(210 86% 53%)", "hsl(0 100% 50%)", "hsl(0 0% 0%)", "hsl(0 0% 100%)"] {
            let hex = hsl_to_hex(hsl);
            assert_eq!(hsl_to_hex(&hex_to_hsl(&hex)), hex, "fixpoint failed for {hsl}");
        }
    }

    #[test]
    fn test_round_trip_hsl_components_within_one_step() {
        for hex in ["#3366cc", "#1a2b3c", "#c0ffee", "#abcdef", "#7f0fa0", "#ff0001"] {
            let first = hex_to_hsl(hex);
            let second = hex_to_hsl(&hsl_to_hex(&first));
            let (h1, s1, l1) = hsl_components(&first);
            let (h2, s2, l2) = hsl_components(&second);
            // Hue distance wraps: 360 and 0 are the same point on the wheel.
            let dh = h1.abs_diff(h2);
            let dh = dh.min(360 - dh);
            assert!(dh <= 1, "hue drifted for {hex}: {first} vs {second}");
            assert!(s1.abs_diff(s2) <= 1, "saturation drifted for {hex}: {first} vs {second}");
            assert!(l1.abs_diff(l2) <= 1, "lightness drifted for {hex}: {first} vs {second}");
        }
    }

    #[test]
    fn test_default_theme_colors_are_valid_hsl() {
        let theme = ThemeSpec::default();
        for color in [
            &theme.heading_color,
            &theme.section_title_color,
            &theme.item_title_color,
            &theme.item_description_color,
            &theme.link_color,
            &theme.secondary_color,
        ] {
            assert_ne!(hsl_to_hex(color), "#000000", "default {color} parsed as black");
        }
    }
}
