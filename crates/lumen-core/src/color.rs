//! Colors for effect paints.
//!
//! Effects think in HSL (hue sweeps drive most of the animation), while
//! canvas backends want RGBA. `Color` stores RGBA and offers constructors
//! for both, plus the hex form used in configuration.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from HSL components, CSS style: `hue` in degrees (any
    /// range, wrapped), `saturation` and `lightness` in percent, `alpha` in
    /// [0, 1].
    pub fn hsla(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> Self {
        let h = hue.rem_euclid(360.0) / 360.0;
        let s = (saturation / 100.0).clamp(0.0, 1.0);
        let l = (lightness / 100.0).clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::rgba(l as f32, l as f32, l as f32, alpha.clamp(0.0, 1.0) as f32);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Self::rgba(
            hue_to_channel(p, q, h + 1.0 / 3.0) as f32,
            hue_to_channel(p, q, h) as f32,
            hue_to_channel(p, q, h - 1.0 / 3.0) as f32,
            alpha.clamp(0.0, 1.0) as f32,
        )
    }

    /// Opaque HSL shorthand.
    pub fn hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self::hsla(hue, saturation, lightness, 1.0)
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { a: alpha, ..self }
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        let short = |i: usize| hex_val(bytes[i]).map(|v| (v * 17) as f32 / 255.0);
        let long = |i: usize| -> Option<f32> {
            Some((hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?) as f32 / 255.0)
        };

        match bytes.len() {
            3 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, 1.0)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, 1.0)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque. Both are
    /// valid CSS color strings.
    pub fn to_hex(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (channel(self.r), channel(self.g), channel(self.b), channel(self.a));
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }

    /// Channels as 8-bit values (r, g, b, a).
    pub fn to_rgba8(&self) -> [u8; 4] {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b), channel(self.a)]
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color: {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn parse_short_and_long_hex() {
        let c = Color::from_hex("#fff").unwrap();
        assert_eq!(c, Color::WHITE);

        let c = Color::from_hex("#e947f5").unwrap();
        assert_eq!(c.to_rgba8(), [0xE9, 0x47, 0xF5, 0xFF]);

        let c = Color::from_hex("FF000080").unwrap();
        assert!(approx(c.a, 128.0 / 255.0));
    }

    #[test]
    fn reject_bad_hex() {
        assert!(Color::from_hex("#ggg").is_none());
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("white").is_none());
    }

    #[test]
    fn hex_emit_drops_opaque_alpha() {
        assert_eq!(Color::from_hex("#2f4ba2").unwrap().to_hex(), "#2F4BA2");
        assert_eq!(Color::TRANSPARENT.to_hex(), "#00000000");
    }

    #[test]
    fn hsl_primaries() {
        assert_eq!(Color::hsl(0.0, 100.0, 50.0).to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(Color::hsl(120.0, 100.0, 50.0).to_rgba8(), [0, 255, 0, 255]);
        assert_eq!(Color::hsl(240.0, 100.0, 50.0).to_rgba8(), [0, 0, 255, 255]);
    }

    #[test]
    fn hsl_wraps_hue() {
        assert_eq!(Color::hsl(480.0, 80.0, 60.0), Color::hsl(120.0, 80.0, 60.0));
        assert_eq!(Color::hsl(-60.0, 80.0, 60.0), Color::hsl(300.0, 80.0, 60.0));
    }

    #[test]
    fn hsl_grey_when_unsaturated() {
        let c = Color::hsla(200.0, 0.0, 50.0, 0.5);
        assert!(approx(c.r, 0.5) && approx(c.g, 0.5) && approx(c.b, 0.5));
        assert!(approx(c.a, 0.5));
    }

    #[test]
    fn deserialize_from_hex_string() {
        let c: Color = serde_json::from_str("\"#00d2d3\"").unwrap();
        assert_eq!(c.to_rgba8(), [0x00, 0xD2, 0xD3, 0xFF]);
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }
}
