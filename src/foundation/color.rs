//! CSS-style colors for the field background and dot fills.
//!
//! Backgrounds are written the way a stylesheet would write them: `#rgb`, `#rgba`, `#rrggbb`,
//! `#rrggbbaa`, or `hsl()`/`hsla()` in either comma or space syntax.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::FolioError;

/// Straight-alpha color with normalized `0..=1` channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorDef {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
    /// Alpha.
    pub a: f64,
}

impl ColorDef {
    /// Build from normalized channels.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to premultiplied RGBA8, clamping every channel.
    pub fn to_rgba8_premul(self) -> Rgba8Premul {
        let [r, g, b, a] = self.to_straight_u8();
        Rgba8Premul::from_straight_rgba(r, g, b, a)
    }

    fn to_straight_u8(self) -> [u8; 4] {
        let q = |x: f64| (x.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// Formats as `#rrggbbaa`, which [`FromStr`] reads back.
impl fmt::Display for ColorDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_straight_u8();
        write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

impl FromStr for ColorDef {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        let lower = s.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("hsla(")
            .or_else(|| lower.strip_prefix("hsl("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_hsl_args(args);
        }
        Err(FolioError::validation(format!(
            "unsupported color \"{s}\" (expected #hex or hsl())"
        )))
    }
}

impl Serialize for ColorDef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Color in HSL space: hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue in degrees; any value is wrapped into `[0, 360)`.
    pub h: f64,
    /// Saturation in percent (`0..=100`).
    pub s: f64,
    /// Lightness in percent (`0..=100`).
    pub l: f64,
}

impl Hsl {
    /// Straight-alpha RGB for this color with the given alpha.
    pub fn with_alpha(self, a: f64) -> ColorDef {
        let h = self.h.rem_euclid(360.0);
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);
        let chroma = s * l.min(1.0 - l);
        // CSS Color 4 sample function; n picks the channel.
        let channel = |n: f64| {
            let k = (n + h / 30.0) % 12.0;
            l - chroma * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0)
        };
        ColorDef::rgba(channel(0.0), channel(8.0), channel(4.0), a)
    }

    /// Opaque premultiplied RGBA8 for this color.
    pub fn to_rgba8_premul(self) -> Rgba8Premul {
        self.with_alpha(1.0).to_rgba8_premul()
    }
}

fn parse_hex(hex: &str) -> Result<ColorDef, FolioError> {
    let bad = || FolioError::validation(format!("invalid hex color \"#{hex}\""));
    if !hex.is_ascii() {
        return Err(bad());
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).map_err(|_| bad());
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());

    let [r, g, b, a] = match hex.len() {
        3 | 4 => {
            let mut out = [255u8; 4];
            for (i, slot) in out.iter_mut().enumerate().take(hex.len()) {
                *slot = nibble(i)? * 17;
            }
            out
        }
        6 => [byte(0)?, byte(2)?, byte(4)?, 255],
        8 => [byte(0)?, byte(2)?, byte(4)?, byte(6)?],
        _ => return Err(bad()),
    };
    let unit = |v: u8| f64::from(v) / 255.0;
    Ok(ColorDef::rgba(unit(r), unit(g), unit(b), unit(a)))
}

fn parse_hsl_args(args: &str) -> Result<ColorDef, FolioError> {
    let parts: Vec<&str> = args
        .split([',', '/', ' '])
        .filter(|p| !p.trim().is_empty())
        .map(str::trim)
        .collect();
    let number = |p: &str| -> Result<f64, FolioError> {
        p.trim_end_matches("deg")
            .trim_end_matches('%')
            .parse::<f64>()
            .map_err(|_| FolioError::validation(format!("invalid hsl component \"{p}\"")))
    };

    let (h, s, l, a) = match parts.as_slice() {
        [h, s, l] => (number(h)?, number(s)?, number(l)?, 1.0),
        [h, s, l, a] => {
            let alpha = number(a)?;
            let alpha = if a.ends_with('%') { alpha / 100.0 } else { alpha };
            (number(h)?, number(s)?, number(l)?, alpha)
        }
        _ => {
            return Err(FolioError::validation(format!(
                "hsl() takes 3 or 4 components, got {}",
                parts.len()
            )));
        }
    };
    Ok(Hsl { h, s, l }.with_alpha(a.clamp(0.0, 1.0)))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
