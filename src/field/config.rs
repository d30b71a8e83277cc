use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::color::ColorDef;
use crate::foundation::core::{Fps, Rgba8Premul};
use crate::foundation::error::{FolioError, FolioResult};

/// Surface fill applied before each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Background {
    /// Clear to fully transparent pixels.
    #[default]
    Transparent,
    /// Fill with a color.
    Color(ColorDef),
}

impl Background {
    /// Premultiplied fill color (`transparent` is all zeros).
    pub fn to_rgba8_premul(self) -> Rgba8Premul {
        match self {
            Self::Transparent => Rgba8Premul::transparent(),
            Self::Color(c) => c.to_rgba8_premul(),
        }
    }
}

impl Serialize for Background {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Transparent => serializer.serialize_str("transparent"),
            Self::Color(c) => c.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Background {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.trim().eq_ignore_ascii_case("transparent") {
            return Ok(Self::Transparent);
        }
        s.parse::<ColorDef>()
            .map(Self::Color)
            .map_err(serde::de::Error::custom)
    }
}

/// Immutable parameters of one mounted pixel field.
///
/// Lengths are in layout units (CSS pixels on the web); times in milliseconds unless noted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
    /// Side of each drawn square.
    pub pixel_size: f64,
    /// Distance between neighbouring dot anchors before budget scaling.
    pub spacing: f64,
    /// Seconds for a full base hue rotation.
    pub color_cycle_secs: f64,
    /// Surface fill.
    pub background: Background,
    /// Radius around the pointer that receives the boosted treatment.
    pub pointer_radius: f64,
    /// Peak displacement at the pointer.
    pub warp_strength: f64,
    /// Hue speed multiplier inside the pointer radius.
    pub color_boost: f64,
    /// Upper bound for the device scale factor.
    pub max_device_scale: f64,
    /// Frame rate cap for the animation loop.
    pub target_fps: u32,
    /// Maximum number of dots drawn per frame.
    pub dot_budget: usize,
    /// Largest factor the spacing may be stretched by to respect `dot_budget`.
    pub max_spacing_scale: f64,
    /// Ripple angular speed (radians per millisecond).
    pub ripple_speed: f64,
    /// Ripple spatial frequency (radians per layout unit).
    pub ripple_frequency: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            pixel_size: 1.0,
            spacing: 20.0,
            color_cycle_secs: 6.0,
            background: Background::Transparent,
            pointer_radius: 160.0,
            warp_strength: 14.0,
            color_boost: 2.25,
            max_device_scale: 1.75,
            target_fps: 30,
            dot_budget: 6000,
            max_spacing_scale: 4.0,
            ripple_speed: 0.003,
            ripple_frequency: 0.06,
        }
    }
}

impl FieldConfig {
    /// Parse a JSON configuration document; missing keys take their defaults.
    pub fn from_json_str(s: &str) -> FolioResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| FolioError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_json_path(path: &Path) -> FolioResult<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read field config '{}'", path.display()))?;
        Self::from_json_str(&raw)
    }

    /// Check every parameter is usable.
    pub fn validate(&self) -> FolioResult<()> {
        fn positive(name: &str, v: f64) -> FolioResult<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(FolioError::validation(format!("{name} must be > 0")))
            }
        }
        fn non_negative(name: &str, v: f64) -> FolioResult<()> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(FolioError::validation(format!("{name} must be >= 0")))
            }
        }

        positive("pixel_size", self.pixel_size)?;
        positive("spacing", self.spacing)?;
        positive("color_cycle_secs", self.color_cycle_secs)?;
        non_negative("pointer_radius", self.pointer_radius)?;
        non_negative("warp_strength", self.warp_strength)?;
        non_negative("color_boost", self.color_boost)?;
        if !self.ripple_speed.is_finite() || !self.ripple_frequency.is_finite() {
            return Err(FolioError::validation("ripple constants must be finite"));
        }
        if !(self.max_device_scale.is_finite() && self.max_device_scale >= 1.0) {
            return Err(FolioError::validation("max_device_scale must be >= 1"));
        }
        if !(self.max_spacing_scale.is_finite() && self.max_spacing_scale >= 1.0) {
            return Err(FolioError::validation("max_spacing_scale must be >= 1"));
        }
        if self.dot_budget == 0 {
            return Err(FolioError::validation("dot_budget must be > 0"));
        }
        self.fps()?;
        Ok(())
    }

    /// Frame rate cap as a validated [`Fps`].
    pub fn fps(&self) -> FolioResult<Fps> {
        Fps::new(self.target_fps, 1)
    }

    /// Base hue speed in degrees per millisecond.
    pub fn base_hue_speed(&self) -> f64 {
        360.0 / (self.color_cycle_secs * 1000.0)
    }

    /// Clamp a reported device scale into `[1, max_device_scale]`.
    pub fn clamp_device_scale(&self, reported: f64) -> f64 {
        let reported = if reported.is_finite() && reported > 0.0 {
            reported
        } else {
            1.0
        };
        reported.clamp(1.0, self.max_device_scale)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/config.rs"]
mod tests;
