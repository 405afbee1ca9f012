use clap::ValueEnum;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};
use serde::{Deserialize, Serialize};

/// RGB color representation for configuration and draw commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse from hex string like "#FF0000" or "FF0000"
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
        let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
        let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Hue in degrees, saturation and lightness in 0.0..=1.0
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
        let rgb: Srgb<u8> = rgb.into_format();
        Self::new(rgb.red, rgb.green, rgb.blue)
    }

    fn to_linear(self) -> LinSrgb {
        Srgb::new(self.r, self.g, self.b).into_format::<f32>().into_linear()
    }

    fn from_linear(color: LinSrgb) -> Self {
        let rgb: Srgb = Srgb::from_linear(color);
        let rgb: Srgb<u8> = rgb.into_format();
        Self::new(rgb.red, rgb.green, rgb.blue)
    }

    /// Composite `self` over `background` with the given opacity (0.0 to 1.0).
    pub fn over(self, background: RgbColor, opacity: f32) -> RgbColor {
        let opacity = opacity.clamp(0.0, 1.0);
        if opacity <= 0.0 {
            return background;
        }
        if opacity >= 1.0 {
            return self;
        }
        Self::from_linear(background.to_linear().mix(self.to_linear(), opacity))
    }
}

/// Colors used for each part of the radar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarPalette {
    pub background: RgbColor,
    pub ring: RgbColor,
    pub sweep: RgbColor,
    pub glow: RgbColor,
    pub center: RgbColor,
    pub point: RgbColor,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Green rings and sweep with cyan contacts
    #[default]
    Phosphor,
    Amber,
    Ice,
    Crimson,
    Monochrome,
}

impl ColorScheme {
    /// Build the palette from a primary (rings, sweep) and accent (glow, contacts) color.
    pub fn palette(&self) -> RadarPalette {
        let (primary, accent) = match self {
            ColorScheme::Phosphor => ((120.0, 1.0, 0.5), (180.0, 1.0, 0.5)),
            ColorScheme::Amber => ((35.0, 1.0, 0.5), (50.0, 1.0, 0.6)),
            ColorScheme::Ice => ((200.0, 0.9, 0.55), (180.0, 0.6, 0.8)),
            ColorScheme::Crimson => ((0.0, 0.9, 0.45), (25.0, 1.0, 0.6)),
            ColorScheme::Monochrome => ((0.0, 0.0, 0.7), (0.0, 0.0, 1.0)),
        };

        let primary = RgbColor::from_hsl(primary.0, primary.1, primary.2);
        let accent = RgbColor::from_hsl(accent.0, accent.1, accent.2);

        RadarPalette {
            background: RgbColor::BLACK,
            ring: primary,
            sweep: primary,
            glow: accent,
            center: accent,
            point: accent,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorScheme::Phosphor => "phosphor",
            ColorScheme::Amber => "amber",
            ColorScheme::Ice => "ice",
            ColorScheme::Crimson => "crimson",
            ColorScheme::Monochrome => "monochrome",
        }
    }

    pub fn all() -> &'static [ColorScheme] {
        &[
            ColorScheme::Phosphor,
            ColorScheme::Amber,
            ColorScheme::Ice,
            ColorScheme::Crimson,
            ColorScheme::Monochrome,
        ]
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|c| c == self).unwrap_or(0);
        all[(current + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|c| c == self).unwrap_or(0);
        all[(current + all.len() - 1) % all.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phosphor_is_green_and_cyan() {
        let palette = ColorScheme::Phosphor.palette();
        assert_eq!(palette.ring, RgbColor::new(0, 255, 0));
        assert_eq!(palette.glow, RgbColor::new(0, 255, 255));
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(RgbColor::from_hex("#00ff7f"), Some(RgbColor::new(0, 255, 127)));
        assert_eq!(RgbColor::from_hex("FF0000"), Some(RgbColor::new(255, 0, 0)));
        assert_eq!(RgbColor::from_hex("#fff"), None);
        assert_eq!(RgbColor::from_hex("zzzzzz"), None);
    }

    #[test]
    fn compositing_endpoints() {
        let fg = RgbColor::new(0, 255, 0);
        assert_eq!(fg.over(RgbColor::BLACK, 1.0), fg);
        assert_eq!(fg.over(RgbColor::BLACK, 0.0), RgbColor::BLACK);
        let half = fg.over(RgbColor::BLACK, 0.5);
        assert_eq!(half.r, 0);
        assert!(half.g > 0 && half.g < 255);
    }

    #[test]
    fn scheme_cycle_wraps_around() {
        let mut scheme = ColorScheme::Phosphor;
        for _ in 0..ColorScheme::all().len() {
            scheme = scheme.next();
        }
        assert_eq!(scheme, ColorScheme::Phosphor);
        assert_eq!(ColorScheme::Phosphor.prev(), ColorScheme::Monochrome);
        assert_eq!(
            ColorScheme::from_str("Monochrome", true),
            Ok(ColorScheme::Monochrome)
        );
    }
}
