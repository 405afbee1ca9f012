use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::color::{ColorScheme, RadarPalette, RgbColor};
use crate::display::DisplayMode;
use crate::radar::{default_targets, HitDetection, TargetPoint};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to edit config: {0}")]
    Edit(#[from] toml_edit::TomlError),
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("sweep range must be in (0, 360], got {0}")]
    SweepRange(f32),
    #[error("frame interval must be at least 1ms")]
    FrameInterval,
    #[error("units per pixel must be positive, got {0}")]
    UnitsPerPixel(f32),
    #[error("ring count must be at least 1")]
    RingCount,
    #[error("invalid color '{0}': expected RRGGBB hex")]
    Color(String),
    #[error("target {index} has negative radius {radius}")]
    TargetRadius { index: usize, radius: f32 },
}

/// Layout of the sweep's angular frame
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SectorMode {
    /// Wedge centred on 0° with boundary rays
    #[default]
    Sector,
    /// Plain circle with a crosshair, no sector
    FullCircle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub sector: SectorConfig,
    pub style: StyleConfig,
    pub targets: Vec<TargetPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub mode: DisplayMode,
    pub frame_interval_ms: u64,
    /// Radar units covered by one canvas pixel in the terminal
    pub units_per_pixel: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SectorConfig {
    pub mode: SectorMode,
    pub sweep_range: f32,
    pub wrap: bool,
    pub hit_detection: HitDetection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub color_scheme: ColorScheme,
    pub ring_count: usize,
    pub ring_width: f32,
    pub sweep_width: f32,
    pub glow_blur: f32,
    pub sweep_color: Option<RgbColor>,
    pub accent_color: Option<RgbColor>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Terminal,
            frame_interval_ms: 16,
            units_per_pixel: 4.0,
        }
    }
}

impl Default for SectorConfig {
    fn default() -> Self {
        Self {
            mode: SectorMode::Sector,
            sweep_range: 360.0,
            wrap: false,
            hit_detection: HitDetection::Absolute,
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::Phosphor,
            ring_count: 5,
            ring_width: 2.0,
            sweep_width: 4.0,
            glow_blur: 20.0,
            sweep_color: None,
            accent_color: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            sector: SectorConfig::default(),
            style: StyleConfig::default(),
            targets: default_targets(),
        }
    }
}

impl DisplayConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

impl StyleConfig {
    /// Scheme palette with the explicit color overrides applied
    pub fn palette(&self) -> RadarPalette {
        self.palette_for(self.color_scheme)
    }

    pub fn palette_for(&self, scheme: ColorScheme) -> RadarPalette {
        let mut palette = scheme.palette();
        if let Some(sweep) = self.sweep_color {
            palette.ring = sweep;
            palette.sweep = sweep;
        }
        if let Some(accent) = self.accent_color {
            palette.glow = accent;
            palette.center = accent;
            palette.point = accent;
        }
        palette
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default XDG config path (~/.config/radarscope/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("radarscope").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists.
    /// Returns None if the file doesn't exist, warns on parse errors.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            return None;
        }
        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!(
                    "Warning: Failed to load config at {}: {}\nUsing defaults.",
                    path.display(),
                    e
                );
                None
            }
        }
    }

    /// Initialize default config file at XDG path, returns the path
    pub fn init_default_config() -> Result<PathBuf, ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoConfigDir)?;
        let io_err = |source| ConfigError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(&path, Self::generate_config_template()).map_err(io_err)?;

        Ok(path)
    }

    /// Store the chosen color scheme in the config file at `path`, keeping
    /// comments and layout. The file is created from the template if missing.
    pub fn save_color_scheme(path: &Path, scheme: ColorScheme) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
            std::fs::write(path, Self::generate_config_template()).map_err(io_err)?;
        }

        let content = std::fs::read_to_string(path).map_err(io_err)?;
        let updated = Self::with_color_scheme(&content, scheme)?;
        std::fs::write(path, updated).map_err(io_err)?;
        Ok(())
    }

    fn with_color_scheme(content: &str, scheme: ColorScheme) -> Result<String, ConfigError> {
        let mut doc = content.parse::<toml_edit::DocumentMut>()?;
        if !doc.contains_key("style") {
            doc["style"] = toml_edit::table();
        }
        doc["style"]["color_scheme"] = toml_edit::value(scheme.name());
        Ok(doc.to_string())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let range = self.sector.sweep_range;
        if !(range > 0.0 && range <= 360.0) {
            return Err(ConfigError::SweepRange(range));
        }
        if self.display.frame_interval_ms == 0 {
            return Err(ConfigError::FrameInterval);
        }
        if !(self.display.units_per_pixel > 0.0) {
            return Err(ConfigError::UnitsPerPixel(self.display.units_per_pixel));
        }
        if self.style.ring_count == 0 {
            return Err(ConfigError::RingCount);
        }
        if let Some((index, target)) = self
            .targets
            .iter()
            .enumerate()
            .find(|(_, t)| t.radius < 0.0)
        {
            return Err(ConfigError::TargetRadius {
                index,
                radius: target.radius,
            });
        }
        Ok(())
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r#"# Radarscope Configuration
# This file is auto-generated. Edit as needed.

[display]
# Display mode: "terminal" or "headless"
mode = "terminal"
# Delay between frames in milliseconds (16 = ~60fps)
frame_interval_ms = 16
# Radar units per canvas pixel in terminal mode (larger = smaller radar)
units_per_pixel = 4.0

[sector]
# "sector" (wedge with boundary rays) or "full-circle" (crosshair, no sector)
mode = "sector"
# Width of the sector in degrees, centred on 0° (pointing right)
sweep_range = 360.0
# Bounce back and forth across the sector instead of restarting
wrap = false
# Hit detection: "absolute" (plain angle difference) or "circular"
hit_detection = "absolute"

[style]
# Color scheme: "phosphor", "amber", "ice", "crimson", "monochrome"
color_scheme = "phosphor"
# Number of range rings
ring_count = 5
# Line widths in radar units
ring_width = 2.0
sweep_width = 4.0
# Soft edge of glowing markers
glow_blur = 20.0
# Overrides for the scheme colors
# sweep_color = { r = 0, g = 255, b = 0 }
# accent_color = { r = 0, g = 255, b = 255 }

# Contacts in polar coordinates: radius in radar units, angle in degrees
# (0° = right, clockwise)
[[targets]]
radius = 100.0
angle = 0.0

[[targets]]
radius = 100.0
angle = 30.0

[[targets]]
radius = 150.0
angle = 120.0

[[targets]]
radius = 80.0
angle = 270.0
"#
        .to_string()
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &crate::Args) -> Result<(), ConfigError> {
        if let Some(mode) = args.mode {
            self.display.mode = mode;
        }
        if let Some(fps) = args.fps {
            self.display.frame_interval_ms = (1000 / fps.max(1)) as u64;
        }
        if let Some(units) = args.units_per_pixel {
            self.display.units_per_pixel = units;
        }

        if let Some(range) = args.sweep_range {
            self.sector.sweep_range = range;
        }
        if args.wrap {
            self.sector.wrap = true;
        }
        if args.full_circle {
            self.sector.mode = SectorMode::FullCircle;
        }
        if let Some(detection) = args.hit_detection {
            self.sector.hit_detection = detection;
        }

        if let Some(scheme) = args.colors {
            self.style.color_scheme = scheme;
        }
        if let Some(ref color) = args.sweep_color {
            self.style.sweep_color =
                Some(RgbColor::from_hex(color).ok_or_else(|| ConfigError::Color(color.clone()))?);
        }
        if let Some(ref color) = args.accent_color {
            self.style.accent_color =
                Some(RgbColor::from_hex(color).ok_or_else(|| ConfigError::Color(color.clone()))?);
        }

        self.validate()
    }
}
