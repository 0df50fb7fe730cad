use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Color theme for the point field and accent text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Violet,
    Pink,
    Blue,
    Cyan,
    White,
}

impl ColorTheme {
    /// Cycle to the next color theme.
    pub fn next(&self) -> Self {
        match self {
            ColorTheme::Violet => ColorTheme::Pink,
            ColorTheme::Pink => ColorTheme::Blue,
            ColorTheme::Blue => ColorTheme::Cyan,
            ColorTheme::Cyan => ColorTheme::White,
            ColorTheme::White => ColorTheme::Violet,
        }
    }

    /// Base RGB components of the theme.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ColorTheme::Violet => (0x8b, 0x5c, 0xf6),
            ColorTheme::Pink => (0xf4, 0x72, 0xb6),
            ColorTheme::Blue => (0x60, 0xa5, 0xfa),
            ColorTheme::Cyan => (0x22, 0xd3, 0xee),
            ColorTheme::White => (0xe5, 0xe7, 0xeb),
        }
    }

    /// Convert theme to Ratatui Color.
    pub fn color(self) -> Color {
        let (r, g, b) = self.rgb();
        Color::Rgb(r, g, b)
    }

    /// Theme color scaled toward black by `intensity` (0.0 - 1.0).
    pub fn faded(self, intensity: f32) -> Color {
        let k = intensity.clamp(0.0, 1.0);
        let (r, g, b) = self.rgb();
        Color::Rgb(
            (r as f32 * k) as u8,
            (g as f32 * k) as u8,
            (b as f32 * k) as u8,
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorTheme::Violet => "violet",
            ColorTheme::Pink => "pink",
            ColorTheme::Blue => "blue",
            ColorTheme::Cyan => "cyan",
            ColorTheme::White => "white",
        }
    }
}

/// Global speed multiplier for the background drift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    /// Cycle to the next speed.
    pub fn next(&self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Medium,
            AnimationSpeed::Medium => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }

    /// Factor applied to elapsed time before it reaches the field animator.
    pub fn drift_scale(self) -> f32 {
        match self {
            AnimationSpeed::Slow => 0.5,
            AnimationSpeed::Medium => 1.0,
            AnimationSpeed::Fast => 2.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Medium => "medium",
            AnimationSpeed::Fast => "fast",
        }
    }
}
