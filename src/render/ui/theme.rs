//! Color theme and styling definitions using ratatui colors
//!
//! Tier colors mirror the severity emoji: green, yellow, orange, red.

use crate::error::{DashError, Result};
use crate::report::ScoreTier;
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

/// Named theme presets selectable from config or `--theme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeChoice {
    #[default]
    Default,
    Monochrome,
    HighContrast,
}

impl FromStr for ThemeChoice {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "monochrome" | "mono" => Ok(Self::Monochrome),
            "high-contrast" | "high_contrast" => Ok(Self::HighContrast),
            other => Err(DashError::config(format!(
                "unknown theme '{}' (expected default, monochrome or high-contrast)",
                other
            ))),
        }
    }
}

/// Color theme for terminal UI elements
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Panel borders and labels
    pub chrome: Style,

    /// Large numbers in the stats panel
    pub stat_value: Style,

    pub excellent: Style,
    pub good: Style,
    pub average: Style,
    pub poor: Style,

    /// Active category toggle
    pub active_filter: Style,

    /// Focused search box border
    pub focused_input: Style,

    /// Selected card row
    pub selection: Style,

    /// Empty-state and loading messages
    pub placeholder: Style,

    /// Load failure message
    pub error_text: Style,

    pub status_bg: Color,
    pub status_fg: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            chrome: Style::default().fg(Color::Gray),
            stat_value: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            excellent: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            good: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            average: Style::default()
                .fg(Color::Rgb(255, 165, 0))
                .add_modifier(Modifier::BOLD),
            poor: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            active_filter: Style::default().fg(Color::Black).bg(Color::Cyan),
            focused_input: Style::default().fg(Color::Cyan),
            selection: Style::default().bg(Color::DarkGray),
            placeholder: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            error_text: Style::default().fg(Color::Red),
            status_bg: Color::Blue,
            status_fg: Color::White,
        }
    }
}

impl ColorTheme {
    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        let plain = Style::default();
        Self {
            chrome: plain,
            stat_value: plain.add_modifier(Modifier::BOLD),
            excellent: plain.add_modifier(Modifier::BOLD),
            good: plain,
            average: plain,
            poor: plain.add_modifier(Modifier::DIM),
            active_filter: plain.add_modifier(Modifier::REVERSED),
            focused_input: plain.add_modifier(Modifier::BOLD),
            selection: plain.add_modifier(Modifier::REVERSED),
            placeholder: plain.add_modifier(Modifier::ITALIC),
            error_text: plain.add_modifier(Modifier::BOLD),
            status_bg: Color::Black,
            status_fg: Color::White,
        }
    }

    /// Create a high-contrast theme for accessibility
    pub fn high_contrast() -> Self {
        Self {
            chrome: Style::default().fg(Color::White),
            stat_value: Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
            excellent: Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD),
            good: Style::default().fg(Color::LightYellow).add_modifier(Modifier::BOLD),
            average: Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD),
            poor: Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
            active_filter: Style::default().fg(Color::Black).bg(Color::White),
            focused_input: Style::default().fg(Color::LightYellow),
            selection: Style::default().fg(Color::Black).bg(Color::LightBlue),
            placeholder: Style::default().fg(Color::White),
            error_text: Style::default().fg(Color::LightRed),
            status_bg: Color::White,
            status_fg: Color::Black,
        }
    }

    pub fn from_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Default => Self::default(),
            ThemeChoice::Monochrome => Self::monochrome(),
            ThemeChoice::HighContrast => Self::high_contrast(),
        }
    }

    /// Score style for a severity tier.
    pub fn tier_style(&self, tier: ScoreTier) -> Style {
        match tier {
            ScoreTier::Excellent => self.excellent,
            ScoreTier::Good => self.good,
            ScoreTier::Average => self.average,
            ScoreTier::Poor => self.poor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_tier_colors() {
        let theme = ColorTheme::default();
        assert_eq!(theme.tier_style(ScoreTier::Excellent).fg, Some(Color::Green));
        assert_eq!(theme.tier_style(ScoreTier::Good).fg, Some(Color::Yellow));
        assert_eq!(
            theme.tier_style(ScoreTier::Average).fg,
            Some(Color::Rgb(255, 165, 0))
        );
        assert_eq!(theme.tier_style(ScoreTier::Poor).fg, Some(Color::Red));
        assert_eq!(theme.status_bg, Color::Blue);
    }

    #[test]
    fn test_monochrome_theme_has_no_colors() {
        let theme = ColorTheme::monochrome();
        for tier in [
            ScoreTier::Excellent,
            ScoreTier::Good,
            ScoreTier::Average,
            ScoreTier::Poor,
        ] {
            assert_eq!(theme.tier_style(tier).fg, None);
        }
        assert!(theme.selection.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_theme_choice_parsing() {
        assert_eq!("default".parse::<ThemeChoice>().unwrap(), ThemeChoice::Default);
        assert_eq!("Mono".parse::<ThemeChoice>().unwrap(), ThemeChoice::Monochrome);
        assert_eq!(
            "high-contrast".parse::<ThemeChoice>().unwrap(),
            ThemeChoice::HighContrast
        );
        assert!("neon".parse::<ThemeChoice>().is_err());

        let theme = ColorTheme::from_choice(ThemeChoice::HighContrast);
        assert_eq!(theme.status_bg, Color::White);
    }
}
