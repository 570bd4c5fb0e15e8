//! Display preferences shared by the surrounding UI.
//!
//! The session core never reads these; they live here so every front end
//! loads and saves them through the same [`SettingsRepository`].

use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Normal,
    Large,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl FontSize {
    pub fn as_str(self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Normal => "normal",
            FontSize::Large => "large",
        }
    }

    /// Scale applied to every base text size.
    pub fn multiplier(self) -> f64 {
        match self {
            FontSize::Small => 0.9,
            FontSize::Normal => 1.0,
            FontSize::Large => 1.15,
        }
    }

    /// Concrete point sizes for this preset.
    pub fn scale(self) -> FontScale {
        let m = self.multiplier();
        FontScale {
            small: 12.0 * m,
            normal: 15.0 * m,
            medium: 18.0 * m,
            large: 22.0 * m,
            xlarge: 28.0 * m,
            xxlarge: 42.0 * m,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontScale {
    pub small: f64,
    pub normal: f64,
    pub medium: f64,
    pub large: f64,
    pub xlarge: f64,
    pub xxlarge: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default, alias = "fontSize")]
    pub font_size: FontSize,
}

/// Persistence for [`Settings`] under its own fixed key.
///
/// Loading never fails on missing or unreadable data; implementations fall
/// back to defaults and only report errors from writes.
pub trait SettingsRepository: Send + Sync {
    fn load(&self) -> Settings;

    fn save(&self, settings: &Settings) -> Result<()>;

    /// Loads, applies `f`, saves, and returns the new settings.
    fn update(&self, f: &dyn Fn(&mut Settings)) -> Result<Settings> {
        let mut settings = self.load();
        f(&mut settings);
        self.save(&settings)?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_first_launch() {
        let settings = Settings::default();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.font_size, FontSize::Normal);
    }

    #[test]
    fn test_font_scale() {
        assert_eq!(FontSize::Normal.scale().normal, 15.0);
        assert!((FontSize::Large.scale().large - 25.3).abs() < 1e-9);
        assert!((FontSize::Small.scale().small - 10.8).abs() < 1e-9);
    }

    #[test]
    fn test_reads_camel_case_key() {
        let settings: Settings =
            serde_json::from_str(r#"{"theme":"light","fontSize":"large"}"#).unwrap();
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.font_size, FontSize::Large);
    }
}
