use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{PageError, Result};

/// Top-level configuration structure for the page widgets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub carousel: CarouselConfig,
    pub preloader: PreloaderConfig,
    pub navbar: NavbarConfig,
    pub contact: ContactConfig,
}

impl AppConfig {
    /// Reads and validates a JSON configuration file. Missing fields fall back
    /// to their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.carousel.validate()?;
        self.navbar.validate()?;
        self.contact.validate()
    }
}

/// Viewport threshold from which `items_per_view` slides fit side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub min_width: u32,
    pub items_per_view: usize,
}

/// Configuration specific to the carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub autoplay_interval_ms: u64,
    /// Horizontal spacing between two slides on the track.
    pub slide_gap_px: f64,
    pub breakpoints: Vec<Breakpoint>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: 4_000,
            slide_gap_px: 40.0,
            breakpoints: vec![
                Breakpoint {
                    min_width: 1024,
                    items_per_view: 3,
                },
                Breakpoint {
                    min_width: 768,
                    items_per_view: 2,
                },
            ],
        }
    }
}

impl CarouselConfig {
    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }

    /// Number of slides visible at `width`. Falls back to a single slide below
    /// the narrowest breakpoint.
    pub fn items_per_view(&self, width: u32) -> usize {
        self.breakpoints
            .iter()
            .filter(|bp| width >= bp.min_width)
            .max_by_key(|bp| bp.min_width)
            .map_or(1, |bp| bp.items_per_view)
    }

    fn validate(&self) -> Result<()> {
        if self.autoplay_interval_ms == 0 {
            return Err(PageError::config("carousel.autoplay_interval_ms must be positive"));
        }
        if !self.slide_gap_px.is_finite() || self.slide_gap_px < 0.0 {
            return Err(PageError::config(
                "carousel.slide_gap_px must be a non-negative number",
            ));
        }
        if let Some(bp) = self.breakpoints.iter().find(|bp| bp.items_per_view == 0) {
            return Err(PageError::config(format!(
                "breakpoint at {}px shows no slides",
                bp.min_width
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreloaderConfig {
    /// Shortest time the preloader stays on screen, even if the page is ready.
    pub min_display_ms: u64,
    pub fade_out_ms: u64,
}

impl Default for PreloaderConfig {
    fn default() -> Self {
        Self {
            min_display_ms: 3_000,
            fade_out_ms: 500,
        }
    }
}

impl PreloaderConfig {
    pub fn min_display(&self) -> Duration {
        Duration::from_millis(self.min_display_ms)
    }

    pub fn fade_out(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    pub scroll_threshold_px: f64,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            scroll_threshold_px: 50.0,
        }
    }
}

impl NavbarConfig {
    fn validate(&self) -> Result<()> {
        if !self.scroll_threshold_px.is_finite() {
            return Err(PageError::config(
                "navbar.scroll_threshold_px must be a finite number",
            ));
        }
        Ok(())
    }
}

/// Messaging redirect used by the contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// International number without `+` or separators, e.g. `584246018457`.
    pub phone_number: String,
    pub site_name: String,
    pub missing_fields_notice: String,
    pub confirmation_notice: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            phone_number: "584246018457".to_string(),
            site_name: "AS.Desarrolladores".to_string(),
            missing_fields_notice: "Please fill in the required fields: name and message."
                .to_string(),
            confirmation_notice:
                "Thanks for your message! You will be redirected to WhatsApp to finish sending it."
                    .to_string(),
        }
    }
}

impl ContactConfig {
    /// The number must be bare digits so it stays a single path segment.
    pub fn validate(&self) -> Result<()> {
        if self.phone_number.is_empty() || !self.phone_number.chars().all(|c| c.is_ascii_digit())
        {
            return Err(PageError::config(format!(
                "contact.phone_number `{}` must be digits only",
                self.phone_number
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_layout() {
        let config = AppConfig::default();
        assert_eq!(config.carousel.autoplay_interval(), Duration::from_millis(4_000));
        assert_eq!(config.carousel.slide_gap_px, 40.0);
        assert_eq!(config.navbar.scroll_threshold_px, 50.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn items_per_view_follows_breakpoints() {
        let carousel = CarouselConfig::default();
        assert_eq!(carousel.items_per_view(1200), 3);
        assert_eq!(carousel.items_per_view(1024), 3);
        assert_eq!(carousel.items_per_view(800), 2);
        assert_eq!(carousel.items_per_view(767), 1);
        assert_eq!(carousel.items_per_view(500), 1);
    }

    #[test]
    fn breakpoint_order_does_not_matter() {
        let carousel = CarouselConfig {
            breakpoints: vec![
                Breakpoint {
                    min_width: 600,
                    items_per_view: 2,
                },
                Breakpoint {
                    min_width: 1400,
                    items_per_view: 4,
                },
            ],
            ..CarouselConfig::default()
        };
        assert_eq!(carousel.items_per_view(1500), 4);
        assert_eq!(carousel.items_per_view(900), 2);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = AppConfig::from_json(r#"{ "carousel": { "autoplay_interval_ms": 2500 } }"#)
            .unwrap();
        assert_eq!(config.carousel.autoplay_interval_ms, 2_500);
        assert_eq!(config.carousel.slide_gap_px, 40.0);
        assert_eq!(config.preloader, PreloaderConfig::default());
    }

    #[test]
    fn rejects_zero_interval() {
        let err = AppConfig::from_json(r#"{ "carousel": { "autoplay_interval_ms": 0 } }"#)
            .unwrap_err();
        assert!(matches!(err, PageError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_non_finite_navbar_threshold() {
        let mut config = AppConfig::default();
        config.navbar.scroll_threshold_px = f64::NAN;
        assert!(matches!(config.validate(), Err(PageError::InvalidConfig(_))));

        config.navbar.scroll_threshold_px = f64::INFINITY;
        let err = config.validate().unwrap_err();
        assert!(format!("{err}").contains("scroll_threshold_px"));
    }

    #[test]
    fn rejects_formatted_phone_number() {
        let err = AppConfig::from_json(r#"{ "contact": { "phone_number": "+58 424" } }"#)
            .unwrap_err();
        assert!(format!("{err}").contains("+58 424"));
    }
}
