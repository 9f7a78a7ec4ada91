//! Session configuration: the values a session starts from.
//!
//! Nothing here is persisted. The CLI overrides fields of
//! `SessionConfig::default()`.

use std::path::PathBuf;
use std::time::Duration;

use crate::color::{Rgb, parse_hex};
use crate::compositor::RenderMode;
use crate::error::AppError;
use crate::fonts::FontCatalog;

pub const DEFAULT_TEXT: &str = "glam dm";
pub const DEFAULT_START_HEX: &str = "#8A2BE2";
pub const DEFAULT_END_HEX: &str = "#00FFFF";

/// Blue violet.
pub const DEFAULT_START: Rgb = Rgb::new(138, 43, 226);
/// Cyan.
pub const DEFAULT_END: Rgb = Rgb::new(0, 255, 255);

/// Degrees of hue advanced per tick.
pub const DEFAULT_STEP_DEG: f64 = 3.0;
pub const MIN_STEP_DEG: f64 = 0.5;
pub const MAX_STEP_DEG: f64 = 30.0;
/// Change applied by one speed-up / slow-down.
pub const STEP_INCREMENT_DEG: f64 = 0.5;

/// ~16 frames per second.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(60);

/// Initial session values.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Initial banner text.
    pub text: String,
    /// Initial start-color field text.
    pub start_hex: String,
    /// Initial end-color field text.
    pub end_hex: String,
    /// Font catalog to cycle through.
    pub catalog: FontCatalog,
    /// Index into `catalog`.
    pub font_index: usize,
    pub mode: RenderMode,
    pub animate: bool,
    /// Hue degrees per tick; clamped into [MIN_STEP_DEG, MAX_STEP_DEG].
    pub step_deg: f64,
    /// Time between animation ticks.
    pub interval: Duration,
    /// Extra font directories searched before the detected ones.
    pub font_dirs: Vec<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            text: DEFAULT_TEXT.to_string(),
            start_hex: DEFAULT_START_HEX.to_string(),
            end_hex: DEFAULT_END_HEX.to_string(),
            catalog: FontCatalog::builtin(),
            font_index: 0,
            mode: RenderMode::Glyph,
            animate: true,
            step_deg: DEFAULT_STEP_DEG,
            interval: DEFAULT_INTERVAL,
            font_dirs: Vec::new(),
        }
    }
}

/// Clamp a per-tick step into the allowed range.
pub fn clamp_step(step_deg: f64) -> f64 {
    if step_deg.is_nan() {
        return DEFAULT_STEP_DEG;
    }
    step_deg.clamp(MIN_STEP_DEG, MAX_STEP_DEG)
}

impl SessionConfig {
    /// Select a font by catalog name.
    ///
    /// # Errors
    /// Returns `UnknownFont` if the catalog has no such entry.
    pub fn with_font(mut self, name: &str) -> Result<Self, AppError> {
        self.font_index = self
            .catalog
            .position(name)
            .ok_or_else(|| AppError::UnknownFont(name.to_string()))?;
        Ok(self)
    }

    /// Start color, which must be valid hex.
    ///
    /// # Errors
    /// Returns `InvalidColor` if `start_hex` does not parse.
    pub fn start_color(&self) -> Result<Rgb, AppError> {
        parse_hex(&self.start_hex).ok_or_else(|| AppError::InvalidColor(self.start_hex.clone()))
    }

    /// End color, which must be valid hex.
    ///
    /// # Errors
    /// Returns `InvalidColor` if `end_hex` does not parse.
    pub fn end_color(&self) -> Result<Rgb, AppError> {
        parse_hex(&self.end_hex).ok_or_else(|| AppError::InvalidColor(self.end_hex.clone()))
    }

    /// Check everything the command line can get wrong.
    ///
    /// # Errors
    /// Returns the first invalid color.
    pub fn validate(&self) -> Result<(), AppError> {
        self.start_color()?;
        self.end_color()?;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = SessionConfig::default();
        assert_eq!(config.text, "glam dm");
        assert_eq!(config.start_color().unwrap(), DEFAULT_START);
        assert_eq!(config.end_color().unwrap(), DEFAULT_END);
        assert_eq!(config.font_index, 0);
        assert_eq!(config.mode, RenderMode::Glyph);
        assert!(config.animate);
        assert_eq!(config.step_deg, 3.0);
        assert_eq!(config.interval, Duration::from_millis(60));
    }

    #[test]
    fn with_font_selects_by_name() {
        let config = SessionConfig::default().with_font("slant").unwrap();
        assert_eq!(config.catalog.name(config.font_index), "slant");
    }

    #[test]
    fn with_font_rejects_unknown() {
        let err = SessionConfig::default().with_font("comic-sans").unwrap_err();
        assert!(matches!(err, AppError::UnknownFont(_)));
    }

    #[test]
    fn validate_rejects_bad_colors() {
        let config = SessionConfig {
            end_hex: "cyan".into(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AppError::InvalidColor(s)) if s == "cyan"));
    }

    #[test]
    fn step_clamps() {
        assert_eq!(clamp_step(0.0), MIN_STEP_DEG);
        assert_eq!(clamp_step(99.0), MAX_STEP_DEG);
        assert_eq!(clamp_step(7.5), 7.5);
        assert_eq!(clamp_step(f64::NAN), DEFAULT_STEP_DEG);
    }
}
