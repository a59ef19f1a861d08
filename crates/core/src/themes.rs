//! UI theme names accepted by the settings endpoints.

use crate::error::CoreError;

/// Theme used when a user has never saved a preference.
pub const DEFAULT_THEME: &str = "default";

/// Every theme the client ships a palette for.
pub const AVAILABLE_THEMES: &[&str] = &[
    DEFAULT_THEME,
    "dustyLavender",
    "purple",
    "blue",
    "green",
    "orange",
    "pink",
    "dark",
];

/// Validate a theme name against [`AVAILABLE_THEMES`].
pub fn validate_theme(theme: &str) -> Result<(), CoreError> {
    if AVAILABLE_THEMES.contains(&theme) {
        Ok(())
    } else {
        Err(CoreError::validation(format!(
            "Unknown theme '{theme}'. Must be one of: {}",
            AVAILABLE_THEMES.join(", ")
        )))
    }
}
