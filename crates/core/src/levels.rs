//! Priority and urgency levels shared by tasks.
//!
//! Both fields use the same three-step scale and the same defaulting rule:
//! an absent or empty value means `Medium`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A three-step Low/Medium/High scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Level {
    Low,
    #[default]
    Medium,
    High,
}

impl Level {
    /// Every level, lowest first.
    pub const ALL: [Level; 3] = [Level::Low, Level::Medium, Level::High];

    /// The wire and storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Low => "Low",
            Level::Medium => "Medium",
            Level::High => "High",
        }
    }

    /// Exact-match parse of the stored representation.
    pub fn parse(raw: &str) -> Option<Level> {
        Level::ALL.into_iter().find(|l| l.as_str() == raw)
    }

    /// Resolve a level supplied on create.
    ///
    /// Absent or blank falls back to `Medium`; an unknown value is rejected.
    pub fn resolve_for_create(field: &str, raw: Option<&str>) -> Result<Level, CoreError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Level::default()),
            Some(value) => Level::parse(value).ok_or_else(|| invalid_level(field, value)),
        }
    }

    /// Resolve a level supplied on a partial update.
    ///
    /// Absent or blank means "leave unchanged" (`Ok(None)`).
    pub fn resolve_for_update(field: &str, raw: Option<&str>) -> Result<Option<Level>, CoreError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => Level::parse(value)
                .map(Some)
                .ok_or_else(|| invalid_level(field, value)),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn invalid_level(field: &str, value: &str) -> CoreError {
    let allowed: Vec<&str> = Level::ALL.iter().map(|l| l.as_str()).collect();
    CoreError::validation(format!(
        "Invalid {field} '{value}'. Must be one of: {}",
        allowed.join(", ")
    ))
}
