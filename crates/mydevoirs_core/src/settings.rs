//! Application settings consumed by the agenda core.
//!
//! # Responsibility
//! - Carry locale, shown weekdays and the default matiere for new items.
//! - Load settings from a JSON file, with an environment override for the
//!   path and sensible defaults when nothing is configured.
//!
//! # Invariants
//! - Missing fields fall back to defaults; an unreadable or unparseable
//!   file is an error, never a silent default.

use crate::agenda::grid::ShownDays;
use crate::agenda::header::locale_for_tag;
use chrono::Locale;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Environment variable pointing at the settings JSON file.
pub const SETTINGS_PATH_ENV: &str = "MYDEVOIRS_SETTINGS";

pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cannot read settings file: {err}"),
            Self::Parse(err) => write!(f, "cannot parse settings file: {err}"),
        }
    }
}

impl Error for SettingsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Agenda configuration supplied by the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Locale tag for header formatting ("fr", "en", ...).
    pub locale: String,
    /// Which weekdays the carousel shows, Monday-first.
    pub shown_days: ShownDays,
    /// Matiere assigned to freshly created items until the user picks one.
    pub default_matiere: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: "fr".to_owned(),
            shown_days: [true; 7],
            default_matiere: "Divers".to_owned(),
        }
    }
}

impl Settings {
    /// Resolved chrono locale for header formatting.
    pub fn locale(&self) -> Locale {
        locale_for_tag(&self.locale)
    }

    /// Reads settings from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Loads settings from the path in `MYDEVOIRS_SETTINGS`, or defaults
    /// when the variable is unset.
    pub fn load() -> SettingsResult<Self> {
        match std::env::var(SETTINGS_PATH_ENV) {
            Ok(path) => Self::from_file(path),
            Err(_) => Ok(Self::default()),
        }
    }
}
