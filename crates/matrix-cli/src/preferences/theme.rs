use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable naming the preferences file.
pub const PREFS_ENV: &str = "MATRIX_SOLVER_PREFS";
/// Environment variable standing in for the system dark-mode preference.
pub const PREFERS_DARK_ENV: &str = "MATRIX_SOLVER_PREFERS_DARK";

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Label of the action that switches away from this theme.
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Theme::Light => "\u{1F319} Dark Mode",
            Theme::Dark => "\u{2600}\u{FE0F} Light Mode",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(format!("Unknown theme: {}. Expected light or dark", s)),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Preferences {
    pub theme: Theme,
}

impl Preferences {
    /// Preferences used when nothing has been saved yet.
    pub fn initial(prefers_dark: bool) -> Self {
        Self {
            theme: if prefers_dark { Theme::Dark } else { Theme::Light },
        }
    }
}

/// Whether the environment asks for a dark theme by default.
pub fn system_prefers_dark() -> bool {
    std::env::var(PREFERS_DARK_ENV)
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "dark"))
        .unwrap_or(false)
}

/// Resolve the preferences file: explicit path, then `$MATRIX_SOLVER_PREFS`,
/// then `$HOME/.matrix-solver/preferences.json`.
pub fn preferences_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(PREFS_ENV) {
        return Ok(PathBuf::from(path));
    }
    let home = std::env::var_os("HOME")
        .context("Cannot locate preferences: pass --prefs or set MATRIX_SOLVER_PREFS or HOME")?;
    Ok(PathBuf::from(home)
        .join(".matrix-solver")
        .join("preferences.json"))
}

/// Load saved preferences; a missing file yields `Preferences::initial`.
pub fn load_preferences<P: AsRef<Path>>(path: P, prefers_dark: bool) -> Result<Preferences> {
    let path = path.as_ref();
    if !path.exists() {
        log::debug!("No preferences at {}; using defaults", path.display());
        return Ok(Preferences::initial(prefers_dark));
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read preferences: {}", path.display()))?;
    let prefs: Preferences = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse preferences: {}", path.display()))?;
    Ok(prefs)
}

/// Like `load_preferences`, but an unreadable or unrecognised file falls back to
/// `Preferences::initial` with a warning.
pub fn load_preferences_or_initial<P: AsRef<Path>>(path: P, prefers_dark: bool) -> Preferences {
    let path = path.as_ref();
    match load_preferences(path, prefers_dark) {
        Ok(prefs) => prefs,
        Err(e) => {
            log::warn!(
                "[MatrixSolver::Theme] Ignoring saved preferences: {:#}",
                e
            );
            Preferences::initial(prefers_dark)
        }
    }
}

/// Write preferences as pretty JSON, creating parent directories as needed.
pub fn save_preferences<P: AsRef<Path>>(path: P, prefs: &Preferences) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(prefs)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write preferences: {}", path.display()))?;
    Ok(())
}
