//! Persisted user preferences.
pub mod theme;

pub use theme::{
    load_preferences, load_preferences_or_initial, preferences_path, save_preferences, Preferences,
    Theme,
};
