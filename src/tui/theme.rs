//! Light/dark palette and its persisted preference.

use ratatui::style::Color;
use tracing::{instrument, warn};

use crate::store::{KeyValueStore, StoreError, THEME_KEY};

/// Colors used to draw the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Whether this is the dark palette.
    pub dark: bool,
    /// Text and borders.
    pub foreground: Color,
    /// Mark X.
    pub x: Color,
    /// Mark O.
    pub o: Color,
    /// Winning line background.
    pub highlight: Color,
    /// Empty-cell hints and separators.
    pub muted: Color,
}

impl Theme {
    /// Palette for the given preference.
    pub fn new(dark: bool) -> Self {
        if dark {
            Self {
                dark,
                foreground: Color::Gray,
                x: Color::LightCyan,
                o: Color::LightMagenta,
                highlight: Color::Green,
                muted: Color::DarkGray,
            }
        } else {
            Self {
                dark,
                foreground: Color::Black,
                x: Color::Blue,
                o: Color::Red,
                highlight: Color::LightGreen,
                muted: Color::Gray,
            }
        }
    }
}

/// Reads the dark-mode preference. Anything but `"true"` is light mode.
#[instrument(skip(store))]
pub fn load_dark_mode(store: &impl KeyValueStore) -> bool {
    match store.get(THEME_KEY) {
        Ok(value) => value.as_deref() == Some("true"),
        Err(e) => {
            warn!(error = %e, "Failed to read theme preference");
            false
        }
    }
}

/// Persists the dark-mode preference.
///
/// # Errors
///
/// Returns [`StoreError`] if the store write fails.
#[instrument(skip(store))]
pub fn save_dark_mode(store: &mut impl KeyValueStore, dark: bool) -> Result<(), StoreError> {
    store.set(THEME_KEY, if dark { "true" } else { "false" })
}
