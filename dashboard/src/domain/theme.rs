//! Light/dark colour scheme preference.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::ports::{KeyValueStore, KeyValueStoreError};

/// Storage key for the theme preference.
pub const THEME_KEY: &str = "theme";

/// Colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background.
    #[default]
    Light,
    /// Dark background.
    Dark,
}

impl Theme {
    /// Stored representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when parsing an unknown theme name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme `{0}`; expected `light` or `dark`")]
pub struct ParseThemeError(String);

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ParseThemeError(other.to_owned())),
        }
    }
}

/// Theme preference backed by durable storage.
pub struct ThemeStore {
    storage: Arc<dyn KeyValueStore>,
    theme: Theme,
}

impl ThemeStore {
    /// Load the stored theme, falling back to `system_default` when the key is
    /// absent, unreadable, or holds anything but `light`/`dark`.
    pub fn init(storage: Arc<dyn KeyValueStore>, system_default: Theme) -> Self {
        let theme = match storage.get(THEME_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or(system_default),
            Ok(None) => system_default,
            Err(error) => {
                warn!(error = %error, "theme storage unreadable; using system default");
                system_default
            }
        };
        Self { storage, theme }
    }

    /// Active theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Persist and activate `theme`.
    pub fn set_theme(&mut self, theme: Theme) -> Result<(), KeyValueStoreError> {
        self.storage.set(THEME_KEY, theme.as_str())?;
        self.theme = theme;
        Ok(())
    }

    /// Switch to the other theme and return it.
    pub fn toggle(&mut self) -> Result<Theme, KeyValueStoreError> {
        let next = self.theme.toggled();
        self.set_theme(next)?;
        Ok(next)
    }
}
