//! Dark/light theme preference.

use std::fmt;
use std::sync::Arc;

use hemline_client::storage::{Storage, StorageError, keys};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

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
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
        })
    }
}

/// The persisted theme choice.
pub struct ThemePreference {
    theme: Theme,
    storage: Arc<dyn Storage>,
}

impl fmt::Debug for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemePreference")
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

impl ThemePreference {
    /// Read the stored preference. Anything other than `"true"` is light.
    #[must_use]
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let theme = match storage.get(keys::DARK_MODE) {
            Ok(Some(raw)) if raw.trim() == "true" => Theme::Dark,
            Ok(_) => Theme::Light,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read theme preference");
                Theme::Light
            }
        };
        Self { theme, storage }
    }

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Set and persist the theme.
    ///
    /// # Errors
    ///
    /// Returns an error if the preference cannot be written. The in-memory
    /// theme is updated regardless.
    pub fn set(&mut self, theme: Theme) -> Result<(), StorageError> {
        self.theme = theme;
        self.storage
            .set(keys::DARK_MODE, if theme.is_dark() { "true" } else { "false" })
    }

    /// Flip between light and dark.
    ///
    /// # Errors
    ///
    /// Returns an error if the preference cannot be written.
    pub fn toggle(&mut self) -> Result<Theme, StorageError> {
        let next = self.theme.toggled();
        self.set(next)?;
        Ok(next)
    }
}
