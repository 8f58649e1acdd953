//! Customer phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input is empty after trimming.
    #[error("phone number is required")]
    Empty,
    /// The input contains a character outside the permitted set.
    #[error("phone number contains invalid character '{0}'")]
    InvalidCharacter(char),
}

/// A customer contact number.
///
/// Validation is intentionally loose: after trimming, the value must be
/// non-empty and contain only digits, spaces, `+`, `-`, `(` and `)`.
///
/// ## Examples
///
/// ```
/// use hemline_core::Phone;
///
/// assert!(Phone::parse("+1 (555) 010-9999").is_ok());
/// assert!(Phone::parse("  ").is_err());
/// assert!(Phone::parse("call me").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Parse a `Phone` from user input.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or contains a
    /// character other than digits, spaces, `+`, `-`, `(`, `)`.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PhoneError::Empty);
        }

        if let Some(bad) = trimmed.chars().find(|c| !Self::is_allowed(*c)) {
            return Err(PhoneError::InvalidCharacter(bad));
        }

        Ok(Self(trimmed.to_owned()))
    }

    const fn is_allowed(c: char) -> bool {
        c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')')
    }

    /// Returns the number as entered (trimmed).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns only the digits, as required by messaging deep links.
    #[must_use]
    pub fn digits(&self) -> String {
        self.0.chars().filter(char::is_ascii_digit).collect()
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
