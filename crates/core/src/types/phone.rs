//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input does not match either accepted format.
    #[error("phone number must be entered in the format '+999999999' or '999-999-9999'")]
    InvalidFormat,
}

/// A phone number.
///
/// Two shapes are accepted:
///
/// - International: `+` followed by 1-15 digits (e.g., `+1234567890`)
/// - Dashed: `NNN-NNN-NNNN` (e.g., `123-456-7890`)
///
/// ## Examples
///
/// ```
/// use clementine_core::Phone;
///
/// assert!(Phone::parse("+1234567890").is_ok());
/// assert!(Phone::parse("123-456-7890").is_ok());
///
/// assert!(Phone::parse("").is_err());
/// assert!(Phone::parse("12345").is_err());
/// assert!(Phone::parse("+").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Maximum number of digits after the `+` in the international form.
    pub const MAX_DIGITS: usize = 15;

    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or matches neither the
    /// `+` + digits form nor the `NNN-NNN-NNNN` form.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        if is_international(s) || is_dashed(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(PhoneError::InvalidFormat)
        }
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// `+` followed by 1-15 digits.
fn is_international(s: &str) -> bool {
    s.strip_prefix('+').is_some_and(|digits| {
        !digits.is_empty()
            && digits.len() <= Phone::MAX_DIGITS
            && digits.chars().all(|c| c.is_ascii_digit())
    })
}

/// Exactly `NNN-NNN-NNNN`.
fn is_dashed(s: &str) -> bool {
    let mut groups = s.split('-');
    let ok = [3usize, 3, 4].into_iter().all(|len| {
        groups
            .next()
            .is_some_and(|g| g.len() == len && g.chars().all(|c| c.is_ascii_digit()))
    });
    ok && groups.next().is_none()
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
