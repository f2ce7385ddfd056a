//! Locale tag validation.

use std::str::FromStr;

use unic_langid::LanguageIdentifier;

use crate::error::{TrimmerError, TrimmerResult};

/// Check a locale path segment against the Unicode language identifier grammar.
///
/// A missing or empty locale is accepted: it means "use the default locale".
pub fn validate_locale(locale: Option<&str>) -> TrimmerResult<()> {
    match locale {
        None | Some("") => Ok(()),
        Some(tag) => LanguageIdentifier::from_str(tag)
            .map(|_| ())
            .map_err(|_| TrimmerError::InvalidLocale(tag.to_string())),
    }
}
