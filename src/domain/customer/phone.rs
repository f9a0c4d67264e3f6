//! Phone number value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

const MIN_DIGITS: usize = 8;
const MAX_DIGITS: usize = 15;

/// A dialable phone number in `+<digits>` form.
///
/// Input may contain spaces, dashes, dots and parentheses. A leading `00`
/// international prefix is rewritten to `+`; numbers without any prefix are
/// assumed to already carry their country code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("phone_number"));
        }

        let mut cleaned = String::with_capacity(trimmed.len());
        for (i, c) in trimmed.chars().enumerate() {
            match c {
                '0'..='9' => cleaned.push(c),
                '+' if i == 0 => cleaned.push(c),
                ' ' | '-' | '.' | '(' | ')' => {}
                other => {
                    return Err(ValidationError::invalid_format(
                        "phone_number",
                        format!("unexpected character '{}'", other),
                    ))
                }
            }
        }

        let digits = if let Some(rest) = cleaned.strip_prefix('+') {
            rest.to_string()
        } else if let Some(rest) = cleaned.strip_prefix("00") {
            rest.to_string()
        } else {
            cleaned
        };

        if digits.len() < MIN_DIGITS || digits.len() > MAX_DIGITS {
            return Err(ValidationError::invalid_format(
                "phone_number",
                format!(
                    "expected {} to {} digits, got {}",
                    MIN_DIGITS,
                    MAX_DIGITS,
                    digits.len()
                ),
            ));
        }

        Ok(Self(format!("+{}", digits)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PhoneNumber::parse(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_formatting_characters() {
        let phone = PhoneNumber::parse("+1 (415) 555-0100").unwrap();
        assert_eq!(phone.as_str(), "+14155550100");
    }

    #[test]
    fn rewrites_double_zero_prefix() {
        let phone = PhoneNumber::parse("0044 20 7946 0958").unwrap();
        assert_eq!(phone.as_str(), "+442079460958");
    }

    #[test]
    fn adds_plus_to_bare_digits() {
        let phone = PhoneNumber::parse("14155550100").unwrap();
        assert_eq!(phone.as_str(), "+14155550100");
    }

    #[test]
    fn rejects_letters() {
        assert!(PhoneNumber::parse("+1 415 CALL NOW").is_err());
    }

    #[test]
    fn rejects_plus_in_the_middle() {
        assert!(PhoneNumber::parse("1+4155550100").is_err());
    }

    #[test]
    fn rejects_too_short_and_too_long() {
        assert!(PhoneNumber::parse("+1234567").is_err());
        assert!(PhoneNumber::parse("+1234567890123456").is_err());
    }

    #[test]
    fn rejects_blank() {
        assert_eq!(
            PhoneNumber::parse("   ").unwrap_err(),
            ValidationError::empty_field("phone_number")
        );
    }

    #[test]
    fn deserializes_with_validation() {
        let phone: PhoneNumber = serde_json::from_str("\"+44 20 7946 0958\"").unwrap();
        assert_eq!(phone.as_str(), "+442079460958");
        assert!(serde_json::from_str::<PhoneNumber>("\"12\"").is_err());
    }
}
