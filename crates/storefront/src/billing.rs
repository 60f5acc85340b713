//! Billing detail validation.
//!
//! Each field has an independent predicate over its trimmed text; nothing
//! is normalized or corrected. [`BillingDetails::validate`] runs them in
//! form order (name, email, address, phone) and stops at the first failure.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use cornershop_core::Email;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s']{2,50}$").expect("valid name regex"));

// ASCII digits only; `\d` would also admit other scripts' digits.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{7,15}$").expect("valid phone regex"));

/// Minimum address length in characters.
pub const MIN_ADDRESS_LENGTH: usize = 5;

/// Why billing details were rejected.
///
/// Messages are meant to be shown to the shopper as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BillingError {
    #[error("Please fill in all required fields.")]
    MissingFields,
    #[error("Please enter a valid name.")]
    InvalidName,
    #[error("Please enter a valid email.")]
    InvalidEmail,
    #[error("Please enter a valid address.")]
    InvalidAddress,
    #[error("Please enter a valid phone number.")]
    InvalidPhone,
}

/// Letters, spaces, and apostrophes; 2 to 50 characters.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

/// One @, no whitespace, and a dot inside the domain.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    Email::parse(email).is_ok()
}

/// 7 to 15 digits and nothing else.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// At least five characters.
#[must_use]
pub fn is_valid_address(address: &str) -> bool {
    address.chars().count() >= MIN_ADDRESS_LENGTH
}

/// Billing form fields as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BillingDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
}

/// Billing details that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBilling {
    pub name: String,
    pub email: Email,
    pub address: String,
    pub phone: String,
}

impl BillingDetails {
    /// Validate trimmed fields in form order.
    ///
    /// # Errors
    ///
    /// Returns the first rule that failed.
    pub fn validate(&self) -> Result<ValidBilling, BillingError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let address = self.address.trim();
        let phone = self.phone.trim();

        if [name, email, address, phone].iter().any(|f| f.is_empty()) {
            return Err(BillingError::MissingFields);
        }

        if !is_valid_name(name) {
            return Err(BillingError::InvalidName);
        }
        let email = Email::parse(email).map_err(|_| BillingError::InvalidEmail)?;
        if !is_valid_address(address) {
            return Err(BillingError::InvalidAddress);
        }
        if !is_valid_phone(phone) {
            return Err(BillingError::InvalidPhone);
        }

        Ok(ValidBilling {
            name: name.to_string(),
            email,
            address: address.to_string(),
            phone: phone.to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn valid_details() -> BillingDetails {
        BillingDetails {
            name: "Ann".to_string(),
            email: "a@b.com".to_string(),
            address: "12 Main St".to_string(),
            phone: "1234567".to_string(),
        }
    }

    #[test]
    fn test_name_rules() {
        assert!(is_valid_name("Ann"));
        assert!(is_valid_name("Ngozi O'Neil"));
        assert!(!is_valid_name("A!"));
        assert!(!is_valid_name("A"));
        assert!(!is_valid_name(&"a".repeat(51)));
        assert!(!is_valid_name("R2D2"));
    }

    #[test]
    fn test_email_rules() {
        assert!(is_valid_email("a@b.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a @b.com"));
        assert!(is_valid_email(&format!("{}@example.com", "x".repeat(300))));
    }

    #[test]
    fn test_phone_rules() {
        assert!(is_valid_phone("1234567"));
        assert!(is_valid_phone("080312345678901"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("0803123456789012"));
        assert!(!is_valid_phone("+2348031234567"));
        assert!(!is_valid_phone("١٢٣٤٥٦٧"));
    }

    #[test]
    fn test_address_rules() {
        assert!(is_valid_address("12 Main St"));
        assert!(!is_valid_address("abcd"));
    }

    #[test]
    fn test_minimal_valid_details_pass() {
        let valid = valid_details().validate().unwrap();
        assert_eq!(valid.email.as_str(), "a@b.com");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let details = BillingDetails {
            name: "  Ann ".to_string(),
            email: " a@b.com\n".to_string(),
            address: " 12 Main St ".to_string(),
            phone: " 1234567 ".to_string(),
        };
        let valid = details.validate().unwrap();
        assert_eq!(valid.name, "Ann");
        assert_eq!(valid.phone, "1234567");
    }

    #[test]
    fn test_missing_field_reported_first() {
        let details = BillingDetails {
            name: "A!".to_string(),
            phone: "   ".to_string(),
            ..valid_details()
        };
        assert_eq!(details.validate(), Err(BillingError::MissingFields));
    }

    #[test]
    fn test_first_failure_short_circuits_in_form_order() {
        let all_bad = BillingDetails {
            name: "A!".to_string(),
            email: "a@b".to_string(),
            address: "abcd".to_string(),
            phone: "12345".to_string(),
        };
        assert_eq!(all_bad.validate(), Err(BillingError::InvalidName));

        let details = BillingDetails {
            name: "Ann".to_string(),
            ..all_bad.clone()
        };
        assert_eq!(details.validate(), Err(BillingError::InvalidEmail));

        let details = BillingDetails {
            name: "Ann".to_string(),
            email: "a@b.com".to_string(),
            ..all_bad.clone()
        };
        assert_eq!(details.validate(), Err(BillingError::InvalidAddress));

        let details = BillingDetails {
            phone: "12345".to_string(),
            ..valid_details()
        };
        assert_eq!(details.validate(), Err(BillingError::InvalidPhone));
    }
}
